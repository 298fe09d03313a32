use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use sibyl_domain::fusion::{VectorEntry, VectorHit};

#[derive(Debug, Clone, Copy)]
pub struct ChunkContext {
	pub before: u32,
	pub after: u32,
}

#[derive(Debug, Clone, Default)]
pub struct VectorSearchResponse {
	/// Context-windowed text the upstream service assembled around the matched chunks.
	pub text: String,
	pub results: Vec<VectorHit>,
	pub entries: Vec<VectorEntry>,
}

pub async fn search(
	cfg: &sibyl_config::ProviderConfig,
	namespace: &str,
	query: &str,
	limit: u32,
	chunk_context: ChunkContext,
) -> Result<VectorSearchResponse> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"namespace": namespace,
		"query": query,
		"limit": limit,
		"chunk_context": { "before": chunk_context.before, "after": chunk_context.after },
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json)
}

fn parse_search_response(json: Value) -> Result<VectorSearchResponse> {
	let text = json.get("text").and_then(Value::as_str).unwrap_or_default().to_string();
	let mut results = Vec::new();

	for item in json.get("results").and_then(Value::as_array).into_iter().flatten() {
		let entry_id = item
			.get("entry_id")
			.and_then(Value::as_str)
			.ok_or_else(|| eyre::eyre!("Search result is missing entry_id."))?;
		let score = item
			.get("score")
			.and_then(Value::as_f64)
			.ok_or_else(|| eyre::eyre!("Search result is missing a numeric score."))?;
		let content = item
			.get("content")
			.and_then(Value::as_array)
			.map(|ranges| {
				ranges
					.iter()
					.filter_map(|range| range.get("text").and_then(Value::as_str))
					.map(str::to_string)
					.collect()
			})
			.unwrap_or_default();

		results.push(VectorHit { entry_id: entry_id.to_string(), score: score as f32, content });
	}

	let mut entries = Vec::new();

	for item in json.get("entries").and_then(Value::as_array).into_iter().flatten() {
		let entry_id = item
			.get("entry_id")
			.and_then(Value::as_str)
			.ok_or_else(|| eyre::eyre!("Search entry is missing entry_id."))?;

		entries.push(VectorEntry {
			entry_id: entry_id.to_string(),
			key: item.get("key").and_then(Value::as_str).map(str::to_string),
			title: item.get("title").and_then(Value::as_str).map(str::to_string),
			text: item.get("text").and_then(Value::as_str).map(str::to_string),
		});
	}

	Ok(VectorSearchResponse { text, results, entries })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_results_and_entries() {
		let json = serde_json::json!({
			"text": "windowed context",
			"results": [
				{ "entry_id": "e1", "score": 0.75, "content": [{ "text": "range" }] },
				{ "entry_id": "e2", "score": 0.5 }
			],
			"entries": [
				{ "entry_id": "e1", "key": "doc-1", "title": "Doc 1" }
			]
		});
		let parsed = parse_search_response(json).expect("parse failed");

		assert_eq!(parsed.text, "windowed context");
		assert_eq!(parsed.results.len(), 2);
		assert_eq!(parsed.results[0].content, vec!["range"]);
		assert!(parsed.results[1].content.is_empty());
		assert_eq!(parsed.entries[0].key.as_deref(), Some("doc-1"));
		assert_eq!(parsed.entries[0].text, None);
	}

	#[test]
	fn rejects_results_without_scores() {
		let json = serde_json::json!({
			"results": [{ "entry_id": "e1" }]
		});

		assert!(parse_search_response(json).is_err());
	}

	#[test]
	fn tolerates_a_missing_result_set() {
		let parsed =
			parse_search_response(serde_json::json!({ "text": "" })).expect("parse failed");

		assert!(parsed.results.is_empty());
		assert!(parsed.entries.is_empty());
	}
}
