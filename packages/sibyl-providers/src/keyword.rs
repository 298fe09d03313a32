use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use sibyl_domain::fusion::KeywordRow;

pub async fn search(
	cfg: &sibyl_config::ProviderConfig,
	query: &str,
	limit: u32,
) -> Result<Vec<KeywordRow>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"query": query,
		"limit": limit,
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

fn parse_search_response(json: Value) -> Result<Vec<KeywordRow>> {
	let raw_rows = match &json {
		Value::Array(rows) => rows.as_slice(),
		Value::Object(_) => json
			.get("rows")
			.and_then(Value::as_array)
			.map(Vec::as_slice)
			.ok_or_else(|| eyre::eyre!("Keyword response is missing a rows array."))?,
		_ => return Err(eyre::eyre!("Keyword response is not a result list.")),
	};
	let mut rows = Vec::with_capacity(raw_rows.len());

	// Row order is the upstream ranking; it must be preserved.
	for item in raw_rows {
		let document_id = item
			.get("document_id")
			.and_then(Value::as_str)
			.ok_or_else(|| eyre::eyre!("Keyword row is missing document_id."))?;

		rows.push(KeywordRow {
			document_id: document_id.to_string(),
			node_id: item.get("node_id").and_then(Value::as_str).map(str::to_string),
			text: item.get("text").and_then(Value::as_str).map(str::to_string),
		});
	}

	Ok(rows)
}
