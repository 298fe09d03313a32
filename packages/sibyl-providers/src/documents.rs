use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{Client, StatusCode};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct DocumentRecord {
	pub title: String,
}

/// Look up a document's metadata by id. A missing document is `Ok(None)`, not an error;
/// transient failures surface as errors for the caller to swallow per candidate.
pub async fn get_by_id(
	cfg: &sibyl_config::ProviderConfig,
	document_id: &str,
) -> Result<Option<DocumentRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}/{document_id}", cfg.api_base, cfg.path);
	let res = client
		.get(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.send()
		.await?;

	if res.status() == StatusCode::NOT_FOUND {
		return Ok(None);
	}

	let json: Value = res.error_for_status()?.json().await?;

	parse_document_response(json).map(Some)
}

fn parse_document_response(json: Value) -> Result<DocumentRecord> {
	let document = json.get("document").unwrap_or(&json);
	let title = document
		.get("title")
		.and_then(Value::as_str)
		.ok_or_else(|| eyre::eyre!("Document response is missing a title."))?;

	Ok(DocumentRecord { title: title.to_string() })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_a_flat_document() {
		let json = serde_json::json!({ "title": "Runbook" });
		let record = parse_document_response(json).expect("parse failed");

		assert_eq!(record.title, "Runbook");
	}

	#[test]
	fn parses_a_wrapped_document() {
		let json = serde_json::json!({ "document": { "title": "Runbook" } });
		let record = parse_document_response(json).expect("parse failed");

		assert_eq!(record.title, "Runbook");
	}

	#[test]
	fn rejects_documents_without_titles() {
		assert!(parse_document_response(serde_json::json!({ "id": "doc-1" })).is_err());
	}
}
