use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Single bounded-timeout completion call. Retry and backoff policy belongs to the
/// upstream provider deployment, not here; any failure routes the caller to its
/// fallback answer.
pub async fn complete(
	cfg: &sibyl_config::GenerationProviderConfig,
	system_prompt: &str,
	user_prompt: &str,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "system", "content": system_prompt },
			{ "role": "user", "content": user_prompt },
		],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_response(json)
}

fn parse_completion_response(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(Value::as_array)
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|message| message.get("content"))
		.and_then(Value::as_str)
		.ok_or_else(|| eyre::eyre!("Completion response is missing message content."))?;

	Ok(content.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "The answer." } }
			]
		});
		let content = parse_completion_response(json).expect("parse failed");

		assert_eq!(content, "The answer.");
	}

	#[test]
	fn rejects_empty_choice_lists() {
		assert!(parse_completion_response(serde_json::json!({ "choices": [] })).is_err());
	}
}
