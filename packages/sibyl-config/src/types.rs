use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub search: Search,
	pub answer: Answer,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Namespace of the vector index queried for semantic matches.
	pub namespace: String,
	pub vector_limit: u32,
	pub keyword_limit: u32,
	pub chunk_before: u32,
	pub chunk_after: u32,
}

#[derive(Debug, Deserialize)]
pub struct Answer {
	pub max_context_chars: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub vector_search: ProviderConfig,
	pub keyword_search: ProviderConfig,
	pub document_store: ProviderConfig,
	pub generation: GenerationProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}
