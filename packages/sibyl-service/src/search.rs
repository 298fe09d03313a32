use std::collections::HashMap;

use sibyl_domain::fusion::VectorEntry;
use sibyl_providers::vector::ChunkContext;

use crate::{ServiceError, ServiceResult, SibylService};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SemanticSearchRequest {
	pub query: String,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SemanticSearchHit {
	pub entry_id: String,
	pub score: f32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub document_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SemanticSearchResponse {
	pub text: String,
	pub hits: Vec<SemanticSearchHit>,
}

impl SibylService {
	/// Raw vector results for callers that want semantic matches without fusion or
	/// synthesis. Unlike the answer pipeline, an upstream failure here is surfaced.
	pub async fn semantic_search(
		&self,
		req: SemanticSearchRequest,
	) -> ServiceResult<SemanticSearchResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(ServiceError::InvalidRequest { message: "query is required.".to_string() });
		}

		let limit = req.limit.unwrap_or(self.cfg.search.vector_limit).max(1);
		let chunk_context = ChunkContext {
			before: self.cfg.search.chunk_before,
			after: self.cfg.search.chunk_after,
		};
		let response = self
			.providers
			.vector_search
			.search(
				&self.cfg.providers.vector_search,
				&self.cfg.search.namespace,
				query,
				limit,
				chunk_context,
			)
			.await?;
		let entries_by_id: HashMap<&str, &VectorEntry> =
			response.entries.iter().map(|entry| (entry.entry_id.as_str(), entry)).collect();
		let hits = response
			.results
			.iter()
			.map(|hit| {
				let entry = entries_by_id.get(hit.entry_id.as_str());

				SemanticSearchHit {
					entry_id: hit.entry_id.clone(),
					score: hit.score,
					document_id: entry.and_then(|entry| entry.key.clone()),
					title: entry.and_then(|entry| entry.title.clone()),
					text: entry.and_then(|entry| entry.text.clone()),
				}
			})
			.collect();

		Ok(SemanticSearchResponse { text: response.text, hits })
	}
}
