use tracing::warn;

use sibyl_domain::{context, fallback, fusion};
use sibyl_providers::vector::{ChunkContext, VectorSearchResponse};

use crate::{ServiceError, ServiceResult, SibylService};

const SYSTEM_PROMPT: &str = "Answer the question using only the provided context. Cite which \
                             parts of the context you used. If the context does not contain the \
                             answer, say you are unsure.";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerRequest {
	pub question: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerResponse {
	pub trace_id: uuid::Uuid,
	pub answer: String,
	pub context_text: String,
	pub candidate_docs: Vec<fusion::Candidate>,
}

impl SibylService {
	pub async fn answer_question(&self, req: AnswerRequest) -> ServiceResult<AnswerResponse> {
		let question = req.question.trim();

		if question.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "question is required.".to_string(),
			});
		}

		let trace_id = uuid::Uuid::new_v4();
		let chunk_context = ChunkContext {
			before: self.cfg.search.chunk_before,
			after: self.cfg.search.chunk_after,
		};
		let vector_call = self.providers.vector_search.search(
			&self.cfg.providers.vector_search,
			&self.cfg.search.namespace,
			question,
			self.cfg.search.vector_limit,
			chunk_context,
		);
		let keyword_call = self.providers.keyword_search.search(
			&self.cfg.providers.keyword_search,
			question,
			self.cfg.search.keyword_limit,
		);
		let (vector_result, keyword_result) = tokio::join!(vector_call, keyword_call);

		// Each channel has its own failure boundary; one failing must not abort the other.
		let vector = match vector_result {
			Ok(response) => response,
			Err(err) => {
				warn!(
					error = %err,
					%trace_id,
					"Vector search failed; continuing with keyword results."
				);

				VectorSearchResponse::default()
			},
		};
		let rows = match keyword_result {
			Ok(rows) => rows,
			Err(err) => {
				warn!(
					error = %err,
					%trace_id,
					"Keyword search failed; continuing with vector results."
				);

				Vec::new()
			},
		};

		let mut candidates = fusion::fuse(&vector.results, &vector.entries, &rows);
		let context_text = context::assemble_context(&vector.text, &rows);

		self.hydrate_titles(&mut candidates).await;

		let answer = self.synthesize_answer(question, &context_text, &candidates).await;

		Ok(AnswerResponse { trace_id, answer, context_text, candidate_docs: candidates })
	}

	/// Resolve authoritative titles from the document store. Lookups run concurrently and
	/// fail independently; a candidate whose lookup fails keeps its placeholder title.
	async fn hydrate_titles(&self, candidates: &mut [fusion::Candidate]) {
		let lookups = candidates.iter().map(|candidate| {
			self.providers
				.document_store
				.get_by_id(&self.cfg.providers.document_store, &candidate.document_id)
		});
		let resolved = futures::future::join_all(lookups).await;

		for (candidate, lookup) in candidates.iter_mut().zip(resolved) {
			match lookup {
				Ok(Some(document)) => {
					let title = document.title.trim();

					if !title.is_empty() {
						candidate.title = title.to_string();
					}
				},
				Ok(None) => {},
				Err(err) => {
					warn!(
						error = %err,
						document_id = %candidate.document_id,
						"Title lookup failed; keeping placeholder title."
					);
				},
			}
		}
	}

	async fn synthesize_answer(
		&self,
		question: &str,
		context_text: &str,
		candidates: &[fusion::Candidate],
	) -> String {
		if context_text.is_empty() {
			return fallback::fallback_answer(false, candidates);
		}

		let context = cap_chars(context_text, self.cfg.answer.max_context_chars as usize);
		let user_prompt = format!("Context:\n{context}\n\nQuestion:\n{question}");

		match self
			.providers
			.generation
			.complete(&self.cfg.providers.generation, SYSTEM_PROMPT, &user_prompt)
			.await
		{
			Ok(answer) => answer,
			Err(err) => {
				warn!(error = %err, "Generation failed; returning the templated fallback answer.");

				fallback::fallback_answer(true, candidates)
			},
		}
	}
}

fn cap_chars(text: &str, budget: usize) -> String {
	if text.chars().count() <= budget {
		return text.to_string();
	}

	text.chars().take(budget).collect()
}
