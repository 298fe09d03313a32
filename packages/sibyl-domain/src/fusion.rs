use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Character budget for candidate snippets; longer texts are truncated with an ellipsis.
pub const SNIPPET_MAX_CHARS: usize = 320;
/// Synthetic relevance decay for pre-ranked keyword rows: `max(0, 1 - i * 0.15)`.
pub const KEYWORD_DECAY_STEP: f32 = 0.15;

const MAX_HIGHLIGHTS: usize = 3;

#[derive(Debug, Clone)]
pub struct VectorHit {
	pub entry_id: String,
	pub score: f32,
	pub content: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct VectorEntry {
	pub entry_id: String,
	/// Document identifier behind this entry. Hits whose entry carries no key are unusable.
	pub key: Option<String>,
	pub title: Option<String>,
	pub text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct KeywordRow {
	pub document_id: String,
	pub node_id: Option<String>,
	pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
	Vector,
	Keyword,
	Hybrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
	pub document_id: String,
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub snippet: Option<String>,
	pub score: f32,
	pub source: Source,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	pub rank: u32,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub highlights: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub reasons: Vec<String>,
}

/// Merge the two ranked result sets into one deduplicated, provenance-tagged candidate
/// list, sorted by score descending with 1-based ranks.
///
/// Documents seen by both channels are tagged [`Source::Hybrid`] and keep the maximum of
/// the two scores. Ties preserve insertion order, so the vector channel wins exact-score
/// ties against later keyword rows.
pub fn fuse(hits: &[VectorHit], entries: &[VectorEntry], rows: &[KeywordRow]) -> Vec<Candidate> {
	let entries_by_id: HashMap<&str, &VectorEntry> =
		entries.iter().map(|entry| (entry.entry_id.as_str(), entry)).collect();
	let mut candidates: Vec<Candidate> = Vec::new();
	let mut slots: HashMap<String, usize> = HashMap::new();

	for hit in hits {
		let Some(entry) = entries_by_id.get(hit.entry_id.as_str()) else {
			continue;
		};
		let Some(document_id) = entry.key.as_deref().map(str::trim).filter(|key| !key.is_empty())
		else {
			continue;
		};
		let score = hit.score.clamp(0.0, 1.0);

		match slots.get(document_id).copied() {
			Some(slot) => {
				let candidate = &mut candidates[slot];

				candidate.score = candidate.score.max(score);

				if candidate.snippet.is_none() {
					candidate.snippet = vector_snippet(hit, entry);
				}
			},
			None => {
				let title = entry
					.title
					.as_deref()
					.map(str::trim)
					.filter(|title| !title.is_empty())
					.unwrap_or(document_id)
					.to_string();
				let highlights: Vec<String> = hit
					.content
					.iter()
					.map(|text| text.trim())
					.filter(|text| !text.is_empty())
					.take(MAX_HIGHLIGHTS)
					.map(cap_snippet)
					.collect();

				slots.insert(document_id.to_string(), candidates.len());
				candidates.push(Candidate {
					document_id: document_id.to_string(),
					title,
					snippet: vector_snippet(hit, entry),
					score,
					source: Source::Vector,
					node_id: None,
					rank: 0,
					highlights,
					reasons: vec!["semantic match".to_string()],
				});
			},
		}
	}

	for (position, row) in rows.iter().enumerate() {
		let document_id = row.document_id.trim();

		if document_id.is_empty() {
			continue;
		}

		let score = keyword_score(position);
		let text = row.text.as_deref().map(str::trim).filter(|text| !text.is_empty());

		match slots.get(document_id).copied() {
			Some(slot) => {
				let candidate = &mut candidates[slot];

				candidate.score = candidate.score.max(score);

				if candidate.source == Source::Vector {
					candidate.source = Source::Hybrid;
					candidate.reasons.push("keyword match".to_string());
				}
				if candidate.snippet.is_none() {
					candidate.snippet = text.map(cap_snippet);
				}
				if candidate.node_id.is_none() {
					candidate.node_id = row.node_id.clone();
				}
			},
			None => {
				slots.insert(document_id.to_string(), candidates.len());
				candidates.push(Candidate {
					document_id: document_id.to_string(),
					title: document_id.to_string(),
					snippet: text.map(cap_snippet),
					score,
					source: Source::Keyword,
					node_id: row.node_id.clone(),
					rank: 0,
					highlights: Vec::new(),
					reasons: vec!["keyword match".to_string()],
				});
			},
		}
	}

	candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

	for (position, candidate) in candidates.iter_mut().enumerate() {
		candidate.rank = position as u32 + 1;
	}

	candidates
}

pub fn keyword_score(position: usize) -> f32 {
	(1.0 - position as f32 * KEYWORD_DECAY_STEP).max(0.0)
}

fn vector_snippet(hit: &VectorHit, entry: &VectorEntry) -> Option<String> {
	let ranges: Vec<&str> =
		hit.content.iter().map(|text| text.trim()).filter(|text| !text.is_empty()).collect();

	if !ranges.is_empty() {
		return Some(cap_snippet(&ranges.join(" ")));
	}

	entry.text.as_deref().map(str::trim).filter(|text| !text.is_empty()).map(cap_snippet)
}

fn cap_snippet<S: AsRef<str>>(text: S) -> String {
	let trimmed = text.as_ref().trim();

	if trimmed.chars().count() <= SNIPPET_MAX_CHARS {
		return trimmed.to_string();
	}

	let mut out: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();

	out.push('…');

	out
}
