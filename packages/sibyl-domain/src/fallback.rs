use crate::fusion::Candidate;

/// How many top-ranked candidate titles the degraded answer lists.
pub const FALLBACK_TOP_TITLES: usize = 3;

/// Deterministic answer used when the generation provider is unavailable. Never fails;
/// this is the pipeline's terminal error boundary.
pub fn fallback_answer(has_context: bool, candidates: &[Candidate]) -> String {
	if !has_context {
		return "The answer model is unavailable right now, and no relevant context was \
		        found for this question. Please try again in a few minutes."
			.to_string();
	}

	let mut out = String::from("The answer model is unavailable right now.");
	let titles: Vec<&str> =
		candidates.iter().take(FALLBACK_TOP_TITLES).map(|candidate| candidate.title.as_str()).collect();

	if !titles.is_empty() {
		out.push_str(" The most relevant documents for this question are:\n");

		for title in titles {
			out.push_str("- ");
			out.push_str(title);
			out.push('\n');
		}
	}

	out.push_str("\nPlease try again in a few minutes.");

	out
}
