use crate::fusion::KeywordRow;

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Build the grounding text handed to the generation provider: a semantic section with
/// the vector provider's windowed text and a lexical section with one line per keyword
/// row. Empty sections are omitted; both empty yields an empty string, which routes the
/// caller to the no-context fallback.
pub fn assemble_context(vector_text: &str, rows: &[KeywordRow]) -> String {
	let mut sections = Vec::new();
	let semantic = vector_text.trim();

	if !semantic.is_empty() {
		sections.push(format!("Semantic matches:\n{semantic}"));
	}

	let lexical: Vec<String> = rows
		.iter()
		.filter_map(|row| {
			let text = row.text.as_deref().map(str::trim).filter(|text| !text.is_empty())?;

			Some(format!("[doc {}] {text}", row.document_id))
		})
		.collect();

	if !lexical.is_empty() {
		sections.push(format!("Keyword matches:\n{}", lexical.join("\n")));
	}

	sections.join(SECTION_SEPARATOR)
}
