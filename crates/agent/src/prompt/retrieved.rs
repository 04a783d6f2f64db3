//! The numbered block of retrieved messages shared by every template.

/// Render masked messages as `1. "first"\n2. "second"`.
///
/// Order is preserved and message text is copied as-is; embedded quotes
/// and placeholders are not escaped. An empty slice yields an empty string.
pub fn render_retrieved_block<S: AsRef<str>>(messages: &[S]) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(i, msg)| format!("{}. \"{}\"", i + 1, msg.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
