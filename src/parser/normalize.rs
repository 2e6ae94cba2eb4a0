const BYTE_ORDER_MARK: char = '\u{feff}';

/// Trims whitespace and byte order marks from both ends.
pub fn trim_text(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Cleans the text following a recognized label (or a CSV cell) into a field value.
pub fn normalize_field(raw: &str) -> String {
    trim_text(raw).to_string()
}
