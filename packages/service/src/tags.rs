use crate::error::{ServiceError, ServiceResult};

/// Separator used when tags are typed or displayed as a single line
pub const TAGS_SEPARATOR: &str = ",";

/// Parse a comma-separated tag line typed by the user.
///
/// A blank line means "no tags". Any empty token (for example a trailing
/// comma) is rejected rather than silently dropped.
pub fn extract_tags(input: &str) -> ServiceResult<Vec<String>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<String> = input
        .split(TAGS_SEPARATOR)
        .map(|token| token.trim().to_string())
        .collect();

    normalize_tags(&tokens)
}

/// Trim, reject empty, and collapse duplicates keeping the first occurrence
pub fn normalize_tags(tags: &[String]) -> ServiceResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ServiceError::validation("tag must not be empty string"));
        }
        if !normalized.iter().any(|existing| existing == tag) {
            normalized.push(tag.to_string());
        }
    }
    Ok(normalized)
}
