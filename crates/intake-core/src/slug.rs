//! URL slug generation

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("empty string is not permitted")]
    Empty,

    #[error("slug is empty after removing special characters")]
    NothingLeft,
}

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z\d]+").expect("valid regex"))
}

/// Lowercase `input`, collapse every run of non-alphanumeric characters to
/// a single `-`, and trim leading/trailing dashes.
pub fn slugify(input: &str) -> Result<String, SlugError> {
    if input.is_empty() {
        return Err(SlugError::Empty);
    }

    let lowered = input.to_lowercase();
    let slug = non_alphanumeric()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string();

    if slug.is_empty() {
        return Err(SlugError::NothingLeft);
    }
    Ok(slug)
}
