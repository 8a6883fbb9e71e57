use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::{AppError, Result};

lazy_static! {
    static ref NON_ALPHANUMERIC_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen, then strips leading and trailing hyphens. Applying it to
/// its own output returns the same string.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug for a record name; names without a single ASCII letter or digit are rejected
pub fn slug_from_name(name: &str) -> Result<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Name must contain at least one letter or digit".to_string(),
        ));
    }
    Ok(slug)
}
