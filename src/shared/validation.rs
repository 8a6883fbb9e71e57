use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

lazy_static! {
    /// Regex for a derived slug: lowercase alphanumeric runs joined by single hyphens
    /// - Valid: "smart-sensor", "kit2", "ac-refrigeration"
    /// - Invalid: "-kit", "kit-", "kit--2", "Kit", "kit_2"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Parse a record identifier, rejecting anything that is not a UUID
pub fn parse_object_id(field: &str, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation(format!("Invalid {}", field)))
}

/// Parse an optional reference where `""` means "no reference"
pub fn parse_optional_ref(field: &str, raw: Option<&str>) -> Result<Option<Uuid>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_object_id(field, value).map(Some),
    }
}

/// Requested change to an optional reference on update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefUpdate {
    /// Field absent from the body
    Keep,
    /// Field sent as an empty string
    Clear,
    Set(Uuid),
}

impl RefUpdate {
    pub fn parse(field: &str, raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None => Ok(RefUpdate::Keep),
            Some("") => Ok(RefUpdate::Clear),
            Some(value) => parse_object_id(field, value).map(RefUpdate::Set),
        }
    }

    pub fn apply(self, current: Option<Uuid>) -> Option<Uuid> {
        match self {
            RefUpdate::Keep => current,
            RefUpdate::Clear => None,
            RefUpdate::Set(id) => Some(id),
        }
    }
}

/// Accept absolute http(s) URLs and internal `/api/` paths
pub fn is_acceptable_image_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("/api/")
}

/// Collapse `Some("")` to `None`
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Drop blank entries from an image list
pub fn compact_images(images: Vec<String>) -> Vec<String> {
    images.into_iter().filter(|i| !i.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("smart-sensor"));
        assert!(SLUG_REGEX.is_match("kit2"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-kit")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("kit-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("kit--2")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Kit")); // uppercase
        assert!(!SLUG_REGEX.is_match("kit_2")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_parse_object_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_object_id("id", &id.to_string()).unwrap(), id);

        let err = parse_object_id("categoryId", "64f1c0ffee").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid categoryId"));
    }

    #[test]
    fn test_parse_optional_ref_coerces_empty_string() {
        assert_eq!(parse_optional_ref("categoryId", None).unwrap(), None);
        assert_eq!(parse_optional_ref("categoryId", Some("")).unwrap(), None);
        assert!(parse_optional_ref("categoryId", Some("nope")).is_err());
    }

    #[test]
    fn test_ref_update_tri_state() {
        let current = Some(Uuid::new_v4());
        let next = Uuid::new_v4();

        assert_eq!(RefUpdate::parse("x", None).unwrap().apply(current), current);
        assert_eq!(RefUpdate::parse("x", Some("")).unwrap().apply(current), None);
        assert_eq!(
            RefUpdate::parse("x", Some(&next.to_string()))
                .unwrap()
                .apply(current),
            Some(next)
        );
        assert!(RefUpdate::parse("subcategoryId", Some("bad")).is_err());
    }

    #[test]
    fn test_image_url_rules() {
        assert!(is_acceptable_image_url("https://cdn.example/a.png"));
        assert!(is_acceptable_image_url("http://cdn.example/a.png"));
        assert!(is_acceptable_image_url("/api/files/abc"));
        assert!(!is_acceptable_image_url("ftp://cdn.example/a.png"));
        assert!(!is_acceptable_image_url("images/a.png"));
    }

    #[test]
    fn test_compact_images() {
        let images = vec!["a.png".to_string(), "".to_string(), "  ".to_string()];
        assert_eq!(compact_images(images), vec!["a.png".to_string()]);
    }
}
