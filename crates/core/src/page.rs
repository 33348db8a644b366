//! Page name and version content validation.
//!
//! The store enforces the same rules with `CHECK` constraints; validating up
//! front lets the HTTP layer treat a bad submission as an ordinary miss
//! instead of surfacing a database failure.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Reserved names
// ---------------------------------------------------------------------------

/// Path words that the router serves itself, so a page with one of these
/// names could never be reached.
pub const RESERVED_NAMES: &[&str] = &["new", "health"];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a page name.
///
/// Any non-empty name is accepted except the reserved words and the dot
/// segments, which clients collapse before a request is sent.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("Page name must not be empty".into()));
    }
    if name == "." || name == ".." {
        return Err(CoreError::Validation(format!(
            "Page name '{name}' cannot be used as a path"
        )));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(CoreError::Validation(format!(
            "Page name '{name}' is reserved"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Everything outside the RFC 3986 unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Absolute path of a page, with the name percent-encoded as one segment.
pub fn page_path(name: &str) -> String {
    format!("/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

/// Validate a version title (non-empty).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    Ok(())
}

/// Validate a version body (non-empty, any length).
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.is_empty() {
        return Err(CoreError::Validation("Body must not be empty".into()));
    }
    Ok(())
}

/// Unwrap a required form field, rejecting a missing value.
pub fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("Missing field '{field}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- validate_name -------------------------------------------------------

    #[test]
    fn name_valid() {
        assert!(validate_name("home").is_ok());
        assert!(validate_name("Release_Notes-2").is_ok());
    }

    #[test]
    fn name_empty_rejected() {
        assert!(validate_name("").is_err());
    }

    #[test]
    fn name_with_spaces_and_unicode_allowed() {
        assert!(validate_name("My Page").is_ok());
        assert!(validate_name("café").is_ok());
        assert!(validate_name("a/b?c#d").is_ok());
    }

    #[test]
    fn dot_segments_rejected() {
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("...").is_ok());
    }

    #[test]
    fn reserved_names_rejected() {
        assert!(validate_name("new").is_err());
        assert!(validate_name("health").is_err());
    }

    // -- page_path -----------------------------------------------------------

    #[test]
    fn plain_name_path_is_verbatim() {
        assert_eq!(page_path("Release_Notes-2.1~x"), "/Release_Notes-2.1~x");
    }

    #[test]
    fn path_encodes_name_as_one_segment() {
        assert_eq!(page_path("My Page"), "/My%20Page");
        assert_eq!(page_path("café"), "/caf%C3%A9");
        assert_eq!(page_path("a/b?c#d"), "/a%2Fb%3Fc%23d");
        assert_eq!(page_path("50%"), "/50%25");
    }

    // -- validate_title / validate_body --------------------------------------

    #[test]
    fn empty_title_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("T").is_ok());
    }

    #[test]
    fn whitespace_body_is_allowed() {
        assert!(validate_body(" ").is_ok());
        assert!(validate_body("").is_err());
    }

    // -- require -------------------------------------------------------------

    #[test]
    fn missing_field_names_the_field() {
        let err = require("title", None).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Missing field 'title'");
        assert_eq!(require("title", Some("x")).unwrap(), "x");
    }
}
