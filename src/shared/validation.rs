//! Input validation rules
//!
//! Request models implement [`Validate`] and are checked once, at the HTTP
//! boundary, before any store or hashing work happens. Rules run in field
//! declaration order and the first failure wins.

use crate::shared::error::SharedError;

/// A request model with declarative field constraints
pub trait Validate {
    /// Check every constraint, returning the first offending field
    fn validate(&self) -> Result<(), SharedError>;
}

/// Require a present, non-empty string field
pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, SharedError> {
    match value {
        None => Err(SharedError::validation(field, format!("\"{field}\" is required"))),
        Some(v) if v.trim().is_empty() => Err(SharedError::validation(
            field,
            format!("\"{field}\" is not allowed to be empty"),
        )),
        Some(v) => Ok(v),
    }
}

/// Like [`required`], but only `""` counts as empty
///
/// Used for passwords, where whitespace is significant.
pub fn required_verbatim<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, SharedError> {
    match value {
        None => Err(SharedError::validation(field, format!("\"{field}\" is required"))),
        Some("") => Err(SharedError::validation(
            field,
            format!("\"{field}\" is not allowed to be empty"),
        )),
        Some(v) => Ok(v),
    }
}

/// Require at least `min` characters (not bytes)
pub fn min_length(field: &str, value: &str, min: usize) -> Result<(), SharedError> {
    if value.chars().count() < min {
        return Err(SharedError::validation(
            field,
            format!("\"{field}\" length must be at least {min} characters long"),
        ));
    }
    Ok(())
}

/// Require a syntactically valid email address
pub fn email(field: &str, value: &str) -> Result<(), SharedError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(SharedError::validation(
            field,
            format!("\"{field}\" must be a valid email"),
        ))
    }
}

/// Validate email address syntax
///
/// Addresses must have:
/// - exactly one `@` with a non-empty local part of printable ASCII
/// - a domain of at least two dot-separated labels
/// - labels of letters, digits and inner hyphens
/// - an alphabetic top-level label of two or more characters
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
