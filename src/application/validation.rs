use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::errors::ActionError;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_SLUG_LEN: usize = 255;

// Lowercase letters, digits and hyphens only.
static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug regex"));

pub fn validate_title(title: &str) -> Result<(), ActionError> {
    if title.trim().is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(ActionError::validation(format!(
            "title must be between 1 and {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), ActionError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return Err(ActionError::validation(format!(
            "slug must be between 1 and {MAX_SLUG_LEN} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(ActionError::validation(
            "slug may only contain lowercase letters, digits and hyphens",
        ));
    }
    Ok(())
}

/// Derive a filesystem- and URL-safe identifier from a display title.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_dash = true;
    for ch in title.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_pattern_accepts_kebab_case() {
        assert!(validate_slug("my-first-post-2024").is_ok());
        assert!(validate_slug("a").is_ok());
    }

    #[test]
    fn slug_pattern_rejects_uppercase_and_spaces() {
        assert!(validate_slug("My-Post").is_err());
        assert!(validate_slug("my post").is_err());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("post_one").is_err());
    }

    #[test]
    fn slugify_collapses_non_alphanumeric_runs() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust & Tokio  "), "rust-tokio");
        assert_eq!(slugify("既定"), "");
    }
}
