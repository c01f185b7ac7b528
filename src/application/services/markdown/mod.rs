//! Front-matter-annotated plain-text document codec and the markdown →
//! sanitized HTML pipeline used by bulk import.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

const DELIMITER: &str = "---";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub published: bool,
    pub tags: Vec<String>,
    /// Keys we do not interpret, preserved verbatim.
    pub extra: BTreeMap<String, String>,
}

/// Splits a document into its metadata block and body. A document without a
/// leading `---` block is all body.
pub fn parse_document(text: &str) -> (FrontMatter, String) {
    let mut fm = FrontMatter::default();

    let Some(rest) = strip_open_delimiter(text) else {
        return (fm, text.to_string());
    };
    let Some((block, body)) = split_closing_delimiter(rest) else {
        return (fm, text.to_string());
    };

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = unquote(value.trim());
        match key {
            "title" => fm.title = Some(value.to_string()),
            "date" => fm.date = parse_datetime(value),
            "updated" => fm.updated = parse_datetime(value),
            "published" => fm.published = value.eq_ignore_ascii_case("true"),
            "tags" => fm.tags = parse_tags(value),
            _ => {
                fm.extra.insert(key.to_string(), value.to_string());
            }
        }
    }

    (fm, body.to_string())
}

/// Inverse of [`parse_document`].
pub fn render_document(fm: &FrontMatter, body: &str) -> String {
    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    if let Some(title) = &fm.title {
        out.push_str(&format!("title: {title}\n"));
    }
    if let Some(date) = &fm.date {
        out.push_str(&format!("date: {}\n", date.to_rfc3339()));
    }
    if let Some(updated) = &fm.updated {
        out.push_str(&format!("updated: {}\n", updated.to_rfc3339()));
    }
    out.push_str(&format!("published: {}\n", fm.published));
    if !fm.tags.is_empty() {
        out.push_str(&format!("tags: [{}]\n", fm.tags.join(", ")));
    }
    for (key, value) in &fm.extra {
        out.push_str(&format!("{key}: {value}\n"));
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push('\n');
    out.push_str(body);
    out
}

/// Markdown body → sanitized HTML, the shape stored as node content on
/// import.
pub fn render_html(markdown: &str) -> String {
    let mut opts = comrak::ComrakOptions::default();
    opts.extension.table = true;
    opts.extension.autolink = true;
    opts.extension.strikethrough = true;
    opts.extension.tasklist = true;
    // Raw HTML passes through comrak and is sanitized by ammonia after.
    opts.render.unsafe_ = true;

    let html = comrak::markdown_to_html(markdown, &opts);
    ammonia::clean(&html)
}

fn strip_open_delimiter(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))
}

fn split_closing_delimiter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }
    None
}

fn unquote(value: &str) -> &str {
    let v = value.trim();
    if v.len() >= 2 && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\''))) {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn parse_tags(value: &str) -> Vec<String> {
    let inner = value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    inner
        .split(',')
        .map(|t| unquote(t.trim()).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metadata_block_and_body() {
        let doc = "---\ntitle: Hello\ndate: 2024-03-01T10:00:00+00:00\npublished: true\ntags: [rust, tokio]\n---\n\n# Heading\n\nbody text\n";
        let (fm, body) = parse_document(doc);
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert!(fm.published);
        assert_eq!(fm.tags, vec!["rust", "tokio"]);
        assert!(fm.date.is_some());
        assert!(body.starts_with("# Heading"));
    }

    #[test]
    fn document_without_front_matter_is_all_body() {
        let (fm, body) = parse_document("just text\n");
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "just text\n");
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let doc = "---\ntitle: T\npublished: false\nauthor: someone\n---\n\nbody";
        let (fm, body) = parse_document(doc);
        assert_eq!(fm.extra.get("author").map(String::as_str), Some("someone"));
        let rendered = render_document(&fm, &body);
        let (fm2, body2) = parse_document(&rendered);
        assert_eq!(fm, fm2);
        assert_eq!(body, body2);
    }

    #[test]
    fn render_html_sanitizes_scripts() {
        let html = render_html("hello <script>alert(1)</script> *world*");
        assert!(!html.contains("<script>"));
        assert!(html.contains("<em>world</em>"));
    }
}
