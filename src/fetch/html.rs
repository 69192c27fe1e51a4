//! Minimal HTML extraction.
//!
//! Release pages are scanned with case-insensitive regular expressions
//! scoped to known blocks (`<table>`, `<tr>`, `<td>`, `<a>`). This is enough
//! for the download tables and link lists these pages publish; it is not a
//! general HTML parser.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b.*?</table>").expect("TABLE_REGEX must compile"));

static TBODY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<tbody\b[^>]*>(.*?)</tbody>").expect("TBODY_REGEX must compile")
});

static ROW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").expect("ROW_REGEX must compile"));

static CELL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").expect("CELL_REGEX must compile"));

static ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#)
        .expect("ANCHOR_REGEX must compile")
});

static HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*["']([^"']*)["']"#).expect("HREF_REGEX must compile")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("TAG_REGEX must compile"));

/// One row of an installer download table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerLink {
    /// Text of the operating-system column.
    pub os: String,
    /// Text of the download link (usually the installer's description).
    pub version: String,
    /// Link target.
    pub url: String,
}

/// Strip tags, decode common entities, and collapse whitespace.
pub fn text_content(fragment: &str) -> String {
    let stripped = TAG_REGEX.replace_all(fragment, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract `{os, version, url}` records from the `table_index`-th table.
///
/// Only body rows are read (the `<tbody>` if present). Rows with too few
/// `<td>` cells, or without a link in the link column, are skipped.
pub fn parse_table(
    html: &str,
    table_index: usize,
    os_column: usize,
    link_column: usize,
) -> Vec<InstallerLink> {
    let Some(table) = TABLE_REGEX.find_iter(html).nth(table_index) else {
        tracing::debug!("No table at index {}", table_index);
        return Vec::new();
    };
    let table = table.as_str();
    let body = TBODY_REGEX
        .captures(table)
        .and_then(|c| c.get(1))
        .map_or(table, |m| m.as_str());

    ROW_REGEX
        .captures_iter(body)
        .filter_map(|row| {
            let cells: Vec<&str> = CELL_REGEX
                .captures_iter(row.get(1)?.as_str())
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
            let os = text_content(cells.get(os_column)?);
            let anchor = ANCHOR_REGEX.captures(cells.get(link_column)?)?;
            Some(InstallerLink {
                os,
                version: text_content(anchor.get(2)?.as_str()),
                url: anchor.get(1)?.as_str().trim().to_string(),
            })
        })
        .collect()
}

/// Every `href` value in document order.
pub fn links(html: &str) -> Vec<String> {
    HREF_REGEX
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
