//! Decoding of autoindex listing bodies.
//!
//! A listing response is either a JSON array of records (nginx
//! `autoindex_format json`) or a generated HTML page of links. The body is
//! decoded strictly as the JSON shape first; anything else is scanned for
//! anchor `href` values.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::vfs::DirectoryEntry;

/// The parent-directory link every HTML index starts with
const PARENT_MARKER: &str = "../";

/// One record of a structured listing. Other fields the server sends
/// (`type`, `mtime`, `size`) are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoindexRecord {
    pub name: String,
}

/// A listing body after shape detection
#[derive(Debug, Clone)]
pub enum ListingBody {
    /// JSON records, in server order
    Structured(Vec<AutoindexRecord>),
    /// `href` values scraped from an HTML index, parent marker removed
    Html(Vec<String>),
}

impl ListingBody {
    /// Decode a response body into one of the two listing shapes
    pub fn decode(body: &str) -> Self {
        match serde_json::from_str::<Vec<AutoindexRecord>>(body) {
            Ok(records) => ListingBody::Structured(records),
            Err(_) => ListingBody::Html(extract_anchor_hrefs(body)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ListingBody::Structured(_) => "json",
            ListingBody::Html(_) => "html",
        }
    }

    pub fn into_entries(self) -> Vec<DirectoryEntry> {
        match self {
            ListingBody::Structured(records) => records
                .into_iter()
                .map(|r| DirectoryEntry::new(r.name))
                .collect(),
            ListingBody::Html(hrefs) => hrefs.into_iter().map(DirectoryEntry::new).collect(),
        }
    }
}

/// Collect the `href` values of all anchor elements, in document order,
/// skipping the `../` parent link.
///
/// Values come back as plain names: character references and percent
/// escapes are decoded once, so `my%20notes.txt` yields `my notes.txt`.
pub fn extract_anchor_hrefs(html: &str) -> Vec<String> {
    let mut hrefs = Vec::new();
    let mut rest = html;

    while let Some(start) = find_anchor_start(rest) {
        let tag = &rest[start + 2..];
        let Some(end) = tag.find('>') else {
            // Unterminated tag
            break;
        };

        if let Some(href) = href_attribute(&tag[..end]) {
            let href = decode_entities(href);
            let href = percent_decode_str(&href).decode_utf8_lossy().into_owned();
            if href != PARENT_MARKER {
                hrefs.push(href);
            }
        }

        rest = &tag[end + 1..];
    }

    hrefs
}

/// Byte offset of the next `<a` followed by whitespace (case-insensitive)
fn find_anchor_start(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (0..bytes.len().saturating_sub(2)).find(|&i| {
        bytes[i] == b'<'
            && bytes[i + 1].eq_ignore_ascii_case(&b'a')
            && bytes[i + 2].is_ascii_whitespace()
    })
}

/// Find the `href` value in the attribute text of a start tag
fn href_attribute(attrs: &str) -> Option<&str> {
    let mut rest = attrs.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c == '=' || c == '/' || c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        if let Some(after_eq) = rest.strip_prefix('=') {
            let (value, remaining) = read_attribute_value(after_eq.trim_start());
            if name.eq_ignore_ascii_case("href") {
                return Some(value);
            }
            rest = remaining;
        } else if name.is_empty() {
            // Stray '/' as in `<a href=x />`
            rest = &rest[1..];
        }

        rest = rest.trim_start();
    }

    None
}

/// Split an attribute value off the front of `s`, returning it and the rest
fn read_attribute_value(s: &str) -> (&str, &str) {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote) {
            return match inner.find(quote) {
                Some(end) => (&inner[..end], &inner[end + 1..]),
                None => (inner, ""),
            };
        }
    }

    let end = s.find(|c: char| c.is_ascii_whitespace()).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
