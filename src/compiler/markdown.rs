//! Markdown conversion and metadata extraction.
//!
//! Wraps pulldown-cmark and the leading `key: value` metadata block
//! convention. The converter keeps scratch state across documents; that state
//! is cleared on entry to every parse, so an aborted parse cannot leak
//! metadata into the document that follows.

use crate::utils::title::filename_to_title;
use pulldown_cmark::{Options, Parser, html::push_html};
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Content parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not valid UTF-8")]
    Decode(PathBuf),
}

/// Metadata exactly as written in the document's leading block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub date: Option<String>,
}

/// Resolved metadata for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Metadata block `title`, else derived from the file name.
    pub title: String,
    /// Metadata block `date`, else empty.
    pub date: String,
}

/// Markdown converter with metadata extraction.
pub struct Converter {
    meta: BTreeMap<String, String>,
    html: String,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            meta: BTreeMap::new(),
            html: String::new(),
        }
    }

    /// Convert one document, resolving metadata fallbacks.
    pub fn parse(&mut self, path: &Path) -> Result<(String, PageMetadata), ParseError> {
        let (html, raw) = self.parse_raw(path)?;

        let title = raw.title.unwrap_or_else(|| {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            filename_to_title(stem)
        });
        let metadata = PageMetadata {
            title,
            date: raw.date.unwrap_or_default(),
        };

        Ok((html, metadata))
    }

    /// Convert one document, returning metadata exactly as written.
    pub fn parse_raw(&mut self, path: &Path) -> Result<(String, RawMetadata), ParseError> {
        self.reset();

        let bytes = fs::read(path).map_err(|err| ParseError::Io(path.to_path_buf(), err))?;
        let source =
            String::from_utf8(bytes).map_err(|_| ParseError::Decode(path.to_path_buf()))?;

        let body = self.extract_metadata(&source);

        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(body, options);
        self.html.reserve(body.len() * 2);
        push_html(&mut self.html, parser);

        let raw = RawMetadata {
            title: self.meta.get("title").cloned(),
            date: self.meta.get("date").cloned(),
        };
        Ok((std::mem::take(&mut self.html), raw))
    }

    /// Clear scratch state.
    ///
    /// Runs on entry to `parse_raw`, never on exit, so a failed parse cannot
    /// bleed metadata into the next document.
    fn reset(&mut self) {
        self.meta.clear();
        self.html.clear();
    }

    /// Split a leading metadata block off `source`, filling `self.meta`.
    ///
    /// A block that fails to parse as YAML is left in the body untouched.
    fn extract_metadata<'a>(&mut self, source: &'a str) -> &'a str {
        let Some((block, body)) = split_metadata_block(source) else {
            return source;
        };
        let Ok(mapping) = serde_yaml_ng::from_str::<BTreeMap<String, Value>>(block) else {
            return source;
        };

        for (key, value) in mapping {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            self.meta.insert(key, value);
        }
        body
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the metadata block boundaries, if any.
///
/// Recognizes a run of `key: value` lines at the very top of the document,
/// terminated by a blank line, or the same block wrapped in `---` fences.
fn split_metadata_block(source: &str) -> Option<(&str, &str)> {
    if let Some(rest) = source.strip_prefix("---") {
        let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            let trimmed = line.trim_end();
            if trimmed == "---" || trimmed == "..." {
                return Some((&rest[..offset], &rest[offset + line.len()..]));
            }
            offset += line.len();
        }
        // Unterminated fence: the whole document is body.
        return None;
    }

    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed.is_empty() || !is_meta_line(trimmed) {
            break;
        }
        offset += line.len();
    }
    if offset == 0 {
        return None;
    }
    Some((&source[..offset], &source[offset..]))
}

/// A `key: value` line: word-character key followed by a colon.
fn is_meta_line(line: &str) -> bool {
    let Some((key, _)) = line.split_once(':') else {
        return false;
    };
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
