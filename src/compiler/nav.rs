//! Site navigation assembly.
//!
//! The top navigation is derived once per build from the content root's
//! direct children; every rendered page shares the same string. Parent links
//! are computed per entry from its relative path alone.

use crate::compiler::classify::{ContentEntry, EntryKind, INDEX_STEM};
use crate::compiler::markdown::Converter;
use crate::compiler::read_dir_sorted;
use crate::utils::title::{filename_to_title, title_case};
use anyhow::{Context, Result};
use std::path::Path;

/// Separator between top navigation links.
const NAV_SEPARATOR: &str = " | ";

/// Top-level site navigation, built once per build.
pub struct Navigation {
    top_nav: String,
}

impl Navigation {
    /// Enumerate the content root's direct children into nav links.
    ///
    /// `index.md` is always labeled "Home" and linked to `/`; other markdown
    /// files resolve their title through the converter; directories use a
    /// filename-derived title. Order is lexicographic by entry name.
    pub fn build(content_dir: &Path, converter: &mut Converter) -> Result<Self> {
        let mut links = Vec::new();

        let entries = read_dir_sorted(content_dir)
            .with_context(|| format!("failed to list content root: {}", content_dir.display()))?;

        for path in entries {
            let entry = ContentEntry::from_path(path);
            let link = match entry.kind {
                EntryKind::Ignored => continue,
                EntryKind::Directory => {
                    format!(
                        "<a href=\"/{}\">{}</a>",
                        entry.name,
                        filename_to_title(&entry.name)
                    )
                }
                EntryKind::Markdown if entry.stem() == INDEX_STEM => {
                    "<a href=\"/\">Home</a>".to_owned()
                }
                EntryKind::Markdown => {
                    let (_, meta) = converter.parse(&entry.source)?;
                    format!("<a href=\"/{}\">{}</a>", entry.stem(), meta.title)
                }
            };
            links.push(link);
        }

        Ok(Self {
            top_nav: links.join(NAV_SEPARATOR),
        })
    }

    /// The shared navigation HTML.
    pub fn top_nav(&self) -> &str {
        &self.top_nav
    }
}

/// Back-link to an entry's parent directory.
///
/// Empty for the content root and its direct children; deeper entries link
/// one level up, labeled with the parent directory's title-cased name.
pub fn parent_link(rel_path: &str) -> String {
    let Some((parent, _)) = rel_path.rsplit_once('/') else {
        return String::new();
    };
    let parent_name = parent.rsplit('/').next().unwrap_or(parent);
    format!(
        "<p class=\"parent-link\"><a href=\"/{parent}\">← Back to {}</a></p>",
        title_case(parent_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_top_nav_lexicographic_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.md"), "title: Bee\n\nx\n").unwrap();
        fs::write(dir.path().join("a.md"), "title: Ay\n\nx\n").unwrap();
        fs::create_dir(dir.path().join("zeta")).unwrap();

        let mut converter = Converter::new();
        let nav = Navigation::build(dir.path(), &mut converter).unwrap();

        assert_eq!(
            nav.top_nav(),
            "<a href=\"/a\">Ay</a> | <a href=\"/b\">Bee</a> | <a href=\"/zeta\">Zeta</a>"
        );
    }

    #[test]
    fn test_top_nav_index_is_home() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.md"), "title: Whatever\n\nx\n").unwrap();

        let mut converter = Converter::new();
        let nav = Navigation::build(dir.path(), &mut converter).unwrap();

        assert_eq!(nav.top_nav(), "<a href=\"/\">Home</a>");
    }

    #[test]
    fn test_top_nav_file_title_from_filename() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("my-page.md"), "no meta\n").unwrap();

        let mut converter = Converter::new();
        let nav = Navigation::build(dir.path(), &mut converter).unwrap();

        assert_eq!(nav.top_nav(), "<a href=\"/my-page\">My page</a>");
    }

    #[test]
    fn test_top_nav_skips_hidden_and_non_markdown() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".drafts.md"), "").unwrap();
        fs::write(dir.path().join("style.css"), "").unwrap();
        fs::write(dir.path().join("page.md"), "x\n").unwrap();

        let mut converter = Converter::new();
        let nav = Navigation::build(dir.path(), &mut converter).unwrap();

        assert_eq!(nav.top_nav(), "<a href=\"/page\">Page</a>");
    }

    #[test]
    fn test_parent_link_empty_for_root() {
        assert_eq!(parent_link(""), "");
    }

    #[test]
    fn test_parent_link_empty_for_direct_child() {
        assert_eq!(parent_link("about"), "");
        assert_eq!(parent_link("posts"), "");
    }

    #[test]
    fn test_parent_link_nested() {
        assert_eq!(
            parent_link("posts/hello"),
            "<p class=\"parent-link\"><a href=\"/posts\">← Back to Posts</a></p>"
        );
    }

    #[test]
    fn test_parent_link_deeply_nested() {
        assert_eq!(
            parent_link("docs/guide/intro"),
            "<p class=\"parent-link\"><a href=\"/docs/guide\">← Back to Guide</a></p>"
        );
    }
}
