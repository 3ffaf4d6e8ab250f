//! Content tree classification.
//!
//! Decides which filesystem entries become pages, which become directory
//! listings, and the URL path where each output lands.
//!
//! URL paths mirror the content tree: a markdown file `posts/hello.md` lands
//! at `/posts/hello`, a directory `posts/` at `/posts`. An `index.md` carries
//! no path segment of its own; it folds into the listing of the directory
//! that contains it, with the content root's index landing at `/`.

use crate::compiler::read_dir_sorted;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension recognized as markdown content.
pub const MARKDOWN_EXT: &str = "md";

/// File stem that folds into its directory's listing page.
pub const INDEX_STEM: &str = "index";

/// A file and a directory mapping to the same output URL path.
///
/// `content/foo.md` and `content/foo/` would both land at `foo/index.html`;
/// the build refuses to pick a winner.
#[derive(Debug, Error)]
#[error(
    "output collision at `{url_path}`: `{}` and `{}` both map there",
    .file.display(),
    .dir.display()
)]
pub struct CollisionError {
    pub url_path: String,
    pub file: PathBuf,
    pub dir: PathBuf,
}

/// What kind of filesystem node a content entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Markdown,
    Ignored,
}

/// A filesystem node under the content root, before classification.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    pub source: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

impl ContentEntry {
    /// Inspect a path and record what it is.
    ///
    /// Hidden entries, non-markdown files and names that are not valid UTF-8
    /// all come back as `Ignored`.
    pub fn from_path(source: PathBuf) -> Self {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_owned();

        let kind = if name.is_empty() || name.starts_with('.') {
            EntryKind::Ignored
        } else if source.is_dir() {
            EntryKind::Directory
        } else if source.extension().is_some_and(|ext| ext == MARKDOWN_EXT) {
            EntryKind::Markdown
        } else {
            EntryKind::Ignored
        };

        Self { source, name, kind }
    }

    /// File name without the markdown extension.
    pub fn stem(&self) -> &str {
        self.name.strip_suffix(".md").unwrap_or(&self.name)
    }
}

/// Output flavor an entry produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Rendered markdown document at its own URL.
    Page,
    /// Generated directory listing.
    List,
}

/// A classified content entry with its computed output URL path.
#[derive(Debug, Clone)]
pub struct ClassifiedItem {
    pub kind: ItemKind,
    pub source: PathBuf,
    /// Site-relative URL path: "/" for the root, "/posts", "/posts/hello".
    pub url_path: String,
}

impl ClassifiedItem {
    /// URL path without the leading slash; "" for the content root.
    pub fn rel_path(&self) -> &str {
        self.url_path.trim_start_matches('/')
    }

    /// Last URL segment; "" for the content root.
    pub fn file_name(&self) -> &str {
        self.rel_path().rsplit('/').next().unwrap_or_default()
    }
}

/// Classify one entry against its parent's relative path.
///
/// Returns `None` for ignored entries. An `index.md` comes back as a `List`
/// at the parent's own URL: it folds into the directory listing instead of
/// producing a separate page.
pub fn classify(entry: &ContentEntry, rel_parent: &str) -> Option<ClassifiedItem> {
    match entry.kind {
        EntryKind::Ignored => None,
        EntryKind::Directory => Some(ClassifiedItem {
            kind: ItemKind::List,
            source: entry.source.clone(),
            url_path: join_url(rel_parent, &entry.name),
        }),
        EntryKind::Markdown if entry.stem() == INDEX_STEM => Some(ClassifiedItem {
            kind: ItemKind::List,
            source: entry.source.clone(),
            url_path: if rel_parent.is_empty() {
                "/".to_owned()
            } else {
                format!("/{rel_parent}")
            },
        }),
        EntryKind::Markdown => Some(ClassifiedItem {
            kind: ItemKind::Page,
            source: entry.source.clone(),
            url_path: join_url(rel_parent, entry.stem()),
        }),
    }
}

/// Join a parent relative path and a child name into a URL path.
///
/// Separators are forward slashes on every platform.
fn join_url(rel_parent: &str, name: &str) -> String {
    if rel_parent.is_empty() {
        format!("/{name}")
    } else {
        format!("/{rel_parent}/{name}")
    }
}

/// Everything one directory contributes to the output tree.
#[derive(Debug, Default)]
pub struct DirectoryPlan {
    /// The directory's own `index.md`, when present.
    pub index: Option<ClassifiedItem>,
    /// Subdirectories, each recursed into and listed.
    pub subdirs: Vec<ClassifiedItem>,
    /// Non-index markdown children.
    pub pages: Vec<ClassifiedItem>,
}

/// Classify a directory's children in lexicographic order.
///
/// Fails with [`CollisionError`] when a markdown file and a subdirectory
/// would claim the same URL path.
pub fn classify_children(dir: &Path, rel_path: &str) -> Result<DirectoryPlan> {
    let mut plan = DirectoryPlan::default();

    for path in read_dir_sorted(dir)? {
        let entry = ContentEntry::from_path(path);
        let Some(item) = classify(&entry, rel_path) else {
            continue;
        };
        match item.kind {
            ItemKind::Page => plan.pages.push(item),
            ItemKind::List if entry.kind == EntryKind::Directory => plan.subdirs.push(item),
            ItemKind::List => plan.index = Some(item),
        }
    }

    for page in &plan.pages {
        if let Some(subdir) = plan.subdirs.iter().find(|d| d.url_path == page.url_path) {
            bail!(CollisionError {
                url_path: page.url_path.clone(),
                file: page.source.clone(),
                dir: subdir.source.clone(),
            });
        }
    }

    Ok(plan)
}
