//! Content compilation for static site generation.
//!
//! This module hosts the build pipeline:
//!
//! - **classify**: Map content entries to pages, listings and URL paths
//! - **markdown**: Convert markdown documents and extract metadata
//! - **nav**: Assemble top navigation and parent links
//! - **template**: Load templates and substitute placeholders
//! - **pages**: Render single-document pages
//! - **lists**: Render directory listing pages
//! - **assets**: Copy fixed-name static assets
//!
//! # Build Flow
//!
//! ```text
//! classify_children() ──► generate_list() ──► generate_page()
//!       │                       │                   │
//!       ▼                       ▼                   ▼
//!  DirectoryPlan           listing HTML         page HTML
//! ```

pub mod assets;
pub mod classify;
pub mod lists;
pub mod markdown;
pub mod nav;
pub mod pages;
pub mod template;

use std::io;
use std::path::{Path, PathBuf};

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// List a directory's entries sorted lexicographically by file name.
///
/// Classification, navigation and listing pages all depend on this order
/// being stable across platforms and filesystems.
pub fn read_dir_sorted(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .collect();
    entries.sort();
    Ok(entries)
}
