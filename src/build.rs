//! Site building orchestration.
//!
//! Coordinates content traversal, page rendering and asset copying.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── reset_output() ──► Destroy + recreate the output directory
//!     │
//!     ├── process_directory() ──► Recursive walk from the content root
//!     │       │
//!     │       ├── classify_children() ──► DirectoryPlan
//!     │       ├── generate_list()     ──► <url>/index.html (listing)
//!     │       └── generate_page()     ──► <url>/index.html (document)
//!     │
//!     ├── copy_static() ──► style.css / 404.html
//!     │
//!     └── log_build_result() ──► Success report
//! ```
//!
//! A build is single-pass and non-resumable: the first error aborts it and
//! leaves the partially populated output directory behind as invalid.
//! Concurrent builds into the same output directory are unsupported; nothing
//! locks it.

use crate::{
    compiler::{
        assets::copy_static,
        classify::classify_children,
        lists::generate_list,
        markdown::Converter,
        nav::Navigation,
        pages::generate_page,
        template::TemplateEngine,
    },
    config::SiteConfig,
    log,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Shared per-build state threaded through the tree walk.
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
    pub engine: TemplateEngine,
    pub nav: Navigation,
    pub converter: Converter,
}

/// Build the entire site.
///
/// Clears the output directory, walks the content tree writing pages and
/// listings, then copies static assets.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.output_dir;

    reset_output(output)?;

    let engine = TemplateEngine::load(&config.templates_dir)?;
    let mut converter = Converter::new();
    let nav = Navigation::build(&config.content_dir, &mut converter)?;
    let mut cx = BuildContext {
        config,
        engine,
        nav,
        converter,
    };

    process_directory(&config.content_dir, "", &mut cx)?;

    copy_static(&config.templates_dir, output)?;

    log_build_result(output);
    Ok(())
}

/// Recursively generate one directory and everything below it.
///
/// `rel_path` is the directory's forward-slash path relative to the content
/// root ("" for the root itself). Each recursion step carries its own value,
/// so no traversal state is shared across branches.
fn process_directory(dir: &Path, rel_path: &str, cx: &mut BuildContext<'_>) -> Result<()> {
    let plan = classify_children(dir, rel_path)
        .with_context(|| format!("failed to classify `{}`", dir.display()))?;

    generate_list(rel_path, &plan, cx)?;

    for page in &plan.pages {
        generate_page(page, cx)?;
    }
    for subdir in &plan.subdirs {
        process_directory(&subdir.source, subdir.rel_path(), cx)?;
    }
    Ok(())
}

/// Destroy and recreate the output directory.
///
/// Every build starts from an empty tree; there is no incremental state.
fn reset_output(output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) {
    let file_count = WalkDir::new(output)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .count();

    if file_count == 0 {
        log!("warn"; "output is empty, check if content has .md files");
    } else {
        log!("build"; "{} files generated in {}", file_count, output.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::classify::CollisionError;
    use crate::compiler::markdown::ParseError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Create a project directory with the given content files.
    fn project(files: &[(&str, &str)]) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        for (rel, body) in files {
            let path = dir.path().join("content").join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }

        let mut config = SiteConfig::default();
        config.resolve_root(dir.path());
        (dir, config)
    }

    fn read_output(config: &SiteConfig, rel: &str) -> String {
        fs::read_to_string(config.output_dir.join(rel)).unwrap()
    }

    /// All output files relative to the output root, with contents.
    fn output_snapshot(config: &SiteConfig) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<(PathBuf, Vec<u8>)> = WalkDir::new(&config.output_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(&config.output_dir).unwrap();
                (rel.to_path_buf(), fs::read(e.path()).unwrap())
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_scenario_tree_outputs() {
        let (_dir, config) = project(&[
            ("index.md", "# Welcome\n"),
            ("about.md", "title: About\n\nWho we are.\n"),
            ("posts/index.md", "All the posts.\n"),
            ("posts/hello.md", "title: Hello\ndate: 2024-01-01\n\nHi.\n"),
        ]);

        build_site(&config).unwrap();

        let outputs: Vec<PathBuf> = output_snapshot(&config)
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("about/index.html"),
                PathBuf::from("index.html"),
                PathBuf::from("posts/hello/index.html"),
                PathBuf::from("posts/index.html"),
            ]
        );
    }

    #[test]
    fn test_root_index_folds_into_root_page() {
        let (_dir, config) = project(&[
            ("index.md", "title: Start\n\n# Welcome\n"),
            ("about.md", "x\n"),
        ]);

        build_site(&config).unwrap();

        let root = read_output(&config, "index.html");
        assert!(root.contains("<title>Start - My Website</title>"));
        assert!(root.contains("<h1>Welcome</h1>"));
        // Root listing still enumerates the non-index page
        assert!(root.contains("<a href=\"/about\">"));
        // No separate page output for the root index
        assert!(!config.output_dir.join("index").exists());
    }

    #[test]
    fn test_nested_index_folds_into_listing() {
        let (_dir, config) = project(&[
            ("posts/index.md", "Intro to the posts section.\n"),
            ("posts/hello.md", "title: Hello\n\nHi.\n"),
        ]);

        build_site(&config).unwrap();

        let listing = read_output(&config, "posts/index.html");
        assert!(listing.contains("Intro to the posts section."));
        assert!(listing.contains("<a href=\"/posts/hello\">Hello</a>"));
        assert!(!config.output_dir.join("posts/index/index.html").exists());
    }

    #[test]
    fn test_listing_shows_dates_and_subdirs() {
        let (_dir, config) = project(&[
            ("posts/first.md", "title: First\ndate: 2024-06-01\n\nx\n"),
            ("posts/drafts/wip.md", "x\n"),
        ]);

        build_site(&config).unwrap();

        let listing = read_output(&config, "posts/index.html");
        assert!(listing.contains("<h3>Directories</h3>"));
        assert!(listing.contains("<a href=\"/posts/drafts\">drafts</a>"));
        assert!(listing.contains("<h3>Pages</h3>"));
        assert!(listing.contains("<a href=\"/posts/first\">First</a> (2024-06-01)"));
    }

    #[test]
    fn test_page_titles_and_parent_link() {
        let (_dir, config) = project(&[
            ("posts/hello.md", "title: Hello\n\nHi.\n"),
            ("posts/my-note.md", "no metadata\n"),
        ]);

        build_site(&config).unwrap();

        let hello = read_output(&config, "posts/hello/index.html");
        assert!(hello.contains("<h2>Hello</h2>"));
        assert!(hello.contains("← Back to Posts"));

        let note = read_output(&config, "posts/my-note/index.html");
        assert!(note.contains("<h2>My note</h2>"));
    }

    #[test]
    fn test_top_level_page_has_no_parent_link() {
        let (_dir, config) = project(&[("about.md", "x\n")]);

        build_site(&config).unwrap();

        let about = read_output(&config, "about/index.html");
        assert!(!about.contains("parent-link"));
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let (_dir, config) = project(&[
            ("visible.md", "x\n"),
            (".hidden.md", "x\n"),
            (".drafts/secret.md", "x\n"),
        ]);

        build_site(&config).unwrap();

        assert!(config.output_dir.join("visible/index.html").exists());
        assert!(!config.output_dir.join(".hidden").exists());
        assert!(!config.output_dir.join(".drafts").exists());
        assert!(!config.output_dir.join("hidden").exists());
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let (_dir, config) = project(&[("page.md", "x\n"), ("notes.txt", "x\n")]);

        build_site(&config).unwrap();

        assert!(config.output_dir.join("page/index.html").exists());
        assert!(!config.output_dir.join("notes").exists());
        assert!(!config.output_dir.join("notes.txt").exists());
    }

    #[test]
    fn test_collision_aborts_build() {
        let (_dir, config) = project(&[("foo.md", "x\n"), ("foo/bar.md", "x\n")]);

        let err = build_site(&config).unwrap_err();
        let collision = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<CollisionError>())
            .unwrap();
        assert_eq!(collision.url_path, "/foo");
    }

    #[test]
    fn test_invalid_utf8_aborts_build() {
        let (dir, config) = project(&[("ok.md", "x\n")]);
        fs::write(dir.path().join("content/broken.md"), [0xff, 0xfe]).unwrap();

        let err = build_site(&config).unwrap_err();
        assert!(
            err.chain()
                .any(|cause| matches!(cause.downcast_ref::<ParseError>(), Some(ParseError::Decode(_))))
        );
    }

    #[test]
    fn test_idempotent_rebuild() {
        let (_dir, config) = project(&[
            ("index.md", "# Home\n"),
            ("about.md", "title: About\n\nx\n"),
            ("posts/hello.md", "x\n"),
        ]);

        build_site(&config).unwrap();
        let first = output_snapshot(&config);

        build_site(&config).unwrap();
        let second = output_snapshot(&config);

        assert_eq!(first, second);
    }

    #[test]
    fn test_output_directory_reset() {
        let (_dir, config) = project(&[("page.md", "x\n")]);

        fs::create_dir_all(&config.output_dir).unwrap();
        fs::write(config.output_dir.join("stale.html"), "old").unwrap();

        build_site(&config).unwrap();

        assert!(!config.output_dir.join("stale.html").exists());
        assert!(config.output_dir.join("page/index.html").exists());
    }

    #[test]
    fn test_empty_content_root_still_gets_list_page() {
        let (_dir, config) = project(&[]);

        build_site(&config).unwrap();

        let root = read_output(&config, "index.html");
        assert!(root.contains("<h2>Home</h2>"));
    }

    #[test]
    fn test_static_assets_copied() {
        let (dir, config) = project(&[("page.md", "x\n")]);
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/style.css"), "body {}").unwrap();
        fs::write(dir.path().join("templates/404.html"), "<h1>404</h1>").unwrap();

        build_site(&config).unwrap();

        assert_eq!(read_output(&config, "style.css"), "body {}");
        assert_eq!(read_output(&config, "404.html"), "<h1>404</h1>");
    }

    #[test]
    fn test_custom_template_used() {
        let (dir, config) = project(&[("page.md", "title: T\n\nbody\n")]);
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(
            dir.path().join("templates/page.html"),
            "<article>{{page_title}}|{{content}}</article>",
        )
        .unwrap();

        build_site(&config).unwrap();

        let page = read_output(&config, "page/index.html");
        assert!(page.starts_with("<article>T|"));
    }

    #[test]
    fn test_every_directory_gets_exactly_one_listing() {
        let (_dir, config) = project(&[
            ("a/x.md", "x\n"),
            ("a/b/y.md", "x\n"),
            ("a/b/c/z.md", "x\n"),
        ]);

        build_site(&config).unwrap();

        for listing in ["index.html", "a/index.html", "a/b/index.html", "a/b/c/index.html"] {
            assert!(config.output_dir.join(listing).exists(), "missing {listing}");
        }
    }
}
