//! Content page generation.
//!
//! A page is the rendered HTML of a single markdown document, written to
//! `<output>/<url-path>/index.html`.

use crate::build::BuildContext;
use crate::compiler::classify::ClassifiedItem;
use crate::compiler::nav;
use crate::compiler::template::RenderContext;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Render one markdown document and write it under its URL path.
pub fn generate_page(item: &ClassifiedItem, cx: &mut BuildContext<'_>) -> Result<()> {
    let (content, meta) = cx.converter.parse(&item.source)?;

    let parent_link = nav::parent_link(item.rel_path());
    let html = cx.engine.render(
        "page",
        &RenderContext {
            site_title: &cx.config.title,
            page_title: &meta.title,
            top_nav: cx.nav.top_nav(),
            parent_link: &parent_link,
            content: &content,
        },
    )?;

    write_output(&cx.config.output_dir, item.rel_path(), &html)
}

/// Write rendered HTML to `<output>/<rel_path>/index.html`.
///
/// An empty `rel_path` addresses the output root itself.
pub fn write_output(output_root: &Path, rel_path: &str, html: &str) -> Result<()> {
    let dir = if rel_path.is_empty() {
        output_root.to_path_buf()
    } else {
        output_root.join(rel_path)
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let target = dir.join("index.html");
    fs::write(&target, html)
        .with_context(|| format!("Failed to write output file: {}", target.display()))?;

    Ok(())
}
