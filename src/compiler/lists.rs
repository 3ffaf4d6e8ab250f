//! Directory listing pages.
//!
//! Every directory in the content tree gets one generated `index.html`
//! enumerating its children. A directory's own `index.md` folds in: its
//! rendered body leads the page and its metadata title (when present)
//! becomes the page title.

use crate::build::BuildContext;
use crate::compiler::classify::DirectoryPlan;
use crate::compiler::nav;
use crate::compiler::pages::write_output;
use crate::compiler::template::RenderContext;
use crate::utils::title::title_case;
use anyhow::Result;
use std::fmt::Write;

/// Generate the listing page for one directory.
///
/// `rel_path` is the directory's path relative to the content root
/// ("" for the root itself).
pub fn generate_list(rel_path: &str, plan: &DirectoryPlan, cx: &mut BuildContext<'_>) -> Result<()> {
    let mut sections: Vec<String> = Vec::new();
    let mut title = None;

    if let Some(index) = &plan.index {
        let (content, raw) = cx.converter.parse_raw(&index.source)?;
        title = raw.title;
        sections.push(content);
    }

    if !plan.subdirs.is_empty() {
        let mut part = String::from("<h3>Directories</h3>\n<ul>\n");
        for subdir in &plan.subdirs {
            writeln!(
                part,
                "<li><a href=\"{}\">{}</a></li>",
                subdir.url_path,
                subdir.file_name()
            )?;
        }
        part.push_str("</ul>");
        sections.push(part);
    }

    if !plan.pages.is_empty() {
        let mut part = String::from("<h3>Pages</h3>\n<ul>\n");
        for page in &plan.pages {
            let (_, meta) = cx.converter.parse(&page.source)?;
            let date = if meta.date.is_empty() {
                String::new()
            } else {
                format!(" ({})", meta.date)
            };
            writeln!(
                part,
                "<li><a href=\"{}\">{}</a>{}</li>",
                page.url_path, meta.title, date
            )?;
        }
        part.push_str("</ul>");
        sections.push(part);
    }

    let page_title = title.unwrap_or_else(|| default_list_title(rel_path));
    let parent_link = nav::parent_link(rel_path);
    let html = cx.engine.render(
        "list",
        &RenderContext {
            site_title: &cx.config.title,
            page_title: &page_title,
            top_nav: cx.nav.top_nav(),
            parent_link: &parent_link,
            content: &sections.join("\n"),
        },
    )?;

    write_output(&cx.config.output_dir, rel_path, &html)
}

/// Title for a directory whose index supplies none: its name in title case,
/// "Home" for the content root.
fn default_list_title(rel_path: &str) -> String {
    if rel_path.is_empty() {
        "Home".to_owned()
    } else {
        title_case(rel_path.rsplit('/').next().unwrap_or(rel_path))
    }
}
