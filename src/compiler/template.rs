//! HTML template loading and placeholder substitution.
//!
//! Substitution is literal token replacement with no escaping: content is
//! trusted to already be valid HTML. The renderer is the single seam a real
//! templating engine could later replace.

use crate::config::ConfigError;
use std::fs;
use std::path::Path;

/// Built-in shell used when the templates directory provides no override.
///
/// `page.html` and `list.html` share this shape; they differ only in intent.
const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{{page_title}} - {{site_title}}</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <header>
        <h1>{{site_title}}</h1>
        <nav>{{top_nav}}</nav>
    </header>
    <main>
        {{parent_link}}
        <h2>{{page_title}}</h2>
        {{content}}
    </main>
</body>
</html>"#;

/// Placeholder values for one rendered output file.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub site_title: &'a str,
    pub page_title: &'a str,
    pub top_nav: &'a str,
    pub parent_link: &'a str,
    pub content: &'a str,
}

/// Loaded templates keyed by name.
pub struct TemplateEngine {
    page: String,
    list: String,
}

impl TemplateEngine {
    /// Load `page.html` and `list.html` from the templates directory,
    /// falling back to the built-in shell for whichever is absent.
    pub fn load(templates_dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            page: load_or_default(&templates_dir.join("page.html"))?,
            list: load_or_default(&templates_dir.join("list.html"))?,
        })
    }

    /// Substitute placeholders into the template named by `key`.
    ///
    /// Recognized keys: `page`, `list`.
    pub fn render(&self, key: &str, ctx: &RenderContext) -> Result<String, ConfigError> {
        let template = match key {
            "page" => &self.page,
            "list" => &self.list,
            other => return Err(ConfigError::UnknownTemplate(other.to_owned())),
        };
        Ok(substitute(template, ctx))
    }
}

fn load_or_default(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Ok(DEFAULT_TEMPLATE.to_owned());
    }
    fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))
}

/// Literal, case-sensitive token replacement.
fn substitute(template: &str, ctx: &RenderContext) -> String {
    template
        .replace("{{site_title}}", ctx.site_title)
        .replace("{{page_title}}", ctx.page_title)
        .replace("{{top_nav}}", ctx.top_nav)
        .replace("{{parent_link}}", ctx.parent_link)
        .replace("{{content}}", ctx.content)
}
