//! Verbatim static asset copying.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Fixed-name assets copied from the templates directory to the output root.
const STATIC_ASSETS: &[&str] = &["style.css", "404.html"];

/// Copy optional fixed-name assets verbatim; missing files are skipped.
pub fn copy_static(templates_dir: &Path, output_dir: &Path) -> Result<()> {
    for name in STATIC_ASSETS {
        let src = templates_dir.join(name);
        if !src.exists() {
            continue;
        }
        fs::copy(&src, output_dir.join(name))
            .with_context(|| format!("Failed to copy asset: {}", src.display()))?;
    }
    Ok(())
}
