//! Adding the toolbar `<script>` tag to pages.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::site::{PageScan, read_page};

/// Entry module emitted by `wasm-pack build --target web` for `sitekit-web`.
pub const DEFAULT_BUNDLE: &str = "./pkg/sitekit_web.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// The page already loads the bundle.
    AlreadyPresent,
    Updated(String),
}

/// Import specifier for `bundle`. Bare paths are made relative so the
/// browser does not treat them as package names.
#[must_use]
pub fn module_specifier(bundle: &str) -> String {
    let explicit = ["./", "../", "/"].iter().any(|p| bundle.starts_with(*p)) || bundle.contains("://");
    if explicit {
        bundle.to_string()
    } else {
        format!("./{bundle}")
    }
}

/// Module loader that fetches and starts the wasm bundle.
#[must_use]
pub fn loader_tag(bundle: &str) -> String {
    format!(
        "<script type=\"module\">import init from \"{}\"; init();</script>",
        module_specifier(bundle)
    )
}

/// Place the loader before the final `</body>`, else before the final
/// `</html>`, else at the end of the page. Pages that already mention the
/// bundle are left alone.
#[must_use]
pub fn inject_loader(page: &str, bundle: &str) -> Injection {
    if page.contains(&module_specifier(bundle)) {
        return Injection::AlreadyPresent;
    }
    let tag = loader_tag(bundle);
    for closing in ["</body>", "</html>"] {
        if let Some(at) = page.rfind(closing) {
            let mut updated = String::with_capacity(page.len() + tag.len() + 6);
            updated.push_str(&page[..at]);
            updated.push_str("    ");
            updated.push_str(&tag);
            updated.push('\n');
            updated.push_str(&page[at..]);
            return Injection::Updated(updated);
        }
    }
    Injection::Updated(format!("{page}\n{tag}"))
}

#[derive(Debug, Default, Serialize)]
pub struct InjectReport {
    pub bundle: String,
    pub dry_run: bool,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Inject into every top-level page of `root`.
///
/// # Errors
///
/// Returns an error if a page cannot be read or written.
pub fn run(root: &Path, bundle: &str, dry_run: bool) -> Result<InjectReport> {
    let scan = PageScan::top_level(root);
    let mut report = InjectReport {
        bundle: module_specifier(bundle),
        dry_run,
        ..InjectReport::default()
    };
    for page in scan.pages()? {
        let name = scan.display_name(&page);
        match inject_loader(&read_page(&page)?, bundle) {
            Injection::AlreadyPresent => {
                log::info!("skipping {name}, already injected");
                report.skipped.push(name);
            }
            Injection::Updated(content) => {
                if !dry_run {
                    std::fs::write(&page, content)
                        .with_context(|| format!("failed to write {}", page.display()))?;
                }
                log::info!("updated {name}");
                report.updated.push(name);
            }
        }
    }
    Ok(report)
}
