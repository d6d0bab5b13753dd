//! Locating the site's HTML pages.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

pub const DEFAULT_EXCLUDES: &[&str] = &["old_pages", "components", "resources"];

#[derive(Debug, Clone)]
pub struct PageScan {
    pub root: PathBuf,
    pub recursive: bool,
    pub exclude_dirs: Vec<String>,
}

impl PageScan {
    /// Only the `.html` files directly inside `root`.
    #[must_use]
    pub fn top_level(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            exclude_dirs: Vec::new(),
        }
    }

    /// Every `.html` file under `root`, skipping excluded directory names.
    #[must_use]
    pub fn recursive(root: impl Into<PathBuf>, exclude_dirs: Vec<String>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            exclude_dirs,
        }
    }

    /// Matching pages in a stable order.
    ///
    /// # Errors
    ///
    /// Returns an error if the root or a directory under it cannot be read.
    pub fn pages(&self) -> Result<Vec<PathBuf>> {
        let mut walker = WalkDir::new(&self.root).min_depth(1).sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }
        let mut pages = Vec::new();
        let entries = walker.into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.exclude_dirs.iter().any(|ex| ex == name)))
        });
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to walk {}", self.root.display()))?;
            if entry.file_type().is_file() && is_html(entry.path()) {
                pages.push(entry.into_path());
            }
        }
        log::debug!("found {} pages under {}", pages.len(), self.root.display());
        Ok(pages)
    }

    /// Path shown in reports: relative to the scan root when possible.
    #[must_use]
    pub fn display_name(&self, page: &Path) -> String {
        page.strip_prefix(&self.root)
            .unwrap_or(page)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

/// Read a page as UTF-8.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_page(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_site(label: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "sitekit-site-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::create_dir_all(root.join("blog")).unwrap();
        std::fs::create_dir_all(root.join("old_pages")).unwrap();
        std::fs::write(root.join("index.html"), "<html></html>").unwrap();
        std::fs::write(root.join("style.css"), "body{}").unwrap();
        std::fs::write(root.join("blog/post.HTML"), "<html></html>").unwrap();
        std::fs::write(root.join("old_pages/legacy.html"), "<html></html>").unwrap();
        root
    }

    #[test]
    fn top_level_scan_ignores_subdirectories() {
        let root = temp_site("top");
        let scan = PageScan::top_level(&root);
        let names: Vec<_> = scan
            .pages()
            .unwrap()
            .iter()
            .map(|p| scan.display_name(p))
            .collect();
        assert_eq!(names, vec!["index.html"]);
    }

    #[test]
    fn recursive_scan_skips_excluded_dirs() {
        let root = temp_site("rec");
        let excludes = DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect();
        let scan = PageScan::recursive(&root, excludes);
        let names: Vec<_> = scan
            .pages()
            .unwrap()
            .iter()
            .map(|p| scan.display_name(p))
            .collect();
        assert_eq!(names, vec!["blog/post.HTML", "index.html"]);
    }
}
