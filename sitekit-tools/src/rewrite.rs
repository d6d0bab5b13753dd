//! Pointing legacy-domain images at local copies.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::site::{PageScan, read_page};

/// Legacy file name → local replacement.
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    ("coins-03.webp", "resources/coins_pile.jpg"),
    ("top-fon-coin-01.webp", "resources/coins_pile.jpg"),
    ("gold-002.webp", "resources/gold_stack.jpg"),
    ("gold-watch-450x350.webp", "resources/gold_watch.jpg"),
    ("silver-450x350.webp", "resources/silver_pile.png"),
    ("Jewelry-01.webp", "resources/jewelry.jpg"),
    ("Collectible-toys.webp", "resources/collectibles.jpg"),
    ("coin-02-450x350.jpg", "resources/coins_pile.jpg"),
];

/// Load a replacement map from a JSON object of `"file": "local/path"`
/// pairs, or fall back to [`DEFAULT_REPLACEMENTS`].
///
/// # Errors
///
/// Returns an error if the map file cannot be read or is not a JSON object of
/// strings.
pub fn load_replacements(map: Option<&Path>) -> Result<Vec<(String, String)>> {
    let Some(path) = map else {
        return Ok(DEFAULT_REPLACEMENTS
            .iter()
            .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
            .collect());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: BTreeMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON object of strings", path.display()))?;
    Ok(parsed.into_iter().collect())
}

pub struct ImageRewriter {
    rules: Vec<(Regex, String)>,
}

impl ImageRewriter {
    /// # Errors
    ///
    /// Returns an error if a replacement pattern fails to compile.
    pub fn new(legacy_domain: &str, replacements: &[(String, String)]) -> Result<Self> {
        let domain = regex::escape(legacy_domain);
        let rules: Vec<(Regex, String)> = replacements
            .iter()
            .map(|(file, local)| {
                let pattern = format!(
                    r#"src=["']https?://{domain}[^"']*/{}["']"#,
                    regex::escape(file)
                );
                Regex::new(&pattern)
                    .with_context(|| format!("bad pattern for {file}"))
                    .map(|re| (re, format!("src=\"{local}\"")))
            })
            .collect::<Result<_>>()?;
        Ok(Self { rules })
    }

    /// The rewritten page and the number of sources replaced, or `None` when
    /// nothing matched.
    #[must_use]
    pub fn rewrite(&self, page: &str) -> Option<(String, usize)> {
        let mut content = page.to_string();
        let mut replaced = 0;
        for (pattern, replacement) in &self.rules {
            let hits = pattern.find_iter(&content).count();
            if hits == 0 {
                continue;
            }
            replaced += hits;
            content = pattern
                .replace_all(&content, regex::NoExpand(replacement.as_str()))
                .into_owned();
        }
        (replaced > 0).then_some((content, replaced))
    }
}

#[derive(Debug, Default, Serialize)]
pub struct RewriteReport {
    pub dry_run: bool,
    pub pages_scanned: usize,
    /// Page → number of image sources replaced.
    pub updated: BTreeMap<String, usize>,
}

/// Rewrite every page under the scan root.
///
/// # Errors
///
/// Returns an error if a page cannot be read or written.
pub fn run(scan: &PageScan, rewriter: &ImageRewriter, dry_run: bool) -> Result<RewriteReport> {
    let mut report = RewriteReport {
        dry_run,
        ..RewriteReport::default()
    };
    for page in scan.pages()? {
        report.pages_scanned += 1;
        let Some((content, replaced)) = rewriter.rewrite(&read_page(&page)?) else {
            continue;
        };
        let name = scan.display_name(&page);
        if !dry_run {
            std::fs::write(&page, content)
                .with_context(|| format!("failed to write {}", page.display()))?;
        }
        log::info!("updating {replaced} images in {name}");
        report.updated.insert(name, replaced);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::DEFAULT_LEGACY_DOMAIN;

    fn rewriter() -> ImageRewriter {
        let rules = load_replacements(None).unwrap();
        ImageRewriter::new(DEFAULT_LEGACY_DOMAIN, &rules).unwrap()
    }

    #[test]
    fn replaces_known_legacy_files() {
        let page = concat!(
            "<img src=\"https://fairfaxcoinandbullionexchange.com/wp-content/uploads/gold-002.webp\">",
            "<img src='http://fairfaxcoinandbullionexchange.com/a/b/coins-03.webp' alt=\"x\">",
        );
        let (out, replaced) = rewriter().rewrite(page).unwrap();
        assert_eq!(replaced, 2);
        assert_eq!(
            out,
            "<img src=\"resources/gold_stack.jpg\"><img src=\"resources/coins_pile.jpg\" alt=\"x\">"
        );
    }

    #[test]
    fn leaves_unmapped_and_foreign_sources_alone() {
        let page = concat!(
            "<img src=\"https://fairfaxcoinandbullionexchange.com/unknown.webp\">",
            "<img src=\"https://cdn.example.com/gold-002.webp\">",
        );
        assert!(rewriter().rewrite(page).is_none());
    }

    #[test]
    fn custom_map_file_is_used() {
        let path = std::env::temp_dir().join("sitekit-rewrite-map.json");
        std::fs::write(&path, r#"{"logo.png":"img/logo.png"}"#).unwrap();
        let rules = load_replacements(Some(&path)).unwrap();
        assert_eq!(rules, vec![("logo.png".to_string(), "img/logo.png".to_string())]);
    }
}
