//! Page structure and image audits.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::site::{PageScan, read_page};

pub const DEFAULT_LEGACY_DOMAIN: &str = "fairfaxcoinandbullionexchange.com";
pub const DEFAULT_MIN_IMAGES: usize = 2;

#[derive(Debug, Default, Serialize)]
pub struct StructureReport {
    pub pages_scanned: usize,
    pub missing_footer: Vec<String>,
    pub missing_mobile_menu: Vec<String>,
}

#[must_use]
pub fn has_footer(page: &str) -> bool {
    page.contains("<footer")
}

#[must_use]
pub fn has_mobile_menu(page: &str) -> bool {
    page.contains("id=\"mobile-menu\"")
}

/// Check every page for the shared footer and mobile menu.
///
/// # Errors
///
/// Returns an error if the site cannot be walked or a page cannot be read.
pub fn audit_structure(scan: &PageScan) -> Result<StructureReport> {
    let mut report = StructureReport::default();
    for page in scan.pages()? {
        let content = read_page(&page)?;
        let name = scan.display_name(&page);
        report.pages_scanned += 1;
        if !has_footer(&content) {
            report.missing_footer.push(name.clone());
        }
        if !has_mobile_menu(&content) {
            report.missing_mobile_menu.push(name);
        }
    }
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SparsePage {
    pub page: String,
    pub images: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct ImageReport {
    pub pages_scanned: usize,
    pub min_images: usize,
    pub legacy_domain: String,
    pub sparse_pages: Vec<SparsePage>,
    pub legacy_images: BTreeMap<String, Vec<String>>,
}

pub struct ImagePatterns {
    img_tag: Regex,
    legacy_src: Regex,
}

impl ImagePatterns {
    /// # Errors
    ///
    /// Returns an error if the patterns fail to compile.
    pub fn new(legacy_domain: &str) -> Result<Self> {
        let legacy = format!(
            r#"src=["'](https?://{}[^"']+)["']"#,
            regex::escape(legacy_domain)
        );
        Ok(Self {
            img_tag: Regex::new(r"<img\s").context("image tag pattern")?,
            legacy_src: Regex::new(&legacy).context("legacy source pattern")?,
        })
    }

    #[must_use]
    pub fn count_images(&self, page: &str) -> usize {
        self.img_tag.find_iter(page).count()
    }

    #[must_use]
    pub fn legacy_sources(&self, page: &str) -> Vec<String> {
        self.legacy_src
            .captures_iter(page)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Find pages with too few images and images still served from the legacy
/// domain.
///
/// # Errors
///
/// Returns an error if the site cannot be walked or a page cannot be read.
pub fn audit_images(scan: &PageScan, legacy_domain: &str, min_images: usize) -> Result<ImageReport> {
    let patterns = ImagePatterns::new(legacy_domain)?;
    let mut report = ImageReport {
        min_images,
        legacy_domain: legacy_domain.to_string(),
        ..ImageReport::default()
    };
    for page in scan.pages()? {
        let content = read_page(&page)?;
        let name = scan.display_name(&page);
        report.pages_scanned += 1;
        let images = patterns.count_images(&content);
        if images < min_images {
            report.sparse_pages.push(SparsePage {
                page: name.clone(),
                images,
            });
        }
        let legacy = patterns.legacy_sources(&content);
        if !legacy.is_empty() {
            report.legacy_images.insert(name, legacy);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_checks_are_literal() {
        assert!(has_footer("<footer class=\"site\">"));
        assert!(!has_footer("<div id=\"footer\">"));
        assert!(has_mobile_menu("<nav id=\"mobile-menu\">"));
        assert!(!has_mobile_menu("<nav id='mobile-menu'>"));
    }

    #[test]
    fn counts_img_tags_only() {
        let patterns = ImagePatterns::new(DEFAULT_LEGACY_DOMAIN).unwrap();
        let page = "<img src=\"a.png\"><img\nsrc=\"b.png\"><imgx><picture>";
        assert_eq!(patterns.count_images(page), 2);
    }

    #[test]
    fn finds_legacy_sources_in_either_quote_style() {
        let patterns = ImagePatterns::new(DEFAULT_LEGACY_DOMAIN).unwrap();
        let page = concat!(
            "<img src=\"https://fairfaxcoinandbullionexchange.com/wp/gold.jpg\">",
            "<img src='http://fairfaxcoinandbullionexchange.com/silver.png'>",
            "<img src=\"https://cdn.example.com/ok.png\">",
            "<img src=\"https://fairfaxcoinandbullionexchangeXcom/no.png\">",
        );
        assert_eq!(
            patterns.legacy_sources(page),
            vec![
                "https://fairfaxcoinandbullionexchange.com/wp/gold.jpg",
                "http://fairfaxcoinandbullionexchange.com/silver.png",
            ]
        );
    }
}
