//! Rendering command results to the console or as JSON.

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::audit::{ImageReport, StructureReport};
use crate::inject::InjectReport;
use crate::rewrite::RewriteReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Console,
    /// Pretty-printed JSON
    Json,
}

pub enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    /// # Errors
    ///
    /// Returns an error if the output file cannot be created.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}

/// Anything a subcommand can report.
pub trait Report: Serialize {
    fn findings(&self) -> usize;

    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_console(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_report<R: Report>(out: &mut dyn Write, report: &R, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        ReportFormat::Console => report.write_console(out)?,
    }
    out.flush()?;
    Ok(())
}

fn heading(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "{}", title.bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(title.len()).cyan())
}

fn list_section(out: &mut dyn Write, label: &str, pages: &[String]) -> std::io::Result<()> {
    if pages.is_empty() {
        return writeln!(out, "{} {label}: none", "✓".green());
    }
    writeln!(out, "{} {label}: {}", "✗".red(), pages.len().to_string().red())?;
    for page in pages {
        writeln!(out, "   - {page}")?;
    }
    Ok(())
}

impl Report for InjectReport {
    fn findings(&self) -> usize {
        0
    }

    fn write_console(&self, out: &mut dyn Write) -> std::io::Result<()> {
        heading(out, "Toolbar loader injection")?;
        writeln!(out, "Bundle: {}", self.bundle)?;
        if self.dry_run {
            writeln!(out, "{}", "dry run: no files written".yellow())?;
        }
        writeln!(
            out,
            "Updated: {}  Already present: {}",
            self.updated.len().to_string().green(),
            self.skipped.len()
        )?;
        for page in &self.updated {
            writeln!(out, "   + {page}")?;
        }
        Ok(())
    }
}

impl Report for StructureReport {
    fn findings(&self) -> usize {
        self.missing_footer.len() + self.missing_mobile_menu.len()
    }

    fn write_console(&self, out: &mut dyn Write) -> std::io::Result<()> {
        heading(out, "Page structure audit")?;
        writeln!(out, "Pages scanned: {}", self.pages_scanned)?;
        list_section(out, "Missing <footer>", &self.missing_footer)?;
        list_section(out, "Missing mobile menu", &self.missing_mobile_menu)
    }
}

impl Report for ImageReport {
    fn findings(&self) -> usize {
        self.sparse_pages.len() + self.legacy_images.values().map(Vec::len).sum::<usize>()
    }

    fn write_console(&self, out: &mut dyn Write) -> std::io::Result<()> {
        heading(out, "Image audit")?;
        writeln!(out, "Pages scanned: {}", self.pages_scanned)?;
        if self.sparse_pages.is_empty() {
            writeln!(out, "{} Pages with fewer than {} images: none", "✓".green(), self.min_images)?;
        } else {
            writeln!(
                out,
                "{} Pages with fewer than {} images: {}",
                "✗".red(),
                self.min_images,
                self.sparse_pages.len().to_string().red()
            )?;
            for sparse in &self.sparse_pages {
                writeln!(out, "   - {} ({} images)", sparse.page, sparse.images)?;
            }
        }
        if self.legacy_images.is_empty() {
            writeln!(out, "{} Images on {}: none", "✓".green(), self.legacy_domain)?;
        } else {
            writeln!(out, "{} Images on {}:", "✗".red(), self.legacy_domain)?;
            for (page, sources) in &self.legacy_images {
                writeln!(out, "   {}", page.bold())?;
                for src in sources {
                    writeln!(out, "     {src}")?;
                }
            }
        }
        Ok(())
    }
}

impl Report for RewriteReport {
    fn findings(&self) -> usize {
        0
    }

    fn write_console(&self, out: &mut dyn Write) -> std::io::Result<()> {
        heading(out, "Legacy image replacement")?;
        if self.dry_run {
            writeln!(out, "{}", "dry run: no files written".yellow())?;
        }
        writeln!(
            out,
            "Pages scanned: {}  Pages updated: {}",
            self.pages_scanned,
            self.updated.len().to_string().green()
        )?;
        for (page, replaced) in &self.updated {
            writeln!(out, "   + {page} ({replaced} images)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure() -> StructureReport {
        StructureReport {
            pages_scanned: 3,
            missing_footer: vec!["about.html".into()],
            missing_mobile_menu: Vec::new(),
        }
    }

    #[test]
    fn console_lists_offending_pages() {
        let mut out = Vec::new();
        write_report(&mut out, &structure(), ReportFormat::Console).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Page structure audit"));
        assert!(text.contains("about.html"));
        assert!(text.contains("Missing mobile menu: none"));
    }

    #[test]
    fn json_report_is_machine_readable() {
        let mut out = Vec::new();
        write_report(&mut out, &structure(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["pages_scanned"], 3);
        assert_eq!(value["missing_footer"][0], "about.html");
    }

    #[test]
    fn output_target_writes_file() {
        let path = std::env::temp_dir().join("sitekit-report-target.txt");
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
        drop(target);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "ok");
    }
}
