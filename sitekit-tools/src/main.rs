mod audit;
mod inject;
mod report;
mod rewrite;
mod site;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use report::{OutputTarget, Report, ReportFormat, write_report};
use site::{DEFAULT_EXCLUDES, PageScan};

#[derive(Debug, Parser)]
#[command(name = "sitekit-tools", version)]
#[command(about = "Toolbar injection and page audits for a static site")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Site root containing the HTML pages
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Output report format
    #[arg(long, global = true, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Exit with status 1 when an audit finds problems
    #[arg(long, global = true)]
    fail_on_findings: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add the module loader for the toolbar bundle to every top-level page
    Inject {
        /// Path or URL of the `sitekit_web.js` bundle, as seen from the pages
        #[arg(long, default_value = inject::DEFAULT_BUNDLE)]
        script: String,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Report pages missing the footer or mobile menu
    AuditStructure {
        /// Directory names skipped while walking
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,
    },
    /// Report pages with too few images or images on the legacy domain
    AuditImages {
        #[arg(long, default_value = audit::DEFAULT_LEGACY_DOMAIN)]
        legacy_domain: String,

        #[arg(long, default_value_t = audit::DEFAULT_MIN_IMAGES)]
        min_images: usize,

        /// Directory names skipped while walking
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,
    },
    /// Point images on the legacy domain at local copies
    ReplaceImages {
        #[arg(long, default_value = audit::DEFAULT_LEGACY_DOMAIN)]
        legacy_domain: String,

        /// JSON object mapping legacy file names to local paths
        #[arg(long)]
        map: Option<PathBuf>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Directory names skipped while walking
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let findings = run(&args)?;
    if args.fail_on_findings && findings > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn excludes(custom: Option<&Vec<String>>) -> Vec<String> {
    custom.cloned().unwrap_or_else(|| {
        DEFAULT_EXCLUDES
            .iter()
            .map(ToString::to_string)
            .collect()
    })
}

fn run(args: &Args) -> Result<usize> {
    match &args.command {
        Command::Inject { script, dry_run } => {
            emit(args, &inject::run(&args.root, script, *dry_run)?)
        }
        Command::AuditStructure { exclude } => {
            let scan = PageScan::recursive(&args.root, excludes(exclude.as_ref()));
            emit(args, &audit::audit_structure(&scan)?)
        }
        Command::AuditImages {
            legacy_domain,
            min_images,
            exclude,
        } => {
            let scan = PageScan::recursive(&args.root, excludes(exclude.as_ref()));
            emit(args, &audit::audit_images(&scan, legacy_domain, *min_images)?)
        }
        Command::ReplaceImages {
            legacy_domain,
            map,
            dry_run,
            exclude,
        } => {
            let scan = PageScan::recursive(&args.root, excludes(exclude.as_ref()));
            let rules = rewrite::load_replacements(map.as_deref())?;
            let rewriter = rewrite::ImageRewriter::new(legacy_domain, &rules)?;
            emit(args, &rewrite::run(&scan, &rewriter, *dry_run)?)
        }
    }
}

fn emit<R: Report>(args: &Args, report: &R) -> Result<usize> {
    let mut target = OutputTarget::new(args.output.clone())?;
    write_report(&mut target, report, args.report)?;
    Ok(report.findings())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "sitekit-tools",
            "audit-images",
            "--min-images",
            "3",
            "--report",
            "json",
            "--root",
            "site",
        ])
        .unwrap();
        assert_eq!(args.report, ReportFormat::Json);
        assert_eq!(args.root, PathBuf::from("site"));
        assert!(matches!(
            args.command,
            Command::AuditImages { min_images: 3, .. }
        ));
    }

    #[test]
    fn default_excludes_apply_without_flag() {
        assert_eq!(excludes(None), vec!["old_pages", "components", "resources"]);
        let custom = vec!["drafts".to_string()];
        assert_eq!(excludes(Some(&custom)), custom);
    }
}
