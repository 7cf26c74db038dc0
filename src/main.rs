use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use release_docs_guard::cli::{run_guard, GuardContext, GuardOutcome};
use release_docs_guard::config;
use release_docs_guard::git::Git2Repository;
use release_docs_guard::logging::{self, LogFormat};
use release_docs_guard::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-docs-guard",
    about = "Check that new releases are cross-referenced across the docs tree"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory inside the repository to check (default: current)")]
    root: PathBuf,

    #[arg(long, help = "CI event name (overrides GITHUB_EVENT_NAME)")]
    event: Option<String>,

    #[arg(long, help = "Base revision (overrides PR_BASE_SHA)")]
    base: Option<String>,

    #[arg(long, help = "Head revision (overrides PR_HEAD_SHA)")]
    head: Option<String>,

    #[arg(long, help = "Emit debug diagnostics on stderr")]
    verbose: bool,

    #[arg(long, help = "Emit diagnostics as JSON")]
    log_json: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-docs-guard {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init(format, args.verbose);

    let ctx = GuardContext::from_env().with_overrides(args.event, args.base, args.head);

    // Outside pull requests nothing is read, not even the config file.
    if !ctx.is_pull_request() {
        ui::display_outcome(&GuardOutcome::Skipped);
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let root = args.root;
    match run_guard(&ctx, &config, &root, || Git2Repository::open(&root)) {
        Ok(report) => {
            ui::display_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "release docs guard failed");
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
