//! table-pager CLI
//!
//! Page through a table with a substring filter, either as a one-shot
//! snapshot or interactively in the terminal.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use table_pager::paginator::Paginator;
use table_pager::report::format_page;
use table_pager::table::load_table;
use table_pager::tui::run::run;
use table_pager::types::{
    OutputFormat, PageRef, PageSize, PagerConfig, DEFAULT_PAGE_SIZE, DEFAULT_TABLE_SELECTOR,
};

#[derive(Parser)]
#[command(name = "table-pager")]
#[command(about = "Paginate and filter tables")]
#[command(version)]
struct Cli {
    /// Write logs to this file instead of stderr (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of a table
    Page {
        /// Table file (.json, otherwise tab-separated)
        path: PathBuf,

        /// Page to show: a number (clamped to the available pages), or
        /// `prev`/`next` stepping from page 1
        #[arg(long, default_value = "1")]
        page: PageRef,

        #[command(flatten)]
        pager: PagerArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Browse a table interactively
    Browse {
        /// Table file (.json, otherwise tab-separated)
        path: PathBuf,

        #[command(flatten)]
        pager: PagerArgs,
    },
}

/// Options shared by every command that builds a pager.
#[derive(clap::Args)]
struct PagerArgs {
    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    rows: usize,

    /// Only show rows containing this text (case-insensitive)
    #[arg(long, default_value = "")]
    filter: String,

    /// Selector of the generated table element
    #[arg(long, default_value = DEFAULT_TABLE_SELECTOR)]
    table: String,
}

impl PagerArgs {
    fn config(&self) -> Result<PagerConfig> {
        let default_page_size =
            PageSize::new(self.rows).context("--rows must be a positive integer")?;
        Ok(PagerConfig {
            default_page_size,
            table_selector: self.table.clone(),
            ..Default::default()
        })
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
    Html,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Html => OutputFormat::Html,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_file.as_deref()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Page {
            path,
            page,
            pager,
            format,
        } => cmd_page(&path, page, &pager, format.into()),
        Commands::Browse { path, pager } => cmd_browse(&path, &pager),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Logs never go to stdout: snapshots are printed there and the TUI owns it.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_page(path: &Path, page: PageRef, args: &PagerArgs, format: OutputFormat) -> Result<()> {
    let config = args.config()?;
    let mut doc = load_table(path)?
        .into_document()
        .with_form_defaults(&args.filter, &config.default_page_size.to_string());

    let mut pager = Paginator::new(config);
    pager.initialize(&mut doc);
    if page != PageRef::Number(1) {
        pager.activate_page(page, &mut doc);
    }

    print!("{}", format_page(&pager, &doc, format)?);
    Ok(())
}

fn cmd_browse(path: &Path, args: &PagerArgs) -> Result<()> {
    let config = args.config()?;
    let doc = load_table(path)?
        .into_document()
        .with_form_defaults(&args.filter, &config.default_page_size.to_string());

    run(doc, config).context("terminal UI failed")?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn page_target(args: &[&str]) -> Result<PageRef, clap::Error> {
        let argv = ["table-pager", "page", "rows.tsv"].iter().chain(args);
        match Cli::try_parse_from(argv)?.command {
            Commands::Page { page, .. } => Ok(page),
            Commands::Browse { .. } => unreachable!("parsed a page command"),
        }
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(page_target(&[]).unwrap(), PageRef::Number(1));
    }

    #[test]
    fn page_accepts_numbers_and_sentinels() {
        assert_eq!(page_target(&["--page", "4"]).unwrap(), PageRef::Number(4));
        assert_eq!(page_target(&["--page", "next"]).unwrap(), PageRef::Next);
        assert_eq!(page_target(&["--page", "prev"]).unwrap(), PageRef::Prev);
    }

    #[test]
    fn page_rejects_other_words() {
        let err = page_target(&["--page", "later"]).unwrap_err();
        assert!(err.to_string().contains("invalid page reference"));
    }

    #[test]
    fn zero_rows_is_rejected() {
        let cli = Cli::try_parse_from(["table-pager", "browse", "t.tsv", "--rows", "0"]).unwrap();
        let Commands::Browse { pager, .. } = cli.command else {
            panic!("expected browse");
        };
        assert!(pager.config().is_err());
    }
}
