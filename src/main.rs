use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use lembar::{
    art::welcome_message,
    command::{LineOutcome, process_line},
    config::StoreConfig,
    storage::table::Table,
    types::error::{DatabaseError, Result},
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Single-table record store with a line-oriented shell
#[derive(Parser, Debug)]
#[command(name = "lembar", version, about)]
struct Args {
    /// Database file; created when missing
    #[arg(value_name = "DB_FILE")]
    db_file: PathBuf,

    /// Upper bound on pages per table
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Suppress the banner
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "lembar=debug" } else { "lembar=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(args: &Args) -> Result<StoreConfig> {
    let config = match &args.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };
    match args.max_pages {
        Some(max_pages) => config.with_max_pages(max_pages),
        None => Ok(config),
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let mut table = Table::open_with_max_pages(&args.db_file, config.max_pages)?;

    if !args.quiet {
        println!("{}", welcome_message("LEMBAR DB"));
    }

    let outcome = repl(&mut table, &config);

    // Orderly shutdown on every path: flush what is loaded before reporting.
    let closed = table.close();
    outcome?;
    closed
}

fn repl(table: &mut Table, config: &StoreConfig) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(readline_error)?;
    if let Some(history) = &config.history_file {
        if rl.load_history(history).is_err() {
            info!(path = %history.display(), "no previous history");
        }
    }

    let stdout = io::stdout();
    let result = loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let mut out = stdout.lock();
                match process_line(&line, table, &mut out) {
                    Ok(LineOutcome::Continue) => out.flush()?,
                    Ok(LineOutcome::Exit) => break Ok(()),
                    Err(e) => break Err(e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                info!("input closed");
                break Ok(());
            }
            Err(err) => break Err(readline_error(err)),
        }
    };

    if let Some(history) = &config.history_file {
        if let Err(e) = rl.save_history(history) {
            warn!(path = %history.display(), "failed to save history: {}", e);
        }
    }
    result
}

fn readline_error(err: ReadlineError) -> DatabaseError {
    match err {
        ReadlineError::Io(e) => DatabaseError::Io(e),
        other => DatabaseError::Io(io::Error::other(other.to_string())),
    }
}
