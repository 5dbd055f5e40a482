// keyroll CLI - import tabular files, review them against the master
// record set, apply decisions, purge staged content.

mod decisions;
mod exit_codes;
mod ingest;
mod records;
mod review;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use keyroll_recon::ReconError;
use keyroll_store::Database;

use exit_codes::{EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_STORE, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "keyroll")]
#[command(about = "Reconcile spreadsheet rows against a master record set")]
#[command(version)]
struct Cli {
    /// Database file (created on first use)
    #[arg(long, global = true, env = "KEYROLL_DB", default_value = "keyroll.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a tabular file and stage its rows for review
    #[command(after_help = "\
Examples:
  keyroll import roster.csv
  keyroll import members.xlsx --by alice
  keyroll --db club.db import roster.csv")]
    Import {
        /// CSV/TSV or Excel file
        file: PathBuf,

        /// Who uploaded the file
        #[arg(long = "by", env = "USER", default_value = "unknown")]
        uploaded_by: String,
    },

    /// List imported archives
    Archives,

    /// Classify an archive's staged rows as new / matched / disagreement
    #[command(after_help = "\
Examples:
  keyroll classify 3
  keyroll classify 3 --json
  keyroll classify 3 --config recon.toml")]
    Classify {
        /// Archive id from `keyroll import`
        archive_id: i64,

        /// Recon config (key column selection)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output JSON instead of a human summary
        #[arg(long)]
        json: bool,
    },

    /// Apply per-row decisions from a TOML file to the master record set
    #[command(after_help = "\
Examples:
  keyroll apply 3 --decisions decisions.toml
  keyroll apply 3 --decisions decisions.toml --cleanup")]
    Apply {
        /// Archive id from `keyroll import`
        archive_id: i64,

        /// Decisions file ([[decision]] tables with row and action)
        #[arg(long)]
        decisions: PathBuf,

        /// Recon config (key column selection)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Purge the archive's staged content after applying
        #[arg(long)]
        cleanup: bool,
    },

    /// Discard an archive's staged content without touching master records
    Cleanup {
        /// Archive id from `keyroll import`
        archive_id: i64,
    },

    /// List master records
    Master {
        /// Output JSON instead of a human listing
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_STORE,
            message: msg.into(),
            hint: None,
        }
    }
}

impl From<ReconError> for CliError {
    fn from(e: ReconError) -> Self {
        let code = match &e {
            ReconError::Store(_) => EXIT_STORE,
            _ => EXIT_INVALID_CONFIG,
        };
        Self {
            code,
            message: e.to_string(),
            hint: None,
        }
    }
}

pub fn open_db(path: &Path) -> Result<Database, CliError> {
    Database::open(path).map_err(|e| CliError::store(e.to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import { file, uploaded_by } => ingest::cmd_import(&cli.db, &file, &uploaded_by),
        Commands::Archives => ingest::cmd_archives(&cli.db),
        Commands::Classify {
            archive_id,
            config,
            json,
        } => review::cmd_classify(&cli.db, archive_id, config.as_deref(), json),
        Commands::Apply {
            archive_id,
            decisions,
            config,
            cleanup,
        } => review::cmd_apply(&cli.db, archive_id, &decisions, config.as_deref(), cleanup),
        Commands::Cleanup { archive_id } => review::cmd_cleanup(&cli.db, archive_id),
        Commands::Master { json } => records::cmd_master(&cli.db, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}
