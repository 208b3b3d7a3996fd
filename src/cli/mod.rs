//! marquee CLI
//!
//! Command-line entry point: starts the shell, prints shell completion
//! scripts for itself, or dumps the active catalogue.

use std::{io, path::PathBuf, process::ExitCode};

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use crate::config::{ShellConfig, DEFAULT_HISTORY_SIZE};
use crate::Result;

/// marquee - media library shell with subcommand-aware tab completion
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalogue JSON file replacing the built-in catalogue
    #[arg(long, env = "MARQUEE_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// History file (default: ~/.marquee_history)
    #[arg(long, env = "MARQUEE_HISTORY")]
    history_file: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long, conflicts_with = "history_file")]
    no_history: bool,

    /// Maximum number of history entries
    #[arg(long, default_value_t = DEFAULT_HISTORY_SIZE)]
    history_size: usize,

    /// Disable coloured output (also honours NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Repl,
    /// Print a shell completion script for marquee
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the active catalogue as JSON
    Catalog,
}

impl Cli {
    fn shell_config(&self) -> ShellConfig {
        let mut config = ShellConfig::default()
            .with_history_size(self.history_size)
            .with_catalog_path(self.catalog.clone())
            .with_color(!self.no_color && !no_color_env());
        if self.no_history {
            config = config.with_history_path(None);
        } else if let Some(path) = &self.history_file {
            config = config.with_history_path(Some(path.clone()));
        }
        config
    }
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "marquee=debug",
        _ => "marquee=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn cmd_catalog(config: &ShellConfig) -> Result<()> {
    let store = config.load_store()?;
    println!("{}", store.catalog.to_json()?);
    Ok(())
}

/// Run the marquee CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.shell_config();
    tracing::debug!(?config, "starting");

    let result = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => crate::repl::run(&config),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        Commands::Catalog => cmd_catalog(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
