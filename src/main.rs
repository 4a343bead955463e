use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use shopdash::cli::args::{Cli, Commands, LogFormat};
use shopdash::cli::commands;
use shopdash::config::{Config, Paths};
use shopdash::jobs::InMemoryJobStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` filter.
fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would tear the alternate screen.
    if !matches!(cli.command, Commands::Dashboard) {
        init_tracing(cli.log_format)?;
    }

    let paths = Paths::new()?;
    let config = match Config::load_from_path(&paths.config_file) {
        Ok(config) => config,
        // `config` subcommands must still work against a broken file.
        Err(err) if matches!(cli.command, Commands::Config(_)) => {
            warn!(%err, "ignoring unreadable config");
            Config::default()
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("loading {}", paths.config_file.display()));
        }
    };
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Jobs { status } => {
            commands::jobs(&InMemoryJobStore::demo(), status.as_deref(), format)?
        }
        Commands::Job { id } => commands::job(&InMemoryJobStore::demo(), &id, format)?,
        Commands::Simulate(args) => commands::simulate(&config, args, format)?,
        Commands::Report { period } => commands::report(
            &InMemoryJobStore::demo(),
            &period,
            Utc::now().date_naive(),
            format,
        )?,
        Commands::Login { username, password } => {
            commands::login(&config.login, &username, &password, format)?
        }
        Commands::Config(args) => commands::config(&config, &paths, args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        Commands::Dashboard => {
            shopdash::tui::run(InMemoryJobStore::demo(), &config)?;
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
