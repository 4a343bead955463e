use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "shopdash")]
#[command(about = "Service-shop job cards, time tracking and reports")]
#[command(long_about = "shopdash - a service-shop dashboard

Browse the job board, track work and break time against a job card,
and see where the shop's hours go. All data is in-memory demo data.

QUICK START:
  shopdash jobs                         List job cards
  shopdash job JC-1001                  Show one job card
  shopdash simulate --job JC-1001 work:90m break:15m work:75m
  shopdash report --period week         Weekly shop report
  shopdash dashboard                    Interactive dashboard

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log line format on stderr (filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

/// Log line format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List job cards on the board
    ///
    /// # Examples
    ///
    ///   shopdash jobs
    ///   shopdash jobs --status in_progress
    Jobs {
        /// Only show jobs with this status (pending, in_progress, on_hold, completed)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show a job card with customer, vehicle and technician
    Job {
        /// Job card id, e.g. JC-1001
        id: String,
    },

    /// Run a scripted tracking session against a job card
    ///
    /// Each segment is `label:duration`. Every segment is started and then
    /// paused; the last one is stopped, which clocks the job out.
    ///
    /// # Examples
    ///
    ///   shopdash simulate --job JC-1001 work:90m
    ///   shopdash simulate --job JC-1001 break:15 work:1h15m
    ///   shopdash simulate --job JC-1002 work:45m waiting:20m --no-clock-out
    Simulate(SimulateArgs),

    /// Shop report: board status and worked-time breakdowns
    ///
    /// # Examples
    ///
    ///   shopdash report
    ///   shopdash report --period today
    Report {
        /// Period to report on (today, week, month, all)
        #[arg(short, long, default_value = "week")]
        period: String,
    },

    /// Check the demo login credentials
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long, env = "SHOPDASH_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Interactive dashboard (login, job board, time tracker)
    Dashboard,

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Print a shell completion script
    ///
    /// # Examples
    ///
    ///   source <(shopdash completions bash)
    ///   shopdash completions fish > ~/.config/fish/completions/shopdash.fish
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Job card to track against
    #[arg(short, long)]
    pub job: String,

    /// Segments as `label:duration` (labels: work, break, waiting, quality_check)
    #[arg(required = true, num_args = 1..)]
    pub segments: Vec<String>,

    /// Pause the last segment instead of stopping (the job is not clocked out)
    #[arg(long)]
    pub no_clock_out: bool,

    /// Start instant for the first segment (RFC 3339); defaults to now
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
