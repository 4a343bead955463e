//! Config command implementation.

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::ShopError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn config(
    config: &Config,
    paths: &Paths,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, ShopError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(config),
            OutputFormat::Pretty => config.to_yaml(),
        },
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(ShopError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    paths.config_file.display()
                )));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            Ok(format!(
                "{} Wrote {}",
                "✓".green(),
                paths.config_file.display()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_refuse_overwrite() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().join(".shopdash"));
        let cfg = Config::default();

        config(&cfg, &paths, ConfigCommands::Init { force: false }, OutputFormat::Pretty)
            .unwrap();
        assert!(paths.config_file.exists());

        let err = config(&cfg, &paths, ConfigCommands::Init { force: false }, OutputFormat::Pretty)
            .unwrap_err();
        assert!(matches!(err, ShopError::Config(_)));

        config(&cfg, &paths, ConfigCommands::Init { force: true }, OutputFormat::Pretty)
            .unwrap();
    }

    #[test]
    fn test_show_json() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        let text = config(&Config::default(), &paths, ConfigCommands::Show, OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tracking"]["tick_interval_ms"], 1000);
    }

    #[test]
    fn test_path() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        let text = config(&Config::default(), &paths, ConfigCommands::Path, OutputFormat::Pretty)
            .unwrap();
        assert!(text.ends_with("config.yaml"));
    }
}
