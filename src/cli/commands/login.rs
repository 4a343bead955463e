use colored::Colorize;

use crate::auth::Authenticator;
use crate::cli::args::OutputFormat;
use crate::config::LoginConfig;
use crate::error::ShopError;
use crate::output::to_json;

/// Execute the login command.
///
/// # Errors
///
/// Returns `ShopError::Unauthorized` if the credentials are rejected.
pub fn login(
    config: &LoginConfig,
    username: &str,
    password: &str,
    format: OutputFormat,
) -> Result<String, ShopError> {
    let operator = Authenticator::new(config).login(username, password)?;

    match format {
        OutputFormat::Json => to_json(&operator),
        OutputFormat::Pretty => Ok(format!(
            "{} Welcome, {} ({})",
            "✓".green(),
            operator.display_name.bold(),
            operator.username
        )),
    }
}
