use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::args::Cli;
use crate::error::ShopError;

/// Render a completion script for `shell`.
///
/// # Errors
///
/// Returns `ShopError::Parse` if the generated script is not UTF-8.
pub fn completions(shell: Shell) -> Result<String, ShopError> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, name, &mut buf);
    String::from_utf8(buf).map_err(|e| ShopError::Parse(format!("completion script: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions() {
        let script = completions(Shell::Bash).unwrap();
        assert!(script.contains("shopdash"));
        assert!(script.contains("simulate"));
    }
}
