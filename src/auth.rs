//! Demo login.
//!
//! Compares against the demo credentials from the config after a simulated
//! round-trip delay. There is no account store, hashing, or session token.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::LoginConfig;
use crate::error::ShopError;

/// Someone who logged in to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub username: String,
    pub display_name: String,
}

/// Checks demo credentials.
#[derive(Debug, Clone)]
pub struct Authenticator {
    username: String,
    password: String,
    display_name: String,
    delay: Duration,
}

impl Authenticator {
    #[must_use]
    pub fn new(config: &LoginConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            display_name: config.display_name.clone(),
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    /// Override the simulated delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Check `username`/`password` against the demo credentials.
    ///
    /// Blank input is rejected immediately; otherwise the call blocks for
    /// the simulated delay first.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Unauthorized` if the credentials don't match.
    pub fn login(&self, username: &str, password: &str) -> Result<Operator, ShopError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ShopError::Unauthorized(
                "username and password are required".to_string(),
            ));
        }

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        if username.eq_ignore_ascii_case(&self.username) && password == self.password {
            info!(username, "login accepted");
            Ok(Operator {
                username: self.username.clone(),
                display_name: self.display_name.clone(),
            })
        } else {
            warn!(username, "login rejected");
            Err(ShopError::Unauthorized("invalid username or password".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(&LoginConfig::default()).with_delay(Duration::ZERO)
    }

    #[test]
    fn test_demo_credentials_accepted() {
        let operator = authenticator().login("admin", "admin123").unwrap();
        assert_eq!(operator.username, "admin");
        assert_eq!(operator.display_name, "Shop Manager");
    }

    #[test]
    fn test_username_is_case_insensitive() {
        assert!(authenticator().login("  Admin ", "admin123").is_ok());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let err = authenticator().login("admin", "ADMIN123").unwrap_err();
        assert!(matches!(err, ShopError::Unauthorized(_)));
    }

    #[test]
    fn test_blank_input_rejected_without_delay() {
        let auth = Authenticator::new(&LoginConfig::default())
            .with_delay(Duration::from_secs(30));

        let started = std::time::Instant::now();
        assert!(auth.login("", "admin123").is_err());
        assert!(auth.login("admin", "").is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_delay_is_applied() {
        let auth = Authenticator::new(&LoginConfig::default())
            .with_delay(Duration::from_millis(20));

        let started = std::time::Instant::now();
        auth.login("admin", "admin123").unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
