//! Application configuration.
//!
//! The app deliberately takes no flags, environment variables, or config file:
//! it is a single-user local tool with a fixed address. Everything lives in one
//! value constructed in `main` and passed down.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen host. Loopback only; the app is not meant to be reachable from
    /// other machines.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// How long to wait for the browser-launch action before giving up on it.
    pub browser_deadline: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            browser_deadline: Duration::from_secs(3),
        }
    }
}

impl AppConfig {
    /// Get the listener bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the URL opened in the user's browser.
    pub fn local_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}
