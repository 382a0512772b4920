//! Daemon connection settings
//!
//! `RpcConfig` is a plain value read once at construction time. Loading it is
//! the embedding application's job; [`RpcConfig::from_env`] covers the common
//! case of the `GRIDCOIN_RPC_*` variables used by container deployments.

use gridrpc_core::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Default daemon host, reachable from inside a container
pub const DEFAULT_HOST: &str = "host.docker.internal";
/// Default Gridcoin mainnet RPC port
pub const DEFAULT_PORT: u16 = 15715;
/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default bound on concurrently dispatched bundle calls
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Connection settings for one daemon
///
/// # Examples
///
/// ```rust
/// use gridrpc_client::RpcConfig;
/// use std::time::Duration;
///
/// let config = RpcConfig::new("127.0.0.1", 25715)
///     .with_credentials("gridcoinrpc", "s3cret")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.url(), "http://127.0.0.1:25715/");
/// assert!(!format!("{:?}", config).contains("s3cret"));
/// ```
#[derive(Clone)]
pub struct RpcConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Upper bound on one HTTP round trip
    pub timeout: Duration,
    /// Bundle sub-calls dispatched at once; 1 dispatches sequentially
    pub max_in_flight: usize,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            timeout: DEFAULT_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl RpcConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Read settings from `GRIDCOIN_RPC_*` environment variables
    ///
    /// | variable                    | default                 |
    /// |-----------------------------|-------------------------|
    /// | `GRIDCOIN_RPC_HOST`         | `host.docker.internal`  |
    /// | `GRIDCOIN_RPC_PORT`         | `15715`                 |
    /// | `GRIDCOIN_RPC_USER`         | empty                   |
    /// | `GRIDCOIN_RPC_PASSWORD`     | empty                   |
    /// | `GRIDCOIN_RPC_TIMEOUT_SECS` | `30`                    |
    ///
    /// A variable that is set but does not parse is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("GRIDCOIN_RPC_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("GRIDCOIN_RPC_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("GRIDCOIN_RPC_PORT={:?}: {}", port, e)))?;
        }
        if let Some(user) = lookup("GRIDCOIN_RPC_USER") {
            config.username = user;
        }
        if let Some(password) = lookup("GRIDCOIN_RPC_PASSWORD") {
            config.password = password;
        }
        if let Some(secs) = lookup("GRIDCOIN_RPC_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                Error::Config(format!("GRIDCOIN_RPC_TIMEOUT_SECS={:?}: {}", secs, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bound on concurrently dispatched bundle calls (clamped to at least 1)
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Endpoint the requests are posted to
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_in_flight", &self.max_in_flight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RpcConfig::default();
        assert_eq!(config.host, "host.docker.internal");
        assert_eq!(config.port, 15715);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_in_flight, 4);
        assert_eq!(config.url(), "http://host.docker.internal:15715/");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = RpcConfig::from_lookup(lookup_from(&[
            ("GRIDCOIN_RPC_HOST", "10.0.0.5"),
            ("GRIDCOIN_RPC_PORT", "25715"),
            ("GRIDCOIN_RPC_USER", "rpcuser"),
            ("GRIDCOIN_RPC_PASSWORD", "rpcpass"),
            ("GRIDCOIN_RPC_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.url(), "http://10.0.0.5:25715/");
        assert_eq!(config.username, "rpcuser");
        assert_eq!(config.password, "rpcpass");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = RpcConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.username.is_empty());
    }

    #[test]
    fn test_from_lookup_rejects_bad_port() {
        let error = RpcConfig::from_lookup(lookup_from(&[("GRIDCOIN_RPC_PORT", "http")]))
            .unwrap_err();
        assert!(matches!(error, Error::Config(_)));
        assert!(error.to_string().contains("GRIDCOIN_RPC_PORT"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = RpcConfig::from_lookup(lookup_from(&[("GRIDCOIN_RPC_TIMEOUT_SECS", "-1")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = RpcConfig::default().with_credentials("user", "hunter2");
        let debug = format!("{:?}", config);
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_max_in_flight_clamped() {
        assert_eq!(RpcConfig::default().with_max_in_flight(0).max_in_flight, 1);
    }
}
