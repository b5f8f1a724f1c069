//! Environment-driven configuration

use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Address the gateway listens on
    pub bind: SocketAddr,
    /// Prefix that marks a chat line as a command
    pub prefix: String,
    /// Vote cap a fresh process starts with
    pub default_vote_cap: u32,
    /// Titles scoring strictly above this are duplicates (0-100)
    pub duplicate_threshold: u8,
    /// Live tally push interval (None = disabled)
    pub tally_interval: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            prefix: "!".to_string(),
            default_vote_cap: 3,
            duplicate_threshold: 95,
            tally_interval: Some(Duration::from_millis(1000)),
        }
    }
}

/// Read and parse an env var, warning and falling back when it doesn't parse
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", name, value);
            None
        }
    }
}

impl PollConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = env_parse::<SocketAddr>("MOVIEPOLL_BIND").unwrap_or(defaults.bind);

        let prefix = std::env::var("MOVIEPOLL_PREFIX")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.prefix);

        let default_vote_cap =
            env_parse::<u32>("MOVIEPOLL_DEFAULT_VOTE_CAP").unwrap_or(defaults.default_vote_cap);

        let duplicate_threshold = env_parse::<u8>("MOVIEPOLL_DUPLICATE_THRESHOLD")
            .map(|t| t.min(100))
            .unwrap_or(defaults.duplicate_threshold);

        let tally_interval = match env_parse::<u64>("MOVIEPOLL_TALLY_INTERVAL_MS") {
            Some(0) => {
                tracing::info!("Live tally broadcaster disabled");
                None
            }
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.tally_interval,
        };

        Self {
            bind,
            prefix,
            default_vote_cap,
            duplicate_threshold,
            tally_interval,
        }
    }
}
