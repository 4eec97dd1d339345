//! Runtime configuration for the relay.

/// Root URL of the upstream script host. One directory per system, one
/// subdirectory per database kind, one `scriptNNN.txt` file per script.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://medilab.tecnologia.ws/scriptsbd";

/// Configuration for the relay server and its outbound fetches.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Port the HTTP listener binds to
    pub port: u16,

    /// Root URL scripts are fetched from
    pub upstream_base_url: String,

    /// Per-script timeout for batch fetches, in milliseconds
    pub batch_timeout_ms: u64,

    /// Timeout for single-script fetches, in milliseconds
    pub script_timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            batch_timeout_ms: 15_000,
            script_timeout_ms: 10_000,
        }
    }
}

impl RelayConfig {
    /// Build the configuration from the environment.
    ///
    /// Only the listening port is environment-driven (`PORT`, as set by the
    /// hosting platform); everything else keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_service() {
        let config = RelayConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.batch_timeout_ms, 15_000);
        assert_eq!(config.script_timeout_ms, 10_000);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
    }
}
