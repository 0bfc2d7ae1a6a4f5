// Configuration module entry point
// Layers file, environment, and default sources; holds shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    CacheConfig, Config, LoggingConfig, PerformanceConfig, ServerConfig, ServingConfig,
};

impl Config {
    /// Load configuration from the specified file path (without extension).
    /// Values layer as defaults < file < `NOCASE_*` environment variables;
    /// command-line flags are applied on top by the caller.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("NOCASE").separator("_"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("serving.root", ".")?
            .set_default("serving.spa_fallback", true)?
            .set_default("serving.plain_404", false)?
            .set_default("serving.index_file", "index.html")?
            .set_default("cache.capacity", 2000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    /// Load from the default "config.toml" next to the binary.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
