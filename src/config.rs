//! Server configuration. Every flag can also come from the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Film collection file
    #[arg(long, env = "FILMS_FILE", default_value = "top250.json")]
    pub films_file: PathBuf,

    /// Manager collection file
    #[arg(long, env = "MANAGERS_FILE", default_value = "managers.json")]
    pub managers_file: PathBuf,

    /// Secret used to sign bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Bearer token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECS", default_value_t = 300)]
    pub token_ttl_secs: u64,

    /// API key for the external catalog feed
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// External catalog feed endpoint
    #[arg(long, env = "CATALOG_URL", default_value = crate::catalog::DEFAULT_CATALOG_URL)]
    pub catalog_url: String,
}

impl ServerConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}
