mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

/// Environment variable holding the Replicate API credential.
pub const API_TOKEN_ENV: &str = "REPLICATE_API_TOKEN";

/// Loads configuration from the YAML file named by `CONFIG_PATH` (default
/// `config.yaml`) and captures `REPLICATE_API_TOKEN` from the environment.
/// A missing file is not an error: the service runs on defaults plus the
/// environment credential.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let file = match tokio::fs::read_to_string(&config_path).await {
        Ok(contents) => {
            debug!("Loading configuration from: {}", config_path);
            serde_yaml::from_str::<ConfigFile>(&contents)?
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            ConfigFile::default()
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Config {
        server: file.server,
        replicate: file.replicate,
        api_token: read_api_token(),
    })
}

fn read_api_token() -> Option<String> {
    env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty())
}
