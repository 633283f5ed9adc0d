//! Portal client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::PortalClient;

/// Configuration for the portal HTTP client.
///
/// Note: Custom Debug impl masks the auth token to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the portal API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token for authenticated endpoints. Supports `${VAR}`
    /// interpolation.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalConfig")
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mockexam.toml` in the current directory
/// 2. `~/.config/mockexam/config.toml`
///
/// Environment variable overrides: `MOCKEXAM_BASE_URL`,
/// `MOCKEXAM_API_TOKEN`.
pub fn load_config() -> Result<PortalConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PortalConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mockexam.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PortalConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PortalConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("MOCKEXAM_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(token) = std::env::var("MOCKEXAM_API_TOKEN") {
        config.auth_token = Some(token);
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.auth_token = config.auth_token.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mockexam"))
}

/// Create a portal client from its configuration.
pub fn create_client(config: &PortalConfig) -> PortalClient {
    PortalClient::with_timeout(
        &config.base_url,
        config.auth_token.clone(),
        config.timeout_secs,
    )
}
