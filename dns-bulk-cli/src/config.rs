//! Front-end configuration
//!
//! An optional JSON file at `<config dir>/dns-bulk/config.json`:
//!
//! ```json
//! { "apiToken": "...", "engine": { "dispatchConcurrency": 8 } }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use dns_bulk_core::EngineConfig;
use dns_bulk_provider::ProviderCredentials;
use serde::Deserialize;

const APP_DIR: &str = "dns-bulk";
const CONFIG_FILE: &str = "config.json";

/// Settings read from the configuration file; every field is optional.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Cloudflare API token
    pub api_token: Option<String>,
    /// Concurrency bounds of bulk runs
    pub engine: EngineConfig,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "****"))
            .field("engine", &self.engine)
            .finish()
    }
}

impl AppConfig {
    /// `<config dir>/dns-bulk/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load `explicit`, or the default file when it exists.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pick the provider credentials.
    ///
    /// `--demo` wins; otherwise the token from the command line (flag or
    /// `CF_API_TOKEN`) comes before the one in the file.
    pub fn credentials(&self, cli_token: Option<&str>, demo: bool) -> Result<ProviderCredentials> {
        if demo {
            return Ok(ProviderCredentials::InMemory);
        }
        let token = cli_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.api_token.as_deref().filter(|t| !t.trim().is_empty()));
        match token {
            Some(token) => Ok(ProviderCredentials::Cloudflare {
                api_token: token.trim().to_string(),
            }),
            None => bail!(
                "No Cloudflare API token: pass --token, set CF_API_TOKEN, add \"apiToken\" to the config file, or use --demo"
            ),
        }
    }

    /// Engine bounds with the command-line override applied.
    pub fn engine(&self, dispatch_concurrency: Option<usize>) -> EngineConfig {
        let mut engine = self.engine;
        if let Some(n) = dispatch_concurrency {
            engine.dispatch_concurrency = n;
        }
        engine.validated()
    }
}
