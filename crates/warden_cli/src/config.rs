//! Configuration file support for warden.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Environment variables (prefixed with `WARDEN_`, e.g., `WARDEN_GITHUB_TOKEN`)
//! 2. Local config file (./warden.toml)
//! 3. XDG config file (~/.config/warden/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! host = "https://api.github.com"  # optional, this is the default
//! token = "ghp_..."                # or use WARDEN_GITHUB_TOKEN env var
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Default GitHub API host.
const DEFAULT_GITHUB_HOST: &str = "https://api.github.com";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API host URL, for GitHub Enterprise instances.
    /// Can also be set via WARDEN_GITHUB_HOST environment variable.
    pub host: Option<String>,
    /// GitHub API token.
    /// Can also be set via WARDEN_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/warden/config.toml)
    /// 3. Local config file (./warden.toml)
    /// 4. Environment variables with WARDEN_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        // Add XDG config file if it exists
        if let Some(proj_dirs) = ProjectDirs::from("", "", "warden") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Add local config file (higher priority than XDG)
        let local_config = PathBuf::from("warden.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./warden.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // Add WARDEN_ prefixed environment variables
        // e.g., WARDEN_GITHUB_TOKEN -> github.token
        builder = builder.add_source(
            Environment::with_prefix("WARDEN")
                .separator("_")
                .try_parsing(true),
        );

        // Build the config and deserialize
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub API host, falling back to the public endpoint.
    pub fn github_host(&self) -> String {
        self.github
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_GITHUB_HOST.to_string())
    }

    /// Get the GitHub token.
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone()
    }

    /// Get the default config file path.
    #[allow(dead_code)]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "warden").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
