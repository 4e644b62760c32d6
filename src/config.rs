use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, io,
    path::{Path, PathBuf},
};

const DEFAULT_CONFIG_FILE_NAME: &str = "repolist.yaml";
const CONFIG_FILE_ENV: &str = "REPOLIST_CONFIG";
const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_USER_AGENT: &str = "repolist";
const DEFAULT_EXPORT_USER: &str = "shadowdara";
const DEFAULT_REDIRECT_PATH: &str = "/api/repos";
const DEFAULT_REVALIDATE_SECS: u64 = 60_000;
const DEFAULT_BROWSE_USER: &str = "weuritz8u";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_bind_address")]
    pub bind_address: String,
    #[serde(default = "Config::default_log_level")]
    pub log_level: log::Level,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

impl Config {
    pub async fn load() -> Result<Config> {
        let path = env::var(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE_NAME));

        Config::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> Result<Config> {
        let mut config = match tokio::fs::read_to_string(path).await {
            Ok(config_string) => Config::from_yaml(&config_string)
                .with_context(|| format!("Cannot parse {}", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Config::default(),
            Err(err) => {
                return Err(err).with_context(|| format!("Cannot read {}", path.display()))
            }
        };

        if config.github.token.is_none() {
            config.github.token = env::var(GITHUB_TOKEN_ENV).ok().filter(|t| !t.is_empty());
        }

        Ok(config)
    }

    pub fn from_yaml(config_string: &str) -> Result<Config> {
        if config_string.trim().is_empty() {
            return Ok(Config::default());
        }

        let config = serde_yaml::from_str::<Config>(config_string)?;

        Ok(config)
    }

    fn default_bind_address() -> String {
        DEFAULT_BIND_ADDRESS.to_owned()
    }

    fn default_log_level() -> log::Level {
        log::Level::Info
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: Config::default_bind_address(),
            log_level: Config::default_log_level(),
            github: GithubConfig::default(),
            export: ExportConfig::default(),
            browse: BrowseConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "GithubConfig::default_api_url")]
    pub api_url: String,
    pub token: Option<String>,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
}

impl GithubConfig {
    fn default_api_url() -> String {
        DEFAULT_GITHUB_API_URL.to_owned()
    }

    fn default_user_agent() -> String {
        DEFAULT_USER_AGENT.to_owned()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: GithubConfig::default_api_url(),
            token: None,
            user_agent: GithubConfig::default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "ExportConfig::default_user")]
    pub default_user: String,
    #[serde(default = "ExportConfig::default_redirect_path")]
    pub redirect_path: String,
    /// `s-maxage` advertised on csv responses, `null` disables the header
    #[serde(default = "ExportConfig::default_revalidate_secs")]
    pub revalidate_secs: Option<u64>,
}

impl ExportConfig {
    fn default_user() -> String {
        DEFAULT_EXPORT_USER.to_owned()
    }

    fn default_redirect_path() -> String {
        DEFAULT_REDIRECT_PATH.to_owned()
    }

    fn default_revalidate_secs() -> Option<u64> {
        Some(DEFAULT_REVALIDATE_SECS)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            default_user: ExportConfig::default_user(),
            redirect_path: ExportConfig::default_redirect_path(),
            revalidate_secs: ExportConfig::default_revalidate_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default = "BrowseConfig::default_user")]
    pub user: String,
}

impl BrowseConfig {
    fn default_user() -> String {
        DEFAULT_BROWSE_USER.to_owned()
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        BrowseConfig {
            user: BrowseConfig::default_user(),
        }
    }
}
