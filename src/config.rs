use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
const API_URL_ENV: &str = "RENTWISE_API_URL";
const IN_DOCKER_ENV: &str = "RENTWISE_IN_DOCKER";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Address of the apartments backend when running on a developer machine.
    pub api_url: Option<String>,
    /// Address of the backend service as seen from inside the compose network.
    pub docker_api_url: String,
    pub request_timeout_seconds: u64,
    pub log_level: String,
    /// File the config was loaded from, `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: None,
            docker_api_url: "http://backend:2003".to_string(),
            request_timeout_seconds: 10,
            log_level: "info".to_string(),
            source: None,
        }
    }
}

pub fn create_test_config() -> Config {
    Config {
        api_url: Some("http://localhost:2003".to_string()),
        docker_api_url: "http://backend:2003".to_string(),
        request_timeout_seconds: 5,
        log_level: "debug".to_string(),
        source: None,
    }
}

pub fn read_config() -> Result<Config> {
    dotenv().ok();

    let mut config = match env::var(CONFIG_PATH_ENV) {
        Ok(config_path) => {
            let path = PathBuf::from(config_path);
            let mut config = load_config(&path)?;
            config.source = Some(path);
            config
        }
        Err(_) => Config::default(),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    Ok(config)
}

/// Applies environment overrides on top of file or default values. `lookup`
/// returns the value of an environment variable, if set.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(api_url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.api_url = Some(api_url);
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&bytes)
}

pub fn parse_config(bytes: &[u8]) -> Result<Config> {
    toml::from_slice(bytes).context("failed to parse config")
}

/// Picks the backend address for this process. Inside a container the backend is
/// reached by its service name, otherwise the configured local address is used.
pub fn resolve_base_url(config: &Config, in_docker: bool) -> Result<String> {
    let url = if in_docker {
        config.docker_api_url.clone()
    } else {
        config
            .api_url
            .clone()
            .ok_or_else(|| anyhow!("api_url not configured, set {API_URL_ENV}"))?
    };

    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(anyhow!("backend address is empty"));
    }
    Ok(trimmed.to_string())
}

pub fn detect_docker() -> bool {
    docker_flag(
        env::var(IN_DOCKER_ENV).ok().as_deref(),
        Path::new("/.dockerenv").exists(),
    )
}

/// An explicit `RENTWISE_IN_DOCKER` wins; without it the `/.dockerenv` marker decides.
pub fn docker_flag(flag: Option<&str>, dockerenv_exists: bool) -> bool {
    match flag {
        Some(value) => matches!(
            value.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => dockerenv_exists,
    }
}
