use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::CrawlError;

pub const DEFAULT_CONFIG_FILE: &str = "kegg-crawl.json";
pub const DEFAULT_BASE_URL: &str = "https://www.kegg.jp";
pub const DEFAULT_CATEGORY: &str = "Plants";
pub const DEFAULT_OUTPUT_PATH: &str = "kegg_plant_pathways_final_robust.csv";
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

/// On-disk shape of `kegg-crawl.json`. Every key is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub retry_count: Option<u32>,
    #[serde(default)]
    pub retry_delay_secs: Option<f64>,
    #[serde(default)]
    pub request_delay_secs: Option<f64>,
    #[serde(default)]
    pub request_timeout_secs: Option<f64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrawlConfig {
    pub base_url: String,
    pub category: String,
    pub output_path: Utf8PathBuf,
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub request_delay: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            output_path: Utf8PathBuf::from(DEFAULT_OUTPUT_PATH),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_delay: DEFAULT_REQUEST_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    pub fn listing_url(&self) -> String {
        format!(
            "{}/kegg-bin/show_organism?menu_type=category_info&category={}",
            self.base_url, self.category
        )
    }

    pub fn pathway_url(&self, organism_code: &str) -> String {
        format!(
            "{}/kegg-bin/show_organism?menu_type=pathway_maps&org={}",
            self.base_url, organism_code
        )
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the config file (explicit path, or `kegg-crawl.json` when present)
    /// and layers it over the built-in defaults.
    pub fn resolve(path: Option<&str>) -> Result<CrawlConfig, CrawlError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Self::resolve_config(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| CrawlError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| CrawlError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<CrawlConfig, CrawlError> {
        let defaults = CrawlConfig::default();

        let base_url = config
            .base_url
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let category = config
            .category
            .map(|value| value.trim().to_string())
            .unwrap_or(defaults.category);
        let output_path = config
            .output_path
            .map(Utf8PathBuf::from)
            .unwrap_or(defaults.output_path);
        let user_agent = config.user_agent.unwrap_or(defaults.user_agent);
        let retry_count = config.retry_count.unwrap_or(defaults.retry_count);

        let resolved = CrawlConfig {
            base_url,
            category,
            output_path,
            retry_count,
            retry_delay: seconds("retry_delay_secs", config.retry_delay_secs)?
                .unwrap_or(defaults.retry_delay),
            request_delay: seconds("request_delay_secs", config.request_delay_secs)?
                .unwrap_or(defaults.request_delay),
            request_timeout: seconds("request_timeout_secs", config.request_timeout_secs)?
                .unwrap_or(defaults.request_timeout),
            user_agent,
        };
        validate(&resolved)?;
        Ok(resolved)
    }
}

/// Applies command line overrides on top of a resolved config.
pub fn apply_overrides(
    mut config: CrawlConfig,
    output: Option<String>,
    category: Option<String>,
) -> Result<CrawlConfig, CrawlError> {
    if let Some(output) = output {
        config.output_path = Utf8PathBuf::from(output);
    }
    if let Some(category) = category {
        config.category = category.trim().to_string();
    }
    validate(&config)?;
    Ok(config)
}

fn validate(config: &CrawlConfig) -> Result<(), CrawlError> {
    if config.retry_count == 0 {
        return Err(CrawlError::InvalidConfig(
            "retry_count must be at least 1".to_string(),
        ));
    }
    if config.base_url.is_empty() {
        return Err(CrawlError::InvalidConfig("base_url is empty".to_string()));
    }
    if config.category.is_empty() {
        return Err(CrawlError::InvalidConfig("category is empty".to_string()));
    }
    if config.user_agent.trim().is_empty() {
        return Err(CrawlError::InvalidConfig("user_agent is empty".to_string()));
    }
    if config.output_path.as_str().trim().is_empty() {
        return Err(CrawlError::InvalidConfig("output_path is empty".to_string()));
    }
    Ok(())
}

fn seconds(key: &str, value: Option<f64>) -> Result<Option<Duration>, CrawlError> {
    match value {
        None => Ok(None),
        Some(secs) if secs.is_finite() && secs >= 0.0 => Ok(Some(Duration::from_secs_f64(secs))),
        Some(secs) => Err(CrawlError::InvalidConfig(format!(
            "{key} must be a non-negative number of seconds, got {secs}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved = ConfigLoader::resolve_config(Config::default()).unwrap();
        assert_eq!(resolved, CrawlConfig::default());
        assert_eq!(resolved.retry_count, 3);
        assert_eq!(resolved.request_delay, Duration::from_millis(1500));
    }

    #[test]
    fn pathway_url_embeds_organism_code() {
        let config = CrawlConfig::default();
        assert_eq!(
            config.pathway_url("ath"),
            "https://www.kegg.jp/kegg-bin/show_organism?menu_type=pathway_maps&org=ath"
        );
        assert_eq!(
            config.listing_url(),
            "https://www.kegg.jp/kegg-bin/show_organism?menu_type=category_info&category=Plants"
        );
    }
}
