//! Console Configuration
//!
//! Values are baked in at build time from environment variables, with defaults
//! matching a local backend.

use log::LevelFilter;

/// Default REST backend location
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
/// localStorage key holding the bearer token
pub const DEFAULT_TOKEN_KEY: &str = "adminToken";

/// Console configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL every gateway path is appended to
    pub api_base_url: String,
    /// localStorage key for the bearer token
    pub token_storage_key: String,
    /// Prefix for relative image URLs in newsletter campaigns
    pub asset_base_url: String,
    /// Quiet period before a search term is committed
    pub search_debounce_ms: u32,
    /// Rows per page on list screens
    pub default_page_size: u32,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Load configuration from build-time environment variables.
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("ADMIN_API_URL"),
            option_env!("ADMIN_TOKEN_KEY"),
            option_env!("ADMIN_ASSET_URL"),
            option_env!("ADMIN_LOG_LEVEL"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        token_key: Option<&str>,
        asset_url: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let api_base_url = api_url
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        // Uploads are served next to the API root by default
        let asset_base_url = asset_url
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| {
                api_base_url
                    .strip_suffix("/api")
                    .unwrap_or(&api_base_url)
                    .to_string()
            });

        let log_level = log_level
            .and_then(|lvl| lvl.parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            api_base_url,
            token_storage_key: token_key.unwrap_or(DEFAULT_TOKEN_KEY).to_string(),
            asset_base_url,
            search_debounce_ms: 500,
            default_page_size: 20,
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.token_storage_key, "adminToken");
        assert_eq!(config.asset_base_url, "http://localhost:5000");
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = AppConfig::from_values(
            Some("https://shop.example.com/api/"),
            Some("tok"),
            Some("https://cdn.example.com/"),
            Some("debug"),
        );
        assert_eq!(config.api_base_url, "https://shop.example.com/api");
        assert_eq!(config.token_storage_key, "tok");
        assert_eq!(config.asset_base_url, "https://cdn.example.com");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = AppConfig::from_values(None, None, None, Some("loud"));
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
