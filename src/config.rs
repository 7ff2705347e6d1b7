//! Runtime settings for the dashboard.
//!
//! Serving configuration (site address, pkg dir, reload port) lives in
//! `[package.metadata.leptos]` and is read by the server binary. The values
//! here are baked in at compile time so the wasm bundle carries them too.

use crate::models::query::PageSize;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix for every backend request, without a trailing slash.
    pub api_base_url: String,
    /// How long a toast stays on screen.
    pub toast_timeout_ms: u32,
    /// Page size a fresh review list starts with.
    pub default_page_size: PageSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
            default_page_size: PageSize::default(),
        }
    }
}

impl AppConfig {
    /// Reads `ADMIN_API_BASE_URL`, `ADMIN_TOAST_TIMEOUT_MS` and
    /// `ADMIN_DEFAULT_PAGE_SIZE` from the build environment.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("ADMIN_API_BASE_URL"),
            option_env!("ADMIN_TOAST_TIMEOUT_MS"),
            option_env!("ADMIN_DEFAULT_PAGE_SIZE"),
        )
    }

    /// Builds a config from optional raw strings. Anything missing or
    /// unparseable keeps its default.
    pub fn from_values(
        api_base_url: Option<&str>,
        toast_timeout_ms: Option<&str>,
        default_page_size: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let toast_timeout_ms = toast_timeout_ms
            .and_then(|ms| ms.trim().parse::<u32>().ok())
            .unwrap_or(defaults.toast_timeout_ms);

        let default_page_size = default_page_size
            .and_then(|size| size.trim().parse::<u32>().ok())
            .and_then(PageSize::from_u32)
            .unwrap_or(defaults.default_page_size);

        Self {
            api_base_url,
            toast_timeout_ms,
            default_page_size,
        }
    }

    /// Joins a path onto the API base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = AppConfig::from_values(None, None, None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn overrides_are_trimmed_and_validated() {
        let config = AppConfig::from_values(
            Some(" https://shop.example.com/api/ "),
            Some("2500"),
            Some("50"),
        );
        assert_eq!(config.api_base_url, "https://shop.example.com/api");
        assert_eq!(config.toast_timeout_ms, 2500);
        assert_eq!(config.default_page_size, PageSize::Fifty);
    }

    #[test]
    fn page_size_outside_the_fixed_set_is_ignored() {
        let config = AppConfig::from_values(None, Some("soon"), Some("30"));
        assert_eq!(config.default_page_size, PageSize::default());
        assert_eq!(config.toast_timeout_ms, DEFAULT_TOAST_TIMEOUT_MS);
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = AppConfig::from_values(Some("http://api.local/"), None, None);
        assert_eq!(config.endpoint("/admin/reviews"), "http://api.local/admin/reviews");
        assert_eq!(config.endpoint("admin/reviews/4"), "http://api.local/admin/reviews/4");
    }
}
