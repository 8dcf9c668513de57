use crate::app::SearchSettings;
use crate::geo::LatLng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub kakao_api_key: String,
    pub kakao_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub search_keyword: String,
    pub search_radius_meters: u32,
    pub max_pages: u32,
    pub sample_size: usize,
    pub cache_capacity: usize,
    pub viewport_half_span_meters: f64,
    pub default_center: LatLng,
    /// Fixed device position, standing in for a geolocation fix.
    pub home_position: Option<LatLng>,
}

impl AppConfig {
    #[must_use]
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            keyword: self.search_keyword.clone(),
            radius_meters: self.search_radius_meters,
            max_pages: self.max_pages,
            sample_size: self.sample_size,
            default_center: self.default_center,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("kakao_api_key", &"[redacted]")
            .field("kakao_base_url", &self.kakao_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("search_keyword", &self.search_keyword)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("max_pages", &self.max_pages)
            .field("sample_size", &self.sample_size)
            .field("cache_capacity", &self.cache_capacity)
            .field("viewport_half_span_meters", &self.viewport_half_span_meters)
            .field("default_center", &self.default_center)
            .field("home_position", &self.home_position)
            .finish()
    }
}
