use thiserror::Error;

#[derive(Debug, Error)]
pub enum KakaoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by Kakao Local API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("Kakao Local API rejected the REST key (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid coordinate {lat},{lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
}
