//! HTTP client for the Kakao Local REST API.

mod provider;

use std::time::Duration;

use mukji_core::{AppConfig, KeywordQuery, LatLng, MAX_SEARCH_RADIUS_METERS};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::KakaoError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{Coord2AddressResponse, KeywordSearchResponse};

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";
const KEYWORD_SEARCH_PATH: &str = "v2/local/search/keyword.json";
const COORD_TO_ADDRESS_PATH: &str = "v2/local/geo/coord2address.json";

/// Results per keyword-search page. 15 is the provider's maximum.
pub const PAGE_SIZE: u32 = 15;

/// Client for the Kakao Local REST API.
///
/// Authenticates every request with `Authorization: KakaoAK {key}`. Transient
/// errors (429, network failures) are retried with exponential backoff up to
/// `max_retries` additional attempts.
pub struct KakaoClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl KakaoClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, KakaoError> {
        Self::with_base_url(
            api_key,
            DEFAULT_BASE_URL,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_secs,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`KakaoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, KakaoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joined paths append instead of
        // replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| KakaoError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`KakaoClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, KakaoError> {
        Self::with_base_url(
            &config.kakao_api_key,
            &config.kakao_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Fetches one page of a keyword search scoped to a circle.
    ///
    /// `radius` is clamped to [`MAX_SEARCH_RADIUS_METERS`].
    ///
    /// # Errors
    ///
    /// - [`KakaoError::InvalidCoordinate`] if the query center is not a valid
    ///   latitude/longitude (no request is sent).
    /// - [`KakaoError::Unauthorized`] on HTTP 401/403.
    /// - [`KakaoError::RateLimited`] on HTTP 429 after all retries.
    /// - [`KakaoError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`KakaoError::Http`] on network failure after all retries.
    /// - [`KakaoError::Deserialize`] if the body does not match the expected shape.
    pub async fn search_keyword(
        &self,
        query: &KeywordQuery,
    ) -> Result<KeywordSearchResponse, KakaoError> {
        check_coordinate(query.center)?;
        let radius = query.radius_meters.min(MAX_SEARCH_RADIUS_METERS).to_string();
        let page = query.page.to_string();
        let size = PAGE_SIZE.to_string();
        let x = query.center.lng.to_string();
        let y = query.center.lat.to_string();

        let url = self.build_url(
            KEYWORD_SEARCH_PATH,
            &[
                ("query", query.keyword.as_str()),
                ("x", &x),
                ("y", &y),
                ("radius", &radius),
                ("page", &page),
                ("size", &size),
            ],
        )?;

        tracing::debug!(keyword = %query.keyword, page = query.page, "kakao keyword search");
        self.request_json(
            &url,
            &format!("keyword search (query={}, page={})", query.keyword, query.page),
        )
        .await
    }

    /// Reverse-geocodes a point into road-name and lot-number addresses.
    ///
    /// # Errors
    ///
    /// Same as [`KakaoClient::search_keyword`].
    pub async fn coord_to_address(
        &self,
        point: LatLng,
    ) -> Result<Coord2AddressResponse, KakaoError> {
        check_coordinate(point)?;
        let x = point.lng.to_string();
        let y = point.lat.to_string();
        let url = self.build_url(COORD_TO_ADDRESS_PATH, &[("x", &x), ("y", &y)])?;

        tracing::debug!(%point, "kakao coord2address");
        self.request_json(&url, &format!("coord2address ({point})"))
            .await
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, KakaoError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| KakaoError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET and deserializes the 2xx body, retrying
    /// transient failures.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, KakaoError> {
        let authorization = format!("KakaoAK {}", self.api_key);

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            let authorization = authorization.clone();
            let context = context.to_owned();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::AUTHORIZATION, authorization)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(KakaoError::RateLimited { retry_after_secs });
                }

                if status == reqwest::StatusCode::UNAUTHORIZED
                    || status == reqwest::StatusCode::FORBIDDEN
                {
                    return Err(KakaoError::Unauthorized {
                        status: status.as_u16(),
                    });
                }

                if !status.is_success() {
                    return Err(KakaoError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body)
                    .map_err(|source| KakaoError::Deserialize { context, source })
            }
        })
        .await
    }
}

fn check_coordinate(point: LatLng) -> Result<(), KakaoError> {
    let valid = point.lat.is_finite()
        && point.lng.is_finite()
        && point.lat.abs() <= 90.0
        && point.lng.abs() <= 180.0;
    if valid {
        Ok(())
    } else {
        Err(KakaoError::InvalidCoordinate {
            lat: point.lat,
            lng: point.lng,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
