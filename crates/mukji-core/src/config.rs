use std::str::FromStr;

use crate::app::MAX_SAMPLE_SIZE;
use crate::app_config::{AppConfig, Environment};
use crate::geo::LatLng;
use crate::ConfigError;

/// Largest radius the keyword search endpoint accepts.
pub const MAX_SEARCH_RADIUS_METERS: u32 = 20_000;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let kakao_api_key = require("KAKAO_REST_API_KEY")?;
    let env = parse_environment(&or_default("MUKJI_ENV", "development"))?;
    let log_level = or_default("MUKJI_LOG_LEVEL", "info");

    let kakao_base_url = or_default("MUKJI_KAKAO_BASE_URL", "https://dapi.kakao.com");
    let request_timeout_secs: u64 = parse_or(&lookup, "MUKJI_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("MUKJI_USER_AGENT", "mukji/0.1 (restaurant-picker)");
    let max_retries: u32 = parse_or(&lookup, "MUKJI_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs: u64 = parse_or(&lookup, "MUKJI_RETRY_BACKOFF_BASE_SECS", "1")?;

    let search_keyword = or_default("MUKJI_SEARCH_KEYWORD", "음식점");
    let search_radius_meters: u32 = parse_or(&lookup, "MUKJI_SEARCH_RADIUS_METERS", "150")?;
    if !(1..=MAX_SEARCH_RADIUS_METERS).contains(&search_radius_meters) {
        return Err(invalid(
            "MUKJI_SEARCH_RADIUS_METERS",
            format!("must be between 1 and {MAX_SEARCH_RADIUS_METERS}"),
        ));
    }
    let max_pages: u32 = parse_or(&lookup, "MUKJI_MAX_PAGES", "4")?;
    if max_pages == 0 {
        return Err(invalid("MUKJI_MAX_PAGES", "must be at least 1".to_string()));
    }
    let sample_size: usize = parse_or(&lookup, "MUKJI_SAMPLE_SIZE", "3")?;
    if !(1..=MAX_SAMPLE_SIZE).contains(&sample_size) {
        return Err(invalid(
            "MUKJI_SAMPLE_SIZE",
            format!("must be between 1 and {MAX_SAMPLE_SIZE}"),
        ));
    }
    let cache_capacity: usize = parse_or(&lookup, "MUKJI_CACHE_CAPACITY", "64")?;
    let viewport_half_span_meters: f64 = parse_or(&lookup, "MUKJI_VIEWPORT_HALF_SPAN_METERS", "250")?;
    if !(viewport_half_span_meters.is_finite() && viewport_half_span_meters > 0.0) {
        return Err(invalid(
            "MUKJI_VIEWPORT_HALF_SPAN_METERS",
            "must be a positive number of meters".to_string(),
        ));
    }

    let default_center = LatLng::new(
        parse_latitude("MUKJI_DEFAULT_LAT", &or_default("MUKJI_DEFAULT_LAT", "37.5665"))?,
        parse_longitude("MUKJI_DEFAULT_LNG", &or_default("MUKJI_DEFAULT_LNG", "126.978"))?,
    );

    let home_position = match (lookup("MUKJI_HOME_LAT").ok(), lookup("MUKJI_HOME_LNG").ok()) {
        (Some(lat), Some(lng)) => Some(LatLng::new(
            parse_latitude("MUKJI_HOME_LAT", &lat)?,
            parse_longitude("MUKJI_HOME_LNG", &lng)?,
        )),
        (None, None) => None,
        (Some(_), None) => {
            return Err(invalid(
                "MUKJI_HOME_LNG",
                "must be set together with MUKJI_HOME_LAT".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                "MUKJI_HOME_LAT",
                "must be set together with MUKJI_HOME_LNG".to_string(),
            ))
        }
    };

    Ok(AppConfig {
        env,
        log_level,
        kakao_api_key,
        kakao_base_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        search_keyword,
        search_radius_meters,
        max_pages,
        sample_size,
        cache_capacity,
        viewport_half_span_meters,
        default_center,
        home_position,
    })
}

fn parse_or<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    parse_value(var, &raw)
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(var, e.to_string()))
}

fn parse_latitude(var: &str, raw: &str) -> Result<f64, ConfigError> {
    let lat: f64 = parse_value(var, raw)?;
    if (-90.0..=90.0).contains(&lat) {
        Ok(lat)
    } else {
        Err(invalid(var, format!("latitude {lat} out of range")))
    }
}

fn parse_longitude(var: &str, raw: &str) -> Result<f64, ConfigError> {
    let lng: f64 = parse_value(var, raw)?;
    if (-180.0..=180.0).contains(&lng) {
        Ok(lng)
    } else {
        Err(invalid(var, format!("longitude {lng} out of range")))
    }
}

fn invalid(var: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    }
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(invalid(
            "MUKJI_ENV",
            format!("unknown environment \"{other}\""),
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
