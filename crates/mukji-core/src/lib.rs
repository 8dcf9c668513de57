//! Map-driven restaurant picker: viewport filtering, paged keyword search
//! aggregation, random sampling, and marker selection state.

pub mod aggregate;
pub mod app;
pub mod app_config;
pub mod cache;
pub mod config;
pub mod error;
pub mod generation;
pub mod geo;
pub mod markers;
pub mod place;
pub mod services;
pub mod shuffle;
pub mod state;

#[cfg(test)]
mod test_support;

pub use aggregate::{aggregate, PoolRequest};
pub use app::{MapApp, SearchSettings, MAX_SAMPLE_SIZE};
pub use app_config::{AppConfig, Environment};
pub use cache::{CacheKey, ViewportCache};
pub use config::{load_app_config, load_app_config_from_env, MAX_SEARCH_RADIUS_METERS};
pub use error::{ConfigError, GeolocationError, RecommendError, ServiceError};
pub use generation::{GenerationToken, Generations};
pub use geo::{filter_in_bounds, LatLng, LatLngBounds, Located, ViewportBounds};
pub use markers::{MapSurface, MarkerIcon, MarkerId, Selection};
pub use place::{Place, PlaceDetails, RawPlace};
pub use services::{Geolocator, KeywordQuery, PlaceSearch, ReverseGeocoder, SearchPage};
pub use shuffle::{select_sample, shuffle};
pub use state::{MapState, PlaceState, ViewState};
