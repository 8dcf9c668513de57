//! Seams to the external services the app orchestrates: keyword place
//! search, reverse geocoding, and device geolocation.

use std::future::Future;

use crate::error::GeolocationError;
use crate::geo::LatLng;
use crate::place::RawPlace;

/// One page request of a keyword search scoped to a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordQuery {
    pub keyword: String,
    pub center: LatLng,
    pub radius_meters: u32,
    /// 1-based.
    pub page: u32,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub items: Vec<RawPlace>,
    pub has_next_page: bool,
}

/// Paged keyword search against a places provider.
///
/// Each call fetches exactly one page; paging is driven by the caller.
pub trait PlaceSearch {
    type Error: std::error::Error + Send + Sync + 'static;

    fn search_page(
        &self,
        query: &KeywordQuery,
    ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send;
}

/// Coordinates to a human-readable postal address.
pub trait ReverseGeocoder {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `Ok(None)` when the provider knows no address for the point.
    fn address_of(
        &self,
        point: LatLng,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
}

/// One-shot position fix for the device running the app.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<LatLng, GeolocationError>> + Send;
}
