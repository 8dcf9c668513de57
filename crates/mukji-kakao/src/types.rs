//! Response shapes of the Kakao Local REST API.
//!
//! Coordinates arrive as decimal strings (`x` = longitude, `y` = latitude).
//! Optional text fields are present but empty (`""`) when the provider has
//! no value, so they are modelled as plain `String`s and cleaned up during
//! normalization.

use serde::Deserialize;

/// `GET /v2/local/search/keyword.json`
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSearchResponse {
    pub meta: SearchMeta,
    #[serde(default)]
    pub documents: Vec<PlaceDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMeta {
    /// `true` on the last page the provider will serve for this query.
    pub is_end: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDocument {
    pub id: String,
    pub place_name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub phone: String,
    /// Lot-number address.
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub place_url: String,
}

/// `GET /v2/local/geo/coord2address.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Coord2AddressResponse {
    #[serde(default)]
    pub documents: Vec<AddressDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressDocument {
    pub road_address: Option<AddressName>,
    pub address: Option<AddressName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressName {
    pub address_name: String,
}
