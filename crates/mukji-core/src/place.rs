//! Place records and the raw search items they are built from.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::geo::{LatLng, Located};

/// Base of the provider's public map link, used when a result carries no
/// detail page of its own.
pub const MAP_LINK_BASE: &str = "https://map.kakao.com/link/map";

/// Characters escaped in a map-link name segment. Matches the browser's
/// `encodeURIComponent`, which leaves `-_.!~*'()` untouched.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One search hit as returned by the places service, before mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPlace {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Road-name address (`도로명 주소`), preferred when present.
    pub road_address: Option<String>,
    /// Lot-number address, the fallback.
    pub address: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub detail_url: Option<String>,
}

impl Located for RawPlace {
    fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// A restaurant shown to the user. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub detail_url: Option<String>,
    pub category: Option<String>,
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Place {}

impl std::hash::Hash for Place {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Located for Place {
    fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

impl Place {
    /// Maps a raw search hit into a `Place`.
    ///
    /// Empty strings from the provider count as absent. The road address wins
    /// over the lot address, and a map link is synthesized when the provider
    /// did not send a detail URL.
    #[must_use]
    pub fn from_raw(raw: RawPlace) -> Self {
        let address = non_empty(raw.road_address).or_else(|| non_empty(raw.address));
        let detail_url = non_empty(raw.detail_url)
            .or_else(|| Some(fallback_detail_url(&raw.name, raw.lat, raw.lng)));
        Self {
            id: raw.id,
            name: raw.name,
            lat: raw.lat,
            lng: raw.lng,
            address,
            phone: non_empty(raw.phone),
            detail_url,
            category: non_empty(raw.category),
        }
    }

    #[must_use]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// The detail page link: the provider's if present, else a map link.
    #[must_use]
    pub fn detail_link(&self) -> String {
        self.detail_url
            .clone()
            .unwrap_or_else(|| fallback_detail_url(&self.name, self.lat, self.lng))
    }
}

/// `{MAP_LINK_BASE}/{encoded-name},{lat},{lng}`.
#[must_use]
pub fn fallback_detail_url(name: &str, lat: f64, lng: f64) -> String {
    let encoded = utf8_percent_encode(name, COMPONENT);
    format!("{MAP_LINK_BASE}/{encoded},{lat},{lng}")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Content of the info popup anchored at a selected marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDetails {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub category: String,
    pub detail_url: String,
    /// `tel:` link, present only when the place has a phone number.
    pub call_url: Option<String>,
}

impl From<&Place> for PlaceDetails {
    fn from(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            address: place
                .address
                .clone()
                .unwrap_or_else(|| "No address information".to_owned()),
            phone: place.phone.clone(),
            category: place
                .category
                .clone()
                .unwrap_or_else(|| "Unknown".to_owned()),
            detail_url: place.detail_link(),
            call_url: place.phone.as_ref().map(|p| format!("tel:{p}")),
        }
    }
}

impl std::fmt::Display for PlaceDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.address)?;
        if let Some(phone) = &self.phone {
            writeln!(f, "{phone}")?;
        }
        writeln!(f, "Category: {}", self.category)?;
        write!(f, "Details: {}", self.detail_url)?;
        if let Some(call) = &self.call_url {
            write!(f, "\nCall: {call}")?;
        }
        Ok(())
    }
}
