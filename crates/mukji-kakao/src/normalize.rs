//! Maps Kakao response documents onto the provider-neutral core types.

use mukji_core::{RawPlace, SearchPage};

use crate::types::{Coord2AddressResponse, KeywordSearchResponse, PlaceDocument};

/// Converts one keyword-search response into a [`SearchPage`].
///
/// Documents with unusable coordinates are dropped with a warning; the rest
/// keep their response order.
#[must_use]
pub fn search_page_from_response(response: KeywordSearchResponse) -> SearchPage {
    let items = response
        .documents
        .iter()
        .filter_map(|doc| {
            let place = place_from_document(doc);
            if place.is_none() {
                tracing::warn!(
                    id = %doc.id,
                    x = %doc.x,
                    y = %doc.y,
                    "skipping kakao document with invalid coordinates"
                );
            }
            place
        })
        .collect();

    SearchPage {
        items,
        has_next_page: !response.meta.is_end,
    }
}

/// Maps a place document, or `None` when `x`/`y` do not parse to a valid
/// longitude/latitude pair.
#[must_use]
pub fn place_from_document(doc: &PlaceDocument) -> Option<RawPlace> {
    let lng = parse_degrees(&doc.x, 180.0)?;
    let lat = parse_degrees(&doc.y, 90.0)?;

    Some(RawPlace {
        id: doc.id.clone(),
        name: doc.place_name.trim().to_owned(),
        lat,
        lng,
        road_address: non_empty(&doc.road_address_name),
        address: non_empty(&doc.address_name),
        phone: non_empty(&doc.phone),
        category: non_empty(&doc.category_name),
        detail_url: non_empty(&doc.place_url),
    })
}

/// First document's road-name address, else its lot-number address.
#[must_use]
pub fn address_from_response(response: &Coord2AddressResponse) -> Option<String> {
    let doc = response.documents.first()?;
    doc.road_address
        .as_ref()
        .and_then(|a| non_empty(&a.address_name))
        .or_else(|| doc.address.as_ref().and_then(|a| non_empty(&a.address_name)))
}

fn parse_degrees(raw: &str, limit: f64) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
