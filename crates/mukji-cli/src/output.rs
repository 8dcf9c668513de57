//! Plain-text and JSON rendering of results for stdout.

use std::fmt::Write as _;

use mukji_core::{LatLng, Place, PlaceDetails};

/// Numbered list, one entry per place, in display order.
pub(crate) fn format_places(places: &[Place]) -> String {
    let mut out = String::new();
    for (i, place) in places.iter().enumerate() {
        let details = PlaceDetails::from(place);
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{}. {}\n   {}\n   {}",
            i + 1,
            details.name,
            details.address,
            details.category
        );
        if let Some(phone) = &details.phone {
            let _ = write!(out, "\n   {phone}");
        }
        let _ = write!(out, "\n   {}", details.detail_url);
    }
    out
}

pub(crate) fn places_json(places: &[Place]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(places)
}

pub(crate) fn format_location(point: LatLng, address: Option<&str>) -> String {
    match address {
        Some(address) => format!("You are at {point}\n{address}"),
        None => format!("You are at {point}"),
    }
}
