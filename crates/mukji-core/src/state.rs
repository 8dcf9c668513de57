//! View state published to the UI, split in two independent slices.
//!
//! [`MapState`] holds what is drawn on the map; [`PlaceState`] holds the
//! domain data listed beside it. `places[i]` always belongs to `markers[i]`.

use serde::Serialize;

use crate::markers::MarkerId;
use crate::place::Place;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapState {
    pub markers: Vec<MarkerId>,
    pub selected: Option<MarkerId>,
    pub current_marker: Option<MarkerId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceState {
    pub places: Vec<Place>,
    /// Address of the last located position, if it could be resolved.
    pub current_location: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub map: MapState,
    pub place: PlaceState,
}

impl ViewState {
    /// Replaces the displayed selection in both slices at once and clears
    /// the highlighted marker.
    pub fn publish(&mut self, places: Vec<Place>, markers: Vec<MarkerId>) {
        debug_assert_eq!(
            places.len(),
            markers.len(),
            "places and markers must stay co-indexed"
        );
        self.place.places = places;
        self.map.markers = markers;
        self.map.selected = None;
    }

    /// Empties both lists.
    pub fn clear_displayed(&mut self) {
        self.publish(Vec::new(), Vec::new());
    }

    /// The place drawn under `marker`.
    #[must_use]
    pub fn place_for_marker(&self, marker: MarkerId) -> Option<&Place> {
        let index = self.map.markers.iter().position(|m| *m == marker)?;
        self.place.places.get(index)
    }

    #[must_use]
    pub fn marker_at(&self, index: usize) -> Option<MarkerId> {
        self.map.markers.get(index).copied()
    }

    #[must_use]
    pub fn selected_place(&self) -> Option<&Place> {
        self.map.selected.and_then(|m| self.place_for_marker(m))
    }
}
