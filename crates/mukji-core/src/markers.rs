//! Map surface seam, marker handles, and the marker selection state machine.

use crate::geo::{LatLng, ViewportBounds};
use crate::place::PlaceDetails;

/// Opaque handle to a marker drawn by a [`MapSurface`].
///
/// Handles carry no domain data; the place behind a marker is looked up in
/// the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Default,
    Highlighted,
    CurrentLocation,
}

/// The rendering side of the map: viewport, markers, popup, radius circle.
pub trait MapSurface {
    type Bounds: ViewportBounds;

    fn center(&self) -> LatLng;
    fn bounds(&self) -> Self::Bounds;
    /// Jumps to `center` without animation.
    fn set_center(&mut self, center: LatLng);
    /// Moves smoothly to `center`.
    fn pan_to(&mut self, center: LatLng);
    /// Draws (or moves) the dashed search-radius circle.
    fn show_search_radius(&mut self, center: LatLng, radius_meters: u32);

    fn add_marker(&mut self, position: LatLng, title: Option<&str>, icon: MarkerIcon) -> MarkerId;
    fn remove_marker(&mut self, marker: MarkerId);
    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon);

    fn open_popup(&mut self, anchor: MarkerId, details: &PlaceDetails);
    fn close_popup(&mut self);
}

/// Which displayed marker, if any, is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(MarkerId),
}

impl Selection {
    /// Clicking the selected marker deselects it; any other marker takes over.
    #[must_use]
    pub fn on_marker_click(self, marker: MarkerId) -> Self {
        match self {
            Self::Selected(current) if current == marker => Self::Unselected,
            _ => Self::Selected(marker),
        }
    }

    /// Clicking the map background always clears the selection.
    #[must_use]
    pub fn on_map_click(self) -> Self {
        Self::Unselected
    }

    #[must_use]
    pub fn marker(self) -> Option<MarkerId> {
        match self {
            Self::Unselected => None,
            Self::Selected(m) => Some(m),
        }
    }
}

impl From<Option<MarkerId>> for Selection {
    fn from(marker: Option<MarkerId>) -> Self {
        marker.map_or(Self::Unselected, Self::Selected)
    }
}
