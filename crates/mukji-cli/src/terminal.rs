//! A map surface that keeps its scene in memory and renders it as text.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use mukji_core::{LatLng, LatLngBounds, MapSurface, MarkerIcon, MarkerId, PlaceDetails};

#[derive(Debug, Clone)]
struct Pin {
    position: LatLng,
    title: Option<String>,
    icon: MarkerIcon,
}

/// The viewport is a square of `2 * half_span_meters` around the center.
#[derive(Debug)]
pub(crate) struct TerminalMap {
    center: LatLng,
    half_span_meters: f64,
    radius: Option<(LatLng, u32)>,
    pins: BTreeMap<MarkerId, Pin>,
    popup: Option<(MarkerId, PlaceDetails)>,
    next_id: u64,
}

impl TerminalMap {
    pub(crate) fn new(center: LatLng, half_span_meters: f64) -> Self {
        Self {
            center,
            half_span_meters,
            radius: None,
            pins: BTreeMap::new(),
            popup: None,
            next_id: 0,
        }
    }

    /// Current scene: center, radius circle, markers, and the open popup.
    pub(crate) fn render(&self) -> String {
        let mut out = format!("map @ {}", self.center);
        if let Some((center, radius)) = self.radius {
            let _ = write!(out, " (search radius {radius} m around {center})");
        }
        for (id, pin) in &self.pins {
            let glyph = match pin.icon {
                MarkerIcon::Default => 'o',
                MarkerIcon::Highlighted => '*',
                MarkerIcon::CurrentLocation => '@',
            };
            let title = pin.title.as_deref().unwrap_or("you are here");
            let _ = write!(out, "\n  [{glyph}] {id} {title} ({})", pin.position);
        }
        if let Some((anchor, details)) = &self.popup {
            let _ = write!(out, "\n  popup on {anchor}:");
            for line in details.to_string().lines() {
                let _ = write!(out, "\n    {line}");
            }
        }
        out
    }
}

impl MapSurface for TerminalMap {
    type Bounds = LatLngBounds;

    fn center(&self) -> LatLng {
        self.center
    }

    fn bounds(&self) -> LatLngBounds {
        LatLngBounds::around(self.center, self.half_span_meters)
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    fn pan_to(&mut self, center: LatLng) {
        tracing::debug!(%center, "pan");
        self.center = center;
    }

    fn show_search_radius(&mut self, center: LatLng, radius_meters: u32) {
        self.radius = Some((center, radius_meters));
    }

    fn add_marker(&mut self, position: LatLng, title: Option<&str>, icon: MarkerIcon) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.pins.insert(
            id,
            Pin {
                position,
                title: title.map(str::to_owned),
                icon,
            },
        );
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.pins.remove(&marker);
        if self.popup.as_ref().is_some_and(|(anchor, _)| *anchor == marker) {
            self.popup = None;
        }
    }

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon) {
        if let Some(pin) = self.pins.get_mut(&marker) {
            pin.icon = icon;
        }
    }

    fn open_popup(&mut self, anchor: MarkerId, details: &PlaceDetails) {
        self.popup = Some((anchor, details.clone()));
    }

    fn close_popup(&mut self) {
        self.popup = None;
    }
}
