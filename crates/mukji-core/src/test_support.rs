//! In-memory fakes for the map surface and the external services.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::GeolocationError;
use crate::generation::Generations;
use crate::geo::{LatLng, LatLngBounds};
use crate::markers::{MapSurface, MarkerIcon, MarkerId};
use crate::place::{PlaceDetails, RawPlace};
use crate::services::{Geolocator, KeywordQuery, PlaceSearch, ReverseGeocoder, SearchPage};

pub(crate) const CENTER: LatLng = LatLng::new(37.5665, 126.978);

#[derive(Debug, Clone, thiserror::Error)]
#[error("fake service error: {0}")]
pub(crate) struct FakeServiceError(pub String);

/// A hit roughly `north_m` meters north of [`CENTER`].
pub(crate) fn raw_north(id: &str, north_m: f64) -> RawPlace {
    RawPlace {
        id: id.to_owned(),
        name: format!("식당 {id}"),
        lat: CENTER.lat + north_m / crate::geo::METERS_PER_LAT_DEGREE,
        lng: CENTER.lng,
        road_address: Some(format!("서울 중구 세종대로 {id}")),
        ..RawPlace::default()
    }
}

/// A hit inside a 250 m viewport around [`CENTER`].
pub(crate) fn inside(id: &str) -> RawPlace {
    raw_north(id, 50.0)
}

/// A hit well outside a 250 m viewport around [`CENTER`].
pub(crate) fn outside(id: &str) -> RawPlace {
    raw_north(id, 2_000.0)
}

pub(crate) fn page(items: Vec<RawPlace>, has_next_page: bool) -> Result<SearchPage, FakeServiceError> {
    Ok(SearchPage {
        items,
        has_next_page,
    })
}

pub(crate) fn failure(msg: &str) -> Result<SearchPage, FakeServiceError> {
    Err(FakeServiceError(msg.to_owned()))
}

/// Scripted places search. Page `n` answers with `pages[n - 1]`; past the
/// end of the script it repeats the last entry when `repeat_last` is set and
/// answers an empty final page otherwise.
pub(crate) struct FakeSearch {
    pages: Vec<Result<SearchPage, FakeServiceError>>,
    repeat_last: bool,
    supersede_on_page: Option<(u32, Generations)>,
    calls: Mutex<Vec<KeywordQuery>>,
}

impl FakeSearch {
    pub(crate) fn new(pages: Vec<Result<SearchPage, FakeServiceError>>) -> Self {
        Self {
            pages,
            repeat_last: false,
            supersede_on_page: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers `items` and claims another page exists.
    pub(crate) fn endless(items: Vec<RawPlace>) -> Self {
        Self {
            repeat_last: true,
            ..Self::new(vec![page(items, true)])
        }
    }

    /// Starts a new generation while answering `page`, as if the user
    /// triggered another action before this page came back.
    pub(crate) fn superseding_on(mut self, page: u32, generations: Generations) -> Self {
        self.supersede_on_page = Some((page, generations));
        self
    }

    pub(crate) fn calls(&self) -> Vec<KeywordQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl PlaceSearch for FakeSearch {
    type Error = FakeServiceError;

    async fn search_page(&self, query: &KeywordQuery) -> Result<SearchPage, FakeServiceError> {
        self.calls.lock().unwrap().push(query.clone());
        if let Some((on_page, generations)) = &self.supersede_on_page {
            if *on_page == query.page {
                let _ = generations.begin();
            }
        }
        let index = usize::try_from(query.page).unwrap() - 1;
        let scripted = if self.repeat_last {
            self.pages.get(index.min(self.pages.len() - 1))
        } else {
            self.pages.get(index)
        };
        scripted.cloned().unwrap_or_else(|| page(Vec::new(), false))
    }
}

pub(crate) struct FakeGeolocator(pub Option<LatLng>);

impl Geolocator for FakeGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        self.0.ok_or(GeolocationError::Denied)
    }
}

pub(crate) struct FakeGeocoder(pub Result<Option<String>, FakeServiceError>);

impl ReverseGeocoder for FakeGeocoder {
    type Error = FakeServiceError;

    async fn address_of(&self, _point: LatLng) -> Result<Option<String>, FakeServiceError> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DrawnMarker {
    pub position: LatLng,
    pub title: Option<String>,
    pub icon: MarkerIcon,
}

/// Records everything drawn on it.
#[derive(Debug)]
pub(crate) struct FakeMap {
    pub center: LatLng,
    pub half_span_meters: f64,
    pub markers: BTreeMap<MarkerId, DrawnMarker>,
    pub removed: Vec<MarkerId>,
    pub popup: Option<(MarkerId, PlaceDetails)>,
    pub radius_circle: Option<(LatLng, u32)>,
    pub pans: Vec<LatLng>,
    next_id: u64,
}

impl FakeMap {
    pub(crate) fn at(center: LatLng) -> Self {
        Self {
            center,
            half_span_meters: 250.0,
            markers: BTreeMap::new(),
            removed: Vec::new(),
            popup: None,
            radius_circle: None,
            pans: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn icon(&self, marker: MarkerId) -> Option<MarkerIcon> {
        self.markers.get(&marker).map(|m| m.icon)
    }
}

impl MapSurface for FakeMap {
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
        self.center = center;
        self.pans.push(center);
    }

    fn show_search_radius(&mut self, center: LatLng, radius_meters: u32) {
        self.radius_circle = Some((center, radius_meters));
    }

    fn add_marker(&mut self, position: LatLng, title: Option<&str>, icon: MarkerIcon) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.insert(
            id,
            DrawnMarker {
                position,
                title: title.map(str::to_owned),
                icon,
            },
        );
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
        self.removed.push(marker);
    }

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.icon = icon;
        }
    }

    fn open_popup(&mut self, anchor: MarkerId, details: &PlaceDetails) {
        self.popup = Some((anchor, details.clone()));
    }

    fn close_popup(&mut self) {
        self.popup = None;
    }
}
