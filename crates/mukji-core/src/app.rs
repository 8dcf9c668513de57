//! The recommendation screen: wires the map surface, view state, cache, and
//! external services together behind the user actions.

use rand::Rng;

use crate::aggregate::{aggregate, PoolRequest};
use crate::cache::ViewportCache;
use crate::error::RecommendError;
use crate::generation::Generations;
use crate::geo::LatLng;
use crate::markers::{MapSurface, MarkerIcon, MarkerId, Selection};
use crate::place::{Place, PlaceDetails};
use crate::services::{Geolocator, PlaceSearch, ReverseGeocoder};
use crate::shuffle::select_sample;
use crate::state::ViewState;

/// Most places ever shown at once.
pub const MAX_SAMPLE_SIZE: usize = 3;

/// Search tuning for [`MapApp`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub keyword: String,
    pub radius_meters: u32,
    pub max_pages: u32,
    /// Capped at [`MAX_SAMPLE_SIZE`].
    pub sample_size: usize,
    pub default_center: LatLng,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            keyword: "음식점".to_owned(),
            radius_meters: 150,
            max_pages: 4,
            sample_size: MAX_SAMPLE_SIZE,
            default_center: LatLng::new(37.5665, 126.978),
        }
    }
}

pub struct MapApp<M: MapSurface> {
    surface: M,
    state: ViewState,
    cache: ViewportCache,
    generations: Generations,
    settings: SearchSettings,
}

impl<M: MapSurface> MapApp<M> {
    #[must_use]
    pub fn new(surface: M, settings: SearchSettings, cache_capacity: usize) -> Self {
        Self {
            surface,
            state: ViewState::default(),
            cache: ViewportCache::new(cache_capacity),
            generations: Generations::new(),
            settings,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    #[must_use]
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Handle on the generation counter, for work that runs outside `self`.
    #[must_use]
    pub fn generations(&self) -> Generations {
        self.generations.clone()
    }

    /// Centers the map on the default spot, then on the device position if
    /// one can be had. A failed fix is not an error here.
    pub async fn initialize<G: Geolocator>(&mut self, geolocator: &G) {
        let radius = self.settings.radius_meters;
        let default_center = self.settings.default_center;
        self.surface.set_center(default_center);
        self.surface.show_search_radius(default_center, radius);

        match geolocator.current_position().await {
            Ok(position) => {
                tracing::info!(%position, "centering map on device position");
                self.surface.set_center(position);
                self.surface.show_search_radius(position, radius);
            }
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed; using default center");
            }
        }
    }

    /// Draws a fresh random sample of nearby restaurants onto the map.
    ///
    /// Serves from the viewport cache when the current center was searched
    /// before; otherwise pages through the search service.
    ///
    /// # Errors
    ///
    /// - [`RecommendError::NoResultsInViewport`] when nothing lies inside the map.
    /// - [`RecommendError::SearchService`] when the first page fails.
    /// - [`RecommendError::Superseded`] when a newer action started meanwhile;
    ///   the state is then left to that action.
    pub async fn recommend<S, R>(
        &mut self,
        search: &S,
        rng: &mut R,
    ) -> Result<&[Place], RecommendError>
    where
        S: PlaceSearch,
        R: Rng + ?Sized,
    {
        let token = self.generations.begin();

        self.apply_selection(Selection::Unselected);
        self.remove_displayed_markers();
        self.state.clear_displayed();
        self.state.place.loading = true;

        let center = self.surface.center();
        self.surface
            .show_search_radius(center, self.settings.radius_meters);

        let request = PoolRequest {
            keyword: self.settings.keyword.clone(),
            center,
            radius_meters: self.settings.radius_meters,
            max_pages: self.settings.max_pages,
        };

        let pool = match self.cache.lookup(&request.cache_key()) {
            Some(pool) => {
                tracing::info!(
                    key = %request.cache_key(),
                    candidates = pool.len(),
                    "viewport cache hit"
                );
                pool
            }
            None => {
                let bounds = self.surface.bounds();
                match aggregate(search, &request, &bounds, &mut self.cache, &token).await {
                    Ok(pool) => pool,
                    Err(err) => {
                        if !matches!(err, RecommendError::Superseded { .. }) {
                            self.state.place.loading = false;
                        }
                        return Err(err);
                    }
                }
            }
        };

        let sample_size = self.settings.sample_size.min(MAX_SAMPLE_SIZE);
        let sample = select_sample(&pool, sample_size, rng);
        self.show_markers_and_list(sample);
        self.state.place.loading = false;

        tracing::info!(
            generation = token.generation(),
            shown = self.state.place.places.len(),
            "recommendation published"
        );
        Ok(&self.state.place.places)
    }

    /// Moves the map to the device position and marks it.
    ///
    /// Clears the displayed recommendations. The address line is updated only
    /// when reverse geocoding succeeds.
    ///
    /// # Errors
    ///
    /// - [`RecommendError::Geolocation`] when no fix is available; nothing
    ///   changes on screen.
    /// - [`RecommendError::Superseded`] when a newer action started while
    ///   waiting for the fix or the address.
    pub async fn move_to_current_location<G, C>(
        &mut self,
        geolocator: &G,
        geocoder: &C,
    ) -> Result<LatLng, RecommendError>
    where
        G: Geolocator,
        C: ReverseGeocoder,
    {
        let token = self.generations.begin();

        let position = geolocator.current_position().await.map_err(|err| {
            tracing::warn!(error = %err, "could not get current position");
            RecommendError::from(err)
        })?;
        token.ensure_current()?;

        self.surface.pan_to(position);

        self.apply_selection(Selection::Unselected);
        self.remove_displayed_markers();
        self.state.clear_displayed();
        self.state.place.loading = false;

        if let Some(previous) = self.state.map.current_marker.take() {
            self.surface.remove_marker(previous);
        }
        let marker = self
            .surface
            .add_marker(position, None, MarkerIcon::CurrentLocation);
        self.state.map.current_marker = Some(marker);

        match geocoder.address_of(position).await {
            Ok(Some(address)) => {
                token.ensure_current()?;
                tracing::info!(%position, address = %address, "current location resolved");
                self.state.place.current_location = Some(address);
            }
            Ok(None) => tracing::debug!(%position, "no address for current position"),
            Err(err) => tracing::warn!(%position, error = %err, "reverse geocoding failed"),
        }

        Ok(position)
    }

    /// A click on a marker. Clicks on markers not currently displayed are ignored.
    pub fn click_marker(&mut self, marker: MarkerId) {
        if !self.state.map.markers.contains(&marker) {
            tracing::debug!(%marker, "click on unknown marker ignored");
            return;
        }
        let next = Selection::from(self.state.map.selected).on_marker_click(marker);
        self.apply_selection(next);
    }

    /// A click on empty map background.
    pub fn click_map(&mut self) {
        let next = Selection::from(self.state.map.selected).on_map_click();
        self.apply_selection(next);
    }

    /// A click on the `index`-th entry of the place list selects its marker.
    pub fn select_place(&mut self, index: usize) -> Option<&Place> {
        let marker = self.state.marker_at(index)?;
        self.apply_selection(Selection::Selected(marker));
        self.state.selected_place()
    }

    /// Takes every recommendation marker off the surface. The view state is
    /// left for the caller to republish.
    fn remove_displayed_markers(&mut self) {
        for marker in self.state.map.markers.drain(..) {
            self.surface.remove_marker(marker);
        }
    }

    fn show_markers_and_list(&mut self, selected: Vec<Place>) {
        self.remove_displayed_markers();
        let markers: Vec<MarkerId> = selected
            .iter()
            .map(|place| {
                self.surface
                    .add_marker(place.position(), Some(&place.name), MarkerIcon::Default)
            })
            .collect();
        self.state.publish(selected, markers);
        self.apply_selection(Selection::Unselected);
    }

    /// Records `selection` and runs its entry actions on the surface.
    fn apply_selection(&mut self, selection: Selection) {
        self.state.map.selected = selection.marker();
        match selection {
            Selection::Selected(chosen) => {
                for &marker in &self.state.map.markers {
                    let icon = if marker == chosen {
                        MarkerIcon::Highlighted
                    } else {
                        MarkerIcon::Default
                    };
                    self.surface.set_marker_icon(marker, icon);
                }
                if let Some(place) = self.state.place_for_marker(chosen) {
                    self.surface.open_popup(chosen, &PlaceDetails::from(place));
                    self.surface.pan_to(place.position());
                }
            }
            Selection::Unselected => {
                for &marker in &self.state.map.markers {
                    self.surface.set_marker_icon(marker, MarkerIcon::Default);
                }
                self.surface.close_popup();
            }
        }
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
