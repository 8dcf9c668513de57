//! Viewport result cache.
//!
//! Remembers the filtered candidate pool fetched for a map center so that
//! asking again from (nearly) the same spot samples from memory instead of
//! re-querying the places service. Centers are snapped to a grid whose cell
//! size equals the search radius, so centers a few meters apart share an
//! entry. The cache holds at most `capacity` entries and evicts the least
//! recently used one when full.

use std::collections::HashMap;

use crate::geo::{meters_per_lng_degree, LatLng, METERS_PER_LAT_DEGREE};
use crate::place::Place;

/// Grid cell of a map center, qualified by the search it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub keyword: String,
    pub radius_meters: u32,
    pub lat_cell: i64,
    pub lng_cell: i64,
}

impl CacheKey {
    /// Snaps `center` onto a grid of `radius_meters` cells.
    ///
    /// The longitude step is measured at the middle of the latitude row, so
    /// every point in the same row uses the same step.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn for_center(keyword: &str, center: LatLng, radius_meters: u32) -> Self {
        let cell_meters = f64::from(radius_meters.max(1));
        let lat_step = cell_meters / METERS_PER_LAT_DEGREE;
        let lat_cell = (center.lat / lat_step).floor() as i64;
        let row_lat = (lat_cell as f64 + 0.5) * lat_step;
        let lng_step = cell_meters / meters_per_lng_degree(row_lat);
        let lng_cell = (center.lng / lng_step).floor() as i64;
        Self {
            keyword: keyword.to_owned(),
            radius_meters,
            lat_cell,
            lng_cell,
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}m[{},{}]",
            self.keyword, self.radius_meters, self.lat_cell, self.lng_cell
        )
    }
}

#[derive(Debug)]
struct CacheEntry {
    places: Vec<Place>,
    last_used_tick: u64,
}

/// Bounded, process-local LRU of candidate pools.
#[derive(Debug)]
pub struct ViewportCache {
    capacity: usize,
    tick: u64,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl ViewportCache {
    /// `capacity == 0` disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached pool for `key` and marks it most recently used.
    ///
    /// Never returns an empty pool.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<Vec<Place>> {
        self.tick += 1;
        let tick = self.tick;
        let entry = self.entries.get_mut(key)?;
        entry.last_used_tick = tick;
        Some(entry.places.clone())
    }

    /// Stores `places` under `key`, replacing any previous pool.
    ///
    /// Empty pools are ignored. When the cache is full the least recently
    /// used entry is dropped first.
    pub fn store(&mut self, key: CacheKey, places: Vec<Place>) {
        if self.capacity == 0 || places.is_empty() {
            return;
        }
        self.tick += 1;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.entries.insert(
            key,
            CacheEntry {
                places,
                last_used_tick: self.tick,
            },
        );
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used_tick)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            tracing::debug!(%key, "evicting least recently used viewport");
            self.entries.remove(&key);
        }
    }
}
