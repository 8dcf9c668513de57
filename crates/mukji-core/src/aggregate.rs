//! Paged fetch aggregation.
//!
//! Walks the provider's result pages one after another, keeps the hits that
//! fall inside the viewport, and stops at the last page, the page cap, an
//! empty page, or a failure. Pages are requested sequentially: each request
//! waits for the previous page to answer.

use std::collections::HashSet;

use crate::cache::{CacheKey, ViewportCache};
use crate::error::RecommendError;
use crate::generation::GenerationToken;
use crate::geo::{filter_in_bounds, LatLng, ViewportBounds};
use crate::place::Place;
use crate::services::{KeywordQuery, PlaceSearch};

/// What to search for and how far to page.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRequest {
    pub keyword: String,
    pub center: LatLng,
    pub radius_meters: u32,
    /// Hard cap on page requests; values below 1 are treated as 1.
    pub max_pages: u32,
}

impl PoolRequest {
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_center(&self.keyword, self.center, self.radius_meters)
    }
}

/// Fetches and filters result pages into a candidate pool.
///
/// On success the pool is also stored in `cache` under the request's center.
///
/// # Errors
///
/// - [`RecommendError::Superseded`] if `token` went stale before a page
///   request or before the pool was finalized.
/// - [`RecommendError::SearchService`] if a page failed and nothing usable
///   had been collected yet. A failure after usable results ends paging
///   early instead.
/// - [`RecommendError::NoResultsInViewport`] if no hit survived the filter.
pub async fn aggregate<S, B>(
    search: &S,
    request: &PoolRequest,
    bounds: &B,
    cache: &mut ViewportCache,
    token: &GenerationToken,
) -> Result<Vec<Place>, RecommendError>
where
    S: PlaceSearch,
    B: ViewportBounds + ?Sized,
{
    let max_pages = request.max_pages.max(1);
    let mut pool: Vec<Place> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut page = 1u32;

    loop {
        token.ensure_current()?;

        let query = KeywordQuery {
            keyword: request.keyword.clone(),
            center: request.center,
            radius_meters: request.radius_meters,
            page,
        };

        let result = match search.search_page(&query).await {
            Ok(result) => result,
            Err(err) if pool.is_empty() => {
                return Err(RecommendError::SearchService {
                    page,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                tracing::warn!(
                    page,
                    collected = pool.len(),
                    error = %err,
                    "places search failed mid-paging; keeping earlier pages"
                );
                break;
            }
        };

        let fetched = result.items.len();
        let inside = filter_in_bounds(&result.items, bounds);
        tracing::debug!(
            page,
            fetched,
            inside = inside.len(),
            has_next_page = result.has_next_page,
            "places page received"
        );

        for raw in inside {
            if seen.insert(raw.id.clone()) {
                pool.push(Place::from_raw(raw));
            }
        }

        if fetched == 0 || !result.has_next_page || page >= max_pages {
            break;
        }
        page += 1;
    }

    token.ensure_current()?;

    if pool.is_empty() {
        return Err(RecommendError::NoResultsInViewport);
    }

    tracing::info!(
        pages = page,
        candidates = pool.len(),
        center = %request.center,
        "candidate pool assembled"
    );
    cache.store(request.cache_key(), pool.clone());
    Ok(pool)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
