//! Generation tokens for superseding in-flight operations.
//!
//! Every top-level user action (a recommendation, a jump to the current
//! location) takes a fresh token. Async work holding an older token checks it
//! before touching shared state and bails out once a newer action started.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::RecommendError;

/// Shared, monotonically increasing generation counter.
#[derive(Debug, Clone, Default)]
pub struct Generations {
    current: Arc<AtomicU64>,
}

impl Generations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, invalidating every outstanding token.
    #[must_use]
    pub fn begin(&self) -> GenerationToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationToken {
            current: Arc::clone(&self.current),
            generation,
        }
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Proof that an operation belongs to a particular generation.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl GenerationToken {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` while no newer generation has begun.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// # Errors
    ///
    /// Returns [`RecommendError::Superseded`] once a newer generation began.
    pub fn ensure_current(&self) -> Result<(), RecommendError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(RecommendError::Superseded {
                generation: self.generation,
            })
        }
    }
}
