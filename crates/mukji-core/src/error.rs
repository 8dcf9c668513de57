use thiserror::Error;

/// Boxed error from a collaborator service (places search, geocoder).
pub type ServiceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failure to obtain a position fix.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    Denied,

    #[error("location unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Why a user action produced no new selection.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Every fetched page was filtered down to nothing.
    #[error("no restaurants found inside the current viewport")]
    NoResultsInViewport,

    /// The places service answered a page with a failure.
    #[error("places search failed on page {page}: {source}")]
    SearchService {
        page: u32,
        #[source]
        source: ServiceError,
    },

    /// A newer action started while this one was in flight.
    #[error("superseded by a newer request (generation {generation})")]
    Superseded { generation: u64 },

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl RecommendError {
    /// Blocking message to show the user, if this failure warrants one.
    ///
    /// Superseded runs are silent: the newer action owns the screen.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::NoResultsInViewport => Some("There are no restaurants inside the map."),
            Self::SearchService { .. } => {
                Some("Restaurant search failed. Please try again in a moment.")
            }
            Self::Geolocation(_) => Some("Could not get your current location."),
            Self::Superseded { .. } => None,
        }
    }
}
