//! Device position for a terminal session: a fixed point from the command
//! line or the environment.

use mukji_core::{GeolocationError, Geolocator, LatLng};

#[derive(Debug, Clone, Copy)]
pub(crate) struct StaticGeolocator {
    position: Option<LatLng>,
}

impl StaticGeolocator {
    pub(crate) fn new(position: Option<LatLng>) -> Self {
        Self { position }
    }
}

impl Geolocator for StaticGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        self.position.ok_or_else(|| GeolocationError::Unavailable {
            reason: "no position given; pass --lat/--lng or set MUKJI_HOME_LAT/MUKJI_HOME_LNG"
                .to_owned(),
        })
    }
}
