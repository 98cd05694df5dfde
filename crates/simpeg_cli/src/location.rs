//! Location source backing the `--auto-location` flag.

use simpeg_core::geo::{Coordinates, GeoError, LocationProvider};
use std::env;

pub const LATITUDE_VAR: &str = "SIMPEG_LATITUDE";
pub const LONGITUDE_VAR: &str = "SIMPEG_LONGITUDE";

/// Reads the current position from the environment. Absent variables mean
/// this machine has no location source at all; present but malformed or
/// out-of-range values are a failed lookup.
pub struct EnvLocationProvider;

impl LocationProvider for EnvLocationProvider {
    fn current_location(&self) -> Result<Coordinates, GeoError> {
        let (latitude, longitude) = match (env::var(LATITUDE_VAR), env::var(LONGITUDE_VAR)) {
            (Ok(latitude), Ok(longitude)) => (latitude, longitude),
            _ => return Err(GeoError::Unsupported),
        };

        let latitude = parse_axis(LATITUDE_VAR, &latitude)?;
        let longitude = parse_axis(LONGITUDE_VAR, &longitude)?;
        Coordinates::new(latitude, longitude)
            .ok_or_else(|| GeoError::Unavailable("coordinates out of range".to_string()))
    }
}

fn parse_axis(name: &str, raw: &str) -> Result<f64, GeoError> {
    raw.trim()
        .parse()
        .map_err(|_| GeoError::Unavailable(format!("{name} is not a number")))
}
