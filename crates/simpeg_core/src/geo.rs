//! Location acquisition seam.
//!
//! # Responsibility
//! - Define the provider contract behind the "use my location" action.
//! - Fill the coordinate form fields from an acquired position.
//!
//! # Invariants
//! - A [`Coordinates`] value is always inside the valid latitude and
//!   longitude ranges.

use crate::form::EmployeeForm;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A validated geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds validated coordinates. Returns `None` when either value is
    /// out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return None;
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug)]
pub enum GeoError {
    /// No location source exists in this environment.
    Unsupported,
    /// A location source exists but could not produce a position.
    Unavailable(String),
}

impl Display for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "no location source in this environment"),
            Self::Unavailable(reason) => write!(f, "location unavailable: {reason}"),
        }
    }
}

impl Error for GeoError {}

/// Source of the current position.
pub trait LocationProvider {
    fn current_location(&self) -> Result<Coordinates, GeoError>;
}

/// Provider returning one configured position. Used for tests and for
/// setups with a known fixed site.
pub struct FixedLocationProvider {
    coordinates: Coordinates,
}

impl FixedLocationProvider {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn current_location(&self) -> Result<Coordinates, GeoError> {
        Ok(self.coordinates)
    }
}

/// Fills the form's coordinate fields from an acquired position,
/// rendered with a fixed six decimal places.
pub fn apply_to_form(form: &mut EmployeeForm, coordinates: Coordinates) {
    form.latitude = format_coordinate(coordinates.latitude);
    form.longitude = format_coordinate(coordinates.longitude);
}

fn format_coordinate(value: f64) -> String {
    format!("{value:.6}")
}
