//! Body-fixed surface coordinates.

use serde::{Deserialize, Serialize};

/// A latitude/longitude/radius location on the target body.
///
/// Angles are planetocentric degrees, longitude positive east. A point that
/// was never set is invalid and carries no usable coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Local radius in meters
    pub radius: f64,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

impl SurfacePoint {
    pub fn new(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius,
            valid: true,
        }
    }

    /// A point with no coordinate.
    pub fn invalid() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            radius: 0.0,
            valid: false,
        }
    }

    /// True when the point is flagged valid and all three components are finite.
    pub fn is_valid(&self) -> bool {
        self.valid
            && self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.radius.is_finite()
    }

    /// Replace the radius, keeping latitude and longitude.
    pub fn reset_local_radius(&mut self, radius: f64) {
        self.radius = radius;
    }
}

impl Default for SurfacePoint {
    fn default() -> Self {
        Self::invalid()
    }
}
