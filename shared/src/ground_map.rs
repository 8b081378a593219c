//! Ground to image mapping for map-projected cubes.
//!
//! A [`GroundMap`] turns a universal latitude/longitude (planetocentric,
//! positive east, 0-360 domain) into a fractional 1-based `(sample, line)`
//! in a specific cube. [`ProjectedGroundMap`] does this for cubes carrying a
//! `Mapping` label group with a cylindrical projection, which covers the
//! usual layout of global and regional elevation models.
//!
//! The projection pipeline is:
//!
//! 1. Convert the universal coordinate into the cube's latitude type,
//!    longitude direction, and longitude domain.
//! 2. Project to map `(x, y)` in meters.
//! 3. Convert to pixels through the upper left corner and pixel resolution:
//!    `sample = (x - ulx) / res + 0.5`, `line = (uly - y) / res + 0.5`.
//!
//! Locations that land off the cube are reported as failures, matching what
//! a caller needs before reading a pixel there.

use std::f64::consts::PI;
use std::str::FromStr;
use thiserror::Error;

use crate::cube::Cube;
use crate::image_size::ImageSize;
use crate::pvl::{PvlError, PvlGroup};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroundMapError {
    #[error("Cube has no usable Mapping group: {0}")]
    Label(#[from] PvlError),
    #[error("Unsupported map projection [{0}]")]
    UnsupportedProjection(String),
    #[error("Mapping keyword [{keyword}] has invalid value [{value}]")]
    InvalidParameter { keyword: &'static str, value: String },
}

/// Fractional 1-based image location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePoint {
    pub sample: f64,
    pub line: f64,
}

/// Ground to image projection for one cube.
pub trait GroundMap {
    /// Project a universal latitude/longitude in degrees.
    ///
    /// Returns `None` if the coordinate cannot be projected or lands outside
    /// the cube.
    fn ground_to_image(&self, latitude: f64, longitude: f64) -> Option<ImagePoint>;
}

/// Cylindrical projections supported for elevation models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    SimpleCylindrical,
    /// Equidistant cylindrical with a standard parallel (degrees)
    Equirectangular { center_latitude: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatitudeType {
    Planetocentric,
    Planetographic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeDirection {
    PositiveEast,
    PositiveWest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeDomain {
    /// Longitudes in [-180, 180]
    Domain180,
    /// Longitudes in [0, 360)
    Domain360,
}

impl FromStr for LatitudeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "planetocentric" => Ok(LatitudeType::Planetocentric),
            "planetographic" => Ok(LatitudeType::Planetographic),
            _ => Err(s.to_string()),
        }
    }
}

impl FromStr for LongitudeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positiveeast" => Ok(LongitudeDirection::PositiveEast),
            "positivewest" => Ok(LongitudeDirection::PositiveWest),
            _ => Err(s.to_string()),
        }
    }
}

impl FromStr for LongitudeDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "180" => Ok(LongitudeDomain::Domain180),
            "360" => Ok(LongitudeDomain::Domain360),
            _ => Err(s.to_string()),
        }
    }
}

/// Ground map for a cube with a cylindrical `Mapping` group.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedGroundMap {
    projection: Projection,
    /// Meters
    equatorial_radius: f64,
    /// Meters
    polar_radius: f64,
    /// Degrees, in the cube's longitude system
    center_longitude: f64,
    latitude_type: LatitudeType,
    longitude_direction: LongitudeDirection,
    longitude_domain: LongitudeDomain,
    upper_left_x: f64,
    upper_left_y: f64,
    /// Meters per pixel
    resolution: f64,
    size: ImageSize,
}

fn required_f64(group: &PvlGroup, keyword: &'static str) -> Result<f64, GroundMapError> {
    let value = group.find_keyword(keyword)?.as_f64(0)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GroundMapError::InvalidParameter {
            keyword,
            value: value.to_string(),
        })
    }
}

fn optional_parse<T: FromStr<Err = String>>(
    group: &PvlGroup,
    keyword: &'static str,
    default: T,
) -> Result<T, GroundMapError> {
    if !group.has_keyword(keyword) {
        return Ok(default);
    }
    let raw = group.find_keyword(keyword)?.as_str(0)?;
    raw.parse::<T>()
        .map_err(|value| GroundMapError::InvalidParameter { keyword, value })
}

impl ProjectedGroundMap {
    /// Build a ground map from the `Mapping` group of `cube`.
    pub fn from_cube(cube: &Cube) -> Result<Self, GroundMapError> {
        let mapping = cube.label().find_group("Mapping")?;
        Self::from_mapping(mapping, cube.size())
    }

    /// Build a ground map from a `Mapping` group for a cube of `size`.
    pub fn from_mapping(mapping: &PvlGroup, size: ImageSize) -> Result<Self, GroundMapError> {
        let name = mapping.find_keyword("ProjectionName")?.as_str(0)?.to_string();
        let projection = match name.to_ascii_lowercase().as_str() {
            "simplecylindrical" => Projection::SimpleCylindrical,
            "equirectangular" => Projection::Equirectangular {
                center_latitude: required_f64(mapping, "CenterLatitude")?,
            },
            _ => return Err(GroundMapError::UnsupportedProjection(name)),
        };

        let equatorial_radius = required_f64(mapping, "EquatorialRadius")?;
        let polar_radius = if mapping.has_keyword("PolarRadius") {
            required_f64(mapping, "PolarRadius")?
        } else {
            equatorial_radius
        };
        let resolution = required_f64(mapping, "PixelResolution")?;
        for (keyword, value) in [
            ("EquatorialRadius", equatorial_radius),
            ("PolarRadius", polar_radius),
            ("PixelResolution", resolution),
        ] {
            if value <= 0.0 {
                return Err(GroundMapError::InvalidParameter {
                    keyword,
                    value: value.to_string(),
                });
            }
        }

        Ok(Self {
            projection,
            equatorial_radius,
            polar_radius,
            center_longitude: required_f64(mapping, "CenterLongitude")?,
            latitude_type: optional_parse(mapping, "LatitudeType", LatitudeType::Planetocentric)?,
            longitude_direction: optional_parse(
                mapping,
                "LongitudeDirection",
                LongitudeDirection::PositiveEast,
            )?,
            longitude_domain: optional_parse(
                mapping,
                "LongitudeDomain",
                LongitudeDomain::Domain360,
            )?,
            upper_left_x: required_f64(mapping, "UpperLeftCornerX")?,
            upper_left_y: required_f64(mapping, "UpperLeftCornerY")?,
            resolution,
            size,
        })
    }

    /// Convert a universal latitude/longitude into the cube's own system.
    fn to_local(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let latitude = match self.latitude_type {
            LatitudeType::Planetocentric => latitude,
            LatitudeType::Planetographic => {
                if latitude.abs() >= 90.0 {
                    latitude
                } else {
                    let ratio = self.equatorial_radius / self.polar_radius;
                    (latitude.to_radians().tan() * ratio * ratio)
                        .atan()
                        .to_degrees()
                }
            }
        };

        let longitude = match self.longitude_direction {
            LongitudeDirection::PositiveEast => longitude,
            LongitudeDirection::PositiveWest => -longitude,
        };
        let longitude = longitude.rem_euclid(360.0);
        let longitude = match self.longitude_domain {
            LongitudeDomain::Domain360 => longitude,
            LongitudeDomain::Domain180 if longitude > 180.0 => longitude - 360.0,
            LongitudeDomain::Domain180 => longitude,
        };
        (latitude, longitude)
    }

    /// Project local latitude/longitude (degrees) to map x/y (meters).
    fn project(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let radius = self.equatorial_radius;
        let delta_lon = (longitude - self.center_longitude) * PI / 180.0;
        let x = match self.projection {
            Projection::SimpleCylindrical => radius * delta_lon,
            Projection::Equirectangular { center_latitude } => {
                radius * delta_lon * center_latitude.to_radians().cos()
            }
        };
        let y = radius * latitude * PI / 180.0;
        (x, y)
    }
}

/// Pixel coordinates are kept to this many steps per pixel.
const PIXEL_GRID: f64 = 1e9;

/// Round a pixel coordinate to the nearest 1e-9 pixel.
///
/// Degrees pass through radians and meters on the way to pixels, so a
/// location exactly on a pixel edge can come out one ulp short of it. Edges
/// decide both the bounds check and which pixel a truncating read lands in.
fn snap_to_grid(value: f64) -> f64 {
    (value * PIXEL_GRID).round() / PIXEL_GRID
}

impl GroundMap for ProjectedGroundMap {
    fn ground_to_image(&self, latitude: f64, longitude: f64) -> Option<ImagePoint> {
        if !latitude.is_finite() || !longitude.is_finite() || latitude.abs() > 90.0 {
            return None;
        }
        let (lat, lon) = self.to_local(latitude, longitude);
        let (x, y) = self.project(lat, lon);
        let sample = snap_to_grid((x - self.upper_left_x) / self.resolution + 0.5);
        let line = snap_to_grid((self.upper_left_y - y) / self.resolution + 0.5);

        let inside = |value: f64, limit: usize| value >= 0.5 && value <= limit as f64 + 0.5;
        if inside(sample, self.size.samples) && inside(line, self.size.lines) {
            Some(ImagePoint { sample, line })
        } else {
            None
        }
    }
}
