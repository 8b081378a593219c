//! Control networks: tie and ground points measured across images.
//!
//! Networks are stored as pretty-printed JSON:
//!
//! ```json
//! {
//!   "network_id": "LunarMetric",
//!   "target_name": "Moon",
//!   "description": "Apollo 15 metric strip",
//!   "points": [
//!     {
//!       "id": "AS15_0001",
//!       "point_type": "Ground",
//!       "ignored": false,
//!       "apriori": { "latitude": 26.1, "longitude": 3.6, "radius": 1737400.0, "valid": true },
//!       "adjusted": { "latitude": 26.1, "longitude": 3.6, "radius": 1737400.0, "valid": true },
//!       "measures": [ { "serial_number": "APOLLO15/METRIC/1971-07-31T01:24:36", "sample": 2012.5, "line": 884.25 } ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::surface_point::SurfacePoint;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Unable to access control network [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Control network [{path}] is not valid: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// How a control point constrains the adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointType {
    /// Tied to a known ground coordinate
    Ground,
    /// Relates images to each other only
    Tie,
}

/// One image measurement of a control point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMeasure {
    pub serial_number: String,
    pub sample: f64,
    pub line: f64,
    #[serde(default)]
    pub ignored: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub id: String,
    pub point_type: PointType,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default)]
    pub apriori: SurfacePoint,
    #[serde(default)]
    pub adjusted: SurfacePoint,
    #[serde(default)]
    pub measures: Vec<ControlMeasure>,
}

impl ControlPoint {
    pub fn new(id: impl Into<String>, point_type: PointType) -> Self {
        Self {
            id: id.into(),
            point_type,
            ignored: false,
            apriori: SurfacePoint::invalid(),
            adjusted: SurfacePoint::invalid(),
            measures: Vec::new(),
        }
    }

    pub fn is_ground(&self) -> bool {
        self.point_type == PointType::Ground
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlNet {
    pub network_id: String,
    pub target_name: String,
    #[serde(default)]
    pub description: String,
    pub points: Vec<ControlPoint>,
}

impl ControlNet {
    pub fn new(network_id: impl Into<String>, target_name: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            target_name: target_name.into(),
            description: String::new(),
            points: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, NetworkError> {
        let json = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let net: ControlNet =
            serde_json::from_str(&json).map_err(|source| NetworkError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "Loaded control network {} with {} points",
            net.network_id,
            net.points.len()
        );
        Ok(net)
    }

    pub fn save(&self, path: &Path) -> Result<(), NetworkError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| NetworkError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn ground_point_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_ground()).count()
    }
}

/// Which of a point's two surface coordinates to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfacePointSource {
    Adjusted,
    Apriori,
}

impl SurfacePointSource {
    pub fn surface_point(&self, point: &ControlPoint) -> SurfacePoint {
        match self {
            SurfacePointSource::Adjusted => point.adjusted,
            SurfacePointSource::Apriori => point.apriori,
        }
    }

    pub fn set_surface_point(&self, point: &mut ControlPoint, surface: SurfacePoint) {
        match self {
            SurfacePointSource::Adjusted => point.adjusted = surface,
            SurfacePointSource::Apriori => point.apriori = surface,
        }
    }
}

impl FromStr for SurfacePointSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADJUSTED" => Ok(SurfacePointSource::Adjusted),
            "APRIORI" => Ok(SurfacePointSource::Apriori),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for SurfacePointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfacePointSource::Adjusted => write!(f, "ADJUSTED"),
            SurfacePointSource::Apriori => write!(f, "APRIORI"),
        }
    }
}
