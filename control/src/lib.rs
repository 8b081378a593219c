//! Control network tools.
//!
//! - [`surface_point`]: latitude/longitude/radius coordinates
//! - [`network`]: control points, measures, and network persistence
//! - [`radii`]: replacing ground point radii with DEM values
//! - [`report`]: run summary and failure log
//! - [`run`]: a complete recomputation from input files to outputs

pub mod network;
pub mod radii;
pub mod report;
pub mod run;
pub mod surface_point;

pub use network::{
    ControlMeasure, ControlNet, ControlPoint, NetworkError, PointType, SurfacePointSource,
};
pub use radii::{recompute_radii, RadiiError, RadiusOutcome};
pub use run::{new_radii, NewRadiiParams, RunError, RunSummary};
pub use surface_point::SurfacePoint;
