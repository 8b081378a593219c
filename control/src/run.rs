//! A complete radius recomputation run.
//!
//! Loads the network and DEM, recomputes every ground point's radius, and
//! writes the updated network followed by the failure log. The network is
//! only written when at least one radius was recomputed.

use std::path::PathBuf;
use thiserror::Error;

use shared::{Cube, CubeError, GroundMapError, ProjectedGroundMap, PvlGroup};

use crate::network::{ControlNet, NetworkError, SurfacePointSource};
use crate::radii::{recompute_radii, RadiiError, RadiusOutcome};
use crate::report::{failure_log_path, logged_summary, write_results_log};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error("Cannot initialize ground map for cube [{model}]: {source}")]
    GroundMap {
        model: String,
        #[source]
        source: GroundMapError,
    },
    #[error("The value for parameter GETLATLON [{0}] must be provided.")]
    InvalidSource(String),
    #[error(transparent)]
    Radii(#[from] RadiiError),
    #[error("Unable to write results log [{path}]: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Inputs of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRadiiParams {
    pub cnet: PathBuf,
    pub model: PathBuf,
    pub to: PathBuf,
    /// Raw `GETLATLON` value; `None` when it was not given
    pub getlatlon: Option<String>,
    pub errors: Option<PathBuf>,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub outcome: RadiusOutcome,
    /// Failure log written, if any
    pub log_path: Option<PathBuf>,
    /// `Summary` group for the application log
    pub summary: PvlGroup,
}

fn parse_source(raw: Option<&str>) -> Result<SurfacePointSource, RunError> {
    let raw = raw.unwrap_or("");
    raw.parse()
        .map_err(|_| RunError::InvalidSource(raw.to_string()))
}

pub fn new_radii(params: &NewRadiiParams) -> Result<RunSummary, RunError> {
    let mut net = ControlNet::load(&params.cnet)?;
    let dem = Cube::open(&params.model)?;
    let model = params.model.display().to_string();
    let ground_map = ProjectedGroundMap::from_cube(&dem).map_err(|source| {
        RunError::GroundMap {
            model: model.clone(),
            source,
        }
    })?;
    let source = parse_source(params.getlatlon.as_deref())?;

    log::info!(
        "Recomputing radii for {} ground points of {} from {model}",
        net.ground_point_count(),
        net.network_id
    );
    let outcome = recompute_radii(&mut net, &dem, &ground_map, source);
    drop(ground_map);

    outcome.require_success(&model)?;
    net.save(&params.to)?;

    let log_path = failure_log_path(params.errors.as_deref(), &outcome);
    if let Some(path) = &log_path {
        write_results_log(&outcome, path).map_err(|source| RunError::Log {
            path: path.clone(),
            source,
        })?;
    }
    let summary = logged_summary(&outcome, log_path.as_deref());

    Ok(RunSummary {
        outcome,
        log_path,
        summary,
    })
}
