//! Reseau removal run.
//!
//! A run has two phases:
//!
//! 1. **Setup** checks the input and builds the output: the camera must be an
//!    Apollo camera with a reseau grid, the reseau status must show the marks
//!    were located but not yet removed, and the band must fit the window. The
//!    output cube is a tile-by-tile copy of the input whose label already says
//!    `Status = Removed`, and it is written to disk before any mark is touched.
//! 2. **Erase** visits every reseau mark in label order. Each mark's window is
//!    read, modified if the validity filter accepts the mark, and written back.
//!    Marks the filter rejects still get their read/write pair, leaving their
//!    pixels as they were.
//!
//! Because the status changes in phase 1, an interrupted run still leaves an
//! output that refuses a second pass.

use std::path::{Path, PathBuf};
use thiserror::Error;

use shared::process::{copy_tile, process_by_tile};
use shared::{Brick, Cube, CubeError};

use crate::instrument::{Apollo, ApolloError};
use crate::patch::{PatchAction, PatchError, ReseauPatcher, ValidityFilter};
use crate::reseau::{
    read_reseaus, reseau_status, set_reseau_status, Reseau, ReseauError, ReseauStatus,
};

/// Tile size used for the input to output copy
pub const COPY_TILE_SIZE: usize = 128;

#[derive(Error, Debug)]
pub enum RemovalError {
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error(transparent)]
    Apollo(#[from] ApolloError),
    #[error(transparent)]
    Reseau(#[from] ReseauError),
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("Input file [{0}] appears to have nominal reseau status. You must locate the reseaus first.")]
    NotLocated(String),
    #[error("Input file [{0}] appears to already have reseaus removed.")]
    AlreadyRemoved(String),
    #[error("Instrument [{0}] has no reseau marks to remove")]
    NoReseauGrid(String),
}

/// Parameters for one removal run.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalParams {
    pub from: PathBuf,
    pub to: PathBuf,
    pub filter: ValidityFilter,
    pub action: PatchAction,
    pub width: i32,
}

/// Outcome of a removal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalReport {
    /// Reseau marks listed in the label
    pub reseaus: usize,
    /// Marks whose window was modified
    pub modified: usize,
    /// Marks the validity filter left untouched
    pub skipped: usize,
    /// Window side length in pixels
    pub dimension: usize,
}

/// Everything checked and prepared before any pixel of the output changes.
#[derive(Debug, Clone)]
pub struct PreparedRemoval {
    pub apollo: Apollo,
    pub patcher: ReseauPatcher,
    pub reseaus: Vec<Reseau>,
    /// Copy of the input with `Status = Removed`
    pub output: Cube,
}

/// Validate `input` and build the output cube.
///
/// `name` identifies the input in error messages.
pub fn prepare_removal(
    input: &Cube,
    name: &str,
    action: PatchAction,
    width: i32,
) -> Result<PreparedRemoval, RemovalError> {
    let apollo = Apollo::from_cube(input)?;
    let dimension = apollo
        .reseau_dimension()
        .ok_or_else(|| RemovalError::NoReseauGrid(apollo.to_string()))?;

    match reseau_status(input.label())? {
        ReseauStatus::Nominal => return Err(RemovalError::NotLocated(name.to_string())),
        ReseauStatus::Removed => return Err(RemovalError::AlreadyRemoved(name.to_string())),
        ReseauStatus::Refined => {}
    }

    let patcher = ReseauPatcher::new(dimension, width, action)?;
    let reseaus = read_reseaus(input.label())?;

    let mut label = input.label().clone();
    set_reseau_status(&mut label, ReseauStatus::Removed)?;
    let mut output = Cube::new(input.size(), input.pixel_type(), label);
    process_by_tile(input, &mut output, COPY_TILE_SIZE, COPY_TILE_SIZE, copy_tile)?;

    Ok(PreparedRemoval {
        apollo,
        patcher,
        reseaus,
        output,
    })
}

/// Null or patch every accepted reseau mark of `cube` in place.
pub fn erase_reseaus(
    cube: &mut Cube,
    reseaus: &[Reseau],
    patcher: &ReseauPatcher,
    filter: ValidityFilter,
) -> RemovalReport {
    let dimension = patcher.dimension();
    let mut brick = Brick::new(dimension, dimension, 1);
    let mut modified = 0;

    for (index, reseau) in reseaus.iter().enumerate() {
        let (sample, line) = reseau.window_base(dimension);
        brick.set_base_position(sample, line, 1);
        cube.read(&mut brick);
        if filter.accepts(reseau) {
            patcher.apply(&mut brick);
            modified += 1;
            log::debug!(
                "Reseau {index} at ({:.2}, {:.2}): {}",
                reseau.sample,
                reseau.line,
                patcher.action()
            );
        } else {
            log::debug!("Reseau {index} at ({:.2}, {:.2}): skipped", reseau.sample, reseau.line);
        }
        cube.write(&brick);
    }

    RemovalReport {
        reseaus: reseaus.len(),
        modified,
        skipped: reseaus.len() - modified,
        dimension,
    }
}

/// Run a full removal from `params.from` to `params.to`.
pub fn remove_reseaus(params: &RemovalParams) -> Result<RemovalReport, RemovalError> {
    let input = Cube::open(&params.from)?;
    let name = display_name(&params.from);
    let PreparedRemoval {
        apollo,
        patcher,
        reseaus,
        mut output,
    } = prepare_removal(&input, &name, params.action, params.width)?;
    drop(input);

    log::info!(
        "Removing {} reseaus from {name} ({apollo}, {}x{} window, width {}, {})",
        reseaus.len(),
        patcher.dimension(),
        patcher.dimension(),
        patcher.width(),
        patcher.action()
    );

    output.save(&params.to)?;
    let report = erase_reseaus(&mut output, &reseaus, &patcher, params.filter);
    output.save(&params.to)?;

    log::info!(
        "Modified {} of {} reseaus, wrote {}",
        report.modified,
        report.reseaus,
        params.to.display()
    );
    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}
