//! Pixel operations that erase a reseau cross from its window.
//!
//! A reseau mark is a thin cross centered in a square `dim x dim` window.
//! Both arms are covered by a band `width` pixels wide straddling the
//! window's center column (vertical arm) and center row (horizontal arm).
//! The band spans the offsets `(width - 1) / -2 ..= width / 2` around the
//! centerline, using truncating division, so an odd width is symmetric and
//! an even width leans one pixel toward larger indices.
//!
//! Two actions are available:
//!
//! - [`PatchAction::Null`] sets every band pixel to the Null sentinel.
//! - [`PatchAction::Patch`] replaces every band pixel with the mean of the two
//!   pixels `width` away on either side, across the band.
//!
//! Patching runs in place, one window row `i` at a time and, within a row,
//! one band offset at a time; the vertical pixel is updated before the
//! horizontal one. Where the arms cross, later updates read values written
//! earlier in the same pass. Neighbours are averaged arithmetically even when
//! one of them is a special pixel.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

use shared::special_pixel::NULL;
use shared::Brick;

use crate::reseau::Reseau;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Unknown action [{0}], expected NULL or PATCH")]
    UnknownAction(String),
    #[error("Band width must be at least 1, got {0}")]
    WidthTooSmall(i32),
    #[error("Band width {width} does not fit a {dimension} pixel reseau window for {action}")]
    WidthTooLarge {
        width: i32,
        dimension: usize,
        action: PatchAction,
    },
}

/// What to do to the pixels under a reseau band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchAction {
    /// Set band pixels to Null
    Null,
    /// Interpolate band pixels from their neighbours across the band
    Patch,
}

impl FromStr for PatchAction {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NULL" => Ok(PatchAction::Null),
            "PATCH" => Ok(PatchAction::Patch),
            _ => Err(PatchError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for PatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchAction::Null => write!(f, "NULL"),
            PatchAction::Patch => write!(f, "PATCH"),
        }
    }
}

/// Which reseau marks get modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidityFilter {
    /// Every mark in the label
    All,
    /// Only marks flagged valid by the locating pass
    ValidOnly,
}

impl ValidityFilter {
    /// Filter selected by a "valid marks only" flag.
    pub fn from_valid_only(valid_only: bool) -> Self {
        if valid_only {
            ValidityFilter::ValidOnly
        } else {
            ValidityFilter::All
        }
    }

    pub fn accepts(&self, reseau: &Reseau) -> bool {
        match self {
            ValidityFilter::All => true,
            ValidityFilter::ValidOnly => reseau.valid,
        }
    }
}

/// Inclusive band offsets around a centerline for `width`.
pub fn band_offsets(width: i32) -> RangeInclusive<i32> {
    (width - 1) / -2..=width / 2
}

/// A validated band operation over `dimension x dimension` windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReseauPatcher {
    dimension: usize,
    width: i32,
    action: PatchAction,
}

impl ReseauPatcher {
    /// Check that the band and, for patching, its neighbours stay inside the window.
    pub fn new(dimension: usize, width: i32, action: PatchAction) -> Result<Self, PatchError> {
        if width < 1 {
            return Err(PatchError::WidthTooSmall(width));
        }
        let offsets = band_offsets(width);
        let (low, high) = match action {
            PatchAction::Null => (*offsets.start() as i64, *offsets.end() as i64),
            PatchAction::Patch => (
                (*offsets.start() - width) as i64,
                (*offsets.end() + width) as i64,
            ),
        };
        let center = (dimension / 2) as i64;
        if center + low < 0 || center + high >= dimension as i64 {
            return Err(PatchError::WidthTooLarge {
                width,
                dimension,
                action,
            });
        }
        Ok(Self {
            dimension,
            width,
            action,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn action(&self) -> PatchAction {
        self.action
    }

    /// Apply the action to a single band `dimension x dimension` brick.
    pub fn apply(&self, brick: &mut Brick) {
        debug_assert_eq!(brick.size(), self.dimension * self.dimension);
        let dim = self.dimension as i64;
        let center = dim / 2;
        let width = self.width as i64;
        let at = |index: i64| index as usize;

        for i in 0..dim {
            for j in band_offsets(self.width).map(i64::from) {
                let vertical = dim * i + center + j;
                let horizontal = dim * (center + j) + i;
                match self.action {
                    PatchAction::Null => {
                        brick[at(vertical)] = NULL;
                        brick[at(horizontal)] = NULL;
                    }
                    PatchAction::Patch => {
                        brick[at(vertical)] = (brick[at(vertical - width)]
                            + brick[at(vertical + width)])
                            / 2.0;
                        brick[at(horizontal)] = (brick[at(horizontal - dim * width)]
                            + brick[at(horizontal + dim * width)])
                            / 2.0;
                    }
                }
            }
        }
    }
}
