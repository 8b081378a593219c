//! Reseau marks recorded in a cube label.
//!
//! The `Reseaus` group holds parallel arrays, one entry per mark:
//!
//! ```text
//! Group = Reseaus
//!   Line   = (1040.2, 1039.8, ...)
//!   Sample = (1101.5, 2003.9, ...)
//!   Type   = (5, 5, ...)
//!   Valid  = (1, 0, ...)
//!   Status = Refined
//! End_Group
//! ```
//!
//! `Status` tracks the processing state of the whole image: marks start at
//! their nominal positions, are refined by a locating pass, and finally have
//! their pixels removed.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use shared::{Pvl, PvlError, PvlKeyword};

pub const RESEAU_GROUP: &str = "Reseaus";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReseauError {
    #[error(transparent)]
    Label(#[from] PvlError),
    #[error("Reseau keyword [{keyword}] has {found} values, expected {expected}")]
    LengthMismatch {
        keyword: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Unknown reseau status [{0}]")]
    UnknownStatus(String),
}

/// Processing state of an image's reseau marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReseauStatus {
    /// Positions are the nominal grid; marks have not been located
    Nominal,
    /// Marks have been located on the image
    Refined,
    /// Mark pixels have been nulled or patched
    Removed,
}

impl FromStr for ReseauStatus {
    type Err = ReseauError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nominal" => Ok(ReseauStatus::Nominal),
            "refined" | "located" => Ok(ReseauStatus::Refined),
            "removed" => Ok(ReseauStatus::Removed),
            _ => Err(ReseauError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for ReseauStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReseauStatus::Nominal => "Nominal",
            ReseauStatus::Refined => "Refined",
            ReseauStatus::Removed => "Removed",
        };
        write!(f, "{name}")
    }
}

/// One reseau mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reseau {
    /// 1-based line of the mark center
    pub line: f64,
    /// 1-based sample of the mark center
    pub sample: f64,
    /// Mark shape code
    pub kind: i32,
    /// Whether the locating pass trusted this position
    pub valid: bool,
}

impl Reseau {
    /// Upper-left `(sample, line)` of a `dimension` sized window centered on the mark.
    pub fn window_base(&self, dimension: usize) -> (i64, i64) {
        let half = (dimension / 2) as i64;
        let sample = (self.sample + 0.5) as i64 - half;
        let line = (self.line + 0.5) as i64 - half;
        (sample, line)
    }
}

/// Read the reseau status of a label.
pub fn reseau_status(label: &Pvl) -> Result<ReseauStatus, ReseauError> {
    let group = label.find_group(RESEAU_GROUP)?;
    group.find_keyword("Status")?.as_str(0)?.parse()
}

/// Record a new reseau status in a label.
pub fn set_reseau_status(label: &mut Pvl, status: ReseauStatus) -> Result<(), ReseauError> {
    let group = label.find_group_mut(RESEAU_GROUP)?;
    group.add_keyword(PvlKeyword::new("Status", status));
    Ok(())
}

/// Read every reseau mark from a label, in label order.
pub fn read_reseaus(label: &Pvl) -> Result<Vec<Reseau>, ReseauError> {
    let group = label.find_group(RESEAU_GROUP)?;
    let lines = group.find_keyword("Line")?;
    let samples = group.find_keyword("Sample")?;
    let kinds = group.find_keyword("Type")?;
    let valid = group.find_keyword("Valid")?;

    let count = lines.len();
    for (keyword, found) in [
        ("Sample", samples.len()),
        ("Type", kinds.len()),
        ("Valid", valid.len()),
    ] {
        if found != count {
            return Err(ReseauError::LengthMismatch {
                keyword,
                expected: count,
                found,
            });
        }
    }

    (0..count)
        .map(|i| {
            Ok(Reseau {
                line: lines.as_f64(i)?,
                sample: samples.as_f64(i)?,
                kind: kinds.as_i32(i)?,
                valid: valid.as_i32(i)? == 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::test_util::reseau_label;

    #[test]
    fn test_status_round_trip() {
        let mut label = reseau_label("APOLLO 15", "METRIC", "Refined", &[]);
        assert_eq!(reseau_status(&label).unwrap(), ReseauStatus::Refined);
        set_reseau_status(&mut label, ReseauStatus::Removed).unwrap();
        assert_eq!(reseau_status(&label).unwrap(), ReseauStatus::Removed);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("NOMINAL".parse::<ReseauStatus>(), Ok(ReseauStatus::Nominal));
        assert_eq!("Located".parse::<ReseauStatus>(), Ok(ReseauStatus::Refined));
        assert_eq!(
            "Smudged".parse::<ReseauStatus>(),
            Err(ReseauError::UnknownStatus("Smudged".to_string()))
        );
    }

    #[test]
    fn test_read_reseaus() {
        let label = reseau_label(
            "APOLLO 15",
            "METRIC",
            "Refined",
            &[(100.4, 200.6, 1), (300.0, 400.0, 0)],
        );
        let reseaus = read_reseaus(&label).unwrap();
        assert_eq!(reseaus.len(), 2);
        assert_eq!(reseaus[0].line, 100.4);
        assert_eq!(reseaus[0].sample, 200.6);
        assert!(reseaus[0].valid);
        assert!(!reseaus[1].valid);
        assert_eq!(reseaus[1].kind, 5);
    }

    #[test]
    fn test_window_base_rounds_center() {
        let reseau = Reseau {
            line: 100.4,
            sample: 200.6,
            kind: 5,
            valid: true,
        };
        assert_eq!(reseau.window_base(5), (199, 98));
        assert_eq!(reseau.window_base(403), (0, -101));
    }

    #[test]
    fn test_length_mismatch() {
        let mut label = reseau_label("APOLLO 15", "METRIC", "Refined", &[(1.0, 1.0, 1)]);
        let group = label.find_group_mut(RESEAU_GROUP).unwrap();
        group.add_keyword(PvlKeyword::with_values("Valid", [1, 1]));
        assert_eq!(
            read_reseaus(&label),
            Err(ReseauError::LengthMismatch {
                keyword: "Valid",
                expected: 1,
                found: 2
            })
        );
    }
}
