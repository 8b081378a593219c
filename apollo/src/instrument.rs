//! Apollo spacecraft and film camera identity.
//!
//! Scanned Apollo frames carry `SpacecraftName` and `InstrumentId` in their
//! `Instrument` label group. The pair determines which reseau window applies
//! and which NAIF frame the camera was mounted in.

use std::fmt;
use thiserror::Error;

use shared::{Cube, PvlError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApolloError {
    #[error("This application is for use with Apollo spacecraft only, found [{0}]")]
    NotApollo(String),
    #[error("Unknown Apollo spacecraft [{0}]")]
    UnknownSpacecraft(String),
    #[error("Unknown Apollo instrument [{0}]")]
    UnknownInstrument(String),
    #[error(transparent)]
    Label(#[from] PvlError),
}

/// Apollo missions that flew the Scientific Instrument Module cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mission {
    Apollo15,
    Apollo16,
    Apollo17,
}

/// Film cameras whose frames are scanned into cubes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Camera {
    /// Fairchild mapping camera, square frames with a reseau grid
    Metric,
    /// Itek optical bar camera, long strips without reseaus
    Panoramic,
    /// Handheld Hasselblad 500 EL with a reseau plate
    Hasselblad,
}

/// Identity of one Apollo camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Apollo {
    pub mission: Mission,
    pub camera: Camera,
}

impl Apollo {
    /// Identify a camera from label values; matching is case-insensitive.
    pub fn new(spacecraft: &str, instrument: &str) -> Result<Self, ApolloError> {
        let spacecraft_upper = spacecraft.trim().to_ascii_uppercase();
        if !spacecraft_upper.starts_with("APOLLO") {
            return Err(ApolloError::NotApollo(spacecraft.to_string()));
        }

        let mission = match spacecraft_upper.as_str() {
            "APOLLO 15" | "APOLLO_15" | "APOLLO15" => Mission::Apollo15,
            "APOLLO 16" | "APOLLO_16" | "APOLLO16" => Mission::Apollo16,
            "APOLLO 17" | "APOLLO_17" | "APOLLO17" => Mission::Apollo17,
            _ => return Err(ApolloError::UnknownSpacecraft(spacecraft.to_string())),
        };

        let camera = match instrument.trim().to_ascii_uppercase().as_str() {
            "METRIC" => Camera::Metric,
            "PANORAMIC" => Camera::Panoramic,
            "HASSELBLAD" => Camera::Hasselblad,
            _ => return Err(ApolloError::UnknownInstrument(instrument.to_string())),
        };

        Ok(Self { mission, camera })
    }

    /// Identify the camera that produced `cube` from its `Instrument` group.
    pub fn from_cube(cube: &Cube) -> Result<Self, ApolloError> {
        let instrument = cube.label().find_group("Instrument")?;
        let spacecraft = instrument.find_keyword("SpacecraftName")?.as_str(0)?;
        let instrument_id = instrument.find_keyword("InstrumentId")?.as_str(0)?;
        Self::new(spacecraft, instrument_id)
    }

    /// Side length in pixels of the square window that covers one reseau mark.
    ///
    /// `None` for cameras without a reseau grid.
    pub fn reseau_dimension(&self) -> Option<usize> {
        match self.camera {
            Camera::Metric | Camera::Hasselblad => Some(403),
            Camera::Panoramic => None,
        }
    }

    pub fn spacecraft_name(&self) -> &'static str {
        match self.mission {
            Mission::Apollo15 => "APOLLO 15",
            Mission::Apollo16 => "APOLLO 16",
            Mission::Apollo17 => "APOLLO 17",
        }
    }

    pub fn instrument_id(&self) -> &'static str {
        match self.camera {
            Camera::Metric => "METRIC",
            Camera::Panoramic => "PANORAMIC",
            Camera::Hasselblad => "HASSELBLAD",
        }
    }

    /// NAIF frame code of the camera, when one is defined.
    pub fn naif_frame_code(&self) -> Option<i32> {
        let spacecraft = match self.mission {
            Mission::Apollo15 => -915,
            Mission::Apollo16 => -916,
            Mission::Apollo17 => -917,
        };
        match self.camera {
            Camera::Metric => Some(spacecraft * 1000 - 240),
            Camera::Panoramic => Some(spacecraft * 1000 - 230),
            Camera::Hasselblad => None,
        }
    }
}

impl fmt::Display for Apollo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.spacecraft_name(), self.instrument_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::test_util::{apollo_metric_cube, reseau_label};
    use shared::{ImageSize, PixelType};

    #[test]
    fn test_identify_metric_camera() {
        let apollo = Apollo::new("Apollo 16", "metric").unwrap();
        assert_eq!(apollo.mission, Mission::Apollo16);
        assert_eq!(apollo.camera, Camera::Metric);
        assert_eq!(apollo.reseau_dimension(), Some(403));
        assert_eq!(apollo.naif_frame_code(), Some(-916240));
        assert_eq!(apollo.to_string(), "APOLLO 16 METRIC");
    }

    #[test]
    fn test_panoramic_has_no_reseaus() {
        let apollo = Apollo::new("APOLLO 17", "PANORAMIC").unwrap();
        assert_eq!(apollo.reseau_dimension(), None);
        assert_eq!(apollo.naif_frame_code(), Some(-917230));
    }

    #[test]
    fn test_rejects_other_spacecraft() {
        assert_eq!(
            Apollo::new("VOYAGER 1", "METRIC"),
            Err(ApolloError::NotApollo("VOYAGER 1".to_string()))
        );
        assert_eq!(
            Apollo::new("APOLLO 11", "METRIC"),
            Err(ApolloError::UnknownSpacecraft("APOLLO 11".to_string()))
        );
        assert_eq!(
            Apollo::new("APOLLO 15", "NARROW ANGLE"),
            Err(ApolloError::UnknownInstrument("NARROW ANGLE".to_string()))
        );
    }

    #[test]
    fn test_from_cube() {
        let cube = apollo_metric_cube(ImageSize::single_band(4, 4), "Refined", &[]);
        let apollo = Apollo::from_cube(&cube).unwrap();
        assert_eq!(apollo.mission, Mission::Apollo15);

        let mut label = reseau_label("APOLLO 15", "METRIC", "Refined", &[]);
        label.groups.retain(|g| g.name != "Instrument");
        let cube = Cube::new(ImageSize::single_band(4, 4), PixelType::Real, label);
        assert!(matches!(
            Apollo::from_cube(&cube),
            Err(ApolloError::Label(PvlError::MissingGroup(_)))
        ));
    }
}
