//! Storage pixel types for cube cores.
//!
//! Pixels are always processed as `f64`, but a cube remembers the type its
//! data was stored as. Writing through a brick maps every value onto the set
//! the storage type can represent, which is what makes windows pixel-type
//! aware: an 8-bit cube never receives a fractional or out-of-range value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::special_pixel::{is_special, HIGH_REPR_SAT, LOW_REPR_SAT};

/// Storage type of a cube core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelType {
    /// 8-bit unsigned; 0 and 255 are reserved for sentinels
    UnsignedByte,
    /// 16-bit signed; the bottom of the range is reserved for sentinels
    SignedWord,
    /// 32-bit float
    Real,
    /// 64-bit float
    Double,
}

impl PixelType {
    /// Inclusive range of valid stored values.
    pub fn valid_range(&self) -> (f64, f64) {
        match self {
            PixelType::UnsignedByte => (1.0, 254.0),
            PixelType::SignedWord => (-32752.0, 32767.0),
            PixelType::Real => (f32::MIN as f64, f32::MAX as f64),
            PixelType::Double => (f64::MIN, f64::MAX),
        }
    }

    /// Map a processing value onto what this storage type can hold.
    ///
    /// Special pixels pass through unchanged. Integer types round to the
    /// nearest integer; values outside the valid range become low or high
    /// representation saturation.
    pub fn quantize(&self, value: f64) -> f64 {
        if is_special(value) {
            return value;
        }
        let (min, max) = self.valid_range();
        let value = match self {
            PixelType::UnsignedByte | PixelType::SignedWord => value.round(),
            PixelType::Real => value,
            PixelType::Double => return value,
        };
        if value < min {
            LOW_REPR_SAT
        } else if value > max {
            HIGH_REPR_SAT
        } else if *self == PixelType::Real {
            value as f32 as f64
        } else {
            value
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PixelType::UnsignedByte => "UnsignedByte",
            PixelType::SignedWord => "SignedWord",
            PixelType::Real => "Real",
            PixelType::Double => "Double",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PixelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unsignedbyte" => Ok(PixelType::UnsignedByte),
            "signedword" => Ok(PixelType::SignedWord),
            "real" => Ok(PixelType::Real),
            "double" => Ok(PixelType::Double),
            other => Err(format!("Unknown pixel type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special_pixel::{is_high, is_low, is_null, NULL};

    #[test]
    fn test_unsigned_byte_rounds_and_saturates() {
        let ty = PixelType::UnsignedByte;
        assert_eq!(ty.quantize(12.4), 12.0);
        assert_eq!(ty.quantize(12.6), 13.0);
        assert!(is_low(ty.quantize(0.0)));
        assert!(is_high(ty.quantize(255.0)));
        assert!(is_null(ty.quantize(NULL)));
    }

    #[test]
    fn test_signed_word_range() {
        let ty = PixelType::SignedWord;
        assert_eq!(ty.quantize(-32752.0), -32752.0);
        assert!(is_low(ty.quantize(-32760.0)));
        assert_eq!(ty.quantize(32767.0), 32767.0);
    }

    #[test]
    fn test_real_narrows_to_f32() {
        let ty = PixelType::Real;
        let stored = ty.quantize(0.1);
        assert_eq!(stored, 0.1f32 as f64);
        assert!(is_high(ty.quantize(1.0e39)));
    }

    #[test]
    fn test_double_is_identity() {
        assert_eq!(PixelType::Double.quantize(0.1), 0.1);
    }

    #[test]
    fn test_parse_round_trip() {
        for ty in [
            PixelType::UnsignedByte,
            PixelType::SignedWord,
            PixelType::Real,
            PixelType::Double,
        ] {
            assert_eq!(ty.to_string().parse::<PixelType>().unwrap(), ty);
        }
        assert!("complex".parse::<PixelType>().is_err());
    }
}
