//! Special pixel sentinels for double precision cube data.
//!
//! Cube cores are held in memory as `f64`. Five values at the very bottom of
//! the double range are reserved to mark pixels that carry no measurement:
//!
//! | name             | meaning                                  |
//! |------------------|------------------------------------------|
//! | `NULL`           | no data was recorded                     |
//! | `LOW_REPR_SAT`   | below the range the pixel type can store |
//! | `LOW_INSTR_SAT`  | instrument saturated low                 |
//! | `HIGH_INSTR_SAT` | instrument saturated high                |
//! | `HIGH_REPR_SAT`  | above the range the pixel type can store |
//!
//! Every value strictly below [`VALID_MIN`] is special. NaN is treated as
//! special as well so it can never leak into a computation as valid data.

/// Smallest valid double value; anything below it is a special pixel.
pub const VALID_MIN: f64 = f64::from_bits(0xFFEF_FFFF_FFFF_FFFA);

/// Missing data.
pub const NULL: f64 = f64::from_bits(0xFFEF_FFFF_FFFF_FFFB);

/// Low representation saturation.
pub const LOW_REPR_SAT: f64 = f64::from_bits(0xFFEF_FFFF_FFFF_FFFC);

/// Low instrument saturation.
pub const LOW_INSTR_SAT: f64 = f64::from_bits(0xFFEF_FFFF_FFFF_FFFD);

/// High instrument saturation.
pub const HIGH_INSTR_SAT: f64 = f64::from_bits(0xFFEF_FFFF_FFFF_FFFE);

/// High representation saturation.
pub const HIGH_REPR_SAT: f64 = f64::from_bits(0xFFEF_FFFF_FFFF_FFFF);

/// Returns true if `value` is any special pixel (or NaN).
pub fn is_special(value: f64) -> bool {
    value.is_nan() || value < VALID_MIN
}

/// Returns true if `value` is a measurement rather than a sentinel.
pub fn is_valid(value: f64) -> bool {
    !is_special(value)
}

/// Returns true if `value` is exactly the Null sentinel.
pub fn is_null(value: f64) -> bool {
    value.to_bits() == NULL.to_bits()
}

/// Returns true for either saturation on the low side.
pub fn is_low(value: f64) -> bool {
    let bits = value.to_bits();
    bits == LOW_REPR_SAT.to_bits() || bits == LOW_INSTR_SAT.to_bits()
}

/// Returns true for either saturation on the high side.
pub fn is_high(value: f64) -> bool {
    let bits = value.to_bits();
    bits == HIGH_REPR_SAT.to_bits() || bits == HIGH_INSTR_SAT.to_bits()
}

/// Short display name for a special pixel, or `None` for a valid value.
pub fn special_name(value: f64) -> Option<&'static str> {
    if !is_special(value) {
        return None;
    }
    let bits = value.to_bits();
    let name = if bits == NULL.to_bits() {
        "Null"
    } else if bits == LOW_REPR_SAT.to_bits() {
        "Lrs"
    } else if bits == LOW_INSTR_SAT.to_bits() {
        "Lis"
    } else if bits == HIGH_INSTR_SAT.to_bits() {
        "His"
    } else if bits == HIGH_REPR_SAT.to_bits() {
        "Hrs"
    } else {
        "Invalid"
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_special() {
        for value in [NULL, LOW_REPR_SAT, LOW_INSTR_SAT, HIGH_INSTR_SAT, HIGH_REPR_SAT] {
            assert!(is_special(value), "{value:e} should be special");
            assert!(!is_valid(value));
        }
        assert!(is_special(f64::NAN));
    }

    #[test]
    fn test_ordinary_values_are_valid() {
        for value in [0.0, -1.0, 1.0e300, -1.0e300, f64::MIN_POSITIVE, VALID_MIN] {
            assert!(is_valid(value), "{value:e} should be valid");
        }
    }

    #[test]
    fn test_classification() {
        assert!(is_null(NULL));
        assert!(!is_null(LOW_REPR_SAT));
        assert!(is_low(LOW_INSTR_SAT));
        assert!(is_high(HIGH_REPR_SAT));
        assert!(!is_high(NULL));
        assert_eq!(special_name(NULL), Some("Null"));
        assert_eq!(special_name(HIGH_INSTR_SAT), Some("His"));
        assert_eq!(special_name(42.0), None);
    }

    #[test]
    fn test_sentinels_survive_json() {
        let encoded = serde_json::to_string(&vec![NULL, HIGH_REPR_SAT]).unwrap();
        let decoded: Vec<f64> = serde_json::from_str(&encoded).unwrap();
        assert!(is_null(decoded[0]));
        assert!(is_high(decoded[1]));
    }
}
