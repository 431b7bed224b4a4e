//! Numeric parsing for the int32 and float16 column classes.

use hrprep_model::f16;

/// Why a cell could not be narrowed to `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerIssue {
    /// Not a number at all.
    Invalid,
    /// A number with a fractional part (or not finite).
    NonIntegral,
    /// Integral but outside the `i32` range.
    Overflow,
}

/// Parse a cell as a 32-bit signed integer.
///
/// Float text with a zero fractional part (`"36.0"`) is accepted, since
/// integer columns are often written out through a float type.
pub fn parse_i32(value: &str) -> Result<i32, IntegerIssue> {
    let trimmed = value.trim();

    if let Ok(wide) = trimmed.parse::<i64>() {
        return i32::try_from(wide).map_err(|_| IntegerIssue::Overflow);
    }

    let float = trimmed
        .parse::<f64>()
        .map_err(|_| IntegerIssue::Invalid)?;
    if !float.is_finite() || float.fract() != 0.0 {
        return Err(IntegerIssue::NonIntegral);
    }
    if float < f64::from(i32::MIN) || float > f64::from(i32::MAX) {
        return Err(IntegerIssue::Overflow);
    }
    // Range-checked and integral above.
    Ok(float as i32)
}

/// Parse a cell and round it to the nearest 16-bit float.
pub fn parse_f16(value: &str) -> Option<f16> {
    value.trim().parse::<f64>().ok().map(f16::from_f64)
}
