use crate::error::{Result, StratumError};
use crate::options::validate_increment;

/// Number of strike lines that fit strictly between elevations `z0` and `z1` when lines are spaced by `increment`.
///
/// Computed as `floor((z1 - z0) / increment) - 1`. The result can be zero or negative when the two levels are closer
/// than two increments; callers treat such values as "no lines to synthesize".
pub fn isopoint_count(z0: f64, z1: f64, increment: f64) -> Result<i64> {
    validate_increment(increment)?;
    if !(z0 < z1) {
        return Err(StratumError::invalid_input(format!(
            "lower elevation {z0} must be below upper elevation {z1}"
        )));
    }

    Ok(((z1 - z0) / increment).floor() as i64 - 1)
}
