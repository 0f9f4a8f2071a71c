//! Input bounds shared by every formula.
//!
//! All intensity/RPE/rep checks live here and are applied once at the public
//! entry points of `fatigue`, `zones` and `planner`.

use crate::{Error, Result};

/// Highest intensity a caller may clamp to before hitting the Hanley pole at 100%.
pub const MAX_INTENSITY_PERCENT: f64 = 99.0;

/// Exclusive upper bound of a valid intensity (% of 1RM).
pub const INTENSITY_UPPER_BOUND: f64 = 100.0;

/// RPE scale bounds.
pub const MIN_RPE: f64 = 1.0;
pub const MAX_RPE: f64 = 10.0;

/// Largest practical reps-per-set when dividing a rep target into sets.
pub const MAX_REPS_PER_SET: u32 = 20;

/// Most sets one logged exercise entry may expand to when importing history.
pub const MAX_SETS_PER_EXERCISE: u32 = 100;

/// Widest rep range a reference table may span.
pub const MAX_REFERENCE_REPS: u32 = 100;

/// Accept `0 <= intensity < 100`.
pub fn check_intensity(intensity_percent: f64) -> Result<f64> {
    if !intensity_percent.is_finite()
        || intensity_percent < 0.0
        || intensity_percent >= INTENSITY_UPPER_BOUND
    {
        return Err(Error::InvalidIntensity(intensity_percent));
    }
    Ok(intensity_percent)
}

/// Accept `0 < intensity < 100`, for formulas that divide by intensity.
pub fn check_working_intensity(intensity_percent: f64) -> Result<f64> {
    let intensity = check_intensity(intensity_percent)?;
    if intensity == 0.0 {
        return Err(Error::InvalidIntensity(intensity));
    }
    Ok(intensity)
}

/// Clamp an intensity into `[0, 99]` for callers that prefer clamping to rejection.
///
/// NaN is still rejected.
pub fn clamp_intensity(intensity_percent: f64) -> Result<f64> {
    if intensity_percent.is_nan() {
        return Err(Error::InvalidIntensity(intensity_percent));
    }
    Ok(intensity_percent.clamp(0.0, MAX_INTENSITY_PERCENT))
}

/// Clamp RPE into `[1, 10]`.
pub fn clamp_rpe(rpe: f64) -> Result<f64> {
    if !rpe.is_finite() {
        return Err(Error::InvalidRpe(rpe));
    }
    Ok(rpe.clamp(MIN_RPE, MAX_RPE))
}

/// Reject non-finite or negative scores.
pub fn check_score(score: f64) -> Result<f64> {
    if !score.is_finite() || score < 0.0 {
        return Err(Error::InvalidScore(score));
    }
    Ok(score)
}
