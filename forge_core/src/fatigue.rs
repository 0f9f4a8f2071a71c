//! Fatigue cost models.
//!
//! Two independent scores exist for the same workload and are never mixed:
//! - **Hanley** volume-fatigue: `reps × (100 / (100 − intensity))²`
//! - **Frederick** metabolic stress: per-set exponential accumulation using
//!   reps in reserve
//!
//! Also home to the peak-force drop-off heuristic used to cap strength sets,
//! and to tonnage, which is unrelated to either fatigue score.
//!
//! The calibration constants below (0.215, 0.35, 0.30, 0.7) are empirical and
//! kept exactly for behavioral compatibility.

use crate::limits::{check_intensity, check_score, check_working_intensity, clamp_rpe, MAX_RPE};
use crate::{Error, Result, SetPrescription};

/// Frederick decay per rep in reserve.
pub const FREDERICK_DECAY: f64 = 0.215;

/// Effective-RPE increase per additional set within a session.
pub const RPE_DRIFT_PER_SET: f64 = 0.35;

/// Reps-to-failure scale used by the peak-force heuristic.
const MAX_REPS_SCALE: f64 = 30.0;

/// Quality ratio curve: `BASE + SPAN × ((PIVOT − i) / 30)^EXPONENT`.
const QUALITY_BASE: f64 = 0.30;
const QUALITY_SPAN: f64 = 0.30;
const QUALITY_PIVOT: f64 = 90.0;
const QUALITY_EXPONENT: f64 = 0.7;

// ============================================================================
// Hanley
// ============================================================================

/// `(100 / (100 − intensity))²`, the per-rep Hanley cost at an intensity.
fn hanley_factor(intensity_percent: f64) -> f64 {
    let ratio = 100.0 / (100.0 - intensity_percent);
    ratio * ratio
}

/// Hanley fatigue score for one set.
///
/// Requires `0 <= intensity < 100`; clamp with [`crate::limits::clamp_intensity`]
/// first if the input may reach 100.
pub fn set_fatigue_score(reps: u32, intensity_percent: f64) -> Result<f64> {
    let intensity = check_intensity(intensity_percent)?;
    Ok(reps as f64 * hanley_factor(intensity))
}

/// Hanley fatigue score summed over every set of every prescription.
pub fn session_fatigue_score(prescriptions: &[SetPrescription]) -> Result<f64> {
    prescriptions.iter().try_fold(0.0, |total, p| {
        Ok(total + p.sets as f64 * set_fatigue_score(p.reps, p.intensity_percent)?)
    })
}

/// Inverse of [`set_fatigue_score`]: reps needed to reach `target_score`.
pub fn reverse_compute_reps(target_score: f64, intensity_percent: f64) -> Result<f64> {
    let target = check_score(target_score)?;
    let intensity = check_intensity(intensity_percent)?;
    Ok(target / hanley_factor(intensity))
}

// ============================================================================
// Frederick
// ============================================================================

/// Frederick metabolic load of one set.
///
/// `intensity × Σ_{k=1..reps} exp(−0.215 × (rir + reps − k))` with
/// `rir = 10 − rpe`. RPE is clamped into `[1, 10]`.
pub fn set_metabolic_load(intensity_percent: f64, reps: u32, rpe: f64) -> Result<f64> {
    let intensity = check_intensity(intensity_percent)?;
    let rpe = clamp_rpe(rpe)?;
    Ok(metabolic_load(intensity, reps, rpe))
}

fn metabolic_load(intensity: f64, reps: u32, rpe: f64) -> f64 {
    let rir = (MAX_RPE - rpe).max(0.0);
    let reps_f = reps as f64;
    let accumulated: f64 = (1..=reps)
        .map(|k| (-FREDERICK_DECAY * (rir + reps_f - k as f64)).exp())
        .sum();
    intensity * accumulated
}

/// Frederick load over `sets` identical sets at a constant RPE.
pub fn session_metabolic_load(intensity_percent: f64, reps: u32, sets: u32, rpe: f64) -> Result<f64> {
    let per_set = set_metabolic_load(intensity_percent, reps, rpe)?;
    Ok(per_set * sets as f64)
}

/// Frederick load over `sets` sets where set `s` (0-based) is performed at
/// `rpe + 0.35 × s`, capped at RPE 10.
///
/// This is a heuristic correction for within-session fatigue and is kept
/// apart from [`session_metabolic_load`] on purpose.
pub fn session_metabolic_load_with_drift(
    intensity_percent: f64,
    reps: u32,
    sets: u32,
    rpe: f64,
) -> Result<f64> {
    let intensity = check_intensity(intensity_percent)?;
    let base_rpe = clamp_rpe(rpe)?;
    Ok((0..sets)
        .map(|s| {
            let effective = (base_rpe + RPE_DRIFT_PER_SET * s as f64).min(MAX_RPE);
            metabolic_load(intensity, reps, effective)
        })
        .sum())
}

// ============================================================================
// Peak-force drop-off
// ============================================================================

/// Estimated reps to failure: `30 × (100 / intensity − 1)`.
pub fn estimate_max_reps(intensity_percent: f64) -> Result<f64> {
    let intensity = check_working_intensity(intensity_percent)?;
    Ok(MAX_REPS_SCALE * (100.0 / intensity - 1.0))
}

/// Share of the reps to failure that stay above 95% of first-rep force.
///
/// The curve base is clamped at zero above 90% so the power stays defined.
pub fn quality_ratio(intensity_percent: f64) -> Result<f64> {
    let intensity = check_working_intensity(intensity_percent)?;
    let base = ((QUALITY_PIVOT - intensity) / 30.0).max(0.0);
    Ok(QUALITY_BASE + QUALITY_SPAN * base.powf(QUALITY_EXPONENT))
}

/// Rep within a set where force output falls below 95% of the first rep.
///
/// Always at least 1. Calibration point: 75% → rep 5 of 10.
pub fn estimate_peak_force_drop_rep(intensity_percent: f64) -> Result<u32> {
    let max_reps = estimate_max_reps(intensity_percent)?;
    let ratio = quality_ratio(intensity_percent)?;
    let drop = (max_reps * ratio).round();
    if !drop.is_finite() {
        return Err(Error::InvalidIntensity(intensity_percent));
    }
    Ok((drop as u32).max(1))
}

// ============================================================================
// Tonnage
// ============================================================================

/// Mechanical work proxy: `sets × reps × weight`.
pub fn tonnage(sets: u32, reps: u32, weight: f64) -> f64 {
    sets as f64 * reps as f64 * weight
}
