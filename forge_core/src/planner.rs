//! Set division planning.
//!
//! Turns a rep target into sets × reps using two policies:
//! - Strength/power: cap each set at the peak-force drop-off rep
//! - Hypertrophy: search a small set-count table for practical reps per set
//!
//! Also provides reverse prescription: reps needed to land in a fatigue zone.

use serde::{Deserialize, Serialize};

use crate::fatigue::{estimate_peak_force_drop_rep, reverse_compute_reps, session_metabolic_load_with_drift};
use crate::limits::{check_intensity, check_working_intensity, clamp_rpe, MAX_REPS_PER_SET};
use crate::zones::{FatigueZone, ZONE_SEARCH_CAP};
use crate::{Error, Result, SetPrescription};

/// Set counts tried by the hypertrophy search.
pub const SET_COUNT_CANDIDATES: [u32; 6] = [3, 4, 5, 6, 8, 10];

/// Hypertrophy reps-per-set sweet spot.
pub const HYPERTROPHY_REP_BAND: (f64, f64) = (8.0, 12.0);

/// Most alternatives returned by [`hypertrophy_set_options`].
pub const MAX_SET_OPTIONS: usize = 3;

/// Rest between strength sets, long enough for full neural recovery.
pub const STRENGTH_REST_SECONDS: u32 = 240;

// ============================================================================
// Reverse prescription
// ============================================================================

/// Rep targets that place an exercise in a fatigue zone
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RepTarget {
    pub zone: FatigueZone,
    pub intensity_percent: f64,
    pub target_reps: u32,
    pub min_reps: u32,
    pub max_reps: u32,
}

/// Total reps at `intensity_percent` that land in `zone`.
///
/// `target_reps` solves for the zone's representative score; `min_reps` and
/// `max_reps` are the smallest and largest totals whose score stays inside
/// `[min, max)`. The top zone uses [`ZONE_SEARCH_CAP`] as its upper edge.
/// Every value is at least 1; when a zone is too narrow to hold an integer
/// rep count at this intensity, `max_reps` is widened to `min_reps`.
pub fn reverse_prescribe(intensity_percent: f64, zone: FatigueZone) -> Result<RepTarget> {
    let intensity = check_intensity(intensity_percent)?;
    let bounds = zone.bounds();
    let upper = bounds.max.unwrap_or(ZONE_SEARCH_CAP);

    let min_reps = to_reps(reverse_compute_reps(bounds.min, intensity)?.ceil());
    let max_reps = to_reps(reverse_compute_reps(upper, intensity)?.ceil() - 1.0).max(min_reps);
    let target_reps = to_reps(reverse_compute_reps(zone.target_score(), intensity)?.round())
        .clamp(min_reps, max_reps);

    tracing::debug!(
        "Reverse prescription for {} @ {}%: {} reps ({}-{})",
        zone,
        intensity,
        target_reps,
        min_reps,
        max_reps
    );

    Ok(RepTarget {
        zone,
        intensity_percent: intensity,
        target_reps,
        min_reps,
        max_reps,
    })
}

fn to_reps(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        1
    }
}

// ============================================================================
// Hypertrophy division
// ============================================================================

/// One way to split a rep total into sets
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetOption {
    pub sets: u32,
    pub reps_per_set: u32,
    /// `sets × reps_per_set`, which may differ from the requested total
    pub total_reps: u32,
    /// Whether the requested total divides evenly
    pub exact: bool,
    /// Frederick load with effective-RPE drift across sets
    pub metabolic_load: f64,
}

/// Candidate set/rep splits for a hypertrophy rep total, best first.
///
/// A set count is kept when it gives 1–20 reps per set. Candidates are
/// ranked by distance from the 8–12 rep band, then by how far the split is
/// from a whole number of reps, then by lower metabolic load, then by fewer
/// sets. At most [`MAX_SET_OPTIONS`] are returned; a zero total yields none.
pub fn hypertrophy_set_options(total_reps: u32, intensity_percent: f64, rpe: f64) -> Result<Vec<SetOption>> {
    let intensity = check_intensity(intensity_percent)?;
    let rpe = clamp_rpe(rpe)?;

    if total_reps == 0 {
        return Ok(Vec::new());
    }

    let mut ranked = Vec::new();
    for &sets in SET_COUNT_CANDIDATES.iter() {
        let exact_reps = total_reps as f64 / sets as f64;
        if !(1.0..=MAX_REPS_PER_SET as f64).contains(&exact_reps) {
            continue;
        }

        let reps_per_set = (exact_reps.round() as u32).max(1);
        let fraction = (exact_reps - reps_per_set as f64).abs();
        let (band_low, band_high) = HYPERTROPHY_REP_BAND;
        let band_distance = if exact_reps < band_low {
            band_low - exact_reps
        } else if exact_reps > band_high {
            exact_reps - band_high
        } else {
            0.0
        };

        let option = SetOption {
            sets,
            reps_per_set,
            total_reps: sets * reps_per_set,
            exact: total_reps % sets == 0,
            metabolic_load: session_metabolic_load_with_drift(intensity, reps_per_set, sets, rpe)?,
        };
        ranked.push((band_distance, fraction, option));
    }

    ranked.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then(a.1.total_cmp(&b.1))
            .then(a.2.metabolic_load.total_cmp(&b.2.metabolic_load))
            .then(a.2.sets.cmp(&b.2.sets))
    });

    Ok(ranked
        .into_iter()
        .take(MAX_SET_OPTIONS)
        .map(|(_, _, option)| option)
        .collect())
}

// ============================================================================
// Strength/power division
// ============================================================================

/// Strength-biased split of a rep total
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct StrengthPrescription {
    pub sets: u32,
    pub reps_per_set: u32,
    /// Reps actually prescribed: `sets × reps_per_set`
    pub quality_reps: u32,
    /// Reps originally requested
    pub target_reps: u32,
    /// `quality_reps − target_reps`; positive when the last set is rounded up
    pub rep_delta: i64,
    pub rest_seconds: u32,
    /// Peak-force drop-off rep used as the per-set cap
    pub drop_rep: u32,
}

impl StrengthPrescription {
    /// No-op prescription for a non-positive rep total
    pub fn empty() -> Self {
        Self {
            sets: 0,
            reps_per_set: 0,
            quality_reps: 0,
            target_reps: 0,
            rep_delta: 0,
            rest_seconds: 0,
            drop_rep: 0,
        }
    }

    /// True when there is nothing to perform; check before display
    pub fn is_empty(&self) -> bool {
        self.sets == 0
    }

    /// View as a [`SetPrescription`], or `None` when empty
    pub fn to_set_prescription(&self, intensity_percent: f64) -> Result<Option<SetPrescription>> {
        if self.is_empty() {
            return Ok(None);
        }
        SetPrescription::new(self.reps_per_set, self.sets, intensity_percent, self.rest_seconds).map(Some)
    }
}

/// Divide `total_reps` into full sets capped at the peak-force drop-off rep.
///
/// Every set is full, so `quality_reps` can exceed `total_reps`; the
/// difference is reported in `rep_delta` rather than trimmed from a set.
/// A total of zero or less returns [`StrengthPrescription::empty`].
pub fn prescribe_strength_sets(total_reps: i64, intensity_percent: f64) -> Result<StrengthPrescription> {
    let intensity = check_working_intensity(intensity_percent)?;

    if total_reps <= 0 {
        tracing::debug!("Strength division requested for {} reps, returning empty", total_reps);
        return Ok(StrengthPrescription::empty());
    }

    let target_reps = u32::try_from(total_reps)
        .map_err(|_| Error::InvalidReps(format!("rep total {} is too large", total_reps)))?;
    let drop_rep = estimate_peak_force_drop_rep(intensity)?;
    let reps_per_set = target_reps.min(drop_rep);
    let sets = target_reps.div_ceil(reps_per_set);
    let quality_reps = sets.checked_mul(reps_per_set).ok_or_else(|| {
        Error::InvalidReps(format!(
            "rep total {} rounds up past the largest prescribable total",
            total_reps
        ))
    })?;

    tracing::debug!(
        "Strength division: {} reps @ {}% -> {}x{} (drop rep {})",
        target_reps,
        intensity,
        sets,
        reps_per_set,
        drop_rep
    );

    Ok(StrengthPrescription {
        sets,
        reps_per_set,
        quality_reps,
        target_reps,
        rep_delta: quality_reps as i64 - target_reps as i64,
        rest_seconds: STRENGTH_REST_SECONDS,
        drop_rep,
    })
}
