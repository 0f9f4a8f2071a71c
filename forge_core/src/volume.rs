//! Weekly volume aggregation per muscle group.
//!
//! Completed sets count fully toward an exercise's primary muscles and at
//! half weight toward its secondary muscles.

use crate::catalog::lookup_muscles;
use crate::{LoggedExercise, MuscleGroup, SavedWorkout, VolumeStatus, VolumeStatusKind};
use std::collections::BTreeMap;

/// Weight of a set toward a secondary muscle.
pub const SECONDARY_SET_WEIGHT: f64 = 0.5;

/// Share of target at which a muscle group counts as on track.
pub const ON_TRACK_RATIO: f64 = 0.7;

/// Primary and secondary muscles for a logged exercise
///
/// Uses the muscles recorded with the exercise when present, otherwise the
/// built-in catalog. A muscle listed as both counts as primary.
fn muscles_for(exercise: &LoggedExercise) -> (Vec<MuscleGroup>, Vec<MuscleGroup>) {
    let (primary, secondary) =
        if exercise.primary_muscles.is_empty() && exercise.secondary_muscles.is_empty() {
            match lookup_muscles(&exercise.name) {
                Some(m) => (m.primary.clone(), m.secondary.clone()),
                None => {
                    tracing::debug!("No muscle mapping for exercise {:?}", exercise.name);
                    (Vec::new(), Vec::new())
                }
            }
        } else {
            (exercise.primary_muscles.clone(), exercise.secondary_muscles.clone())
        };

    let mut primary_dedup = primary;
    primary_dedup.sort();
    primary_dedup.dedup();

    let mut secondary_dedup: Vec<_> = secondary
        .into_iter()
        .filter(|m| !primary_dedup.contains(m))
        .collect();
    secondary_dedup.sort();
    secondary_dedup.dedup();

    (primary_dedup, secondary_dedup)
}

/// Weighted set count per muscle group across `workouts`
pub fn weekly_sets(workouts: &[&SavedWorkout]) -> BTreeMap<MuscleGroup, f64> {
    let mut totals: BTreeMap<MuscleGroup, f64> = BTreeMap::new();

    for exercise in workouts.iter().flat_map(|w| w.exercises.iter()) {
        let sets = exercise.completed_sets() as f64;
        if sets == 0.0 {
            continue;
        }
        let (primary, secondary) = muscles_for(exercise);
        for muscle in primary {
            *totals.entry(muscle).or_insert(0.0) += sets;
        }
        for muscle in secondary {
            *totals.entry(muscle).or_insert(0.0) += sets * SECONDARY_SET_WEIGHT;
        }
    }

    totals
}

/// `over` at or above target, `on-track` at 70% or more, otherwise `under`
pub fn classify_volume(current: f64, target: u32) -> VolumeStatusKind {
    let target = target as f64;
    if current >= target {
        VolumeStatusKind::Over
    } else if current >= ON_TRACK_RATIO * target {
        VolumeStatusKind::OnTrack
    } else {
        VolumeStatusKind::Under
    }
}

/// Status for every muscle group that has a target
///
/// Negative targets are treated as zero; validate the config first to reject them.
pub fn volume_status(
    current: &BTreeMap<MuscleGroup, f64>,
    targets: &BTreeMap<MuscleGroup, i32>,
) -> BTreeMap<MuscleGroup, VolumeStatus> {
    targets
        .iter()
        .map(|(muscle, target)| {
            let target = (*target).max(0) as u32;
            let sets = current.get(muscle).copied().unwrap_or(0.0);
            (
                *muscle,
                VolumeStatus {
                    current: sets,
                    target,
                    status: classify_volume(sets, target),
                },
            )
        })
        .collect()
}
