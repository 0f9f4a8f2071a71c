//! Core domain types for the Forge optimizer.
//!
//! This module defines the fundamental types used throughout the system:
//! - Muscle groups and set prescriptions
//! - Optimizer configuration
//! - Workout history and readiness context (read-only inputs)
//! - The recommendation produced by the engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{limits, Error, Result};

// ============================================================================
// Muscle Groups
// ============================================================================

/// Muscle groups tracked for weekly volume
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Abs,
    Traps,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 12] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Forearms,
        MuscleGroup::Quads,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Calves,
        MuscleGroup::Abs,
        MuscleGroup::Traps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Forearms => "forearms",
            MuscleGroup::Quads => "quads",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Abs => "abs",
            MuscleGroup::Traps => "traps",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "chest" | "pecs" => Ok(MuscleGroup::Chest),
            "back" | "lats" => Ok(MuscleGroup::Back),
            "shoulders" | "delts" => Ok(MuscleGroup::Shoulders),
            "biceps" => Ok(MuscleGroup::Biceps),
            "triceps" => Ok(MuscleGroup::Triceps),
            "forearms" => Ok(MuscleGroup::Forearms),
            "quads" | "quadriceps" => Ok(MuscleGroup::Quads),
            "hamstrings" => Ok(MuscleGroup::Hamstrings),
            "glutes" => Ok(MuscleGroup::Glutes),
            "calves" => Ok(MuscleGroup::Calves),
            "abs" | "core" => Ok(MuscleGroup::Abs),
            "traps" => Ok(MuscleGroup::Traps),
            other => Err(Error::Other(format!("Unknown muscle group: {}", other))),
        }
    }
}

// ============================================================================
// Set Prescription
// ============================================================================

/// One exercise's assigned work
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetPrescription {
    pub reps: u32,
    pub sets: u32,
    pub intensity_percent: f64,
    pub rest_seconds: u32,
}

impl SetPrescription {
    /// Build a validated prescription (`reps >= 1`, `sets >= 1`, `0 < intensity < 100`)
    pub fn new(reps: u32, sets: u32, intensity_percent: f64, rest_seconds: u32) -> Result<Self> {
        if reps == 0 || sets == 0 {
            return Err(Error::InvalidReps(format!(
                "prescription needs at least 1 rep and 1 set, got {}x{}",
                sets, reps
            )));
        }
        let intensity_percent = limits::check_working_intensity(intensity_percent)?;
        Ok(Self {
            reps,
            sets,
            intensity_percent,
            rest_seconds,
        })
    }
}

// ============================================================================
// Optimizer Configuration
// ============================================================================

/// Preferred rep range for generated sessions
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepRangePreference {
    #[default]
    Auto,
    Low,
    Moderate,
    High,
}

/// Periodization phase supplied by the training context
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    Accumulation,
    Intensification,
    Realization,
    Deload,
}

impl fmt::Display for TrainingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingPhase::Accumulation => write!(f, "accumulation"),
            TrainingPhase::Intensification => write!(f, "intensification"),
            TrainingPhase::Realization => write!(f, "realization"),
            TrainingPhase::Deload => write!(f, "deload"),
        }
    }
}

/// Athlete-level optimizer settings
///
/// Integer fields are signed so that a negative value read from a config
/// file reaches `validate()` and is reported instead of failing to parse.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OptimizerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_max_sets_per_session")]
    pub max_sets_per_session: i32,

    #[serde(default)]
    pub rep_range_preference: RepRangePreference,

    #[serde(default = "default_auto_deload")]
    pub auto_deload: bool,

    #[serde(default = "default_deload_frequency_weeks")]
    pub deload_frequency_weeks: i32,

    #[serde(default = "default_targets", with = "muscle_targets")]
    pub target_sets_per_muscle_group: BTreeMap<MuscleGroup, i32>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_sets_per_session: default_max_sets_per_session(),
            rep_range_preference: RepRangePreference::default(),
            auto_deload: default_auto_deload(),
            deload_frequency_weeks: default_deload_frequency_weeks(),
            target_sets_per_muscle_group: default_targets(),
        }
    }
}

impl OptimizerConfig {
    /// Check the fields the engine cannot degrade around
    pub fn validate(&self) -> Result<()> {
        if self.max_sets_per_session < 0 {
            return Err(Error::Config(format!(
                "max_sets_per_session must not be negative (got {})",
                self.max_sets_per_session
            )));
        }
        if self.deload_frequency_weeks < 0 {
            return Err(Error::Config(format!(
                "deload_frequency_weeks must not be negative (got {})",
                self.deload_frequency_weeks
            )));
        }
        if let Some((muscle, target)) = self
            .target_sets_per_muscle_group
            .iter()
            .find(|(_, target)| **target < 0)
        {
            return Err(Error::Config(format!(
                "target sets for {} must not be negative (got {})",
                muscle, target
            )));
        }
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_sets_per_session() -> i32 {
    20
}

fn default_auto_deload() -> bool {
    true
}

fn default_deload_frequency_weeks() -> i32 {
    5
}

fn default_targets() -> BTreeMap<MuscleGroup, i32> {
    use MuscleGroup::*;
    [
        (Chest, 10),
        (Back, 10),
        (Shoulders, 10),
        (Quads, 10),
        (Hamstrings, 10),
        (Glutes, 10),
        (Biceps, 6),
        (Triceps, 6),
        (Calves, 6),
        (Abs, 6),
    ]
    .into_iter()
    .collect()
}

/// String-keyed (de)serialization for the per-muscle target table.
mod muscle_targets {
    use super::MuscleGroup;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<MuscleGroup, i32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        map.iter()
            .map(|(muscle, target)| (muscle.as_str(), *target))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<MuscleGroup, i32>, D::Error> {
        let raw = BTreeMap::<String, i32>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, target)| {
                key.parse::<MuscleGroup>()
                    .map(|muscle| (muscle, target))
                    .map_err(de::Error::custom)
            })
            .collect()
    }
}

// ============================================================================
// Workout History (read-only input)
// ============================================================================

/// A single logged set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggedSet {
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub rpe: Option<f64>,
    #[serde(default)]
    pub intensity_percent: Option<f64>,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

/// An exercise within a saved workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggedExercise {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub primary_muscles: Vec<MuscleGroup>,
    #[serde(default)]
    pub secondary_muscles: Vec<MuscleGroup>,
    #[serde(default)]
    pub sets: Vec<LoggedSet>,
}

impl LoggedExercise {
    /// Number of sets actually completed
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }

    /// Total weight moved over completed sets
    pub fn tonnage(&self) -> f64 {
        self.sets
            .iter()
            .filter(|s| s.completed)
            .map(|s| crate::fatigue::tonnage(1, s.reps, s.weight))
            .sum()
    }
}

/// A recorded workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedWorkout {
    #[serde(default)]
    pub id: Uuid,
    pub performed_at: DateTime<Utc>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exercises: Vec<LoggedExercise>,
}

/// Saved workouts, in any order
pub type WorkoutHistory = Vec<SavedWorkout>;

// ============================================================================
// Training Context (read-only input)
// ============================================================================

/// Readiness and periodization signals for the upcoming session
///
/// Every field is optional; absent signals are simply not considered.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct TrainingContext {
    /// Reference time for the trailing history window
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub phase: Option<TrainingPhase>,
    #[serde(default)]
    pub weeks_since_deload: Option<u32>,
    /// Self-reported readiness, 1 (wrecked) to 10 (fresh)
    #[serde(default)]
    pub readiness: Option<f64>,
    /// Self-reported soreness, 1 (none) to 10 (severe)
    #[serde(default)]
    pub soreness: Option<f64>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
}

// ============================================================================
// Recommendation (output)
// ============================================================================

/// Closed numeric interval, `min <= max`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Build an interval, swapping the ends if given out of order
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }
}

/// Direction to move a muscle group's volume
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Increase,
    Decrease,
    Maintain,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Increase => write!(f, "increase"),
            Priority::Decrease => write!(f, "decrease"),
            Priority::Maintain => write!(f, "maintain"),
        }
    }
}

/// Weekly volume compared against target
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeStatusKind {
    Over,
    OnTrack,
    Under,
}

impl fmt::Display for VolumeStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeStatusKind::Over => write!(f, "over"),
            VolumeStatusKind::OnTrack => write!(f, "on-track"),
            VolumeStatusKind::Under => write!(f, "under"),
        }
    }
}

/// Weekly set count for one muscle group
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct VolumeStatus {
    pub current: f64,
    pub target: u32,
    pub status: VolumeStatusKind,
}

/// Session prescription produced by the engine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub session_volume: u32,
    pub rep_scheme: String,
    pub intensity_range: Interval<f64>,
    pub rest_range: Interval<u32>,
    pub exercise_count: Interval<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_focus: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub muscle_group_priorities: BTreeMap<MuscleGroup, Priority>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weekly_volume_status: BTreeMap<MuscleGroup, VolumeStatus>,
    pub rationale: String,
}

/// Result of a recommendation request
///
/// `Disabled` is the explicit "optimizer switched off" answer and is never
/// confused with a computed recommendation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Disabled,
    Recommended(Recommendation),
}

impl RecommendationOutcome {
    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            RecommendationOutcome::Recommended(rec) => Some(rec),
            RecommendationOutcome::Disabled => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, RecommendationOutcome::Disabled)
    }
}
