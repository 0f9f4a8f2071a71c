//! Readiness signals and accumulated fatigue.
//!
//! The training context is supplied by another system as a JSON snapshot.
//! A missing or unreadable snapshot is not an error: the engine simply runs
//! without readiness signals.

use crate::{Result, SavedWorkout, TrainingContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Accumulated fatigue, lightest first
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    Fresh,
    Normal,
    Elevated,
    High,
}

impl FatigueLevel {
    /// Share of the planned session volume to keep
    pub fn volume_multiplier(&self) -> f64 {
        match self {
            FatigueLevel::Fresh => 1.0,
            FatigueLevel::Normal => 0.9,
            FatigueLevel::Elevated => 0.75,
            FatigueLevel::High => 0.6,
        }
    }
}

impl fmt::Display for FatigueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatigueLevel::Fresh => write!(f, "fresh"),
            FatigueLevel::Normal => write!(f, "normal"),
            FatigueLevel::Elevated => write!(f, "elevated"),
            FatigueLevel::High => write!(f, "high"),
        }
    }
}

/// Fatigue assessment with the signal that decided it
#[derive(Clone, Debug, PartialEq)]
pub struct FatigueAssessment {
    pub level: FatigueLevel,
    /// Human-readable reason, empty when no signal stood out
    pub driver: String,
}

/// Mean logged RPE over completed sets, ignoring sets without RPE
pub fn mean_rpe(workouts: &[&SavedWorkout]) -> Option<f64> {
    let rpes: Vec<f64> = workouts
        .iter()
        .flat_map(|w| w.exercises.iter())
        .flat_map(|e| e.sets.iter())
        .filter(|s| s.completed)
        .filter_map(|s| s.rpe)
        .filter(|rpe| rpe.is_finite())
        .collect();

    if rpes.is_empty() {
        None
    } else {
        Some(rpes.iter().sum::<f64>() / rpes.len() as f64)
    }
}

/// Combine readiness signals and recent effort into one fatigue level
///
/// The worst signal wins. `Fresh` requires readiness of 8 or more with no
/// other signal elevated; otherwise the baseline is `Normal`. Non-finite
/// signal values are ignored.
pub fn assess(context: Option<&TrainingContext>, recent: &[&SavedWorkout]) -> FatigueAssessment {
    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
    let readiness = context.and_then(|c| finite(c.readiness));
    let soreness = context.and_then(|c| finite(c.soreness));
    let sleep = context.and_then(|c| finite(c.sleep_hours));

    let mut signals: Vec<(FatigueLevel, String)> = Vec::new();

    if let Some(r) = readiness {
        if r < 4.0 {
            signals.push((FatigueLevel::High, format!("low readiness ({:.1}/10)", r)));
        } else if r < 6.0 {
            signals.push((FatigueLevel::Elevated, format!("reduced readiness ({:.1}/10)", r)));
        }
    }
    if let Some(s) = soreness {
        if s >= 8.0 {
            signals.push((FatigueLevel::High, format!("severe soreness ({:.1}/10)", s)));
        } else if s >= 6.0 {
            signals.push((FatigueLevel::Elevated, format!("notable soreness ({:.1}/10)", s)));
        }
    }
    if let Some(h) = sleep {
        if h < 5.0 {
            signals.push((FatigueLevel::High, format!("short sleep ({:.1}h)", h)));
        } else if h < 6.5 {
            signals.push((FatigueLevel::Elevated, format!("limited sleep ({:.1}h)", h)));
        }
    }
    if let Some(rpe) = mean_rpe(recent) {
        if rpe >= 9.0 {
            signals.push((FatigueLevel::High, format!("near-maximal recent effort (mean RPE {:.1})", rpe)));
        } else if rpe >= 8.5 {
            signals.push((FatigueLevel::Elevated, format!("hard recent effort (mean RPE {:.1})", rpe)));
        }
    }

    // First signal at the worst level decides, keeping the order above stable
    let worst = signals.iter().map(|(level, _)| *level).max();
    if let Some(level) = worst {
        let driver = signals
            .into_iter()
            .find(|(l, _)| *l == level)
            .map(|(_, reason)| reason)
            .unwrap_or_default();
        tracing::debug!("Fatigue assessed as {} ({})", level, driver);
        return FatigueAssessment { level, driver };
    }

    let level = if readiness.is_some_and(|r| r >= 8.0) {
        FatigueLevel::Fresh
    } else {
        FatigueLevel::Normal
    };
    tracing::debug!("Fatigue assessed as {}", level);
    FatigueAssessment {
        level,
        driver: String::new(),
    }
}

/// Load a training context snapshot from a JSON file
///
/// Returns None if the file doesn't exist or cannot be parsed.
pub fn load_context(path: &Path) -> Result<Option<TrainingContext>> {
    if !path.exists() {
        tracing::debug!("No training context file found at {:?}", path);
        return Ok(None);
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(
                "Failed to read training context at {:?}: {}. Ignoring context.",
                path,
                e
            );
            return Ok(None);
        }
    };

    match serde_json::from_str::<TrainingContext>(&contents) {
        Ok(context) => {
            tracing::info!("Loaded training context from {:?}", path);
            Ok(Some(context))
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse training context at {:?}: {}. Ignoring context.",
                path,
                e
            );
            Ok(None)
        }
    }
}
