//! Fatigue zone classification.
//!
//! Zones partition `[0, ∞)` into contiguous `[min, max)` ranges; the top zone
//! is unbounded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::limits::check_score;
use crate::{Error, Result};

/// Stand-in upper bound for the unbounded top zone when picking a target score.
pub const ZONE_SEARCH_CAP: f64 = 1000.0;

/// Named fatigue zone, ordered from lightest to heaviest
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FatigueZone {
    Light,
    Moderate,
    ModerateHigh,
    High,
    Extreme,
}

/// Score range of a zone; `max == None` means unbounded
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZoneBounds {
    pub min: f64,
    pub max: Option<f64>,
}

impl ZoneBounds {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && self.max.map_or(true, |max| score < max)
    }
}

/// Lower edge of every zone above `Light`, in order.
const THRESHOLDS: [(f64, FatigueZone); 4] = [
    (400.0, FatigueZone::Moderate),
    (500.0, FatigueZone::ModerateHigh),
    (600.0, FatigueZone::High),
    (700.0, FatigueZone::Extreme),
];

impl FatigueZone {
    pub const ALL: [FatigueZone; 5] = [
        FatigueZone::Light,
        FatigueZone::Moderate,
        FatigueZone::ModerateHigh,
        FatigueZone::High,
        FatigueZone::Extreme,
    ];

    /// `[min, max)` score range (`boundsOf`)
    pub fn bounds(&self) -> ZoneBounds {
        match self {
            FatigueZone::Light => ZoneBounds { min: 0.0, max: Some(400.0) },
            FatigueZone::Moderate => ZoneBounds { min: 400.0, max: Some(500.0) },
            FatigueZone::ModerateHigh => ZoneBounds { min: 500.0, max: Some(600.0) },
            FatigueZone::High => ZoneBounds { min: 600.0, max: Some(700.0) },
            FatigueZone::Extreme => ZoneBounds { min: 700.0, max: None },
        }
    }

    /// Representative score used when solving for reps: midpoint of the zone,
    /// with the top zone capped at [`ZONE_SEARCH_CAP`].
    pub fn target_score(&self) -> f64 {
        let bounds = self.bounds();
        let upper = bounds.max.unwrap_or(ZONE_SEARCH_CAP).min(ZONE_SEARCH_CAP);
        (bounds.min + upper) / 2.0
    }

    pub fn label(&self) -> &'static str {
        match self {
            FatigueZone::Light => "light",
            FatigueZone::Moderate => "moderate",
            FatigueZone::ModerateHigh => "moderate-high",
            FatigueZone::High => "high",
            FatigueZone::Extreme => "extreme",
        }
    }
}

impl fmt::Display for FatigueZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FatigueZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "light" => Ok(FatigueZone::Light),
            "moderate" => Ok(FatigueZone::Moderate),
            "moderate-high" => Ok(FatigueZone::ModerateHigh),
            "high" => Ok(FatigueZone::High),
            "extreme" => Ok(FatigueZone::Extreme),
            other => Err(Error::Other(format!("Unknown fatigue zone: {}", other))),
        }
    }
}

/// Zone containing `score`. Negative or non-finite scores are rejected.
pub fn classify_zone(score: f64) -> Result<FatigueZone> {
    let score = check_score(score)?;
    Ok(THRESHOLDS
        .iter()
        .rev()
        .find(|(edge, _)| score >= *edge)
        .map(|(_, zone)| *zone)
        .unwrap_or(FatigueZone::Light))
}
