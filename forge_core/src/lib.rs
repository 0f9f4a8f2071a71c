#![forbid(unsafe_code)]

//! Core volume/fatigue optimizer for the Forge strength-training system.
//!
//! This crate provides:
//! - Fatigue models (Hanley volume cost, Frederick metabolic stress, peak-force drop-off)
//! - Fatigue zone classification
//! - Set division planning (reverse prescription, hypertrophy and strength splits)
//! - The recommendation engine and its history/readiness inputs
//!
//! Everything under `fatigue`, `zones`, `planner`, `volume` and `engine` is a
//! pure function of its arguments. File loading lives in `config`, `history`
//! and `readiness::load_context` for callers that want it.

pub mod types;
pub mod error;
pub mod limits;
pub mod fatigue;
pub mod zones;
pub mod planner;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod history;
pub mod readiness;
pub mod volume;
pub mod reference;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use fatigue::{
    estimate_peak_force_drop_rep, reverse_compute_reps, session_fatigue_score, set_fatigue_score,
    tonnage,
};
pub use zones::{classify_zone, FatigueZone, ZoneBounds};
pub use planner::{
    hypertrophy_set_options, prescribe_strength_sets, reverse_prescribe, RepTarget, SetOption,
    StrengthPrescription,
};
pub use history::load_history;
pub use readiness::{load_context, FatigueLevel};
pub use engine::compute_recommendations;
