//! Recommendation engine.
//!
//! Single pass, no state:
//! 1. Disabled config → explicit `Disabled` outcome
//! 2. Validate config
//! 3. Aggregate the trailing week (and the week before) into per-muscle sets
//! 4. Assess fatigue from readiness signals and recent RPE
//! 5. Resolve the phase (scheduled deload overrides the context phase)
//! 6. Size the session, pick the rep scheme, rank muscle priorities
//! 7. Explain the dominant driver in a deterministic rationale

use crate::history::{latest_workout_time, workouts_within};
use crate::readiness::{assess, FatigueAssessment, FatigueLevel};
use crate::volume::{classify_volume, volume_status, weekly_sets};
use crate::{
    Interval, MuscleGroup, OptimizerConfig, Priority, Recommendation, RecommendationOutcome,
    RepRangePreference, Result, SavedWorkout, TrainingContext, TrainingPhase, VolumeStatus,
    VolumeStatusKind,
};
use chrono::Duration;
use std::collections::BTreeMap;

/// Length of the aggregation window in days.
pub const HISTORY_WINDOW_DAYS: i64 = 7;

/// Sets per exercise used to derive the exercise count.
pub const SETS_PER_EXERCISE: (u32, u32) = (3, 5);

/// Lowest intensity the fatigue adjustment may push a band to.
const MIN_ADJUSTED_INTENSITY: f64 = 40.0;

/// Intensity points removed from the band under high fatigue.
const HIGH_FATIGUE_INTENSITY_DROP: f64 = 5.0;

/// Named rep/intensity/rest presets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeKind {
    Low,
    Moderate,
    High,
    Accumulation,
    Intensification,
    Realization,
    Deload,
}

/// Closed ranges for one preset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepScheme {
    pub reps: Interval<u32>,
    pub intensity: Interval<f64>,
    pub rest_seconds: Interval<u32>,
}

impl SchemeKind {
    pub fn scheme(&self) -> RepScheme {
        let (reps, intensity, rest) = match self {
            SchemeKind::Low => ((3, 6), (80.0, 90.0), (150, 240)),
            SchemeKind::Moderate => ((6, 12), (67.0, 80.0), (90, 150)),
            SchemeKind::High => ((12, 20), (55.0, 67.0), (45, 90)),
            SchemeKind::Accumulation => ((8, 12), (65.0, 75.0), (60, 120)),
            SchemeKind::Intensification => ((4, 6), (78.0, 87.0), (120, 180)),
            SchemeKind::Realization => ((1, 3), (88.0, 95.0), (180, 300)),
            SchemeKind::Deload => ((8, 10), (50.0, 60.0), (60, 90)),
        };
        RepScheme {
            reps: Interval::new(reps.0, reps.1),
            intensity: Interval::new(intensity.0, intensity.1),
            rest_seconds: Interval::new(rest.0, rest.1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchemeKind::Low => "low",
            SchemeKind::Moderate => "moderate",
            SchemeKind::High => "high",
            SchemeKind::Accumulation => "accumulation",
            SchemeKind::Intensification => "intensification",
            SchemeKind::Realization => "realization",
            SchemeKind::Deload => "deload",
        }
    }

    fn from_phase(phase: TrainingPhase) -> Self {
        match phase {
            TrainingPhase::Accumulation => SchemeKind::Accumulation,
            TrainingPhase::Intensification => SchemeKind::Intensification,
            TrainingPhase::Realization => SchemeKind::Realization,
            TrainingPhase::Deload => SchemeKind::Deload,
        }
    }
}

/// Share of `max_sets_per_session` planned for a phase
pub fn phase_volume_multiplier(phase: Option<TrainingPhase>) -> f64 {
    match phase {
        Some(TrainingPhase::Accumulation) => 1.0,
        Some(TrainingPhase::Intensification) => 0.85,
        Some(TrainingPhase::Realization) => 0.6,
        Some(TrainingPhase::Deload) => 0.5,
        None => 0.9,
    }
}

/// Pick the preset: deload always wins, then an explicit preference, then
/// the phase, then moderate.
pub fn select_scheme(preference: RepRangePreference, phase: Option<TrainingPhase>) -> SchemeKind {
    if phase == Some(TrainingPhase::Deload) {
        return SchemeKind::Deload;
    }
    match preference {
        RepRangePreference::Low => SchemeKind::Low,
        RepRangePreference::Moderate => SchemeKind::Moderate,
        RepRangePreference::High => SchemeKind::High,
        RepRangePreference::Auto => phase.map(SchemeKind::from_phase).unwrap_or(SchemeKind::Moderate),
    }
}

/// Phase after applying the automatic deload schedule
fn resolve_phase(config: &OptimizerConfig, context: Option<&TrainingContext>) -> (Option<TrainingPhase>, bool) {
    let phase = context.and_then(|c| c.phase);
    let weeks_since_deload = context.and_then(|c| c.weeks_since_deload);

    let scheduled = config.auto_deload
        && config.deload_frequency_weeks > 0
        && weeks_since_deload.is_some_and(|w| w >= config.deload_frequency_weeks as u32);

    if scheduled && phase != Some(TrainingPhase::Deload) {
        tracing::info!(
            "Deload due: {:?} weeks since last deload (every {} weeks)",
            weeks_since_deload,
            config.deload_frequency_weeks
        );
        return (Some(TrainingPhase::Deload), true);
    }
    (phase, false)
}

/// Total working sets for the session, never above `max_sets`
pub fn session_volume(max_sets: u32, phase: Option<TrainingPhase>, fatigue: FatigueLevel) -> u32 {
    if max_sets == 0 {
        return 0;
    }
    let planned = max_sets as f64 * phase_volume_multiplier(phase) * fatigue.volume_multiplier();
    (planned.round() as u32).clamp(1, max_sets)
}

/// Exercises needed to spread `volume` sets at 3–5 sets each
pub fn exercise_count(volume: u32) -> Interval<u32> {
    let (fewest_sets, most_sets) = SETS_PER_EXERCISE;
    let min = volume.div_ceil(most_sets);
    let max = (volume / fewest_sets).max(min);
    Interval::new(min, max)
}

fn adjust_intensity(band: Interval<f64>, fatigue: FatigueLevel) -> Interval<f64> {
    if fatigue != FatigueLevel::High {
        return band;
    }
    let min = (band.min - HIGH_FATIGUE_INTENSITY_DROP).max(MIN_ADJUSTED_INTENSITY);
    let max = (band.max - HIGH_FATIGUE_INTENSITY_DROP).max(min);
    Interval::new(min, max)
}

fn muscle_priorities(
    status: &BTreeMap<MuscleGroup, VolumeStatus>,
    previous: &BTreeMap<MuscleGroup, f64>,
) -> BTreeMap<MuscleGroup, Priority> {
    status
        .iter()
        .map(|(muscle, s)| {
            let previous_sets = previous.get(muscle).copied().unwrap_or(0.0);
            let persistently_over = s.status == VolumeStatusKind::Over
                && classify_volume(previous_sets, s.target) == VolumeStatusKind::Over
                && s.current > 0.0;
            let priority = match s.status {
                VolumeStatusKind::Under => Priority::Increase,
                _ if persistently_over => Priority::Decrease,
                _ => Priority::Maintain,
            };
            (*muscle, priority)
        })
        .collect()
}

/// Under-target muscle with the largest gap; ties go to the earlier group
fn largest_gap(status: &BTreeMap<MuscleGroup, VolumeStatus>) -> Option<(MuscleGroup, VolumeStatus)> {
    let mut best: Option<(MuscleGroup, VolumeStatus)> = None;
    for (muscle, s) in status.iter().filter(|(_, s)| s.status == VolumeStatusKind::Under) {
        let gap = s.target as f64 - s.current;
        let better = match best {
            Some((_, b)) => gap > b.target as f64 - b.current,
            None => true,
        };
        if better {
            best = Some((*muscle, *s));
        }
    }
    best
}

struct RationaleInputs<'a> {
    scheduled_deload: bool,
    phase: Option<TrainingPhase>,
    fatigue: &'a FatigueAssessment,
    volume: u32,
    max_sets: u32,
    scheme: SchemeKind,
    under_count: usize,
    focus: Option<&'a str>,
    weeks_since_deload: Option<u32>,
    deload_frequency_weeks: i32,
}

/// One sentence naming the dominant driver:
/// deload > fatigue > phase > volume gap > steady progression.
fn compose_rationale(inputs: &RationaleInputs<'_>) -> String {
    let scheme = inputs.scheme.scheme();
    let reps = format!("{}-{} reps", scheme.reps.min, scheme.reps.max);

    if inputs.scheduled_deload {
        return format!(
            "Scheduled deload: {} weeks since the last deload (every {} weeks), so volume drops to {} of {} sets at {}.",
            inputs.weeks_since_deload.unwrap_or_default(),
            inputs.deload_frequency_weeks,
            inputs.volume,
            inputs.max_sets,
            reps
        );
    }
    if inputs.phase == Some(TrainingPhase::Deload) {
        return format!(
            "Deload phase: volume drops to {} of {} sets at {}.",
            inputs.volume, inputs.max_sets, reps
        );
    }
    if inputs.fatigue.level >= FatigueLevel::Elevated {
        return format!(
            "{} fatigue from {}: session volume reduced to {} of {} sets.",
            capitalize(&inputs.fatigue.level.to_string()),
            inputs.fatigue.driver,
            inputs.volume,
            inputs.max_sets
        );
    }
    if let Some(phase) = inputs.phase {
        return format!(
            "{} phase: {} sets at {} in the {} scheme.",
            capitalize(&phase.to_string()),
            inputs.volume,
            reps,
            inputs.scheme.label()
        );
    }
    if inputs.under_count > 0 {
        return format!(
            "Volume gap: {} muscle group(s) below weekly target, led by {}.",
            inputs.under_count,
            inputs.focus.unwrap_or("an untracked group")
        );
    }
    format!(
        "Steady progression: {} sets at {} in the {} scheme.",
        inputs.volume,
        reps,
        inputs.scheme.label()
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Compute the next session's prescription
///
/// Pure function of its inputs: identical `(config, history, context)` always
/// produce an identical outcome. The trailing window ends at `context.now`,
/// or at the newest workout when no time is supplied. Missing history or
/// context degrade to empty aggregates; only an invalid config is an error.
pub fn compute_recommendations(
    config: &OptimizerConfig,
    history: &[SavedWorkout],
    context: Option<&TrainingContext>,
) -> Result<RecommendationOutcome> {
    if !config.enabled {
        tracing::info!("Optimizer disabled, no recommendation");
        return Ok(RecommendationOutcome::Disabled);
    }
    config.validate()?;

    let anchor = context
        .and_then(|c| c.now)
        .or_else(|| latest_workout_time(history));

    let (recent, previous_week): (Vec<&SavedWorkout>, Vec<&SavedWorkout>) = match anchor {
        Some(end) => (
            workouts_within(history, end, HISTORY_WINDOW_DAYS),
            end.checked_sub_signed(Duration::days(HISTORY_WINDOW_DAYS))
                .map(|previous_end| workouts_within(history, previous_end, HISTORY_WINDOW_DAYS))
                .unwrap_or_default(),
        ),
        None => (Vec::new(), Vec::new()),
    };
    tracing::debug!(
        "History window: {} workouts this week, {} the week before",
        recent.len(),
        previous_week.len()
    );

    let current_sets = weekly_sets(&recent);
    let previous_sets = weekly_sets(&previous_week);
    let weekly_volume_status = volume_status(&current_sets, &config.target_sets_per_muscle_group);
    let muscle_group_priorities = muscle_priorities(&weekly_volume_status, &previous_sets);

    let fatigue = assess(context, &recent);
    let (phase, scheduled_deload) = resolve_phase(config, context);

    let max_sets = config.max_sets_per_session as u32;
    let volume = session_volume(max_sets, phase, fatigue.level);

    let scheme_kind = select_scheme(config.rep_range_preference, phase);
    let scheme = scheme_kind.scheme();
    let intensity_range = adjust_intensity(scheme.intensity, fatigue.level);

    let focus = largest_gap(&weekly_volume_status).map(|(muscle, s)| {
        format!("{} ({:.1} of {} weekly sets)", muscle, s.current, s.target)
    });
    let under_count = weekly_volume_status
        .values()
        .filter(|s| s.status == VolumeStatusKind::Under)
        .count();

    let rationale = compose_rationale(&RationaleInputs {
        scheduled_deload,
        phase,
        fatigue: &fatigue,
        volume,
        max_sets,
        scheme: scheme_kind,
        under_count,
        focus: focus.as_deref(),
        weeks_since_deload: context.and_then(|c| c.weeks_since_deload),
        deload_frequency_weeks: config.deload_frequency_weeks,
    });

    let (fewest_sets, most_sets) = SETS_PER_EXERCISE;
    let recommendation = Recommendation {
        session_volume: volume,
        rep_scheme: format!(
            "{}-{} sets x {}-{} reps",
            fewest_sets, most_sets, scheme.reps.min, scheme.reps.max
        ),
        intensity_range,
        rest_range: scheme.rest_seconds,
        exercise_count: exercise_count(volume),
        suggested_focus: focus,
        muscle_group_priorities,
        weekly_volume_status,
        rationale,
    };

    tracing::info!(
        "Recommended {} sets ({} scheme, fatigue {})",
        recommendation.session_volume,
        scheme_kind.label(),
        fatigue.level
    );

    Ok(RecommendationOutcome::Recommended(recommendation))
}
