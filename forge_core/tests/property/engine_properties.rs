use chrono::{DateTime, Duration, TimeZone, Utc};
use forge_core::{
    compute_recommendations, LoggedExercise, LoggedSet, OptimizerConfig, RecommendationOutcome,
    SavedWorkout, TrainingContext, TrainingPhase,
};
use proptest::prelude::*;
use uuid::Uuid;

const EXERCISES: [&str; 6] = ["Squat", "Bench Press", "Deadlift", "Pull Up", "Overhead Press", "Unknown Lift"];

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

fn history_strategy() -> impl Strategy<Value = Vec<SavedWorkout>> {
    prop::collection::vec(
        (0i64..21, 0usize..EXERCISES.len(), 0u32..8, prop::option::of(5.0f64..10.0)),
        0..12,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(days_ago, exercise, set_count, rpe)| SavedWorkout {
                id: Uuid::nil(),
                performed_at: anchor() - Duration::days(days_ago),
                name: None,
                exercises: vec![LoggedExercise {
                    name: EXERCISES[exercise].to_string(),
                    primary_muscles: vec![],
                    secondary_muscles: vec![],
                    sets: (0..set_count)
                        .map(|_| LoggedSet {
                            reps: 8,
                            weight: 100.0,
                            rpe,
                            intensity_percent: None,
                            completed: true,
                        })
                        .collect(),
                }],
            })
            .collect()
    })
}

fn context_strategy() -> impl Strategy<Value = Option<TrainingContext>> {
    let phase = prop::option::of(prop_oneof![
        Just(TrainingPhase::Accumulation),
        Just(TrainingPhase::Intensification),
        Just(TrainingPhase::Realization),
        Just(TrainingPhase::Deload),
    ]);
    prop::option::of(
        (
            phase,
            prop::option::of(0u32..10),
            prop::option::of(1.0f64..10.0),
            prop::option::of(1.0f64..10.0),
            prop::option::of(3.0f64..10.0),
        )
            .prop_map(|(phase, weeks_since_deload, readiness, soreness, sleep_hours)| TrainingContext {
                now: Some(anchor()),
                phase,
                weeks_since_deload,
                readiness,
                soreness,
                sleep_hours,
            }),
    )
}

proptest! {
    #[test]
    fn session_volume_within_max(
        max_sets in 0i32..40,
        history in history_strategy(),
        context in context_strategy(),
    ) {
        let config = OptimizerConfig { max_sets_per_session: max_sets, ..Default::default() };
        let outcome = compute_recommendations(&config, &history, context.as_ref()).unwrap();
        let rec = outcome.recommendation().unwrap();
        prop_assert!(rec.session_volume <= max_sets as u32);
        prop_assert!(rec.intensity_range.min <= rec.intensity_range.max);
        prop_assert!(rec.rest_range.min <= rec.rest_range.max);
        prop_assert!(rec.exercise_count.min <= rec.exercise_count.max);
    }

    #[test]
    fn identical_inputs_identical_output(history in history_strategy(), context in context_strategy()) {
        let config = OptimizerConfig::default();
        let first = compute_recommendations(&config, &history, context.as_ref()).unwrap();
        let second = compute_recommendations(&config, &history, context.as_ref()).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn disabled_ignores_inputs(history in history_strategy(), context in context_strategy()) {
        let config = OptimizerConfig { enabled: false, ..Default::default() };
        let outcome = compute_recommendations(&config, &history, context.as_ref()).unwrap();
        prop_assert_eq!(outcome, RecommendationOutcome::Disabled);
    }
}
