use forge_core::fatigue::{session_metabolic_load, session_metabolic_load_with_drift};
use forge_core::{
    classify_zone, estimate_peak_force_drop_rep, hypertrophy_set_options, prescribe_strength_sets,
    reverse_compute_reps, reverse_prescribe, set_fatigue_score, FatigueZone,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn hanley_round_trip(reps in 1u32..=50, intensity in 1u32..=99) {
        let intensity = intensity as f64;
        let score = set_fatigue_score(reps, intensity).unwrap();
        let back = reverse_compute_reps(score, intensity).unwrap();
        prop_assert!((back - reps as f64).abs() <= 0.01, "{} -> {} -> {}", reps, score, back);
    }

    #[test]
    fn hanley_increases_with_reps(reps in 1u32..200, intensity in 0.0f64..99.0) {
        let lower = set_fatigue_score(reps, intensity).unwrap();
        let higher = set_fatigue_score(reps + 1, intensity).unwrap();
        prop_assert!(higher > lower);
    }

    #[test]
    fn hanley_increases_with_intensity(reps in 1u32..50, intensity in 0.0f64..98.0, step in 0.01f64..1.0) {
        let lower = set_fatigue_score(reps, intensity).unwrap();
        let higher = set_fatigue_score(reps, intensity + step).unwrap();
        prop_assert!(higher > lower);
    }

    #[test]
    fn every_score_has_exactly_one_zone(score in 0.0f64..5000.0) {
        let zone = classify_zone(score).unwrap();
        let containing: Vec<_> = FatigueZone::ALL
            .iter()
            .filter(|z| z.bounds().contains(score))
            .collect();
        prop_assert_eq!(containing.len(), 1);
        prop_assert_eq!(*containing[0], zone);
    }

    #[test]
    fn strength_division_never_exceeds_cap(total in 1i64..200, intensity in 1.0f64..99.0) {
        let plan = prescribe_strength_sets(total, intensity).unwrap();
        let cap = estimate_peak_force_drop_rep(intensity).unwrap();
        prop_assert!(plan.reps_per_set <= cap);
        prop_assert!(plan.reps_per_set >= 1);
        prop_assert!(plan.quality_reps as i64 >= total);
        prop_assert_eq!(plan.rep_delta, plan.quality_reps as i64 - total);
    }

    #[test]
    fn drop_rep_at_least_one(intensity in 0.1f64..99.99) {
        prop_assert!(estimate_peak_force_drop_rep(intensity).unwrap() >= 1);
    }

    #[test]
    fn reverse_prescription_bounds_ordered(intensity in 0.0f64..99.0, zone_idx in 0usize..5) {
        let target = reverse_prescribe(intensity, FatigueZone::ALL[zone_idx]).unwrap();
        prop_assert!(target.min_reps >= 1);
        prop_assert!(target.min_reps <= target.target_reps);
        prop_assert!(target.target_reps <= target.max_reps);
    }

    #[test]
    fn hypertrophy_options_are_practical(total in 1u32..300, intensity in 40.0f64..90.0, rpe in 5.0f64..10.0) {
        let options = hypertrophy_set_options(total, intensity, rpe).unwrap();
        prop_assert!(options.len() <= 3);
        for option in options {
            prop_assert!((1..=20).contains(&option.reps_per_set));
            prop_assert_eq!(option.total_reps, option.sets * option.reps_per_set);
        }
    }

    #[test]
    fn drift_never_lowers_metabolic_load(intensity in 40.0f64..95.0, reps in 1u32..15, sets in 1u32..8, rpe in 1.0f64..10.0) {
        let constant = session_metabolic_load(intensity, reps, sets, rpe).unwrap();
        let drifted = session_metabolic_load_with_drift(intensity, reps, sets, rpe).unwrap();
        prop_assert!(drifted >= constant - 1e-9);
    }
}
