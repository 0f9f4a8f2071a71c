//! Built-in exercise catalog.
//!
//! Maps common lift names to the muscle groups they train, so that history
//! entries logged without muscle tags still count toward weekly volume.

use crate::types::MuscleGroup::{self, *};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Muscles worked by an exercise
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseMuscles {
    pub primary: Vec<MuscleGroup>,
    pub secondary: Vec<MuscleGroup>,
}

/// Cached catalog - built once and reused
static EXERCISE_CATALOG: Lazy<HashMap<String, ExerciseMuscles>> = Lazy::new(build_catalog);

/// Get a reference to the cached catalog
pub fn exercise_catalog() -> &'static HashMap<String, ExerciseMuscles> {
    &EXERCISE_CATALOG
}

/// Look up the muscles for an exercise name
///
/// Matching ignores case, surrounding whitespace and `-`/`_` separators.
pub fn lookup_muscles(name: &str) -> Option<&'static ExerciseMuscles> {
    EXERCISE_CATALOG.get(&normalize_name(name))
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_catalog() -> HashMap<String, ExerciseMuscles> {
    let entries: &[(&str, &[MuscleGroup], &[MuscleGroup])] = &[
        // Lower body
        ("back squat", &[Quads, Glutes], &[Hamstrings, Abs]),
        ("front squat", &[Quads], &[Glutes, Abs]),
        ("squat", &[Quads, Glutes], &[Hamstrings, Abs]),
        ("deadlift", &[Hamstrings, Glutes, Back], &[Quads, Traps, Forearms]),
        ("romanian deadlift", &[Hamstrings, Glutes], &[Back]),
        ("leg press", &[Quads], &[Glutes]),
        ("lunge", &[Quads, Glutes], &[Hamstrings]),
        ("bulgarian split squat", &[Quads, Glutes], &[Hamstrings]),
        ("leg extension", &[Quads], &[]),
        ("leg curl", &[Hamstrings], &[Calves]),
        ("hip thrust", &[Glutes], &[Hamstrings]),
        ("calf raise", &[Calves], &[]),
        // Push
        ("bench press", &[Chest], &[Triceps, Shoulders]),
        ("incline bench press", &[Chest, Shoulders], &[Triceps]),
        ("dumbbell press", &[Chest], &[Triceps, Shoulders]),
        ("dip", &[Chest, Triceps], &[Shoulders]),
        ("push up", &[Chest], &[Triceps, Shoulders, Abs]),
        ("overhead press", &[Shoulders], &[Triceps, Traps]),
        ("lateral raise", &[Shoulders], &[Traps]),
        ("triceps extension", &[Triceps], &[]),
        ("skull crusher", &[Triceps], &[]),
        // Pull
        ("pull up", &[Back], &[Biceps, Forearms]),
        ("chin up", &[Back, Biceps], &[Forearms]),
        ("barbell row", &[Back], &[Biceps, Traps]),
        ("dumbbell row", &[Back], &[Biceps]),
        ("lat pulldown", &[Back], &[Biceps]),
        ("face pull", &[Shoulders, Traps], &[Back]),
        ("shrug", &[Traps], &[Forearms]),
        ("biceps curl", &[Biceps], &[Forearms]),
        ("hammer curl", &[Biceps, Forearms], &[]),
        // Trunk
        ("plank", &[Abs], &[]),
        ("hanging leg raise", &[Abs], &[Forearms]),
        ("cable crunch", &[Abs], &[]),
    ];

    entries
        .iter()
        .map(|(name, primary, secondary)| {
            (
                name.to_string(),
                ExerciseMuscles {
                    primary: primary.to_vec(),
                    secondary: secondary.to_vec(),
                },
            )
        })
        .collect()
}
