//! Workout history loading and windowing.
//!
//! History snapshots are read from JSON (array), JSONL (one workout per line)
//! or a flat CSV export. Unreadable rows are skipped with a warning so that a
//! partially corrupt export still yields a usable history.

use crate::limits::MAX_SETS_PER_EXERCISE;
use crate::{LoggedExercise, LoggedSet, Result, SavedWorkout, WorkoutHistory};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::Path;
use uuid::Uuid;

/// CSV row format: one row per exercise entry
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    #[serde(default)]
    workout: Option<String>,
    exercise: String,
    sets: u32,
    reps: u32,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    rpe: Option<f64>,
}

/// Load a history snapshot, choosing the format by file extension
///
/// Returns an empty history if the file doesn't exist.
pub fn load_history(path: &Path) -> Result<WorkoutHistory> {
    if !path.exists() {
        tracing::debug!("No history file found at {:?}", path);
        return Ok(Vec::new());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let history = match extension.as_deref() {
        Some("csv") => load_history_csv(path)?,
        Some("jsonl") => load_history_jsonl(path)?,
        _ => load_history_json(path)?,
    };

    tracing::info!("Loaded {} workouts from {:?}", history.len(), path);
    Ok(history)
}

fn load_history_json(path: &Path) -> Result<WorkoutHistory> {
    let contents = std::fs::read_to_string(path)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&contents)?;
    let mut workouts = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<SavedWorkout>(record) {
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!("Skipping malformed history record {}: {}", index, e);
            }
        }
    }

    Ok(workouts)
}

fn load_history_jsonl(path: &Path) -> Result<WorkoutHistory> {
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut workouts = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<SavedWorkout>(&line) {
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!("Skipping malformed history line {}: {}", line_no + 1, e);
            }
        }
    }

    Ok(workouts)
}

fn load_history_csv(path: &Path) -> Result<WorkoutHistory> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    // Keyed by (date, workout name) so rows of one session group together
    let mut grouped: BTreeMap<(DateTime<Utc>, String), Vec<LoggedExercise>> = BTreeMap::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
                continue;
            }
        };

        let Some(performed_at) = parse_timestamp(&row.date) else {
            tracing::warn!("Skipping CSV row with invalid date: {}", row.date);
            continue;
        };

        if row.sets > MAX_SETS_PER_EXERCISE {
            tracing::warn!(
                "Skipping CSV row for {} with {} sets (limit {})",
                row.exercise,
                row.sets,
                MAX_SETS_PER_EXERCISE
            );
            continue;
        }

        let set = LoggedSet {
            reps: row.reps,
            weight: row.weight.unwrap_or(0.0),
            rpe: row.rpe,
            intensity_percent: None,
            completed: true,
        };
        let exercise = LoggedExercise {
            name: row.exercise,
            primary_muscles: Vec::new(),
            secondary_muscles: Vec::new(),
            sets: vec![set; row.sets as usize],
        };

        grouped
            .entry((performed_at, row.workout.unwrap_or_default()))
            .or_default()
            .push(exercise);
    }

    Ok(grouped
        .into_iter()
        .map(|((performed_at, name), exercises)| SavedWorkout {
            id: Uuid::new_v4(),
            performed_at,
            name: (!name.is_empty()).then_some(name),
            exercises,
        })
        .collect())
}

/// Parse RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Workouts performed in the `days`-long window ending at `end`
///
/// The window is `(end − days, end]`. Returns newest first. When the start
/// falls outside the representable time range the window has no lower bound.
pub fn workouts_within(history: &[SavedWorkout], end: DateTime<Utc>, days: i64) -> Vec<&SavedWorkout> {
    let start = Duration::try_days(days).and_then(|span| end.checked_sub_signed(span));
    let mut recent: Vec<_> = history
        .iter()
        .filter(|w| start.map_or(true, |start| w.performed_at > start) && w.performed_at <= end)
        .collect();
    recent.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));
    recent
}

/// Timestamp of the most recent workout, if any
pub fn latest_workout_time(history: &[SavedWorkout]) -> Option<DateTime<Utc>> {
    history.iter().map(|w| w.performed_at).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(days_ago: i64, end: DateTime<Utc>) -> SavedWorkout {
        SavedWorkout {
            id: Uuid::new_v4(),
            performed_at: end - Duration::days(days_ago),
            name: None,
            exercises: vec![],
        }
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let history = load_history(&temp_dir.path().join("nope.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_load_json_array() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"[{"performed_at": "2024-03-01T10:00:00Z",
                 "exercises": [{"name": "Squat", "sets": [{"reps": 5, "weight": 225}]}]}]"#,
        )
        .unwrap();

        let history = load_history(&path).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].exercises[0].sets[0].reps, 5);
    }

    #[test]
    fn test_json_array_skips_malformed_records() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"[{"performed_at": "2024-03-01T10:00:00Z",
                 "exercises": [{"name": "Squat", "sets": [{"reps": 5, "weight": 225}]}]},
                {"exercises": [{"name": "Bench Press"}]},
                {"performed_at": "2024-03-02T10:00:00Z",
                 "exercises": [{"name": "Curl", "primary_muscles": ["spleen"]}]},
                {"performed_at": "2024-03-03T10:00:00Z",
                 "exercises": [{"name": "Row", "sets": [{"reps": -3}]}]}]"#,
        )
        .unwrap();

        let history = load_history(&path).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].exercises[0].name, "Squat");
    }

    #[test]
    fn test_jsonl_skips_malformed_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.jsonl");
        let contents = [
            r#"{"performed_at": "2024-03-01T10:00:00Z"}"#,
            "{ not json",
            "",
            r#"{"performed_at": "2024-03-03T10:00:00Z"}"#,
        ]
        .join("\n");
        std::fs::write(&path, contents).unwrap();

        let history = load_history(&path).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_csv_groups_rows_into_workouts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.csv");
        let csv = "\
date,workout,exercise,sets,reps,weight,rpe
2024-03-01,Pull,Deadlift,8,10,285,8
2024-03-01,Pull,Barbell Row,3,10,135,
2024-03-02T09:30:00Z,Push,Bench Press,4,8,185,7.5
not-a-date,Push,Bench Press,4,8,185,7.5
";
        std::fs::write(&path, csv).unwrap();

        let history = load_history(&path).unwrap();
        assert_eq!(history.len(), 2);

        let pull = history.iter().find(|w| w.name.as_deref() == Some("Pull")).unwrap();
        assert_eq!(pull.exercises.len(), 2);
        assert_eq!(pull.exercises[0].sets.len(), 8);
        assert_eq!(pull.exercises[0].tonnage(), 22_800.0);
        assert!(pull.exercises[1].sets[0].rpe.is_none());
    }

    #[test]
    fn test_csv_skips_rows_with_implausible_set_counts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.csv");
        let csv = "\
date,workout,exercise,sets,reps,weight,rpe
2024-03-01,Legs,Squat,4000000000,5,225,8
2024-03-01,Legs,Leg Press,101,10,300,
2024-03-01,Legs,Calf Raise,100,12,90,
";
        std::fs::write(&path, csv).unwrap();

        let history = load_history(&path).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].exercises.len(), 1);
        assert_eq!(history[0].exercises[0].name, "Calf Raise");
        assert_eq!(history[0].exercises[0].sets.len(), 100);
    }

    #[test]
    fn test_workouts_within_window() {
        let end = Utc::now();
        let history = vec![workout(1, end), workout(6, end), workout(7, end), workout(10, end)];

        let recent = workouts_within(&history, end, 7);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].performed_at > recent[1].performed_at);
    }

    #[test]
    fn test_workouts_within_window_at_time_range_edge() {
        let end = DateTime::<Utc>::MIN_UTC;
        let history = vec![SavedWorkout {
            id: Uuid::nil(),
            performed_at: end,
            name: None,
            exercises: vec![],
        }];
        assert_eq!(workouts_within(&history, end, 7).len(), 1);
        assert!(workouts_within(&[workout(1, Utc::now())], end, 7).is_empty());
        assert_eq!(workouts_within(&history, end, i64::MAX).len(), 1);
    }

    #[test]
    fn test_latest_workout_time() {
        let end = Utc::now();
        let history = vec![workout(3, end), workout(1, end)];
        assert_eq!(latest_workout_time(&history), Some(end - Duration::days(1)));
        assert_eq!(latest_workout_time(&[]), None);
    }
}
