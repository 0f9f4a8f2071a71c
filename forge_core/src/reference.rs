//! Hanley reference tables.
//!
//! A reps × intensity grid of fatigue scores with their zones, for coaches
//! who want the numbers behind a prescription.

use crate::fatigue::set_fatigue_score;
use crate::zones::{classify_zone, FatigueZone};
use crate::limits::MAX_REFERENCE_REPS;
use crate::{Error, Result};
use serde::Serialize;
use std::io::Write;
use std::ops::RangeInclusive;

/// Intensities used when the caller doesn't choose any.
pub const DEFAULT_INTENSITIES: [f64; 7] = [60.0, 65.0, 70.0, 75.0, 80.0, 85.0, 90.0];

/// One cell of the reference table
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct ReferenceRow {
    pub reps: u32,
    pub intensity_percent: f64,
    pub score: f64,
    pub zone: FatigueZone,
}

/// Score and zone for every `(reps, intensity)` pair, reps-major
///
/// The rep range may span at most [`MAX_REFERENCE_REPS`] values.
pub fn hanley_reference_table(reps: RangeInclusive<u32>, intensities: &[f64]) -> Result<Vec<ReferenceRow>> {
    let span = (*reps.end() as u64 + 1).saturating_sub(*reps.start() as u64);
    if span > MAX_REFERENCE_REPS as u64 {
        return Err(Error::InvalidReps(format!(
            "rep range {}-{} spans {} values (limit {})",
            reps.start(),
            reps.end(),
            span,
            MAX_REFERENCE_REPS
        )));
    }

    let mut rows = Vec::with_capacity(span as usize * intensities.len());
    for r in reps {
        for &intensity in intensities {
            let score = set_fatigue_score(r, intensity)?;
            rows.push(ReferenceRow {
                reps: r,
                intensity_percent: intensity,
                score,
                zone: classify_zone(score)?,
            });
        }
    }
    Ok(rows)
}

/// Write rows as CSV with a header line
pub fn write_reference_csv<W: Write>(writer: W, rows: &[ReferenceRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
