use crate::error::{PipelineError, Result};
use crate::structs::RawRecord;
use chrono::{Datelike, NaiveDate};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::ops::Range;

/// Mean and spread of the simulated daily temperature, in degrees Celsius.
const TEMP_MEAN: f64 = 30.0;
const TEMP_STD_DEV: f64 = 5.0;

/// Daily rainfall is one of these discrete amounts (mm).
const RAIN_LEVELS: [f64; 5] = [0.0, 2.0, 5.0, 10.0, 20.0];

/// Humidity is a whole-number percentage drawn from this half-open range.
const HUMIDITY_RANGE: Range<u32> = 40..95;

/// Day indices (0-based) blanked out after generation to simulate sensor gaps.
const MISSING_TEMPERATURE_DAYS: Range<usize> = 10..16;
const MISSING_RAINFALL_DAY: usize = 100;

/// Synthesizes one weather record per calendar day of the given year.
///
/// Temperature is drawn from a normal distribution, rainfall from a fixed
/// set of discrete amounts, and humidity uniformly from whole percentages.
/// After generation a run of six days loses its temperature reading and one
/// day loses its rainfall reading, simulating sensor gaps.
///
/// # Arguments
///
/// * `year` - Calendar year to cover, one record per day, ascending
/// * `seed` - Seed for the random number generator; the same `(year, seed)`
///   pair always produces an identical table
///
/// # Returns
///
/// Returns a `Result<Vec<RawRecord>>` with 365 records (366 in leap years).
///
/// # Errors
///
/// Returns `PipelineError::Data` if the year is outside the range a
/// calendar date can represent.
pub fn generate_year(year: i32, seed: u64) -> Result<Vec<RawRecord>> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| PipelineError::Data(format!("Year {} is out of range", year)))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let temperature_dist = Normal::new(TEMP_MEAN, TEMP_STD_DEV)
        .map_err(|e| PipelineError::Data(e.to_string()))?;

    let mut records: Vec<RawRecord> = start
        .iter_days()
        .take_while(|day| day.year() == year)
        .map(|date| RawRecord {
            date,
            temperature: Some(temperature_dist.sample(&mut rng)),
            rainfall: Some(RAIN_LEVELS[rng.random_range(0..RAIN_LEVELS.len())]),
            humidity: rng.random_range(HUMIDITY_RANGE),
        })
        .collect();

    for record in &mut records[MISSING_TEMPERATURE_DAYS] {
        record.temperature = None;
    }
    records[MISSING_RAINFALL_DAY].rainfall = None;

    debug!("Generated {} records for {}", records.len(), year);
    Ok(records)
}
