use crate::error::Result;
use crate::structs::{MonthlyStats, WeatherRecord, YearlyStats};
use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One CSV row of the cleaned table, month materialized as its own column.
#[derive(Serialize)]
struct CsvRow {
    date: NaiveDate,
    temperature: f64,
    rainfall: f64,
    humidity: u32,
    month: u32,
}

/// Writes the cleaned table to a CSV file.
///
/// The header row is `date,temperature,rainfall,humidity,month`; dates are
/// ISO formatted and there is no index column.
///
/// # Arguments
/// * `records` - Cleaned weather records, one CSV row each
/// * `output_path` - Path where the CSV file will be created
///
/// # Errors
/// Returns error if the file cannot be created or written to.
pub fn write_csv(records: &[WeatherRecord], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    for record in records {
        writer.serialize(CsvRow {
            date: record.date,
            temperature: record.temperature,
            rainfall: record.rainfall,
            humidity: record.humidity,
            month: record.month(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the plain-text summary report.
///
/// The report carries the yearly temperature statistics formatted to two
/// decimal places followed by the monthly rainfall totals, one line per
/// month.
///
/// # Arguments
/// * `yearly` - Whole-year temperature statistics
/// * `monthly` - Per-month aggregates, already sorted by month
/// * `output_path` - Path where the report will be created
///
/// # Errors
/// Returns error if the file cannot be created or written to.
pub fn write_report(
    yearly: &YearlyStats,
    monthly: &[MonthlyStats],
    output_path: &Path,
) -> Result<()> {
    let mut file = File::create(output_path)?;

    writeln!(file, "Weather Data Analysis Report")?;
    writeln!(file, "--------------------------------------")?;
    writeln!(file)?;
    writeln!(file, "Yearly Temperature Mean: {:.2}", yearly.temp_mean)?;
    writeln!(file, "Yearly Temp Max: {:.2}", yearly.temp_max)?;
    writeln!(file, "Yearly Temp Min: {:.2}", yearly.temp_min)?;
    writeln!(file, "Yearly Temp Std: {:.2}", yearly.temp_std)?;
    writeln!(file)?;
    writeln!(file)?;
    writeln!(file, "Monthly Rainfall Summary:")?;
    for month in monthly {
        writeln!(file, "{:>2}  {:>6.1}", month.month, month.rainfall_total)?;
    }

    Ok(())
}
