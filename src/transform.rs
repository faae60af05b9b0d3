use crate::structs::{MonthlyStats, RawRecord, WeatherRecord, YearlyStats};
use log::debug;
use std::collections::HashMap;

/// Fills the gaps in a generated table and produces the cleaned records.
///
/// Missing temperatures are replaced with the arithmetic mean of all
/// non-missing temperatures, computed once before any replacement happens.
/// Missing rainfall becomes 0.0: a day with no reading is treated as dry.
///
/// # Arguments
///
/// * `raw` - Generated records, possibly with missing readings
///
/// # Returns
///
/// Returns a `Vec<WeatherRecord>` of the same length and order in which
/// every reading is present.
pub fn clean(raw: &[RawRecord]) -> Vec<WeatherRecord> {
    let observed: Vec<f64> = raw.iter().filter_map(|r| r.temperature).collect();
    let fill_temperature = mean(&observed);

    debug!(
        "Filling {} missing temperature readings with mean {:.2}",
        raw.len() - observed.len(),
        fill_temperature
    );

    raw.iter()
        .map(|r| WeatherRecord {
            date: r.date,
            temperature: r.temperature.unwrap_or(fill_temperature),
            rainfall: r.rainfall.unwrap_or(0.0),
            humidity: r.humidity,
        })
        .collect()
}

/// Computes whole-year temperature statistics over the cleaned records.
///
/// The standard deviation uses the population formula (divide by N).
pub fn yearly_stats(records: &[WeatherRecord]) -> YearlyStats {
    let temps: Vec<f64> = records.iter().map(|r| r.temperature).collect();
    let temp_mean = mean(&temps);

    YearlyStats {
        temp_mean,
        temp_max: temps.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
        temp_min: temps.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
        temp_std: stddev(&temps, temp_mean),
    }
}

/// Groups the cleaned records by calendar month and aggregates each group.
///
/// For every month that has at least one record this computes the
/// temperature mean/min/max/standard deviation (population formula), the
/// rainfall total, the humidity mean, and the record count.
///
/// # Returns
///
/// Returns a `Vec<MonthlyStats>` sorted by ascending month number. Months
/// without records do not appear.
pub fn monthly_stats(records: &[WeatherRecord]) -> Vec<MonthlyStats> {
    let mut by_month: HashMap<u32, Vec<&WeatherRecord>> = HashMap::new();
    for record in records {
        by_month.entry(record.month()).or_default().push(record);
    }
    debug!("Aggregating {} month groups", by_month.len());

    let mut results: Vec<MonthlyStats> = by_month
        .into_iter()
        .map(|(month, rows)| {
            let temps: Vec<f64> = rows.iter().map(|r| r.temperature).collect();
            let humidities: Vec<f64> = rows.iter().map(|r| r.humidity as f64).collect();
            let temp_mean = mean(&temps);

            MonthlyStats {
                month,
                temp_mean,
                temp_min: temps.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
                temp_max: temps.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
                temp_std: stddev(&temps, temp_mean),
                rainfall_total: rows.iter().map(|r| r.rainfall).sum(),
                humidity_mean: mean(&humidities),
                count: rows.len() as u32,
            }
        })
        .collect();

    results.sort_by_key(|m| m.month);
    results
}

/// Arithmetic mean of the values; 0.0 for empty input.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a pre-computed mean; 0.0 for
/// empty input.
fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_year;
    use chrono::NaiveDate;

    fn raw(day: u32, temperature: Option<f64>, rainfall: Option<f64>) -> RawRecord {
        RawRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            temperature,
            rainfall,
            humidity: 60,
        }
    }

    fn cleaned(month: u32, day: u32, temperature: f64, rainfall: f64) -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2023, month, day).unwrap(),
            temperature,
            rainfall,
            humidity: 60,
        }
    }

    #[test]
    fn test_clean_fills_temperature_with_pre_fill_mean() {
        let records = clean(&[
            raw(1, Some(10.0), Some(2.0)),
            raw(2, None, Some(0.0)),
            raw(3, Some(20.0), Some(5.0)),
        ]);

        // Mean of the two observed readings, not influenced by the fill
        assert_eq!(records[1].temperature, 15.0);
        assert_eq!(records[0].temperature, 10.0);
        assert_eq!(records[2].temperature, 20.0);
    }

    #[test]
    fn test_clean_fills_rainfall_with_zero() {
        let records = clean(&[raw(1, Some(30.0), None), raw(2, Some(31.0), Some(10.0))]);

        assert_eq!(records[0].rainfall, 0.0);
        assert_eq!(records[1].rainfall, 10.0);
    }

    #[test]
    fn test_clean_on_generated_year() {
        let generated = generate_year(2023, 42).unwrap();
        let observed: Vec<f64> = generated.iter().filter_map(|r| r.temperature).collect();
        let expected_fill = observed.iter().sum::<f64>() / observed.len() as f64;

        let records = clean(&generated);

        assert_eq!(records.len(), 365);
        for record in &records[10..16] {
            assert_eq!(record.temperature, expected_fill);
        }
        assert_eq!(records[100].rainfall, 0.0);
    }

    #[test]
    fn test_population_stddev() {
        // Classic textbook set: mean 5, population standard deviation 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert!((stddev(&values, m) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_yearly_stats_match_plain_mean() {
        let records = clean(&generate_year(2023, 42).unwrap());
        let plain_mean =
            records.iter().map(|r| r.temperature).sum::<f64>() / records.len() as f64;

        let yearly = yearly_stats(&records);

        assert!((yearly.temp_mean - plain_mean).abs() < 1e-9);
        assert!(yearly.temp_min <= yearly.temp_mean);
        assert!(yearly.temp_max >= yearly.temp_mean);
        assert!(yearly.temp_std > 0.0);
    }

    #[test]
    fn test_monthly_counts_cover_the_year() {
        let records = clean(&generate_year(2023, 42).unwrap());
        let monthly = monthly_stats(&records);

        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly.iter().map(|m| m.count).sum::<u32>(), 365);

        let months: Vec<u32> = monthly.iter().map(|m| m.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn test_monthly_aggregates() {
        let records = vec![
            cleaned(1, 1, 10.0, 2.0),
            cleaned(1, 2, 20.0, 5.0),
            cleaned(2, 1, 30.0, 0.0),
        ];

        let monthly = monthly_stats(&records);

        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].month, 1);
        assert_eq!(monthly[0].temp_mean, 15.0);
        assert_eq!(monthly[0].temp_min, 10.0);
        assert_eq!(monthly[0].temp_max, 20.0);
        assert_eq!(monthly[0].rainfall_total, 7.0);
        assert_eq!(monthly[0].humidity_mean, 60.0);
        assert_eq!(monthly[0].count, 2);
        assert_eq!(monthly[1].month, 2);
        assert_eq!(monthly[1].count, 1);
    }
}
