use chrono::{Datelike, NaiveDate};
use log::{Log, Metadata, Record as LogRecord};

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// One synthesized day as it leaves the generator. `None` marks a missing
/// reading that the cleaning stage has to fill in.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: NaiveDate,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
    pub humidity: u32,
}

/// A cleaned daily observation. Temperature and rainfall are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: u32,
}

impl WeatherRecord {
    /// Calendar month (1-12) this observation falls in.
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// Whole-year temperature statistics
#[derive(Debug, Clone)]
pub struct YearlyStats {
    pub temp_mean: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub temp_std: f64,
}

/// Per-month aggregate over the cleaned records
#[derive(Debug, Clone)]
pub struct MonthlyStats {
    pub month: u32,
    pub temp_mean: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_std: f64,
    pub rainfall_total: f64,
    pub humidity_mean: f64,
    pub count: u32,
}
