pub mod error;
pub mod generate;
pub mod load;
pub mod plot;
pub mod structs;
pub mod transform;

// Re-export public API
pub use error::{PipelineError, Result};
pub use generate::generate_year;
pub use load::{write_csv, write_report};
pub use plot::render_charts;
pub use structs::{MonthlyStats, RawRecord, SimpleLogger, WeatherRecord, YearlyStats};
pub use transform::{clean, monthly_stats, yearly_stats};
