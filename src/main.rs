use clap::Parser;
use lib::{
    MonthlyStats, PipelineError, RawRecord, SimpleLogger, WeatherRecord, YearlyStats, clean,
    generate_year, monthly_stats, render_charts, write_csv, write_report, yearly_stats,
};
use log::debug;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

const HEAD_ROWS: usize = 5;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory where the charts, the cleaned CSV and the report are written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Seed for the synthetic weather generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Year to synthesize daily records for
    #[arg(long, default_value_t = 2023)]
    year: i32,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), PipelineError> {
    // Initialize timer and logger
    let total_start = Instant::now();
    log::set_logger(&LOGGER).unwrap();

    // Acquire CLI args
    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    // UI
    println!("Weatherviz! Synthetic Weather Analysis Pipeline");
    debug!("Year: {} | Seed: {}", args.year, args.seed);
    debug!("Output directory: {}", args.output_dir.display());

    // Synthesize one year of daily records
    let raw = generate_year(args.year, args.seed)?;
    println!("\nInitial Data:");
    print_raw_head(&raw);

    // Fill the gaps
    let weather = clean(&raw);
    println!("\nCleaned Data:");
    print_head(&weather);

    // Aggregate
    let stats_start = Instant::now();
    let yearly = yearly_stats(&weather);
    let monthly = monthly_stats(&weather);
    debug!("Statistics computed in {:.2?}", stats_start.elapsed());

    print_monthly(&monthly);
    print_yearly(&yearly);
    print_rainfall_summary(&monthly);

    // Write charts, CSV and report
    fs::create_dir_all(&args.output_dir)?;
    println!("\nWriting output files to {}", args.output_dir.display());
    let io_start = Instant::now();

    render_charts(&weather, &monthly, &args.output_dir)?;
    write_csv(&weather, &args.output_dir.join("cleaned_weather_data.csv"))?;
    write_report(&yearly, &monthly, &args.output_dir.join("summary_report.txt"))?;

    println!("All files took {:.2?}", io_start.elapsed());
    println!("\nAll files exported successfully!");
    println!("Total runtime: {:.2?}", total_start.elapsed());
    Ok(())
}

fn fmt_reading(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "NA".to_string(),
    }
}

fn print_raw_head(records: &[RawRecord]) {
    println!(
        "{:>10} {:>12} {:>9} {:>9}",
        "date", "temperature", "rainfall", "humidity"
    );
    for record in records.iter().take(HEAD_ROWS) {
        println!(
            "{:>10} {:>12} {:>9} {:>9}",
            record.date.to_string(),
            fmt_reading(record.temperature),
            fmt_reading(record.rainfall),
            record.humidity
        );
    }
}

fn print_head(records: &[WeatherRecord]) {
    println!(
        "{:>10} {:>12} {:>9} {:>9} {:>6}",
        "date", "temperature", "rainfall", "humidity", "month"
    );
    for record in records.iter().take(HEAD_ROWS) {
        println!(
            "{:>10} {:>12.2} {:>9.1} {:>9} {:>6}",
            record.date.to_string(),
            record.temperature,
            record.rainfall,
            record.humidity,
            record.month()
        );
    }
}

fn print_monthly(monthly: &[MonthlyStats]) {
    println!("\nMonthly Statistics:");
    println!(
        "{:>5} {:>10} {:>9} {:>9} {:>9} {:>11} {:>9} {:>6}",
        "month", "temp_mean", "temp_min", "temp_max", "temp_std", "rain_total", "hum_mean", "count"
    );
    for month in monthly {
        println!(
            "{:>5} {:>10.2} {:>9.2} {:>9.2} {:>9.2} {:>11.1} {:>9.2} {:>6}",
            month.month,
            month.temp_mean,
            month.temp_min,
            month.temp_max,
            month.temp_std,
            month.rainfall_total,
            month.humidity_mean,
            month.count
        );
    }
}

fn print_yearly(yearly: &YearlyStats) {
    println!("\nYearly Statistics:");
    println!(
        "  mean: {:.2} | max: {:.2} | min: {:.2} | std: {:.2}",
        yearly.temp_mean, yearly.temp_max, yearly.temp_min, yearly.temp_std
    );
}

fn print_rainfall_summary(monthly: &[MonthlyStats]) {
    println!("\nMonthly Rainfall Summary:");
    for month in monthly {
        println!("{:>2}  {:>6.1}", month.month, month.rainfall_total);
    }
}
