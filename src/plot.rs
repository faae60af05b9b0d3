use crate::error::{PipelineError, Result};
use crate::structs::{MonthlyStats, WeatherRecord};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 30);

fn plot_err<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::Plot(e.to_string())
}

/// Renders all four chart files into the output directory.
///
/// Each chart gets its own drawing area which is drawn, presented and
/// dropped before the next chart starts; existing files are overwritten.
///
/// # Errors
/// Returns `PipelineError::Plot` if a backend or drawing operation fails,
/// including filesystem write failures.
pub fn render_charts(
    records: &[WeatherRecord],
    monthly: &[MonthlyStats],
    output_dir: &Path,
) -> Result<()> {
    daily_temperature(records, &output_dir.join("daily_temperature.png"))?;
    monthly_rainfall(monthly, &output_dir.join("monthly_rainfall.png"))?;
    humidity_scatter(records, &output_dir.join("humidity_vs_temperature.png"))?;
    combined_overview(records, &output_dir.join("combined_plot.png"))?;

    debug!("Rendered 4 charts into {}", output_dir.display());
    Ok(())
}

/// Line chart of daily temperature across the year.
pub fn daily_temperature(records: &[WeatherRecord], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    temperature_panel(records, &root)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

/// Bar chart of summed rainfall per month.
pub fn monthly_rainfall(monthly: &[MonthlyStats], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let max_total = monthly
        .iter()
        .map(|m| m.rainfall_total)
        .fold(0.0f64, f64::max);
    let y_max = if max_total > 0.0 { max_total * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Rainfall Totals", CAPTION_FONT.into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((1u32..13u32).into_segmented(), 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Rainfall (mm)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(8)
                .data(monthly.iter().map(|m| (m.month, m.rainfall_total))),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Scatter plot of humidity against temperature, one point per day.
pub fn humidity_scatter(records: &[WeatherRecord], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    humidity_panel(records, &root)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

/// Two-panel figure: the temperature line on top, the humidity scatter below.
pub fn combined_overview(records: &[WeatherRecord], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let (upper, lower) = root.split_vertically(400);
    temperature_panel(records, &upper)?;
    humidity_panel(records, &lower)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn temperature_panel(
    records: &[WeatherRecord],
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> Result<()> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Err(PipelineError::Plot("no records to plot".to_string())),
    };
    let (temp_lo, temp_hi) = padded_range(records.iter().map(|r| r.temperature));

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Temperature Trend", CAPTION_FONT.into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(first..last, temp_lo..temp_hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Temperature (°C)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.date, r.temperature)),
            BLUE,
        ))
        .map_err(plot_err)?;

    Ok(())
}

fn humidity_panel(
    records: &[WeatherRecord],
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> Result<()> {
    let (hum_lo, hum_hi) = padded_range(records.iter().map(|r| r.humidity as f64));
    let (temp_lo, temp_hi) = padded_range(records.iter().map(|r| r.temperature));

    let mut chart = ChartBuilder::on(area)
        .caption("Humidity vs Temperature", CAPTION_FONT.into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(hum_lo..hum_hi, temp_lo..temp_hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Humidity (%)")
        .y_desc("Temperature (°C)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            records
                .iter()
                .map(|r| Circle::new((r.humidity as f64, r.temperature), 3, BLUE.filled())),
        )
        .map_err(plot_err)?;

    Ok(())
}

/// Smallest range covering all values, widened by a small margin on each
/// side. Falls back to (0, 1) for empty input.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_year;
    use crate::transform::{clean, monthly_stats};
    use std::env;
    use std::fs;

    #[test]
    fn test_padded_range_widens_the_span() {
        let (lo, hi) = padded_range([10.0, 20.0].into_iter());
        assert!(lo < 10.0);
        assert!(hi > 20.0);
    }

    #[test]
    fn test_padded_range_of_empty_input() {
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn test_render_charts_writes_four_files() {
        let dir = env::temp_dir().join("weatherviz_test_charts");
        fs::create_dir_all(&dir).unwrap();

        let records = clean(&generate_year(2023, 42).unwrap());
        let monthly = monthly_stats(&records);

        render_charts(&records, &monthly, &dir).unwrap();

        for name in [
            "daily_temperature.png",
            "monthly_rainfall.png",
            "humidity_vs_temperature.png",
            "combined_plot.png",
        ] {
            let path = dir.join(name);
            let metadata = fs::metadata(&path).unwrap();
            assert!(metadata.len() > 0, "{} should not be empty", name);
            fs::remove_file(&path).unwrap();
        }

        fs::remove_dir(&dir).unwrap();
    }
}
