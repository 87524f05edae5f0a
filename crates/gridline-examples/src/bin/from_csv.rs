// File: crates/gridline-examples/src/bin/from_csv.rs
// Summary: Loads x,y pairs from a CSV file, decimates them against a
// window-sized grid, and prints the reduction.

use anyhow::{Context, Result};
use gridline_core::{Chart, PlotSize, Point, SeriesKind};

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: example-from-csv <points.csv>")?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("open {path}"))?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < 2 {
            continue;
        }
        let x: f64 = record[0].trim().parse().with_context(|| {
            format!("bad x value {:?} on line {}", &record[0], points.len() + 1)
        })?;
        let y: f64 = record[1].trim().parse().with_context(|| {
            format!("bad y value {:?} on line {}", &record[1], points.len() + 1)
        })?;
        points.push(Point::new(x, y));
    }
    let total = points.len();

    let mut chart = Chart::new();
    chart.set_plot_size(PlotSize::new(1024, 640));
    chart.create_series(SeriesKind::Line, "csv")?;
    chart.set_series_data("csv", points)?;
    chart.autoscale_axes()?;

    let series = chart.series("csv").context("series missing")?;
    println!(
        "{path}: {total} points -> {} drawn ({:.1}% kept)",
        series.compressed_series().len(),
        series.compressed_series().len() as f64 / total.max(1) as f64 * 100.0
    );
    Ok(())
}
