// File: crates/gridline-examples/src/bin/decimate.rs
// Summary: Minimal example that decimates a large synthetic series and
// prints the reduction at a few zoom levels.

use anyhow::Result;
use gridline_core::{Chart, PlotSize, Point, Range, SeriesKind};

fn main() -> Result<()> {
    env_logger::init();

    // Build a dense line series (200k points) plus a small bar series.
    let line: Vec<Point> = (0..200_000)
        .map(|i| {
            let x = i as f64 * 0.01;
            Point::new(x, (x * 0.2).sin() * 50.0 + (x * 3.0).sin())
        })
        .collect();
    let bars: Vec<Point> = (0..500)
        .map(|i| Point::new(i as f64 * 4.0, (i % 17) as f64))
        .collect();

    let mut chart = Chart::new();
    chart.set_plot_size(PlotSize::new(1024, 640));

    chart.create_series(SeriesKind::Line, "signal")?;
    chart.set_series_data("signal", line)?;
    chart.create_series(SeriesKind::Bar, "volume")?;
    chart.set_series_data("volume", bars)?;

    chart.autoscale_axes()?;
    report(&chart);

    let x_axis = chart.x_axis_ids()[0];
    for _ in 0..3 {
        chart.zoom_in(x_axis)?;
    }
    println!("-- after zooming in three times --");
    report(&chart);

    chart.set_axis_range(x_axis, Range::new(100.0, 110.0))?;
    println!("-- after narrowing to x in [100, 110] --");
    report(&chart);

    Ok(())
}

fn report(chart: &Chart) {
    for series in chart.all_series() {
        println!(
            "{}: {} raw points -> {} drawn",
            series.id(),
            series.data().len(),
            series.compressed_series().len()
        );
    }
}
