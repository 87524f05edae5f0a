// File: crates/gridline-core/tests/axis_ops.rs
// Purpose: Validate axis range rules: rejection cases, the precision guard,
// zoom/scroll arithmetic on linear and log axes, category clamping, and
// log-scale enablement against series data.

use gridline_core::{Chart, ChartError, Point, Range, SeriesKind};

const X: usize = 0;
const Y: usize = 1;
const TOL: f64 = 1e-9;

fn range_of(chart: &Chart, axis_id: usize) -> Range {
    chart.axis(axis_id).map(|a| a.range()).unwrap()
}

#[test]
fn set_range_rejects_malformed_requests() {
    let mut chart = Chart::new();

    // degenerate range on a non-category linear axis
    let err = chart.set_axis_range(X, Range::new(5.0, 5.0)).unwrap_err();
    assert!(matches!(err, ChartError::InvalidArgument(_)));

    // NaN bound
    let err = chart
        .set_axis_range(X, Range::new(f64::NAN, 1.0))
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidArgument(_)));

    // inverted range
    let err = chart.set_axis_range(X, Range::new(3.0, 1.0)).unwrap_err();
    assert!(matches!(err, ChartError::InvalidArgument(_)));

    // failed requests leave the default range in place
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (0.0, 1.0));
}

#[test]
fn extreme_zoom_request_is_silently_dropped() {
    let mut chart = Chart::new();
    chart.set_axis_range(X, Range::new(0.0, 10.0)).unwrap();

    // |lower / span| = 2e13 exceeds the 10^13 resolution guard
    chart
        .set_axis_range(X, Range::new(2e13, 2e13 + 1.0))
        .unwrap();

    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (0.0, 10.0));
}

#[test]
fn linear_zoom_in_and_out_round_trip() {
    let mut chart = Chart::new();
    chart.set_axis_range(X, Range::new(0.0, 10.0)).unwrap();

    chart.zoom_in(X).unwrap();
    let r = range_of(&chart, X);
    assert!((r.lower - 2.0).abs() < TOL);
    assert!((r.upper - 8.0).abs() < TOL);

    chart.zoom_out(X).unwrap();
    let r = range_of(&chart, X);
    assert!((r.lower - 0.0).abs() < TOL);
    assert!((r.upper - 10.0).abs() < TOL);
}

#[test]
fn linear_scroll_shifts_by_tenth_of_span() {
    let mut chart = Chart::new();
    chart.set_axis_range(X, Range::new(0.0, 10.0)).unwrap();

    chart.scroll_up(X).unwrap();
    let r = range_of(&chart, X);
    assert!((r.lower - 1.0).abs() < TOL);
    assert!((r.upper - 11.0).abs() < TOL);

    chart.scroll_down(X).unwrap();
    let r = range_of(&chart, X);
    assert!((r.lower - 0.0).abs() < TOL);
    assert!((r.upper - 10.0).abs() < TOL);
}

#[test]
fn log_zoom_and_scroll_work_in_log10_space() {
    let mut chart = Chart::new();
    chart.set_axis_range(X, Range::new(1.0, 10_000.0)).unwrap();
    chart.enable_log_scale(X, true).unwrap();

    chart.zoom_in(X).unwrap();
    let r = range_of(&chart, X);
    assert!((r.lower - 10f64.powf(0.4)).abs() < TOL);
    assert!((r.upper - 10f64.powf(3.6)).abs() < TOL);

    chart.set_axis_range(X, Range::new(1.0, 10_000.0)).unwrap();
    chart.scroll_up(X).unwrap();
    let r = range_of(&chart, X);
    assert!((r.lower - 10f64.powf(0.4)).abs() < TOL);
    assert!((r.upper - 10f64.powf(4.4)).abs() < TOL);
}

#[test]
fn log_axis_coerces_non_positive_lower_bound() {
    let mut chart = Chart::new();
    chart.set_axis_range(X, Range::new(1.0, 10_000.0)).unwrap();
    chart.enable_log_scale(X, true).unwrap();

    chart.set_axis_range(X, Range::new(-5.0, 100.0)).unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (1.0, 100.0));
}

#[test]
fn enable_log_scale_rejects_non_positive_series() {
    let mut chart = Chart::new();
    chart.create_series(SeriesKind::Line, "s").unwrap();
    chart
        .set_series_data("s", vec![Point::new(-1.0, -1.0), Point::new(1.0, 1.0)])
        .unwrap();

    let err = chart.enable_log_scale(Y, true).unwrap_err();
    assert!(matches!(err, ChartError::InvalidState(_)));
    assert!(!chart.axis(Y).unwrap().is_log_scale_enabled());
}

#[test]
fn enable_log_scale_lifts_non_positive_minimum() {
    let mut chart = Chart::new();
    chart.create_series(SeriesKind::Line, "s").unwrap();
    chart
        .set_series_data("s", vec![Point::new(0.5, 2.0), Point::new(10.0, 3.0)])
        .unwrap();

    // default X range starts at 0, which cannot be drawn on a log axis
    chart.enable_log_scale(X, true).unwrap();
    let r = range_of(&chart, X);
    assert!((r.lower - 0.5).abs() < TOL);
}

#[test]
fn enable_log_scale_without_series_falls_back_to_defaults() {
    let mut chart = Chart::new();
    chart.enable_log_scale(Y, true).unwrap();
    let r = range_of(&chart, Y);
    assert_eq!((r.lower, r.upper), (0.1, 1.0));
}

#[test]
fn category_range_clamps_to_label_bounds() {
    let mut chart = Chart::new();
    chart.set_category_series(X, &["a", "b", "c"]).unwrap();
    chart.enable_category(X, true).unwrap();

    chart.set_axis_range(X, Range::new(-5.0, 10.0)).unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (0.0, 2.0));
}

#[test]
fn category_mode_is_x_only() {
    let mut chart = Chart::new();
    let err = chart.enable_category(Y, true).unwrap_err();
    assert!(matches!(err, ChartError::InvalidState(_)));
    let err = chart.set_category_series(Y, &["a"]).unwrap_err();
    assert!(matches!(err, ChartError::InvalidState(_)));
}

#[test]
fn category_mode_without_labels_is_inert() {
    let mut chart = Chart::new();
    chart.enable_category(X, true).unwrap();
    let axis = chart.axis(X).unwrap();
    assert!(axis.is_category_enabled());
    assert!(!axis.is_valid_category_axis());

    // behaves as a plain linear axis until labels are set
    chart.set_axis_range(X, Range::new(0.5, 9.5)).unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (0.5, 9.5));
}

#[test]
fn category_scroll_steps_one_unit_and_clamps() {
    let mut chart = Chart::new();
    chart.set_category_series(X, &["a", "b", "c"]).unwrap();
    chart.enable_category(X, true).unwrap();
    chart.set_axis_range(X, Range::new(0.0, 1.0)).unwrap();

    chart.scroll_up(X).unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (1.0, 2.0));

    // already at the last label: no movement
    chart.scroll_up(X).unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (1.0, 2.0));

    chart.scroll_down(X).unwrap();
    chart.scroll_down(X).unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (0.0, 1.0));
}

#[test]
fn category_zoom_truncates_to_whole_labels() {
    let mut chart = Chart::new();
    chart
        .set_category_series(X, &["a", "b", "c", "d", "e"])
        .unwrap();
    chart.enable_category(X, true).unwrap();
    chart.set_axis_range(X, Range::new(0.0, 4.0)).unwrap();

    chart.zoom_in(X).unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (0.0, 3.0));
}

#[test]
fn enabling_log_scale_forces_category_off() {
    let mut chart = Chart::new();
    chart.set_category_series(X, &["a", "b", "c"]).unwrap();
    chart.enable_category(X, true).unwrap();

    chart.enable_log_scale(X, true).unwrap();
    let axis = chart.axis(X).unwrap();
    assert!(axis.is_log_scale_enabled());
    assert!(!axis.is_category_enabled());
}

#[test]
fn autoscale_unions_visible_series_ranges() {
    let mut chart = Chart::new();
    chart.create_series(SeriesKind::Line, "a").unwrap();
    chart
        .set_series_data(
            "a",
            vec![Point::new(0.0, 1.0), Point::new(5.0, 3.0)],
        )
        .unwrap();
    chart.create_series(SeriesKind::Line, "b").unwrap();
    chart
        .set_series_data(
            "b",
            vec![Point::new(2.0, -2.0), Point::new(8.0, 10.0)],
        )
        .unwrap();

    chart.autoscale_axes().unwrap();
    let rx = range_of(&chart, X);
    let ry = range_of(&chart, Y);
    assert_eq!((rx.lower, rx.upper), (0.0, 8.0));
    assert_eq!((ry.lower, ry.upper), (-2.0, 10.0));

    // hidden series stop contributing
    chart.set_series_visible("b", false).unwrap();
    chart.autoscale_axes().unwrap();
    let rx = range_of(&chart, X);
    assert_eq!((rx.lower, rx.upper), (0.0, 5.0));
}

#[test]
fn autoscale_on_log_axis_excludes_non_positive_values() {
    let mut chart = Chart::new();
    chart.enable_log_scale(Y, true).unwrap();
    chart.create_series(SeriesKind::Line, "s").unwrap();
    chart
        .set_series_data(
            "s",
            vec![
                Point::new(1.0, -5.0),
                Point::new(2.0, 0.1),
                Point::new(3.0, 100.0),
            ],
        )
        .unwrap();

    chart.autoscale(Y).unwrap();
    let r = range_of(&chart, Y);
    assert!((r.lower - 0.1).abs() < TOL);
    assert!((r.upper - 100.0).abs() < TOL);
}

#[test]
fn autoscale_without_series_is_a_no_op() {
    let mut chart = Chart::new();
    chart.autoscale_axes().unwrap();
    let r = range_of(&chart, X);
    assert_eq!((r.lower, r.upper), (0.0, 1.0));
}

#[test]
fn layout_flag_tracks_accepted_changes() {
    let mut chart = Chart::new();
    chart.take_layout_update();

    chart.set_axis_range(X, Range::new(0.0, 10.0)).unwrap();
    assert!(chart.take_layout_update());
    assert!(!chart.take_layout_update());

    // an equal request is an accepted no-op
    chart.set_axis_range(X, Range::new(0.0, 10.0)).unwrap();
    assert!(!chart.take_layout_update());
}
