// File: crates/gridline-core/src/compress.rs
// Summary: Series decimation: grid-cell math, the compression config, and the
// point-grid / line / bar decimator variants with memoized results.

use log::trace;

use crate::series::SeriesKind;
use crate::types::Point;

/// Snapshot of the axis bounds, scale modes, and raster resolution that
/// parameterize one compression pass. Two equal configs over unchanged input
/// produce identical results, which is what the memoization below relies on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeConfig {
    pub x_lower: f64,
    pub x_upper: f64,
    pub y_lower: f64,
    pub y_upper: f64,
    pub x_log_scale: bool,
    pub y_log_scale: bool,
    pub width_pixels: i64,
    pub height_pixels: i64,
}

/// A reduced point sequence plus the original index of every retained point.
/// `points` and `source_indices` always have the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompressionResult {
    pub points: Vec<Point>,
    pub source_indices: Vec<usize>,
}

impl CompressionResult {
    fn identity(points: &[Point]) -> Self {
        Self {
            points: points.to_vec(),
            source_indices: (0..points.len()).collect(),
        }
    }
}

/// Maps a value to its raster cell under a linear axis. Truncation toward
/// zero matches the reference behavior for in-window values.
fn linear_grid_index(value: f64, lower: f64, upper: f64, pixels: i64) -> i64 {
    ((value - lower) / (upper - lower) * pixels as f64) as i64
}

fn x_grid_index(config: &RangeConfig, x: f64) -> i64 {
    if config.x_log_scale {
        linear_grid_index(
            x.log10(),
            config.x_lower.log10(),
            config.x_upper.log10(),
            config.width_pixels,
        )
    } else {
        linear_grid_index(x, config.x_lower, config.x_upper, config.width_pixels)
    }
}

fn y_grid_index(config: &RangeConfig, y: f64) -> i64 {
    if config.y_log_scale {
        linear_grid_index(
            y.log10(),
            config.y_lower.log10(),
            config.y_upper.log10(),
            config.height_pixels,
        )
    } else {
        linear_grid_index(y, config.y_lower, config.y_upper, config.height_pixels)
    }
}

/// Capability interface shared by all decimator variants.
pub trait Decimator {
    /// Replaces the input series. The cached result is re-seeded with the
    /// identity mapping until the next `compress` call.
    fn set_input(&mut self, input: Vec<Point>);

    /// Runs a compression pass. Returns true if recomputation occurred;
    /// false when the config equals the previous one and the input has not
    /// changed since the last successful pass, or when the input is empty.
    fn compress(&mut self, config: &RangeConfig) -> bool;

    /// The reduced point sequence from the last pass.
    fn compressed_series(&self) -> &[Point];

    /// Original series index of every retained point, parallel to
    /// `compressed_series`.
    fn compressed_indexes(&self) -> &[usize];
}

/// Input, memo state, and output buffers common to every variant.
#[derive(Debug, Default)]
struct DecimatorCore {
    input: Vec<Point>,
    prev_config: Option<RangeConfig>,
    compressed: bool,
    out: CompressionResult,
}

impl DecimatorCore {
    fn set_input(&mut self, input: Vec<Point>) {
        self.out = CompressionResult::identity(&input);
        self.input = input;
        self.compressed = false;
    }

    /// Returns false when the cached result is still valid or there is
    /// nothing to compress; otherwise records the config for the memo.
    fn begin(&mut self, config: &RangeConfig) -> bool {
        if (self.compressed && self.prev_config.as_ref() == Some(config))
            || self.input.is_empty()
        {
            return false;
        }
        self.prev_config = Some(*config);
        true
    }

    fn finish(&mut self, points: Vec<Point>, source_indices: Vec<usize>) {
        trace!(
            "compressed {} points down to {}",
            self.input.len(),
            points.len()
        );
        self.out = CompressionResult {
            points,
            source_indices,
        };
        self.compressed = true;
    }
}

macro_rules! delegate_decimator {
    ($ty:ty, $pass:ident) => {
        impl Decimator for $ty {
            fn set_input(&mut self, input: Vec<Point>) {
                self.core.set_input(input);
            }

            fn compress(&mut self, config: &RangeConfig) -> bool {
                if !self.core.begin(config) {
                    return false;
                }
                let (points, indexes) = $pass(&self.core.input, config);
                self.core.finish(points, indexes);
                true
            }

            fn compressed_series(&self) -> &[Point] {
                &self.core.out.points
            }

            fn compressed_indexes(&self) -> &[usize] {
                &self.core.out.source_indices
            }
        }
    };
}

/// Generic single-pass decimator: a point is dropped when it lands in the
/// same raster cell as the previously retained point.
#[derive(Debug, Default)]
pub struct PointGridDecimator {
    core: DecimatorCore,
}

delegate_decimator!(PointGridDecimator, grid_pass);

fn grid_pass(input: &[Point], config: &RangeConfig) -> (Vec<Point>, Vec<usize>) {
    let mut points = Vec::new();
    let mut indexes = Vec::new();
    let mut prev_cell: Option<(i64, i64)> = None;

    for (i, &p) in input.iter().enumerate() {
        let cell = (x_grid_index(config, p.x), y_grid_index(config, p.y));
        if prev_cell != Some(cell) {
            points.push(p);
            indexes.push(i);
            prev_cell = Some(cell);
        }
    }
    (points, indexes)
}

/// Decimator for line series.
///
/// Preserves the rendered silhouette across window edges: segments entering
/// or leaving the visible window keep both endpoints, and a segment crossing
/// out of the X window terminates the scan early. The early exit assumes the
/// input X values are non-decreasing; callers that cannot guarantee ordering
/// must not use this variant.
#[derive(Debug, Default)]
pub struct LineDecimator {
    core: DecimatorCore,
}

delegate_decimator!(LineDecimator, line_pass);

/// Relation of the current point to the visible window, given the previous
/// point. Re-derived per point; the only carried state is whether the
/// previous point was outside the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineState {
    SteppingOverXRange,
    SteppingOverYRange,
    OutOfRangeAgain,
    SteppingOutOfXRange,
    SteppingInXRange,
    SteppingOutOfYRange,
    SteppingOutOfRange,
    InRangeAgain,
    SteppingInRange,
}

fn classify(
    config: &RangeConfig,
    index: usize,
    p: Point,
    pn1: Option<Point>,
    prev_out_of_range: &mut bool,
) -> LineState {
    let x_in = config.x_lower <= p.x && p.x <= config.x_upper;
    let y_in = config.y_lower <= p.y && p.y <= config.y_upper;

    let state = if x_in {
        if y_in {
            if index > 0 && *prev_out_of_range {
                LineState::SteppingInRange
            } else {
                LineState::InRangeAgain
            }
        } else if *prev_out_of_range {
            match pn1 {
                Some(q)
                    if (q.y < config.y_lower && p.y > config.y_upper)
                        || (q.y > config.y_upper && p.y < config.y_lower) =>
                {
                    LineState::SteppingOverYRange
                }
                Some(q) if q.x < config.x_lower && p.x > config.x_lower => {
                    LineState::SteppingInXRange
                }
                _ => LineState::OutOfRangeAgain,
            }
        } else {
            LineState::SteppingOutOfYRange
        }
    } else if !*prev_out_of_range {
        LineState::SteppingOutOfRange
    } else {
        match pn1 {
            Some(q) if q.x < config.x_upper && p.x > config.x_upper => {
                LineState::SteppingOutOfXRange
            }
            Some(q) if q.x < config.x_lower && p.x > config.x_upper => {
                LineState::SteppingOverXRange
            }
            _ => LineState::OutOfRangeAgain,
        }
    };

    *prev_out_of_range = !(x_in && y_in);
    state
}

fn line_pass(input: &[Point], config: &RangeConfig) -> (Vec<Point>, Vec<usize>) {
    let mut points = Vec::new();
    let mut indexes = Vec::new();
    let mut prev_out_of_range = true;
    let mut prev_cell: Option<(i64, i64)> = None;
    let mut prev: Option<Point> = None;

    for (i, &p) in input.iter().enumerate() {
        let state = classify(config, i, p, prev, &mut prev_out_of_range);

        // Emitting the previous point is skipped when it was already
        // retained as the last output; indexes stay strictly increasing and
        // the output never outgrows the input.
        let push_prev = |points: &mut Vec<Point>, indexes: &mut Vec<usize>| {
            if let Some(q) = prev {
                if indexes.last() != Some(&(i - 1)) {
                    points.push(q);
                    indexes.push(i - 1);
                }
            }
        };

        match state {
            LineState::SteppingOutOfYRange => {
                points.push(p);
                indexes.push(i);
            }
            LineState::SteppingOverYRange
            | LineState::SteppingInRange
            | LineState::SteppingInXRange => {
                push_prev(&mut points, &mut indexes);
                points.push(p);
                indexes.push(i);
            }
            LineState::SteppingOverXRange | LineState::SteppingOutOfXRange => {
                push_prev(&mut points, &mut indexes);
                points.push(p);
                indexes.push(i);
                break;
            }
            LineState::SteppingOutOfRange => {
                points.push(p);
                indexes.push(i);
                break;
            }
            LineState::InRangeAgain => {
                let cell = (x_grid_index(config, p.x), y_grid_index(config, p.y));
                if prev_cell != Some(cell) {
                    points.push(p);
                    indexes.push(i);
                }
                prev_cell = Some(cell);
            }
            LineState::OutOfRangeAgain => {}
        }

        prev = Some(p);
    }
    (points, indexes)
}

/// Decimator for bar series.
///
/// Bars are independent columns, so only the tallest bar per X raster cell
/// survives. Points left of the window are skipped; the scan stops once X
/// passes the upper bound, after the running bucket is flushed. The retained
/// index is the index of the point that last raised the bucket maximum.
#[derive(Debug, Default)]
pub struct BarDecimator {
    core: DecimatorCore,
}

delegate_decimator!(BarDecimator, bar_pass);

fn bar_pass(input: &[Point], config: &RangeConfig) -> (Vec<Point>, Vec<usize>) {
    let mut points = Vec::new();
    let mut indexes = Vec::new();
    let mut prev_x_cell: Option<i64> = None;
    let mut bucket: Option<(Point, usize)> = None;

    for (i, &p) in input.iter().enumerate() {
        if p.x >= config.x_lower {
            // bar series are never log-scaled on X
            let cell =
                linear_grid_index(p.x, config.x_lower, config.x_upper, config.width_pixels);
            let same = prev_x_cell == Some(cell);
            prev_x_cell = Some(cell);

            if same {
                if let Some((max, _)) = bucket {
                    if p.y > max.y {
                        bucket = Some((p, i));
                    }
                }
            } else {
                if let Some((max, idx)) = bucket.take() {
                    points.push(max);
                    indexes.push(idx);
                }
                bucket = Some((p, i));
            }
        }

        if p.x > config.x_upper {
            break;
        }
    }

    if let Some((max, idx)) = bucket {
        points.push(max);
        indexes.push(idx);
    }
    (points, indexes)
}

/// Decimator variant owned by a series, selected by its kind.
#[derive(Debug)]
pub enum SeriesCompressor {
    Line(LineDecimator),
    Bar(BarDecimator),
}

impl SeriesCompressor {
    pub fn for_kind(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::Line => Self::Line(LineDecimator::default()),
            SeriesKind::Bar => Self::Bar(BarDecimator::default()),
        }
    }
}

impl Decimator for SeriesCompressor {
    fn set_input(&mut self, input: Vec<Point>) {
        match self {
            Self::Line(d) => d.set_input(input),
            Self::Bar(d) => d.set_input(input),
        }
    }

    fn compress(&mut self, config: &RangeConfig) -> bool {
        match self {
            Self::Line(d) => d.compress(config),
            Self::Bar(d) => d.compress(config),
        }
    }

    fn compressed_series(&self) -> &[Point] {
        match self {
            Self::Line(d) => d.compressed_series(),
            Self::Bar(d) => d.compressed_series(),
        }
    }

    fn compressed_indexes(&self) -> &[usize] {
        match self {
            Self::Line(d) => d.compressed_indexes(),
            Self::Bar(d) => d.compressed_indexes(),
        }
    }
}
