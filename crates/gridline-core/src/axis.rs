// File: crates/gridline-core/src/axis.rs
// Summary: Axis state: range bounds, log scale and category modes, and the
// zoom/scroll/range arithmetic that parameterizes recompression.

use log::debug;

use crate::error::{ChartError, Result};
use crate::types::Range;

/// Fraction of the span removed from each side on zoom-in.
const ZOOM_RATIO: f64 = 0.2;

/// Fraction of the span shifted on scroll; also the log-space zoom step.
const SCROLL_RATIO: f64 = 0.1;

/// Maximum resolution in digits. Range requests whose bound-to-span ratio
/// exceeds 10^MAX_RESOLUTION are dropped to keep the floating-point range
/// from collapsing at extreme zoom.
const MAX_RESOLUTION: f64 = 13.0;

/// Default minimum value of range.
pub const DEFAULT_MIN: f64 = 0.0;
/// Default maximum value of range.
pub const DEFAULT_MAX: f64 = 1.0;
/// Default minimum value of log scale range.
pub const DEFAULT_LOG_SCALE_MIN: f64 = 0.1;
/// Default maximum value of log scale range.
pub const DEFAULT_LOG_SCALE_MAX: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    X,
    Y,
}

/// Bottom/left (primary) or top/right (secondary) side of the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Primary,
    Secondary,
}

/// One axis slot of a chart. Created once, mutated through the chart's
/// public operations for the rest of the chart's life.
#[derive(Debug)]
pub struct Axis {
    id: usize,
    direction: Direction,
    position: Position,
    min: f64,
    max: f64,
    log_scale_enabled: bool,
    category_enabled: bool,
    category_series: Option<Vec<String>>,
    num_risers: usize,
}

impl Axis {
    pub(crate) fn new(id: usize, direction: Direction) -> Self {
        Self {
            id,
            direction,
            position: Position::Primary,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            log_scale_enabled: false,
            category_enabled: false,
            category_series: None,
            num_risers: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn range(&self) -> Range {
        Range::new(self.min, self.max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_log_scale_enabled(&self) -> bool {
        self.log_scale_enabled
    }

    pub fn is_category_enabled(&self) -> bool {
        self.category_enabled
    }

    /// Category labels, in order, if any have been set.
    pub fn category_series(&self) -> Option<&[String]> {
        self.category_series.as_deref()
    }

    /// The axis behaves as a category axis only when the mode is enabled
    /// and a non-empty label list is present.
    pub fn is_valid_category_axis(&self) -> bool {
        self.category_enabled
            && self
                .category_series
                .as_ref()
                .is_some_and(|labels| !labels.is_empty())
    }

    /// Number of bar slots per category group on this X axis.
    pub fn num_risers(&self) -> usize {
        self.num_risers
    }

    pub(crate) fn set_num_risers(&mut self, num_risers: usize) {
        self.num_risers = num_risers;
    }

    pub(crate) fn set_log_scale_flag(&mut self, enabled: bool) {
        self.log_scale_enabled = enabled;
    }

    pub(crate) fn set_category_flag(&mut self, enabled: bool) {
        self.category_enabled = enabled;
    }

    pub(crate) fn set_category_labels(&mut self, labels: Vec<String>) {
        self.category_series = Some(labels);
    }

    pub(crate) fn set_min(&mut self, min: f64) {
        self.min = min;
    }

    pub(crate) fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    /// Applies a range request under the current mode rules. Returns true
    /// when the stored range actually changed; equal requests and requests
    /// dropped by the precision guard are accepted no-ops.
    pub(crate) fn set_range(&mut self, range: Range) -> Result<bool> {
        if range.lower.is_nan() || range.upper.is_nan() || range.lower > range.upper {
            return Err(ChartError::InvalidArgument(format!(
                "illegal range: [{}, {}]",
                range.lower, range.upper
            )));
        }

        if self.min == range.lower && self.max == range.upper {
            return Ok(false);
        }

        if self.is_valid_category_axis() {
            let label_count = self
                .category_series
                .as_ref()
                .map_or(0, |labels| labels.len());
            let mut min = range.lower.trunc();
            let mut max = range.upper.trunc();
            if min < 0.0 {
                min = 0.0;
            }
            if max > (label_count - 1) as f64 {
                max = (label_count - 1) as f64;
            }
            let changed = self.min != min || self.max != max;
            self.min = min;
            self.max = max;
            Ok(changed)
        } else {
            if range.lower == range.upper {
                return Err(ChartError::InvalidArgument(format!(
                    "degenerate range: [{}, {}]",
                    range.lower, range.upper
                )));
            }

            let mut lower = range.lower;
            if self.log_scale_enabled && lower <= 0.0 {
                lower = self.min;
            }

            if (lower / (range.upper - lower)).abs() > 10f64.powf(MAX_RESOLUTION) {
                debug!(
                    "axis {}: range [{}, {}] exceeds resolution, ignored",
                    self.id, lower, range.upper
                );
                return Ok(false);
            }

            self.min = lower;
            self.max = range.upper;
            Ok(true)
        }
    }

    /// Candidate range for zoom-in: 20% off each side on linear and
    /// category axes, a 10% log-space step on log axes.
    pub(crate) fn zoom_in_range(&self) -> Range {
        if self.log_scale_enabled {
            let digit_min = self.min.log10();
            let digit_max = self.max.log10();
            Range::new(
                10f64.powf(digit_min + (digit_max - digit_min) * SCROLL_RATIO),
                10f64.powf(digit_max - (digit_max - digit_min) * SCROLL_RATIO),
            )
        } else {
            Range::new(
                self.min + (self.max - self.min) * ZOOM_RATIO,
                self.max - (self.max - self.min) * ZOOM_RATIO,
            )
        }
    }

    /// Candidate range for zoom-out. The linear divisor `1 - 2 * ZOOM_RATIO`
    /// makes this the inverse of `zoom_in_range` up to rounding.
    pub(crate) fn zoom_out_range(&self) -> Range {
        if self.log_scale_enabled {
            let digit_min = self.min.log10();
            let digit_max = self.max.log10();
            Range::new(
                10f64.powf(digit_min - (digit_max - digit_min) * SCROLL_RATIO),
                10f64.powf(digit_max + (digit_max - digit_min) * SCROLL_RATIO),
            )
        } else {
            let step = (self.max - self.min) / (1.0 - ZOOM_RATIO * 2.0) * ZOOM_RATIO;
            Range::new(self.min - step, self.max + step)
        }
    }

    /// Candidate range for scrolling toward larger values. Category axes
    /// step one whole unit and stop at the last label.
    pub(crate) fn scroll_up_range(&self) -> Range {
        if self.is_valid_category_axis() {
            let label_count = self
                .category_series
                .as_ref()
                .map_or(0, |labels| labels.len());
            if self.max < (label_count - 1) as f64 {
                Range::new(self.min + 1.0, self.max + 1.0)
            } else {
                self.range()
            }
        } else if self.log_scale_enabled {
            let digit_min = self.min.log10();
            let digit_max = self.max.log10();
            Range::new(
                10f64.powf(digit_min + (digit_max - digit_min) * SCROLL_RATIO),
                10f64.powf(digit_max + (digit_max - digit_min) * SCROLL_RATIO),
            )
        } else {
            Range::new(
                self.min + (self.max - self.min) * SCROLL_RATIO,
                self.max + (self.max - self.min) * SCROLL_RATIO,
            )
        }
    }

    /// Candidate range for scrolling toward smaller values. Category axes
    /// step one whole unit and stop at the first label.
    pub(crate) fn scroll_down_range(&self) -> Range {
        if self.is_valid_category_axis() {
            if self.min >= 1.0 {
                Range::new(self.min - 1.0, self.max - 1.0)
            } else {
                self.range()
            }
        } else if self.log_scale_enabled {
            let digit_min = self.min.log10();
            let digit_max = self.max.log10();
            Range::new(
                10f64.powf(digit_min - (digit_max - digit_min) * SCROLL_RATIO),
                10f64.powf(digit_max - (digit_max - digit_min) * SCROLL_RATIO),
            )
        } else {
            Range::new(
                self.min - (self.max - self.min) * SCROLL_RATIO,
                self.max - (self.max - self.min) * SCROLL_RATIO,
            )
        }
    }

    /// Re-clamps min/max to integer label bounds when the axis is a valid
    /// category axis.
    pub(crate) fn clamp_range_to_categories(&mut self) {
        if !self.is_valid_category_axis() {
            return;
        }
        let label_count = self
            .category_series
            .as_ref()
            .map_or(0, |labels| labels.len());
        self.min = if self.min < 0.0 { 0.0 } else { self.min.trunc() };
        self.max = if self.max >= label_count as f64 {
            (label_count - 1) as f64
        } else {
            self.max.trunc()
        };
    }
}
