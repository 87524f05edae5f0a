// File: crates/gridline-core/src/chart.rs
// Summary: Chart state: the axis arena, the ordered series map, update
// flags, and the public mutation surface that keeps compression in sync.

use indexmap::IndexMap;
use log::debug;

use crate::axis::{
    Axis, Direction, Position, DEFAULT_LOG_SCALE_MAX, DEFAULT_LOG_SCALE_MIN,
};
use crate::error::{ChartError, Result};
use crate::series::{Series, SeriesKind};
use crate::types::{PlotSize, Point, Range};

/// Owns every axis (addressed by index handle) and every series (addressed
/// by trimmed string id, insertion order preserved). All range and series
/// mutations go through this type so decimation and stacking state stay
/// consistent with what the rendering layer reads.
#[derive(Debug)]
pub struct Chart {
    pub(crate) axes: Vec<Axis>,
    pub(crate) series: IndexMap<String, Series>,
    pub(crate) plot_size: PlotSize,
    pub(crate) compress_enabled: bool,
    pub(crate) update_suspended: bool,
    needs_layout: bool,
}

pub(crate) fn is_bound(series: &Series, axis_id: usize, direction: Direction) -> bool {
    match direction {
        Direction::X => series.x_axis_id() == axis_id,
        Direction::Y => series.y_axis_id() == axis_id,
    }
}

impl Chart {
    /// Creates a chart with one primary X axis (id 0) and one primary Y
    /// axis (id 1).
    pub fn new() -> Self {
        let mut chart = Self {
            axes: Vec::new(),
            series: IndexMap::new(),
            plot_size: PlotSize::default(),
            compress_enabled: true,
            update_suspended: false,
            needs_layout: false,
        };
        chart.add_axis(Direction::X);
        chart.add_axis(Direction::Y);
        chart
    }

    /// Adds an axis slot and returns its handle.
    pub fn add_axis(&mut self, direction: Direction) -> usize {
        let id = self.axes.len();
        self.axes.push(Axis::new(id, direction));
        id
    }

    pub fn axis(&self, axis_id: usize) -> Option<&Axis> {
        self.axes.get(axis_id)
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn x_axis_ids(&self) -> Vec<usize> {
        self.axis_ids(Direction::X)
    }

    pub fn y_axis_ids(&self) -> Vec<usize> {
        self.axis_ids(Direction::Y)
    }

    fn axis_ids(&self, direction: Direction) -> Vec<usize> {
        self.axes
            .iter()
            .filter(|a| a.direction() == direction)
            .map(Axis::id)
            .collect()
    }

    fn axis_checked(&self, axis_id: usize) -> Result<&Axis> {
        self.axes
            .get(axis_id)
            .ok_or_else(|| ChartError::InvalidState(format!("unknown axis id: {axis_id}")))
    }

    pub fn set_axis_position(&mut self, axis_id: usize, position: Position) -> Result<()> {
        self.axis_checked(axis_id)?;
        if self.axes[axis_id].position() == position {
            return Ok(());
        }
        self.axes[axis_id].set_position(position);
        self.update_layout();
        Ok(())
    }

    // ---- series lifecycle ---------------------------------------------

    /// Creates a series bound to the first X/Y axis pair. An existing
    /// series with the same (trimmed) id is replaced in place.
    pub fn create_series(&mut self, kind: SeriesKind, id: &str) -> Result<&mut Series> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ChartError::InvalidArgument(
                "series id must not be empty".into(),
            ));
        }

        let x_axis_id = self
            .x_axis_ids()
            .first()
            .copied()
            .ok_or_else(|| ChartError::InvalidState("chart has no X axis".into()))?;
        let y_axis_id = self
            .y_axis_ids()
            .first()
            .copied()
            .ok_or_else(|| ChartError::InvalidState("chart has no Y axis".into()))?;

        let series = Series::new(kind, trimmed.to_string(), x_axis_id, y_axis_id);
        // IndexMap keeps the original position when the key already exists,
        // so replacement preserves z-order like the map it models.
        self.series.insert(trimmed.to_string(), series);

        self.update_stack_and_riser_data();
        self.update_layout();

        self.series
            .get_mut(trimmed)
            .ok_or_else(|| ChartError::InvalidState(format!("unknown series id: {trimmed}")))
    }

    pub fn series(&self, id: &str) -> Option<&Series> {
        self.series.get(id.trim())
    }

    /// Series ids in insertion (drawing) order.
    pub fn series_ids(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    fn series_index_checked(&self, id: &str) -> Result<usize> {
        let trimmed = id.trim();
        self.series
            .get_index_of(trimmed)
            .ok_or_else(|| ChartError::InvalidState(format!("unknown series id: {trimmed}")))
    }

    fn series_checked_mut(&mut self, id: &str) -> Result<&mut Series> {
        let trimmed = id.trim();
        self.series
            .get_mut(trimmed)
            .ok_or_else(|| ChartError::InvalidState(format!("unknown series id: {trimmed}")))
    }

    pub fn delete_series(&mut self, id: &str) -> Result<()> {
        let index = self.series_index_checked(id)?;
        self.series.shift_remove_index(index);
        self.update_stack_and_riser_data();
        self.update_layout();
        Ok(())
    }

    /// Replaces the series' raw data and re-seeds its decimator (including
    /// the category projection when its X axis is a category axis).
    pub fn set_series_data(&mut self, id: &str, data: Vec<Point>) -> Result<()> {
        let x_axis_id = {
            let series = self.series_checked_mut(id)?;
            series.set_data(data);
            series.x_axis_id()
        };
        self.update_stack_and_riser_data();
        self.update_compressor(x_axis_id);
        self.update_layout();
        Ok(())
    }

    pub fn set_series_visible(&mut self, id: &str, visible: bool) -> Result<()> {
        let series = self.series_checked_mut(id)?;
        if series.is_visible() == visible {
            return Ok(());
        }
        series.set_visible(visible);
        self.update_stack_and_riser_data();
        self.update_layout();
        Ok(())
    }

    /// Opts a series into (or out of) stacking. Stacking over a log scale
    /// Y axis is rejected.
    pub fn enable_series_stack(&mut self, id: &str, enabled: bool) -> Result<()> {
        let index = self.series_index_checked(id)?;
        if enabled {
            let y_axis_id = self.series[index].y_axis_id();
            if self
                .axes
                .get(y_axis_id)
                .is_some_and(Axis::is_log_scale_enabled)
            {
                return Err(ChartError::InvalidState(
                    "stacking is not supported on a log scale axis".into(),
                ));
            }
        }
        self.series[index].set_stack_enabled(enabled);
        self.update_stack_and_riser_data();
        self.update_layout();
        Ok(())
    }

    // ---- z-order -------------------------------------------------------

    /// Moves the series one step later in drawing order.
    pub fn bring_forward(&mut self, id: &str) -> Result<()> {
        let index = self.series_index_checked(id)?;
        if index + 1 < self.series.len() {
            self.series.move_index(index, index + 1);
        }
        self.update_stack_and_riser_data();
        self.update_layout();
        Ok(())
    }

    /// Moves the series one step earlier in drawing order.
    pub fn send_backward(&mut self, id: &str) -> Result<()> {
        let index = self.series_index_checked(id)?;
        if index > 0 {
            self.series.move_index(index, index - 1);
        }
        self.update_stack_and_riser_data();
        self.update_layout();
        Ok(())
    }

    pub fn bring_to_front(&mut self, id: &str) -> Result<()> {
        let index = self.series_index_checked(id)?;
        self.series.move_index(index, self.series.len() - 1);
        self.update_stack_and_riser_data();
        self.update_layout();
        Ok(())
    }

    pub fn send_to_back(&mut self, id: &str) -> Result<()> {
        let index = self.series_index_checked(id)?;
        self.series.move_index(index, 0);
        self.update_stack_and_riser_data();
        self.update_layout();
        Ok(())
    }

    // ---- axis operations -----------------------------------------------

    fn apply_axis_range(&mut self, axis_id: usize, range: Range) -> Result<()> {
        let axis = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| ChartError::InvalidState(format!("unknown axis id: {axis_id}")))?;
        let changed = axis.set_range(range)?;
        if changed {
            self.update_layout();
            self.compress_all_series();
        }
        Ok(())
    }

    pub fn set_axis_range(&mut self, axis_id: usize, range: Range) -> Result<()> {
        self.apply_axis_range(axis_id, range)
    }

    pub fn zoom_in(&mut self, axis_id: usize) -> Result<()> {
        let range = self.axis_checked(axis_id)?.zoom_in_range();
        self.apply_axis_range(axis_id, range)
    }

    pub fn zoom_out(&mut self, axis_id: usize) -> Result<()> {
        let range = self.axis_checked(axis_id)?.zoom_out_range();
        self.apply_axis_range(axis_id, range)
    }

    pub fn scroll_up(&mut self, axis_id: usize) -> Result<()> {
        let range = self.axis_checked(axis_id)?.scroll_up_range();
        self.apply_axis_range(axis_id, range)
    }

    pub fn scroll_down(&mut self, axis_id: usize) -> Result<()> {
        let range = self.axis_checked(axis_id)?.scroll_down_range();
        self.apply_axis_range(axis_id, range)
    }

    /// Adjusts the axis range to the union of the drawable ranges of all
    /// visible series bound to it. A no-op when nothing is drawable.
    pub fn autoscale(&mut self, axis_id: usize) -> Result<()> {
        let axis = self.axis_checked(axis_id)?;
        if axis.is_valid_category_axis() {
            let label_count = axis.category_series().map_or(0, <[String]>::len);
            let range = Range::new(0.0, (label_count - 1) as f64);
            return self.apply_axis_range(axis_id, range);
        }

        let direction = axis.direction();
        let log_scale = axis.is_log_scale_enabled();
        let mut lower = f64::INFINITY;
        let mut upper = f64::NEG_INFINITY;
        let mut any = false;
        for series in self.series.values() {
            if !series.is_visible() || !is_bound(series, axis_id, direction) {
                continue;
            }
            let range = match direction {
                Direction::X => series.x_range_to_draw(log_scale),
                Direction::Y => series.y_range_to_draw(log_scale),
            };
            if let Some(r) = range {
                lower = lower.min(r.lower);
                upper = upper.max(r.upper);
                any = true;
            }
        }
        if !any {
            debug!("axis {axis_id}: autoscale skipped, no visible bound series");
            return Ok(());
        }
        self.apply_axis_range(axis_id, Range::new(lower, upper))
    }

    /// Autoscales every axis of the chart.
    pub fn autoscale_axes(&mut self) -> Result<()> {
        for axis_id in 0..self.axes.len() {
            self.autoscale(axis_id)?;
        }
        Ok(())
    }

    /// Switches the axis to (or from) log scale. Enabling fails when a
    /// bound series contains non-positive values; a non-positive current
    /// minimum is replaced by the minimum series value, or by the log
    /// default when no series are bound. Enabling forces category mode off.
    pub fn enable_log_scale(&mut self, axis_id: usize, enabled: bool) -> Result<()> {
        let axis = self.axis_checked(axis_id)?;
        if axis.is_log_scale_enabled() == enabled {
            return Ok(());
        }
        let direction = axis.direction();

        if enabled {
            match self.min_bound_series_value(axis_id, direction) {
                None => {
                    let axis = &mut self.axes[axis_id];
                    if axis.min() <= 0.0 {
                        axis.set_min(DEFAULT_LOG_SCALE_MIN);
                    }
                    if axis.max() < axis.min() {
                        axis.set_max(DEFAULT_LOG_SCALE_MAX);
                    }
                }
                Some(min_series_value) if min_series_value <= 0.0 => {
                    return Err(ChartError::InvalidState(
                        "series contain non-positive values".into(),
                    ));
                }
                Some(min_series_value) => {
                    let axis = &mut self.axes[axis_id];
                    if axis.min() <= 0.0 {
                        axis.set_min(min_series_value);
                    }
                }
            }
            self.axes[axis_id].set_category_flag(false);
        }

        self.axes[axis_id].set_log_scale_flag(enabled);
        self.update_layout();
        // category mode may have been forced off; re-seed decimator inputs
        self.update_compressor(axis_id);
        Ok(())
    }

    fn min_bound_series_value(&self, axis_id: usize, direction: Direction) -> Option<f64> {
        let mut minimum: Option<f64> = None;
        for series in self.series.values() {
            if !is_bound(series, axis_id, direction) {
                continue;
            }
            let lower = match direction {
                Direction::X => series.x_range().lower,
                Direction::Y => series.y_range().lower,
            };
            minimum = Some(minimum.map_or(lower, |m: f64| m.min(lower)));
        }
        minimum
    }

    /// Switches category mode on or off. Only X axes can be category axes;
    /// the mode only takes effect once labels are set.
    pub fn enable_category(&mut self, axis_id: usize, enabled: bool) -> Result<()> {
        let axis = self.axis_checked(axis_id)?;
        if axis.is_category_enabled() == enabled {
            return Ok(());
        }
        if axis.direction() == Direction::Y {
            return Err(ChartError::InvalidState(
                "Y axis cannot be a category axis".into(),
            ));
        }

        let axis = &mut self.axes[axis_id];
        axis.set_category_flag(enabled);
        axis.clamp_range_to_categories();

        self.update_layout();
        self.update_stack_and_riser_data();
        self.update_compressor(axis_id);
        Ok(())
    }

    /// Sets the ordered category labels for an X axis.
    pub fn set_category_series(&mut self, axis_id: usize, labels: &[&str]) -> Result<()> {
        let axis = self.axis_checked(axis_id)?;
        if axis.direction() == Direction::Y {
            return Err(ChartError::InvalidState(
                "Y axis cannot be a category axis".into(),
            ));
        }

        let axis = &mut self.axes[axis_id];
        axis.set_category_labels(labels.iter().map(|s| s.to_string()).collect());
        axis.clamp_range_to_categories();

        self.update_layout();
        self.update_stack_and_riser_data();
        self.update_compressor(axis_id);
        Ok(())
    }

    // ---- update control ------------------------------------------------

    /// Pixel size of the plot area, as reported by the rendering surface.
    pub fn set_plot_size(&mut self, plot_size: PlotSize) {
        if self.plot_size == plot_size {
            return;
        }
        self.plot_size = plot_size;
        self.compress_all_series();
    }

    pub fn plot_size(&self) -> PlotSize {
        self.plot_size
    }

    pub fn enable_compress(&mut self, enabled: bool) {
        if self.compress_enabled == enabled {
            return;
        }
        self.compress_enabled = enabled;
        if enabled {
            self.compress_all_series();
        }
    }

    pub fn is_compress_enabled(&self) -> bool {
        self.compress_enabled
    }

    /// Batches mutations: while suspended, stack/riser recomputation is
    /// deferred; clearing the flag runs the deferred update.
    pub fn suspend_update(&mut self, suspended: bool) {
        if self.update_suspended == suspended {
            return;
        }
        self.update_suspended = suspended;
        if !suspended {
            self.update_stack_and_riser_data();
            self.update_layout();
        }
    }

    pub fn is_update_suspended(&self) -> bool {
        self.update_suspended
    }

    pub(crate) fn update_layout(&mut self) {
        self.needs_layout = true;
    }

    /// True when a mutation since the last call requires the widget layer
    /// to re-run layout. Clears the flag.
    pub fn take_layout_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_layout)
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}
