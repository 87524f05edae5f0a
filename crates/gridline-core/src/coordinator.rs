// File: crates/gridline-core/src/coordinator.rs
// Summary: Series coordination: builds per-series compression configs from
// axis state, re-projects category inputs, and assigns stack/riser slots
// across every (x-axis, y-axis) pair.

use log::trace;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::chart::{is_bound, Chart};
use crate::compress::{Decimator, RangeConfig};
use crate::series::{Series, SeriesKind};
use crate::types::{Point, PRECISION};

/// Fractional margin added around the axis window so geometry right at the
/// window edge survives decimation.
const COMPRESS_MARGIN: f64 = 0.015;

impl Chart {
    /// Rebuilds the compression config for every series from current axis
    /// state and plot size, and runs each series' decimator. Memoization in
    /// the decimators makes this cheap when nothing changed.
    pub(crate) fn compress_all_series(&mut self) {
        if !self.compress_enabled {
            return;
        }

        let width = self.plot_size.width as i64 * PRECISION as i64;
        let height = self.plot_size.height as i64 * PRECISION as i64;

        let axes = &self.axes;
        for series in self.series.values_mut() {
            let Some(x_axis) = axes.get(series.x_axis_id()) else {
                continue;
            };
            let Some(y_axis) = axes.get(series.y_axis_id()) else {
                continue;
            };

            let x_range = x_axis.range();
            let y_range = y_axis.range();

            let mut x_lower = x_range.lower - x_range.span() * COMPRESS_MARGIN;
            let x_upper = x_range.upper + x_range.span() * COMPRESS_MARGIN;
            if x_axis.is_log_scale_enabled() {
                x_lower = series.x_range().lower;
            }
            let mut y_lower = y_range.lower - y_range.span() * COMPRESS_MARGIN;
            let y_upper = y_range.upper + y_range.span() * COMPRESS_MARGIN;
            if y_axis.is_log_scale_enabled() {
                y_lower = series.y_range().lower;
            }

            let config = RangeConfig {
                x_lower,
                x_upper,
                y_lower,
                y_upper,
                x_log_scale: x_axis.is_log_scale_enabled(),
                y_log_scale: y_axis.is_log_scale_enabled(),
                width_pixels: width,
                height_pixels: height,
            };

            if series.compressor_mut().compress(&config) {
                trace!(
                    "series {}: {} points retained",
                    series.id(),
                    series.compressed_series().len()
                );
            }
        }
    }

    /// Re-seeds the decimator input of every series bound to the axis:
    /// label-indexed points when the axis is a valid category axis, the raw
    /// data otherwise. Ends with a full recompression.
    pub(crate) fn update_compressor(&mut self, axis_id: usize) {
        let Some(axis) = self.axes.get(axis_id) else {
            return;
        };
        let direction = axis.direction();
        let category_labels = if axis.is_valid_category_axis() {
            axis.category_series().map(<[String]>::to_vec)
        } else {
            None
        };

        for series in self.series.values_mut() {
            if !is_bound(series, axis_id, direction) {
                continue;
            }
            let input = match &category_labels {
                Some(labels) => category_projection(series, labels.len()),
                None => series.data().to_vec(),
            };
            series.compressor_mut().set_input(input);
        }

        self.compress_all_series();
    }

    /// Recomputes riser slots and stacked running totals. Stacked bars on a
    /// (category X, non-log Y) pair share one riser slot; other bars take a
    /// slot each; stacked lines accumulate but never consume a slot.
    pub(crate) fn update_stack_and_riser_data(&mut self) {
        if self.update_suspended {
            return;
        }

        let x_ids = self.x_axis_ids();
        let y_ids = self.y_axis_ids();

        for &x_id in &x_ids {
            self.axes[x_id].set_num_risers(0);
        }
        for &x_id in &x_ids {
            for &y_id in &y_ids {
                self.update_stack_and_riser_pair(x_id, y_id);
            }
        }
    }

    fn update_stack_and_riser_pair(&mut self, x_id: usize, y_id: usize) {
        let x_axis = &self.axes[x_id];
        let stacking_valid =
            x_axis.is_valid_category_axis() && !self.axes[y_id].is_log_scale_enabled();
        let label_count = if x_axis.is_valid_category_axis() {
            x_axis.category_series().map_or(0, <[String]>::len)
        } else {
            0
        };
        let base_risers = x_axis.num_risers();

        let mut riser_cnt = 0usize;
        let mut stack_riser_position: Option<usize> = None;
        let mut stack_bar = vec![Decimal::ZERO; label_count];
        let mut stack_line = vec![Decimal::ZERO; label_count];

        for series in self.series.values_mut() {
            if series.x_axis_id() != x_id || series.y_axis_id() != y_id || !series.is_visible()
            {
                continue;
            }

            if series.is_stack_enabled() && stacking_valid {
                match series.kind() {
                    SeriesKind::Bar => {
                        let position = match stack_riser_position {
                            Some(position) => position,
                            None => {
                                let position = riser_cnt;
                                riser_cnt += 1;
                                stack_riser_position = Some(position);
                                position
                            }
                        };
                        series.set_riser_index(base_risers + position);
                        accumulate_stack(&mut stack_bar, series);
                    }
                    SeriesKind::Line => {
                        accumulate_stack(&mut stack_line, series);
                    }
                }
            } else if series.kind() == SeriesKind::Bar {
                series.set_riser_index(base_risers + riser_cnt);
                riser_cnt += 1;
            }
        }

        self.axes[x_id].set_num_risers(base_risers + riser_cnt);
    }
}

/// Category-mode compression input: one point per label position, taking Y
/// from the series data where present and 0 where the series is shorter
/// than the label list.
fn category_projection(series: &Series, label_count: usize) -> Vec<Point> {
    let data = series.data();
    (0..label_count)
        .map(|i| Point::new(i as f64, data.get(i).map_or(0.0, |p| p.y)))
        .collect()
}

/// Adds the series' Y values into the per-category running totals through
/// exact decimal arithmetic, then hands the series a snapshot of the
/// totals. Categories past the end of the series data keep their previous
/// totals.
fn accumulate_stack(totals: &mut [Decimal], series: &mut Series) {
    if totals.is_empty() {
        return;
    }
    for (i, total) in totals.iter_mut().enumerate() {
        let Some(point) = series.data().get(i) else {
            break;
        };
        *total += Decimal::from_f64(point.y).unwrap_or(Decimal::ZERO);
    }
    let snapshot: Vec<f64> = totals.iter().map(|d| d.to_f64().unwrap_or(0.0)).collect();
    series.set_stack_series(snapshot);
}
