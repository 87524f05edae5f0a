// File: crates/gridline-core/src/error.rs
// Summary: Library error taxonomy for chart/axis/series operations.

use thiserror::Error;

/// Errors surfaced synchronously by the core API. Operations either fully
/// succeed or reject with the chart state unchanged.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A malformed argument: empty series id, NaN range bound, inverted or
    /// degenerate range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation that is not legal in the current chart state, e.g.
    /// enabling log scale over non-positive data or category mode on a Y
    /// axis, or addressing an unknown series id.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
