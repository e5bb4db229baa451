/// Errors building or querying a [`crate::PadPlane`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PadPlaneError {
    /// A grid step (`dx`/`dy`) was not strictly positive.
    #[error("pad plane grid step {0:?} must be positive")]
    InvalidStep(&'static str),

    /// A query point discretized to a raster cell outside the lookup
    /// table's bounds. Recoverable: callers typically treat this as
    /// [`attpc_common::PAD_NONE`] rather than propagating it — the event
    /// generator does exactly that when a drifted charge lands off-plane.
    #[error("({x}, {y}) is outside the pad plane raster bounds")]
    OutOfBounds {
        /// Queried x coordinate, in meters.
        x: f64,
        /// Queried y coordinate, in meters.
        y: f64,
    },
}
