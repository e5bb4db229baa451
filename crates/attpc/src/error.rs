use attpc_eventgen::EventGenError;
use attpc_gas::GasError;
use attpc_minimizer::MinimizerError;
use attpc_padplane::PadPlaneError;
use attpc_tracker::TrackerError;

/// The union of every leaf crate's error type, for callers who depend on
/// this facade alone.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AttpcError {
    /// See [`GasError`].
    #[error(transparent)]
    Gas(#[from] GasError),

    /// See [`PadPlaneError`].
    #[error(transparent)]
    PadPlane(#[from] PadPlaneError),

    /// See [`TrackerError`].
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// See [`EventGenError`].
    #[error(transparent)]
    EventGen(#[from] EventGenError),

    /// See [`MinimizerError`].
    #[error(transparent)]
    Minimizer(#[from] MinimizerError),
}
