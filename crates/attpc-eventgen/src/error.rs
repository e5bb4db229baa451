/// Errors projecting a trajectory to pad-plane electronics signals.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EventGenError {
    /// The tracker produced fewer than 2 samples — there is no segment to
    /// project.
    #[error("trajectory has fewer than 2 samples")]
    EmptyTrajectory,

    /// `positions` and `energies_mev` had mismatched lengths.
    #[error("invalid event generator argument: {0}")]
    InvalidArgument(&'static str),
}
