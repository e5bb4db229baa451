/// Errors produced while integrating a trajectory.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// A NaN or infinite value appeared in the integrator state — typically
    /// an unstable step size or a zero total energy.
    #[error("numerical instability detected during integration")]
    NumericalError,

    /// An input parameter was out of its physically valid domain (e.g. mass
    /// number zero, negative initial energy).
    #[error("invalid tracker argument: {0}")]
    InvalidArgument(&'static str),
}
