use attpc_common::ParameterVector;

/// Errors from [`crate::Minimizer::minimize`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MinimizerError {
    /// Three consecutive iterations in which every candidate failed.
    /// Carries the best-known center — the last iteration's winning
    /// parameter vector.
    #[error("minimization stalled; best known center: {best_center:?}")]
    MinimizationStalled {
        /// The best-known center at the point of stalling.
        best_center: ParameterVector,
    },

    /// The cooperative cancellation flag was observed set at an iteration
    /// boundary. No partial result is returned.
    #[error("minimization was cancelled")]
    Cancelled,

    /// An argument outside its valid domain (e.g. `redFactor` not in
    /// `(0, 1]`).
    #[error("invalid minimizer argument: {0}")]
    InvalidArgument(&'static str),

    /// An accumulated result buffer didn't have the shape its own capacity
    /// math promised. Should never happen; surfaced as an error rather than
    /// a panic since it still occurs inside a `Result`-returning call.
    #[error("internal shape mismatch building minimizer result: {0}")]
    ResultShapeMismatch(&'static str),
}
