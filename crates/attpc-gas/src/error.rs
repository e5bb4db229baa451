/// Errors constructing a [`crate::GasModel`].
///
/// Lookups themselves never fail: out-of-range energies clamp to the
/// nearest table endpoint. Only construction from a degenerate table can.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// A table passed to [`crate::GasModel::new`] had zero length.
    #[error("gas table {0:?} is empty")]
    EmptyTable(&'static str),

    /// A table contained a non-finite (NaN or infinite) value.
    #[error("gas table {0:?} contains a non-finite value")]
    NonFiniteInput(&'static str),
}
