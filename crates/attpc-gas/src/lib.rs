//! # attpc-gas
//!
//! [`GasModel`] answers two questions for the [`Tracker`](https://docs.rs/attpc-tracker):
//! "how much energy per unit length does a particle lose at energy E in this
//! gas" and "what is the residual energy of a beam particle after
//! penetrating depth z from the detector entrance". Both are linear
//! interpolations over tables the caller builds from an external gas
//! physics library — this crate treats the tables as authoritative and
//! never refits or extrapolates them.

mod error;
mod model;

pub use error::GasError;
pub use model::GasModel;

pub type Result<T> = std::result::Result<T, GasError>;
