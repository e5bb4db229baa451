//! # attpc-common
//!
//! Shared value types used across the AT-TPC reconstruction engine: physical
//! constants, the detector/species [`Config`], and the plain data records
//! ([`ParameterVector`], [`Chi2Set`], [`BeamPrior`], [`MinimizeResult`])
//! passed between [`Tracker`](https://docs.rs/attpc-tracker),
//! [`EventGenerator`](https://docs.rs/attpc-eventgen) and
//! [`Minimizer`](https://docs.rs/attpc-minimizer).
//!
//! Nothing here does file I/O or parsing: [`Config`] is built by the caller.

mod config;
mod constants;
mod macros;
mod params;

pub use config::Config;
pub use constants::*;
pub use params::{BeamPrior, Chi2Set, MinimizeResult, ParameterVector};
