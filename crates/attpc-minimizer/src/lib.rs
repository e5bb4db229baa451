//! # attpc-minimizer
//!
//! Monte-Carlo contracting-hypercube parameter search: narrows a
//! 7-parameter hypercube against a composite chi² objective by repeatedly
//! tracking and projecting candidate trajectories.

mod error;
mod minimizer;
mod support;

pub use error::MinimizerError;
pub use minimizer::Minimizer;
pub use support::{find_hit_pattern_deviation, find_position_deviations};

pub type Result<T> = std::result::Result<T, MinimizerError>;
