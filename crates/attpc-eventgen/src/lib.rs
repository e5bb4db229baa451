//! # attpc-eventgen
//!
//! Converts a simulated [`Trajectory`](https://docs.rs/attpc-tracker) into
//! what the AT-TPC's electronics would have recorded: a per-pad signal, a
//! mesh (all-pad sum), a hit pattern (per-pad integral), and a peaks table.

mod error;
mod generator;
mod types;

pub use error::EventGenError;
pub use generator::EventGenerator;
pub use types::{HitPattern, PadSignal, PeaksTable};

pub type Result<T> = std::result::Result<T, EventGenError>;
