//! # attpc
//!
//! Facade crate for the AT-TPC charged-particle trajectory reconstruction
//! engine: re-exports every public type from the leaf crates so a caller
//! depends on one crate.
//!
//! The core data flow for reconstruction: observed peak positions, per-pad
//! hit amplitudes, and a beam-axis prior go into [`Minimizer::minimize`],
//! which draws candidate [`ParameterVector`]s, simulates each with
//! [`Tracker::track_particle`], projects the result with
//! [`EventGenerator::make_hit_pattern`]/[`EventGenerator::make_peaks`],
//! scores it against the observations, and narrows the search hypercube.

mod error;

pub use attpc_common::{
    BeamPrior, Chi2Set, Config, MinimizeResult, ParameterVector, ELEMENTARY_CHARGE_C, NUM_PADS,
    NUM_TIME_BUCKETS, PAD_NONE, PROTON_MASS_MEV, SPEED_OF_LIGHT,
};
pub use attpc_eventgen::{EventGenError, EventGenerator, HitPattern, PadSignal, PeaksTable};
pub use attpc_gas::{GasError, GasModel};
pub use attpc_minimizer::{find_hit_pattern_deviation, find_position_deviations, Minimizer, MinimizerError};
pub use attpc_padplane::{generate_pad_coordinates, PadPlane, PadPlaneBuilder, PadPlaneError, PadVertices};
pub use attpc_tracker::{Tracker, TrackerError, Trajectory};

pub use error::AttpcError;

pub type Result<T> = std::result::Result<T, AttpcError>;
