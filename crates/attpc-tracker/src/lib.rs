//! # attpc-tracker
//!
//! Integrates the relativistic equation of motion of a single charged
//! particle through a gas, under the Lorentz force and continuous energy
//! loss, producing a [`Trajectory`].

mod error;
mod stepper;
mod tracker;
mod trajectory;

pub use error::TrackerError;
pub use tracker::Tracker;
pub use trajectory::Trajectory;

pub type Result<T> = std::result::Result<T, TrackerError>;
