//! Physical and detector constants.

/// Speed of light, in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Proton mass, in MeV/c^2.
pub const PROTON_MASS_MEV: f64 = 938.272_088_16;

/// Elementary charge, in coulombs.
pub const ELEMENTARY_CHARGE_C: f64 = 1.602_176_634e-19;

/// One MeV, in joules.
pub const MEV_TO_JOULE: f64 = ELEMENTARY_CHARGE_C * 1.0e6;

/// Default chamber radius, in meters: a track crossing this is considered
/// to have left the active volume.
pub const DEFAULT_CHAMBER_RADIUS_M: f64 = 0.29;

/// Default chamber length along z, in meters.
pub const DEFAULT_CHAMBER_LENGTH_M: f64 = 1.0;

/// Sentinel pad id meaning "no pad beneath this point".
pub const PAD_NONE: u16 = u16::MAX;

/// Number of triangular pads in the canonical AT-TPC pad plane.
pub const NUM_PADS: usize = 10_240;

/// Number of electronics time buckets sampled per pad, per event.
pub const NUM_TIME_BUCKETS: usize = 512;

/// Default minimum kinetic energy per nucleon at which a track is
/// considered stopped, in MeV/u.
pub const DEFAULT_E_MIN_MEV_PER_U: f64 = 1.0e-3;

/// Default safety cap on the number of integration steps in a single track.
pub const DEFAULT_MAX_SAMPLES: usize = 100_000;

/// Default fixed integration step, in seconds.
pub const DEFAULT_DT_SECONDS: f64 = 1.0e-9;

/// Default position-chi2 normalizer, in meters.
pub const DEFAULT_POS_CHI2_NORM_M: f64 = 0.01;

/// Default energy-chi2 normalizer fraction of total experimental hits.
pub const DEFAULT_EN_CHI2_NORM_FRACTION: f64 = 0.10;

/// Default vertex-chi2 tolerance, in meters.
pub const DEFAULT_VERT_CHI2_TOLERANCE_M: f64 = 0.01;

/// Number of consecutive fully-failing minimizer iterations before
/// `MinimizationStalled` is raised.
pub const STALL_LIMIT: usize = 3;
