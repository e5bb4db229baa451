use crate::{
    DEFAULT_CHAMBER_LENGTH_M, DEFAULT_CHAMBER_RADIUS_M, DEFAULT_DT_SECONDS,
    DEFAULT_E_MIN_MEV_PER_U, DEFAULT_EN_CHI2_NORM_FRACTION, DEFAULT_MAX_SAMPLES,
    DEFAULT_POS_CHI2_NORM_M, DEFAULT_VERT_CHI2_TOLERANCE_M,
};

/// Detector and tracked-species configuration.
///
/// Built directly by the caller: no file or environment loading happens in
/// this crate. Fields with a natural default (tolerances, step size, safety
/// caps) are populated by [`Config::default`]; everything detector/species
/// specific must be set explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mass number of the tracked species.
    pub mass_number: u16,
    /// Charge number of the tracked species.
    pub charge_number: u16,
    /// Electric field, in V/m.
    pub e_field: [f64; 3],
    /// Magnetic field, in T.
    pub b_field: [f64; 3],
    /// Mean ionization potential of the gas, in eV.
    pub ionization_ev: f64,
    /// Micromegas amplification gain.
    pub micromegas_gain: f64,
    /// Electronics gain, multiplied by the elementary charge downstream.
    pub electronics_gain: f64,
    /// Tilt angle of the pad plane about the x-axis, in radians.
    pub tilt_rad: f64,
    /// Drift velocity, in m/s (use [`Config::with_drift_velocity_cm_per_us`]
    /// to set it from the more common cm/us unit). Only the magnitude of the
    /// z-component is physically meaningful: drift is always toward the pad
    /// plane at z=0, regardless of the stored sign.
    pub drift_velocity: [f64; 3],
    /// Electronics clock, in Hz (external unit is MHz).
    pub clock_hz: f64,
    /// Shaping amplifier time constant, in seconds.
    pub shaping_time_s: f64,
    /// Lateral diffusion coefficient, in m/sqrt(m) (so that
    /// `sigma = diffusion_sigma * sqrt(drift_distance_m)`).
    pub diffusion_sigma: f64,
    /// Minimum kinetic energy per nucleon before a track is stopped, MeV/u.
    pub e_min_mev_per_u: f64,
    /// Fixed RK4 integration step, in seconds.
    pub dt_seconds: f64,
    /// Safety cap on the number of samples in one trajectory.
    pub max_samples: usize,
    /// Chamber radius, in meters: tracks with transverse radius beyond this
    /// are considered to have left the active volume.
    pub chamber_radius_m: f64,
    /// Chamber length along z, in meters: tracks outside `[0, length]` are
    /// considered to have left the active volume.
    pub chamber_length_m: f64,
    /// Position chi2 normalizer, in meters.
    pub pos_chi2_norm_m: f64,
    /// Energy chi2 normalizer, as a fraction of total experimental hits.
    pub en_chi2_norm_fraction: f64,
    /// Vertex chi2 tolerance, in meters.
    pub vert_chi2_tolerance_m: f64,
    /// Enables the position-chi2 term.
    pub pos_chi2_enabled: bool,
    /// Enables the energy(hit-pattern)-chi2 term.
    pub en_chi2_enabled: bool,
    /// Enables the vertex-chi2 term.
    pub vert_chi2_enabled: bool,
}

impl Config {
    /// Sets [`Config::drift_velocity`] from a cm/us magnitude, oriented
    /// toward z=0 as required by the drift convention.
    pub fn with_drift_velocity_cm_per_us(mut self, vx: f64, vy: f64, vz_mag: f64) -> Self {
        self.drift_velocity = [vx * 1.0e4, vy * 1.0e4, vz_mag.abs() * 1.0e4];
        self
    }

    /// Sets [`Config::clock_hz`] from a MHz value.
    pub fn with_clock_mhz(mut self, clock_mhz: f64) -> Self {
        self.clock_hz = clock_mhz * 1.0e6;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mass_number: 1,
            charge_number: 1,
            e_field: [0.0; 3],
            b_field: [0.0; 3],
            ionization_ev: 41.0,
            micromegas_gain: 1.0,
            electronics_gain: 1.0,
            tilt_rad: 0.0,
            drift_velocity: [0.0, 0.0, 1.0e4],
            clock_hz: 25.0e6,
            shaping_time_s: 1.0e-6,
            diffusion_sigma: 1.0e-3,
            e_min_mev_per_u: DEFAULT_E_MIN_MEV_PER_U,
            dt_seconds: DEFAULT_DT_SECONDS,
            max_samples: DEFAULT_MAX_SAMPLES,
            chamber_radius_m: DEFAULT_CHAMBER_RADIUS_M,
            chamber_length_m: DEFAULT_CHAMBER_LENGTH_M,
            pos_chi2_norm_m: DEFAULT_POS_CHI2_NORM_M,
            en_chi2_norm_fraction: DEFAULT_EN_CHI2_NORM_FRACTION,
            vert_chi2_tolerance_m: DEFAULT_VERT_CHI2_TOLERANCE_M,
            pos_chi2_enabled: true,
            en_chi2_enabled: true,
            vert_chi2_enabled: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_is_physically_sane() {
        let cfg = Config::default();
        assert!(cfg.ionization_ev > 0.0);
        assert!(cfg.dt_seconds > 0.0);
        assert!(cfg.max_samples > 0);
    }

    #[test]
    fn drift_velocity_builder_converts_units_and_takes_magnitude() {
        let cfg = Config::default().with_drift_velocity_cm_per_us(0.0, 0.0, -2.5);
        assert_eq!(cfg.drift_velocity, [0.0, 0.0, 2.5e4]);
    }

    #[test]
    fn clock_builder_converts_mhz_to_hz() {
        let cfg = Config::default().with_clock_mhz(25.0);
        assert_eq!(cfg.clock_hz, 25.0e6);
    }
}
