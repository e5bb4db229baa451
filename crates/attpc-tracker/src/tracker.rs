use attpc_common::{Config, ELEMENTARY_CHARGE_C, MEV_TO_JOULE, PROTON_MASS_MEV, SPEED_OF_LIGHT};
use attpc_gas::GasModel;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::error::TrackerError;
use crate::stepper::{Rk4Stepper, State};
use crate::trajectory::{is_finite_state, Trajectory};

/// Integrates the relativistic equation of motion of a charged particle
/// through a gas under the Lorentz force, with continuous energy loss.
///
/// Holds a non-owning reference to a [`GasModel`] and an owned [`Config`]
/// clone for the physical/integrator parameters it needs (species, fields,
/// `dt`, `E_min`, sample cap, chamber extent).
#[derive(Debug, Clone)]
pub struct Tracker<'g> {
    gas: &'g GasModel,
    config: Config,
}

impl<'g> Tracker<'g> {
    /// Builds a tracker for the species and fields described by `config`,
    /// against `gas`'s stopping-power table.
    pub fn new(gas: &'g GasModel, config: Config) -> Result<Self, TrackerError> {
        if config.mass_number == 0 {
            return Err(TrackerError::InvalidArgument("mass_number must be nonzero"));
        }
        Ok(Self { gas, config })
    }

    /// The fixed integration step, in seconds, used by [`Self::track_particle`].
    pub fn dt_seconds(&self) -> f64 {
        self.config.dt_seconds
    }

    /// Integrates one trajectory starting at vertex `(x0, y0, z0)` with
    /// kinetic energy per nucleon `e_per_u0` (MeV/u) and emission direction
    /// `(azimuth, polar)` (radians), under `config`'s magnetic field as
    /// given.
    pub fn track_particle(
        &self,
        x0: f64,
        y0: f64,
        z0: f64,
        e_per_u0: f64,
        azimuth: f64,
        polar: f64,
    ) -> Result<Trajectory, TrackerError> {
        self.integrate(x0, y0, z0, e_per_u0, azimuth, polar, self.config.b_field)
    }

    /// As [`Self::track_particle`], but overrides the magnetic field's
    /// magnitude with `b_mag`, keeping `config.b_field`'s direction (falling
    /// back to the +z axis if that field is zero). This is what lets the
    /// minimizer fit `b_mag` as a free parameter per candidate without
    /// rebuilding a `Tracker` per sample.
    pub fn track_particle_with_b_mag(
        &self,
        x0: f64,
        y0: f64,
        z0: f64,
        e_per_u0: f64,
        azimuth: f64,
        polar: f64,
        b_mag: f64,
    ) -> Result<Trajectory, TrackerError> {
        let b = self.config.b_field;
        let b_norm = (b[0] * b[0] + b[1] * b[1] + b[2] * b[2]).sqrt();
        let unit = if b_norm > 0.0 {
            [b[0] / b_norm, b[1] / b_norm, b[2] / b_norm]
        } else {
            [0.0, 0.0, 1.0]
        };
        let b_field = [unit[0] * b_mag, unit[1] * b_mag, unit[2] * b_mag];
        self.integrate(x0, y0, z0, e_per_u0, azimuth, polar, b_field)
    }

    fn integrate(
        &self,
        x0: f64,
        y0: f64,
        z0: f64,
        e_per_u0: f64,
        azimuth: f64,
        polar: f64,
        b_field: [f64; 3],
    ) -> Result<Trajectory, TrackerError> {
        if e_per_u0 < 0.0 {
            return Err(TrackerError::InvalidArgument("e_per_u0 must be non-negative"));
        }

        let a = f64::from(self.config.mass_number);
        let mass_mev = a * PROTON_MASS_MEV;

        let total_e = a * (e_per_u0 + PROTON_MASS_MEV);
        let p_mag = (total_e * total_e - mass_mev * mass_mev).max(0.0).sqrt();

        let (sin_polar, cos_polar) = polar.sin_cos();
        let (sin_az, cos_az) = azimuth.sin_cos();
        let dir = [sin_polar * cos_az, sin_polar * sin_az, cos_polar];

        let mut state: State = [x0, y0, z0, p_mag * dir[0], p_mag * dir[1], p_mag * dir[2]];

        let stepper = Rk4Stepper::new(self.config.dt_seconds);
        let mut traj = Trajectory::with_capacity(self.config.max_samples.min(4096));

        self.push_sample(&mut traj, state, 0.0)?;

        let mut t = 0.0;
        for _ in 0..self.config.max_samples {
            if self.current_e_per_u(state) < self.config.e_min_mev_per_u || self.has_left_chamber(state) {
                break;
            }

            state = stepper.next_state(state, |s| self.rhs(s, b_field));
            t += stepper.dt();

            if !is_finite_state(&state) {
                return Err(TrackerError::NumericalError);
            }

            self.push_sample(&mut traj, state, t)?;
        }

        Ok(traj)
    }

    /// Integrates `inputs` (each `(x0, y0, z0, e_per_u0, azimuth, polar)`) in
    /// parallel via `rayon`, reporting progress on an `indicatif` bar — the
    /// common `par_iter` + progress-bar pattern for data-parallel batch
    /// work. Order of the returned `Vec` matches `inputs`.
    pub fn track_many(
        &self,
        inputs: &[(f64, f64, f64, f64, f64, f64)],
    ) -> Vec<Result<Trajectory, TrackerError>>
    where
        Self: Sync,
    {
        let bar = ProgressBar::new(inputs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("tracking {pos}/{len} [{bar:40}] {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let results = inputs
            .par_iter()
            .map(|&(x0, y0, z0, e0, az, pol)| {
                let r = self.track_particle(x0, y0, z0, e0, az, pol);
                bar.inc(1);
                r
            })
            .collect();

        bar.finish_and_clear();
        results
    }

    fn push_sample(&self, traj: &mut Trajectory, s: State, t: f64) -> Result<(), TrackerError> {
        let [x, y, z, px, py, pz] = s;
        let p_mag = (px * px + py * py + pz * pz).sqrt();
        let a = f64::from(self.config.mass_number);
        let mass_mev = a * PROTON_MASS_MEV;
        let total_e = (p_mag * p_mag + mass_mev * mass_mev).sqrt();
        let e_per_u = (total_e - mass_mev) / a;

        let polar = if p_mag > 0.0 { (pz / p_mag).acos() } else { 0.0 };
        let azimuth = py.atan2(px);

        traj.push_sample(x, y, z, t, e_per_u, azimuth, polar, px, py, pz);
        Ok(())
    }

    fn current_e_per_u(&self, s: State) -> f64 {
        let [_, _, _, px, py, pz] = s;
        let p_mag = (px * px + py * py + pz * pz).sqrt();
        let a = f64::from(self.config.mass_number);
        let mass_mev = a * PROTON_MASS_MEV;
        let total_e = (p_mag * p_mag + mass_mev * mass_mev).sqrt();
        (total_e - mass_mev) / a
    }

    fn has_left_chamber(&self, s: State) -> bool {
        let [x, y, z, ..] = s;
        let r_transverse = (x * x + y * y).sqrt();
        r_transverse > self.config.chamber_radius_m
            || z < 0.0
            || z > self.config.chamber_length_m
    }

    /// The RHS `f(s) = ds/dt`: velocity from the relativistic
    /// momentum-energy relation, continuous energy loss
    /// (`stopping_power · |v|`, reducing `|p|` along its own direction),
    /// plus the Lorentz force under `b_field`.
    fn rhs(&self, s: State, b_field: [f64; 3]) -> State {
        let [_, _, _, px, py, pz] = s;
        let z = f64::from(self.config.charge_number);
        let a = f64::from(self.config.mass_number);
        let mass_mev = a * PROTON_MASS_MEV;

        let p_mag = (px * px + py * py + pz * pz).sqrt();
        let total_e = (p_mag * p_mag + mass_mev * mass_mev).sqrt();

        // v_i = (p_i / E_total) * c  (p_i in MeV/c, E_total in MeV — the
        // ratio is dimensionless beta, so this is exact, not approximate).
        let v = [
            px / total_e * SPEED_OF_LIGHT,
            py / total_e * SPEED_OF_LIGHT,
            pz / total_e * SPEED_OF_LIGHT,
        ];
        let speed = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();

        let e_per_u = (total_e - mass_mev) / a;
        let d_eloss_dt = self.gas.stopping_power(e_per_u) * speed; // MeV/s

        // Energy loss reduces |p| at fixed direction: dE_total/dt =
        // -d_eloss_dt, and d|p|/dE_total = E_total/|p|.
        let p_hat = if p_mag > 0.0 {
            [px / p_mag, py / p_mag, pz / p_mag]
        } else {
            [0.0, 0.0, 0.0]
        };
        let d_p_mag_dt_loss = if p_mag > 0.0 {
            -(total_e / p_mag) * d_eloss_dt
        } else {
            0.0
        };

        let e_field = self.config.e_field;
        let v_cross_b = [
            v[1] * b_field[2] - v[2] * b_field[1],
            v[2] * b_field[0] - v[0] * b_field[2],
            v[0] * b_field[1] - v[1] * b_field[0],
        ];
        // Lorentz force in newtons, then converted to MeV/c per second.
        let force_n = [
            z * ELEMENTARY_CHARGE_C * (e_field[0] + v_cross_b[0]),
            z * ELEMENTARY_CHARGE_C * (e_field[1] + v_cross_b[1]),
            z * ELEMENTARY_CHARGE_C * (e_field[2] + v_cross_b[2]),
        ];
        let dp_lorentz_dt = [
            force_n[0] * SPEED_OF_LIGHT / MEV_TO_JOULE,
            force_n[1] * SPEED_OF_LIGHT / MEV_TO_JOULE,
            force_n[2] * SPEED_OF_LIGHT / MEV_TO_JOULE,
        ];

        [
            v[0],
            v[1],
            v[2],
            dp_lorentz_dt[0] + d_p_mag_dt_loss * p_hat[0],
            dp_lorentz_dt[1] + d_p_mag_dt_loss * p_hat[1],
            dp_lorentz_dt[2] + d_p_mag_dt_loss * p_hat[2],
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attpc_gas::GasModel;

    fn vacuum_gas() -> GasModel {
        GasModel::new(vec![0.0; 10], vec![0.0; 10]).unwrap()
    }

    #[test]
    fn straight_line_in_vacuum_with_no_field_matches_s1() {
        let gas = vacuum_gas();
        let mut cfg = Config::default();
        cfg.e_field = [0.0; 3];
        cfg.b_field = [0.0; 3];
        cfg.dt_seconds = 1.0e-9;
        cfg.max_samples = 10;
        let tracker = Tracker::new(&gas, cfg).unwrap();

        let traj = tracker
            .track_particle(0.0, 0.0, 0.0, 2.0, 0.0, std::f64::consts::FRAC_PI_2)
            .unwrap();

        for i in 0..traj.len() {
            assert!(traj.z().as_slice().unwrap()[i].abs() < 1e-9);
        }
    }

    #[test]
    fn energy_is_non_increasing_when_stopping_power_is_positive() {
        let gas = GasModel::new(vec![5.0; 5000], vec![0.0; 1000]).unwrap();
        let mut cfg = Config::default();
        cfg.e_field = [0.0; 3];
        cfg.b_field = [0.0; 3];
        cfg.dt_seconds = 1.0e-10;
        cfg.max_samples = 500;
        cfg.chamber_radius_m = 10.0;
        cfg.chamber_length_m = 100.0;
        let tracker = Tracker::new(&gas, cfg).unwrap();

        let traj = tracker.track_particle(0.0, 0.0, 0.5, 2.0, 0.0, 0.0).unwrap();
        let e = traj.e_per_u();
        for i in 1..e.len() {
            assert!(e[i] <= e[i - 1] + 1e-12);
        }
    }

    #[test]
    fn axial_field_curves_trajectory_with_the_analytic_radius() {
        let gas = vacuum_gas();
        let mut cfg = Config::default();
        cfg.mass_number = 4;
        cfg.charge_number = 2;
        cfg.e_field = [0.0; 3];
        cfg.b_field = [0.0, 0.0, 0.5];
        cfg.dt_seconds = 1.0e-11;
        cfg.max_samples = 2000;
        cfg.chamber_radius_m = 10.0;
        cfg.chamber_length_m = 100.0;
        cfg.e_min_mev_per_u = 1.0e-6;
        let tracker = Tracker::new(&gas, cfg.clone()).unwrap();

        let traj = tracker
            .track_particle(0.0, 0.0, 0.5, 2.0, 0.0, std::f64::consts::FRAC_PI_2)
            .unwrap();

        let a = cfg.mass_number as f64;
        let mass_mev = a * PROTON_MASS_MEV;
        let total_e = a * (2.0 + PROTON_MASS_MEV);
        let p_mag = (total_e * total_e - mass_mev * mass_mev).sqrt();
        // p [MeV/c] -> SI via MEV_TO_JOULE/c, then r = p_SI / (|q| B).
        let p_si = p_mag * MEV_TO_JOULE / SPEED_OF_LIGHT;
        let expected_r = p_si / (cfg.charge_number as f64 * ELEMENTARY_CHARGE_C * cfg.b_field[2]);

        let xs = traj.x();
        let ys = traj.y();
        let max_r = (0..traj.len())
            .map(|i| (xs[i] * xs[i] + ys[i] * ys[i]).sqrt())
            .fold(0.0, f64::max);

        assert!((max_r - expected_r).abs() / expected_r < 0.05);
    }

    #[test]
    fn mass_number_zero_is_rejected() {
        let gas = vacuum_gas();
        let mut cfg = Config::default();
        cfg.mass_number = 0;
        let err = Tracker::new(&gas, cfg).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidArgument(_)));
    }

    #[test]
    fn track_many_preserves_input_order() {
        let gas = vacuum_gas();
        let mut cfg = Config::default();
        cfg.dt_seconds = 1.0e-9;
        cfg.max_samples = 5;
        let tracker = Tracker::new(&gas, cfg).unwrap();

        let inputs: Vec<_> = (0..8)
            .map(|i| (0.0, 0.0, 0.0, 2.0, i as f64 * 0.1, std::f64::consts::FRAC_PI_2))
            .collect();
        let results = tracker.track_many(&inputs);
        assert_eq!(results.len(), inputs.len());
        for (r, &(_, _, _, _, az, _)) in results.iter().zip(inputs.iter()) {
            let traj = r.as_ref().unwrap();
            assert!((traj.azimuth()[0] - az).abs() < 1e-9);
        }
    }

    #[test]
    fn track_particle_with_b_mag_overrides_only_the_magnitude() {
        let gas = vacuum_gas();
        let mut cfg = Config::default();
        cfg.mass_number = 4;
        cfg.charge_number = 2;
        cfg.e_field = [0.0; 3];
        cfg.b_field = [0.0, 0.0, 1.0]; // direction only, magnitude overridden below
        cfg.dt_seconds = 1.0e-11;
        cfg.max_samples = 2000;
        cfg.chamber_radius_m = 10.0;
        cfg.chamber_length_m = 100.0;
        cfg.e_min_mev_per_u = 1.0e-6;
        let tracker = Tracker::new(&gas, cfg.clone()).unwrap();

        let traj = tracker
            .track_particle_with_b_mag(0.0, 0.0, 0.5, 2.0, 0.0, std::f64::consts::FRAC_PI_2, 0.5)
            .unwrap();

        let a = cfg.mass_number as f64;
        let mass_mev = a * PROTON_MASS_MEV;
        let total_e = a * (2.0 + PROTON_MASS_MEV);
        let p_mag = (total_e * total_e - mass_mev * mass_mev).sqrt();
        let p_si = p_mag * MEV_TO_JOULE / SPEED_OF_LIGHT;
        let expected_r = p_si / (cfg.charge_number as f64 * ELEMENTARY_CHARGE_C * 0.5);

        let xs = traj.x();
        let ys = traj.y();
        let max_r = (0..traj.len())
            .map(|i| (xs[i] * xs[i] + ys[i] * ys[i]).sqrt())
            .fold(0.0, f64::max);

        assert!((max_r - expected_r).abs() / expected_r < 0.05);
    }
}
