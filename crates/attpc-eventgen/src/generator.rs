use std::collections::BTreeMap;

use attpc_common::{Config, ELEMENTARY_CHARGE_C, NUM_PADS, NUM_TIME_BUCKETS, PAD_NONE};
use attpc_padplane::{generate_pad_coordinates, PadPlane};
use ndarray::Array1;

use crate::error::EventGenError;
use crate::types::{HitPattern, PadSignal, PeaksTable};

/// Projects a simulated trajectory onto the pad plane as the electronics
/// would have recorded it.
///
/// Holds a non-owning reference to a [`PadPlane`] plus the detector
/// parameters it needs from [`Config`] (ionization potential, tilt, drift
/// velocity, clock, shaping time, diffusion coefficient, gains). Every
/// public operation is derived from [`Self::make_event`] so that properties
/// 3 ("mesh = per-pad sum") and 4 ("hit pattern = per-pad integral") hold by
/// construction rather than needing to be kept in sync by hand.
#[derive(Debug, Clone)]
pub struct EventGenerator<'p> {
    plane: &'p PadPlane,
    pad_centroids: Vec<[f64; 2]>,
    config: Config,
}

impl<'p> EventGenerator<'p> {
    /// Builds an event generator against `plane`, using the detector
    /// parameters in `config`.
    pub fn new(plane: &'p PadPlane, config: Config) -> Self {
        let pads = generate_pad_coordinates(plane.theta());
        let pad_centroids = pads
            .iter()
            .map(|tri| {
                [
                    (tri[0][0] + tri[1][0] + tri[2][0]) / 3.0,
                    (tri[0][1] + tri[1][1] + tri[2][1]) / 3.0,
                ]
            })
            .collect();
        Self {
            plane,
            pad_centroids,
            config,
        }
    }

    /// Builds the sparse per-pad time-domain signal for one trajectory.
    /// `positions` and `energies_mev` must have equal length and share an
    /// index: `energies_mev[i]` is the particle's total kinetic energy
    /// (MeV, not per-nucleon) at `positions[i]`.
    pub fn make_event(
        &self,
        positions: &[[f64; 3]],
        energies_mev: &[f64],
    ) -> Result<PadSignal, EventGenError> {
        if positions.len() != energies_mev.len() {
            return Err(EventGenError::InvalidArgument(
                "positions and energies_mev must have equal length",
            ));
        }
        if positions.len() < 2 {
            return Err(EventGenError::EmptyTrajectory);
        }

        let kernel = shaping_kernel(self.config.shaping_time_s, self.config.clock_hz);
        let mut raw: BTreeMap<u16, Vec<f64>> = BTreeMap::new();

        for i in 0..positions.len() - 1 {
            let delta_e = energies_mev[i] - energies_mev[i + 1];
            let n_e = delta_e * 1.0e6 / self.config.ionization_ev;

            let mx = (positions[i][0] + positions[i + 1][0]) / 2.0;
            let my = (positions[i][1] + positions[i + 1][1]) / 2.0;
            let mz = (positions[i][2] + positions[i + 1][2]) / 2.0;

            // Tilt correction: rotate about the x-axis by -tilt.
            let (yt, zt) = rotate_about_x(my, mz, -self.config.tilt_rad);
            let xt = mx;

            // `drift_velocity`'s z-component magnitude is always the speed
            // toward the pad plane at z=0, regardless of its stored sign.
            let vz_mag = self.config.drift_velocity[2].abs();
            if vz_mag <= 0.0 {
                continue;
            }
            let t_drift = zt.abs() / vz_mag;
            let x_final = xt + self.config.drift_velocity[0] * t_drift;
            let y_final = yt + self.config.drift_velocity[1] * t_drift;

            let tb = ((t_drift * self.config.clock_hz).floor() as isize)
                .clamp(0, NUM_TIME_BUCKETS as isize - 1) as usize;

            let drift_distance = zt.abs();
            let sigma = self.config.diffusion_sigma * drift_distance.sqrt();

            self.deposit(&mut raw, x_final, y_final, tb, n_e, sigma);
        }

        let gain = self.config.micromegas_gain * self.config.electronics_gain * ELEMENTARY_CHARGE_C;
        let mut pad_ids = Vec::with_capacity(raw.len());
        let mut amplitudes = Vec::with_capacity(raw.len());
        for (pad_id, series) in raw {
            let shaped = convolve_causal(&series, &kernel);
            pad_ids.push(pad_id);
            amplitudes.push(shaped.into_iter().map(|v| v * gain).collect());
        }

        Ok(PadSignal { pad_ids, amplitudes })
    }

    /// The summed signal across all pads.
    pub fn make_mesh_signal(
        &self,
        positions: &[[f64; 3]],
        energies_mev: &[f64],
    ) -> Result<Array1<f64>, EventGenError> {
        let event = self.make_event(positions, energies_mev)?;
        let mut mesh = vec![0.0; NUM_TIME_BUCKETS];
        for (_, amp) in event.iter() {
            for (m, a) in mesh.iter_mut().zip(amp) {
                *m += a;
            }
        }
        Ok(Array1::from(mesh))
    }

    /// The per-pad integrated amplitude.
    pub fn make_hit_pattern(
        &self,
        positions: &[[f64; 3]],
        energies_mev: &[f64],
    ) -> Result<HitPattern, EventGenError> {
        let event = self.make_event(positions, energies_mev)?;
        let mut pattern = vec![0.0; NUM_PADS];
        for (pad_id, amp) in event.iter() {
            pattern[pad_id as usize] = amp.iter().sum();
        }
        Ok(HitPattern(Array1::from(pattern)))
    }

    /// One row per pad touched: centroid, peak time bucket, integrated
    /// amplitude.
    pub fn make_peaks(
        &self,
        positions: &[[f64; 3]],
        energies_mev: &[f64],
    ) -> Result<PeaksTable, EventGenError> {
        let event = self.make_event(positions, energies_mev)?;
        let mut table = PeaksTable::with_capacity(event.num_pads_hit());
        for (pad_id, amp) in event.iter() {
            let (tb_peak, _) = amp
                .iter()
                .enumerate()
                .fold((0usize, f64::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });
            let integral: f64 = amp.iter().sum();
            let [cx, cy] = self.pad_centroids[pad_id as usize];
            table.push(pad_id, cx, cy, tb_peak, integral);
        }
        Ok(table)
    }

    /// Distributes `n_e` electrons arriving at `(x, y)` in time bucket `tb`
    /// onto the pad(s) beneath, via a Gaussian kernel of std dev `sigma`
    /// whose support is a disk of radius 3σ. `sigma <= 0` deposits the
    /// whole charge at the single lookup point.
    fn deposit(&self, raw: &mut BTreeMap<u16, Vec<f64>>, x: f64, y: f64, tb: usize, n_e: f64, sigma: f64) {
        if sigma <= 0.0 {
            let pad = self.plane.pad_at(x, y);
            if pad != PAD_NONE {
                raw.entry(pad).or_insert_with(|| vec![0.0; NUM_TIME_BUCKETS])[tb] += n_e;
            }
            return;
        }

        const SAMPLES_PER_AXIS: usize = 7;
        let radius = 3.0 * sigma;
        let step = 2.0 * radius / (SAMPLES_PER_AXIS - 1) as f64;

        let mut weighted: Vec<(u16, f64)> = Vec::new();
        let mut weight_sum = 0.0;
        for iy in 0..SAMPLES_PER_AXIS {
            let dy = -radius + iy as f64 * step;
            for ix in 0..SAMPLES_PER_AXIS {
                let dx = -radius + ix as f64 * step;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let w = (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
                weight_sum += w;
                let pad = self.plane.pad_at(x + dx, y + dy);
                if pad != PAD_NONE {
                    weighted.push((pad, w));
                }
            }
        }
        if weight_sum <= 0.0 {
            return;
        }
        for (pad, w) in weighted {
            let series = raw.entry(pad).or_insert_with(|| vec![0.0; NUM_TIME_BUCKETS]);
            series[tb] += n_e * w / weight_sum;
        }
    }
}

fn rotate_about_x(y: f64, z: f64, theta: f64) -> (f64, f64) {
    let (s, c) = theta.sin_cos();
    (y * c - z * s, y * s + z * c)
}

/// Discretizes `h(t) = (t/tau)*exp(1 - t/tau)` at one-time-bucket spacing,
/// normalized so the discrete kernel sums to 1 (preserving total charge
/// under convolution, up to truncation at the array's edges).
fn shaping_kernel(shaping_time_s: f64, clock_hz: f64) -> Vec<f64> {
    let tau_buckets = (shaping_time_s * clock_hz).max(1.0e-9);
    let len = ((10.0 * tau_buckets).ceil() as usize).clamp(1, NUM_TIME_BUCKETS);
    let mut kernel: Vec<f64> = (0..len)
        .map(|k| {
            let u = k as f64 / tau_buckets;
            u * (1.0 - u).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    if sum > 0.0 {
        for v in kernel.iter_mut() {
            *v /= sum;
        }
    }
    kernel
}

/// Causal (one-sided) discrete convolution, truncated at `raw.len()`.
fn convolve_causal(raw: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = raw.len();
    let mut out = vec![0.0; n];
    for (i, &r) in raw.iter().enumerate() {
        if r == 0.0 {
            continue;
        }
        for (k, &h) in kernel.iter().enumerate() {
            let j = i + k;
            if j >= n {
                break;
            }
            out[j] += r * h;
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use attpc_padplane::PadPlaneBuilder;

    fn generator_and_plane(config: Config) -> (PadPlane, Config) {
        (PadPlaneBuilder::new().build().unwrap(), config)
    }

    #[test]
    fn fewer_than_two_samples_fails_with_empty_trajectory() {
        let (plane, cfg) = generator_and_plane(Config::default());
        let gen = EventGenerator::new(&plane, cfg);
        let err = gen.make_event(&[[0.0, 0.0, 0.5]], &[2.0]).unwrap_err();
        assert_eq!(err, EventGenError::EmptyTrajectory);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let (plane, cfg) = generator_and_plane(Config::default());
        let gen = EventGenerator::new(&plane, cfg);
        let err = gen
            .make_event(&[[0.0, 0.0, 0.5], [0.0, 0.0, 0.4]], &[2.0])
            .unwrap_err();
        assert!(matches!(err, EventGenError::InvalidArgument(_)));
    }

    #[test]
    fn mesh_signal_equals_sum_of_per_pad_series() {
        let (plane, mut cfg) = generator_and_plane(Config::default());
        cfg.diffusion_sigma = 0.0;
        let gen = EventGenerator::new(&plane, cfg);

        let positions = [[0.0, 0.0, 0.5], [0.0, 0.0005, 0.4], [0.0, 0.001, 0.3]];
        let energies = [2.0, 1.9, 1.8];
        let event = gen.make_event(&positions, &energies).unwrap();
        let mesh = gen.make_mesh_signal(&positions, &energies).unwrap();

        let mut expected = vec![0.0; NUM_TIME_BUCKETS];
        for (_, amp) in event.iter() {
            for (m, a) in expected.iter_mut().zip(amp) {
                *m += a;
            }
        }
        for (m, e) in mesh.iter().zip(expected.iter()) {
            assert!((m - e).abs() < 1e-15);
        }
    }

    #[test]
    fn hit_pattern_equals_per_pad_integral() {
        let (plane, mut cfg) = generator_and_plane(Config::default());
        cfg.diffusion_sigma = 0.0;
        let gen = EventGenerator::new(&plane, cfg);

        let positions = [[0.0, 0.0, 0.5], [0.0, 0.0005, 0.4], [0.0, 0.001, 0.3]];
        let energies = [2.0, 1.9, 1.8];
        let event = gen.make_event(&positions, &energies).unwrap();
        let pattern = gen.make_hit_pattern(&positions, &energies).unwrap();

        for (pad_id, amp) in event.iter() {
            let expected: f64 = amp.iter().sum();
            assert!((pattern.get(pad_id) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn charge_is_conserved_within_one_percent() {
        let (plane, mut cfg) = generator_and_plane(Config::default());
        cfg.diffusion_sigma = 0.0;
        cfg.micromegas_gain = 1.0;
        cfg.electronics_gain = 1.0;
        let gen = EventGenerator::new(&plane, cfg.clone());

        let positions = [[0.0, 0.0, 0.5], [0.0, 0.0002, 0.45], [0.0, 0.0004, 0.4]];
        let energies = [2.0, 1.9, 1.8];
        let event = gen.make_event(&positions, &energies).unwrap();

        let total_out: f64 = event.iter().map(|(_, amp)| amp.iter().sum::<f64>()).sum();

        let mut expected = 0.0;
        for i in 0..positions.len() - 1 {
            let delta_e = energies[i] - energies[i + 1];
            expected += delta_e * 1.0e6 / cfg.ionization_ev;
        }
        expected *= cfg.micromegas_gain * cfg.electronics_gain * ELEMENTARY_CHARGE_C;

        assert!((total_out - expected).abs() / expected.abs() < 0.01);
    }

    #[test]
    fn samples_outside_the_pad_plane_are_silently_discarded() {
        let (plane, mut cfg) = generator_and_plane(Config::default());
        cfg.diffusion_sigma = 0.0;
        let gen = EventGenerator::new(&plane, cfg);

        // Far outside any pad: should simply not contribute, not error.
        let positions = [[50.0, 50.0, 0.5], [50.0, 50.0, 0.4]];
        let energies = [2.0, 1.9];
        let event = gen.make_event(&positions, &energies).unwrap();
        assert_eq!(event.num_pads_hit(), 0);
    }
}
