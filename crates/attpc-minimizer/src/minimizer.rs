use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use attpc_common::{BeamPrior, Chi2Set, Config, MinimizeResult, ParameterVector, STALL_LIMIT};
use attpc_eventgen::EventGenerator;
use attpc_tracker::Tracker;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array1, Array2};
use rand::Rng;
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::error::MinimizerError;

/// Monte-Carlo contracting-hypercube parameter search.
///
/// Holds non-owning references to a [`Tracker`] and an [`EventGenerator`],
/// its own seedable RNG, and a cooperative cancellation flag. Per iteration,
/// all `numPts` candidate parameter vectors are drawn sequentially on the
/// calling thread from the owned RNG *before* being handed to `rayon` for
/// parallel evaluation — this is what makes the result reproducible
/// independent of thread count.
#[derive(Debug)]
pub struct Minimizer<'a, 'g, 'p> {
    tracker: &'a Tracker<'g>,
    eventgen: &'a EventGenerator<'p>,
    mass_number: u16,
    config: Config,
    rng: Pcg64,
    cancel: Arc<AtomicBool>,
}

impl<'a, 'g, 'p> Minimizer<'a, 'g, 'p> {
    /// Builds a minimizer against `tracker` and `eventgen`, seeded with
    /// `seed` for reproducibility. `mass_number` is the tracked species' A,
    /// needed to convert the tracker's per-nucleon energies to the total
    /// energies the event generator expects. `config`'s chi² norms, weight
    /// flags, and tolerances govern the objective.
    pub fn new(tracker: &'a Tracker<'g>, eventgen: &'a EventGenerator<'p>, mass_number: u16, config: Config, seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            tracker,
            eventgen,
            mass_number,
            config,
            rng: Pcg64::seed_from_u64(seed),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a clonable handle that, when set, cooperatively cancels an
    /// in-progress [`Self::minimize`] at its next iteration boundary.
    pub fn cancellation_token(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Runs the contracting-hypercube search.
    ///
    /// `sigma0` is the initial per-dimension full width (canonical
    /// [`ParameterVector`] field order); each iteration samples uniformly
    /// from `[ctr - sigma/2, ctr + sigma/2]`, then sets the next center to
    /// the winning sample and shrinks `sigma` by `red_factor`.
    #[allow(clippy::too_many_arguments)]
    pub fn minimize(
        &mut self,
        ctr0: ParameterVector,
        sigma0: [f64; ParameterVector::DIM],
        exp_positions: &Array2<f64>,
        exp_hits: &Array1<f64>,
        beam_prior: BeamPrior,
        num_iters: usize,
        num_pts: usize,
        red_factor: f64,
    ) -> Result<MinimizeResult, MinimizerError> {
        if !(red_factor > 0.0 && red_factor <= 1.0) {
            return Err(MinimizerError::InvalidArgument("red_factor must be in (0, 1]"));
        }
        if num_pts == 0 {
            return Err(MinimizerError::InvalidArgument("num_pts must be nonzero"));
        }

        let bar = ProgressBar::new(num_iters as u64);
        bar.set_style(
            ProgressStyle::with_template("minimizing {pos}/{len} [{bar:40}] chi2={msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut ctr = ctr0;
        let mut sigma = sigma0;
        let mut stall_count = 0usize;

        let mut min_chis = Vec::with_capacity(num_iters * 3);
        let mut all_params = Vec::with_capacity(num_iters * num_pts * ParameterVector::DIM);
        let mut good_indices = Vec::with_capacity(num_iters);

        for _ in 0..num_iters {
            if self.cancel.load(Ordering::SeqCst) {
                bar.abandon();
                return Err(MinimizerError::Cancelled);
            }

            let candidates: Vec<ParameterVector> = (0..num_pts).map(|_| self.sample_candidate(ctr, sigma)).collect();
            for c in &candidates {
                all_params.extend_from_slice(&c.to_array());
            }

            let chi2s: Vec<Chi2Set> = candidates
                .par_iter()
                .map(|&c| self.evaluate(c, exp_positions, exp_hits, &beam_prior))
                .collect();

            let mut best_idx = 0usize;
            let mut best_total = f64::INFINITY;
            for (i, c) in chi2s.iter().enumerate() {
                let t = c.total();
                if t < best_total {
                    best_total = t;
                    best_idx = i;
                }
            }

            if best_total.is_finite() {
                stall_count = 0;
                good_indices.push(best_idx);
                min_chis.extend_from_slice(&[
                    chi2s[best_idx].pos_chi2,
                    chi2s[best_idx].en_chi2,
                    chi2s[best_idx].vert_chi2,
                ]);
                ctr = candidates[best_idx];
                for s in sigma.iter_mut() {
                    *s *= red_factor;
                }
            } else {
                stall_count += 1;
                good_indices.push(usize::MAX);
                min_chis.extend_from_slice(&[f64::INFINITY; 3]);
                if stall_count >= STALL_LIMIT {
                    bar.abandon();
                    return Err(MinimizerError::MinimizationStalled { best_center: ctr });
                }
            }

            bar.set_message(format!("{best_total:.3}"));
            bar.inc(1);
        }
        bar.finish_and_clear();

        let min_chis = Array2::from_shape_vec((num_iters, 3), min_chis)
            .map_err(|_| MinimizerError::ResultShapeMismatch("min_chis has exactly num_iters*3 entries"))?;
        let all_params = Array2::from_shape_vec((num_iters * num_pts, ParameterVector::DIM), all_params)
            .map_err(|_| MinimizerError::ResultShapeMismatch("all_params has exactly num_iters*num_pts*DIM entries"))?;

        Ok(MinimizeResult {
            ctr,
            min_chis,
            all_params,
            good_indices: Array1::from(good_indices),
            final_sigma: sigma,
        })
    }

    fn sample_candidate(&mut self, ctr: ParameterVector, sigma: [f64; ParameterVector::DIM]) -> ParameterVector {
        let c = ctr.to_array();
        let mut out = [0.0; ParameterVector::DIM];
        for i in 0..ParameterVector::DIM {
            let half = (sigma[i] / 2.0).abs();
            out[i] = self.rng.random_range(c[i] - half..=c[i] + half);
        }
        ParameterVector::from_array(out)
    }

    fn evaluate(
        &self,
        params: ParameterVector,
        exp_positions: &Array2<f64>,
        exp_hits: &Array1<f64>,
        beam_prior: &BeamPrior,
    ) -> Chi2Set {
        let traj = match self.tracker.track_particle_with_b_mag(
            params.x0,
            params.y0,
            params.z0,
            params.e_per_u,
            params.azimuth,
            params.polar,
            params.b_mag,
        ) {
            Ok(t) if t.len() >= 2 => t,
            _ => return Chi2Set::REJECTED,
        };

        let sim_positions = traj.positions();
        let energies_mev = traj.kinetic_energy_mev(self.mass_number);
        let positions: Vec<[f64; 3]> = (0..traj.len()).map(|i| traj.position(i)).collect();
        let energies: Vec<f64> = energies_mev.to_vec();

        let hit_pattern = match self.eventgen.make_hit_pattern(&positions, &energies) {
            Ok(hp) => hp,
            Err(_) => return Chi2Set::REJECTED,
        };

        let pos_chi2 = if self.config.pos_chi2_enabled {
            nearest_neighbor_sum_sq(exp_positions, &sim_positions) / self.config.pos_chi2_norm_m.powi(2)
        } else {
            0.0
        };

        let en_chi2 = if self.config.en_chi2_enabled {
            let total_exp_hits: f64 = exp_hits.sum();
            let norm = (self.config.en_chi2_norm_fraction * total_exp_hits).abs().max(f64::EPSILON);
            let diff_sq: f64 = exp_hits
                .iter()
                .enumerate()
                .map(|(i, &exp)| (hit_pattern.get(i as u16) - exp).powi(2))
                .sum();
            diff_sq / norm.powi(2)
        } else {
            0.0
        };

        let vert_chi2 = if self.config.vert_chi2_enabled {
            let d = beam_prior.transverse_distance(params.x0, params.y0, params.z0);
            (d / self.config.vert_chi2_tolerance_m).powi(2)
        } else {
            0.0
        };

        let set = Chi2Set {
            pos_chi2,
            en_chi2,
            vert_chi2,
        };
        if set.is_nan() {
            Chi2Set::REJECTED
        } else {
            set
        }
    }
}

fn nearest_neighbor_sum_sq(exp_mat: &Array2<f64>, sim_mat: &Array2<f64>) -> f64 {
    if sim_mat.nrows() == 0 {
        return f64::INFINITY;
    }
    let mut total = 0.0;
    for i in 0..exp_mat.nrows() {
        let e = exp_mat.row(i);
        let mut best = f64::INFINITY;
        for j in 0..sim_mat.nrows() {
            let s = sim_mat.row(j);
            let d2 = (0..3).map(|k| (e[k] - s[k]).powi(2)).sum::<f64>();
            if d2 < best {
                best = d2;
            }
        }
        total += best;
    }
    total
}
