use attpc_eventgen::{EventGenError, EventGenerator};
use ndarray::{Array1, Array2};

/// For each experimental row, returns `exp_i - sim_NN(i)`, where `NN(i)` is
/// the nearest row of `sim_mat` in Euclidean (x,y,z) distance.
pub fn find_position_deviations(sim_mat: &Array2<f64>, exp_mat: &Array2<f64>) -> Array2<f64> {
    let mut out = Array2::zeros(exp_mat.raw_dim());
    for i in 0..exp_mat.nrows() {
        let e = exp_mat.row(i);
        let mut best = f64::INFINITY;
        let mut best_row = 0usize;
        for j in 0..sim_mat.nrows() {
            let s = sim_mat.row(j);
            let d2 = (0..3).map(|k| (e[k] - s[k]).powi(2)).sum::<f64>();
            if d2 < best {
                best = d2;
                best_row = j;
            }
        }
        for k in 0..3 {
            out[[i, k]] = e[k] - sim_mat[[best_row, k]];
        }
    }
    out
}

/// Runs [`EventGenerator::make_hit_pattern`] on the simulated trajectory and
/// returns the signed per-pad deviation `sim - exp`.
pub fn find_hit_pattern_deviation(
    eventgen: &EventGenerator<'_>,
    sim_positions: &[[f64; 3]],
    sim_energies_mev: &[f64],
    exp_hits: &Array1<f64>,
) -> Result<Array1<f64>, EventGenError> {
    let sim_hits = eventgen.make_hit_pattern(sim_positions, sim_energies_mev)?;
    Ok(sim_hits.as_array() - exp_hits)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nearest_neighbor_deviation_is_zero_for_identical_matrices() {
        let m = Array2::from_shape_vec((2, 3), vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        let dev = find_position_deviations(&m, &m);
        assert!(dev.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn nearest_neighbor_picks_the_closest_row() {
        let sim = Array2::from_shape_vec((2, 3), vec![0.0, 0.0, 0.0, 10.0, 10.0, 10.0]).unwrap();
        let exp = Array2::from_shape_vec((1, 3), vec![0.1, 0.0, 0.0]).unwrap();
        let dev = find_position_deviations(&sim, &exp);
        assert!((dev[[0, 0]] - 0.1).abs() < 1e-12);
    }
}
