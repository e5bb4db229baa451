use attpc_common::array1d_getter_impl;
use ndarray::Array1;

/// A recorded track: one sample per completed integration step, in order of
/// increasing time.
///
/// Samples are pushed during integration via [`Trajectory::push_sample`] and
/// the struct is frozen (conceptually) once [`crate::Tracker::track_particle`]
/// returns — nothing outside this crate can mutate it further.
#[derive(Clone, Default)]
pub struct Trajectory {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    t: Vec<f64>,
    e_per_u: Vec<f64>,
    azimuth: Vec<f64>,
    polar: Vec<f64>,
    px: Vec<f64>,
    py: Vec<f64>,
    pz: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            x: Vec::with_capacity(cap),
            y: Vec::with_capacity(cap),
            z: Vec::with_capacity(cap),
            t: Vec::with_capacity(cap),
            e_per_u: Vec::with_capacity(cap),
            azimuth: Vec::with_capacity(cap),
            polar: Vec::with_capacity(cap),
            px: Vec::with_capacity(cap),
            py: Vec::with_capacity(cap),
            pz: Vec::with_capacity(cap),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn push_sample(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        t: f64,
        e_per_u: f64,
        azimuth: f64,
        polar: f64,
        px: f64,
        py: f64,
        pz: f64,
    ) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
        self.t.push(t);
        self.e_per_u.push(e_per_u);
        self.azimuth.push(azimuth);
        self.polar.push(polar);
        self.px.push(px);
        self.py.push(py);
        self.pz.push(pz);
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The total path length, in meters, summed between consecutive
    /// recorded positions.
    pub fn path_length(&self) -> f64 {
        (1..self.x.len())
            .map(|i| {
                let dx = self.x[i] - self.x[i - 1];
                let dy = self.y[i] - self.y[i - 1];
                let dz = self.z[i] - self.z[i - 1];
                (dx * dx + dy * dy + dz * dz).sqrt()
            })
            .sum()
    }

    array1d_getter_impl!(x, x);
    array1d_getter_impl!(y, y);
    array1d_getter_impl!(z, z);
    array1d_getter_impl!(t, t);
    array1d_getter_impl!(e_per_u, e_per_u);
    array1d_getter_impl!(azimuth, azimuth);
    array1d_getter_impl!(polar, polar);
    array1d_getter_impl!(px, px);
    array1d_getter_impl!(py, py);
    array1d_getter_impl!(pz, pz);

    /// Returns the `(x, y, z)` of sample `i`.
    pub fn position(&self, i: usize) -> [f64; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    /// Returns all samples as an `N x 3` position matrix.
    pub fn positions(&self) -> ndarray::Array2<f64> {
        let mut out = ndarray::Array2::zeros((self.len(), 3));
        for i in 0..self.len() {
            out[[i, 0]] = self.x[i];
            out[[i, 1]] = self.y[i];
            out[[i, 2]] = self.z[i];
        }
        out
    }

    /// Returns the total (not per-nucleon) kinetic energy at each sample,
    /// in MeV, given the species' mass number.
    pub fn kinetic_energy_mev(&self, mass_number: u16) -> Array1<f64> {
        let a = f64::from(mass_number);
        Array1::from(self.e_per_u.iter().map(|e| e * a).collect::<Vec<_>>())
    }
}

impl std::fmt::Debug for Trajectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trajectory")
            .field("samples", &self.len())
            .field("t_final", &self.t.last())
            .field("e_per_u_final", &self.e_per_u.last())
            .finish()
    }
}

/// Sanity-checks that no `NaN`/`inf` has crept into the last-pushed sample.
pub(crate) fn is_finite_state(s: &[f64; 6]) -> bool {
    s.iter().all(|v| v.is_finite())
}
