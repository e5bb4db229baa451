use ndarray::{Array1, Array2};

/// The 7 parameters a [`Minimizer`](https://docs.rs/attpc-minimizer) searches
/// over: vertex position, energy per nucleon, emission angles, and local
/// field magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterVector {
    /// Vertex x, in meters.
    pub x0: f64,
    /// Vertex y, in meters.
    pub y0: f64,
    /// Vertex z, in meters.
    pub z0: f64,
    /// Kinetic energy per nucleon, in MeV/u.
    pub e_per_u: f64,
    /// Azimuthal emission angle, in radians.
    pub azimuth: f64,
    /// Polar emission angle, in radians.
    pub polar: f64,
    /// Local magnetic field magnitude, in T.
    pub b_mag: f64,
}

impl ParameterVector {
    /// The 7 dimension half-width sigmas live in the same order as the
    /// fields; this is the canonical field order used by [`Self::to_array`]
    /// and [`Self::from_array`].
    pub const DIM: usize = 7;

    /// Returns the parameters as a fixed-size array, in canonical order.
    pub fn to_array(self) -> [f64; Self::DIM] {
        [
            self.x0,
            self.y0,
            self.z0,
            self.e_per_u,
            self.azimuth,
            self.polar,
            self.b_mag,
        ]
    }

    /// Builds a [`ParameterVector`] from a fixed-size array, in canonical
    /// order (see [`Self::to_array`]).
    pub fn from_array(a: [f64; Self::DIM]) -> Self {
        Self {
            x0: a[0],
            y0: a[1],
            z0: a[2],
            e_per_u: a[3],
            azimuth: a[4],
            polar: a[5],
            b_mag: a[6],
        }
    }
}

/// The composite chi2 of one candidate parameter vector against a set of
/// observations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Chi2Set {
    /// Sum of squared nearest-neighbor distances between experimental and
    /// simulated positions, normalized by `pos_chi2_norm^2`.
    pub pos_chi2: f64,
    /// Sum of squared hit-pattern amplitude differences, normalized.
    pub en_chi2: f64,
    /// Squared transverse distance of the fit vertex from the beam axis,
    /// normalized by a fixed tolerance.
    pub vert_chi2: f64,
}

impl Chi2Set {
    /// A sentinel "rejected candidate" chi2: a NaN or a throwing candidate
    /// is scored as +inf and excluded from the per-iteration minimum.
    pub const REJECTED: Self = Self {
        pos_chi2: f64::INFINITY,
        en_chi2: f64::INFINITY,
        vert_chi2: f64::INFINITY,
    };

    /// The total chi2, the sum of the enabled components.
    pub fn total(self) -> f64 {
        self.pos_chi2 + self.en_chi2 + self.vert_chi2
    }

    /// True if any component is NaN.
    pub fn is_nan(self) -> bool {
        self.pos_chi2.is_nan() || self.en_chi2.is_nan() || self.vert_chi2.is_nan()
    }
}

/// Linear beam-axis prior used by the vertex chi2 term: the beam line is
/// `x = x_slope * z + x_int`, `y = y_slope * z + y_int`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamPrior {
    /// dx/dz of the beam line.
    pub x_slope: f64,
    /// x-intercept of the beam line at z=0.
    pub x_int: f64,
    /// dy/dz of the beam line.
    pub y_slope: f64,
    /// y-intercept of the beam line at z=0.
    pub y_int: f64,
}

impl BeamPrior {
    /// Returns the transverse distance of point `(x, y)` at depth `z` from
    /// the beam line, i.e. the (x, y) deviation at the same z, in meters.
    pub fn transverse_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        let bx = self.x_slope * z + self.x_int;
        let by = self.y_slope * z + self.y_int;
        ((x - bx).powi(2) + (y - by).powi(2)).sqrt()
    }
}

/// The full result of [`Minimizer::minimize`](https://docs.rs/attpc-minimizer).
#[derive(Debug, Clone)]
pub struct MinimizeResult {
    /// The final (best) center of the hypercube.
    pub ctr: ParameterVector,
    /// Per-iteration minimum (pos, en, vert) chi2 triple, `numIters x 3`.
    pub min_chis: Array2<f64>,
    /// Every sampled parameter vector, in iteration-major, sample-minor
    /// order, `numIters*numPts x 7`.
    pub all_params: Array2<f64>,
    /// Index (within `all_params`, iteration-major) of the winning sample
    /// in each iteration, length `numIters`.
    pub good_indices: Array1<usize>,
    /// The per-dimension search half-width after the last iteration, i.e.
    /// `sigma0 * redFactor.powi(numIters)`.
    pub final_sigma: [f64; ParameterVector::DIM],
}
