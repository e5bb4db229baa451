use attpc_common::{NUM_PADS, PAD_NONE};
use ndarray::Array2;

use crate::error::PadPlaneError;
use crate::Result;

/// O(1) `(x, y) -> pad_id` lookup over the AT-TPC's 10240-pad tessellation.
///
/// The raster (`lut`) is built once, in the plane's own *unrotated* local
/// frame; [`PadPlane::pad_at`] rotates the incoming lab-frame point by
/// `-theta` before indexing, rather than rebuilding the raster per
/// rotation. This is what makes rotation invariance hold by construction:
/// rotating the plane by θ and counter-rotating the query point is a no-op
/// on the indexed cell.
#[derive(Debug, Clone)]
pub struct PadPlane {
    lut: Array2<u16>,
    x0: f64,
    dx: f64,
    y0: f64,
    dy: f64,
    theta: f64,
}

impl PadPlane {
    pub(crate) fn from_raw(lut: Array2<u16>, x0: f64, dx: f64, y0: f64, dy: f64, theta: f64) -> Result<Self> {
        if dx <= 0.0 {
            return Err(PadPlaneError::InvalidStep("dx"));
        }
        if dy <= 0.0 {
            return Err(PadPlaneError::InvalidStep("dy"));
        }
        Ok(Self {
            lut,
            x0,
            dx,
            y0,
            dy,
            theta,
        })
    }

    /// Returns the pad id beneath lab-frame point `(x, y)`, or
    /// [`attpc_common::PAD_NONE`] if the point falls outside the raster or
    /// in a gap between pads.
    pub fn pad_at(&self, x: f64, y: f64) -> u16 {
        self.try_pad_at(x, y).unwrap_or(PAD_NONE)
    }

    /// As [`PadPlane::pad_at`], but distinguishes "outside the raster
    /// entirely" ([`PadPlaneError::OutOfBounds`]) from "inside the raster,
    /// in a gap between pads" (`Ok(`[`attpc_common::PAD_NONE`]`)`).
    pub fn try_pad_at(&self, x: f64, y: f64) -> Result<u16> {
        let (xr, yr) = rotate(x, y, -self.theta);
        let ix = ((xr - self.x0) / self.dx).floor();
        let iy = ((yr - self.y0) / self.dy).floor();

        if ix < 0.0 || iy < 0.0 {
            return Err(PadPlaneError::OutOfBounds { x, y });
        }
        let (ix, iy) = (ix as usize, iy as usize);
        let shape = self.lut.dim();
        if iy >= shape.0 || ix >= shape.1 {
            return Err(PadPlaneError::OutOfBounds { x, y });
        }
        Ok(self.lut[[iy, ix]])
    }

    /// The number of pads in the plane (always [`NUM_PADS`]).
    pub fn pad_count(&self) -> usize {
        NUM_PADS
    }

    /// The raster's origin x coordinate, in the plane's local frame.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// The raster's cell width in x.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// The raster's origin y coordinate, in the plane's local frame.
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// The raster's cell width in y.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// The plane's in-plane rotation, in radians.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// The raster's `(rows, cols)` shape.
    pub fn raster_shape(&self) -> (usize, usize) {
        self.lut.dim()
    }
}

fn rotate(x: f64, y: f64, theta: f64) -> (f64, f64) {
    let (s, c) = theta.sin_cos();
    (x * c - y * s, x * s + y * c)
}
