use attpc_common::PAD_NONE;
use ndarray::Array2;

use crate::geometry::{self, PadVertices, SMALL_PAD_EDGE_M};
use crate::plane::PadPlane;
use crate::Result;

/// Builds a [`PadPlane`] by rasterizing the canonical pad layout.
///
/// # Example
///
/// ```
/// # use attpc_padplane::PadPlaneBuilder;
/// let plane = PadPlaneBuilder::new().with_rotation(0.3).build().unwrap();
/// assert_eq!(plane.pad_count(), 10240);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PadPlaneBuilder {
    cell_size: f64,
    rotation: f64,
}

impl PadPlaneBuilder {
    /// Creates a builder with the default raster resolution (fine enough
    /// to resolve the smallest, inner pads without ambiguity).
    pub fn new() -> Self {
        Self {
            cell_size: SMALL_PAD_EDGE_M / 8.0,
            rotation: 0.0,
        }
    }

    /// Sets the raster's square cell size, in meters. Smaller cells
    /// resolve pad boundaries more precisely at the cost of memory.
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the plane's in-plane rotation, in radians.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builds the [`PadPlane`], rasterizing the canonical layout in the
    /// plane's own local (unrotated) frame.
    pub fn build(self) -> Result<PadPlane> {
        let pads = geometry::generate_pad_coordinates(0.0);
        let (lut, x0, y0) = rasterize(&pads, self.cell_size);
        PadPlane::from_raw(lut, x0, self.cell_size, y0, self.cell_size, self.rotation)
    }
}

impl Default for PadPlaneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn rasterize(pads: &[PadVertices], cell_size: f64) -> (Array2<u16>, f64, f64) {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for tri in pads {
        for &[x, y] in tri {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    let cols = ((max_x - min_x) / cell_size).ceil() as usize + 1;
    let rows = ((max_y - min_y) / cell_size).ceil() as usize + 1;
    let mut lut = Array2::from_elem((rows, cols), PAD_NONE);

    for (pad_id, tri) in pads.iter().enumerate() {
        rasterize_one(&mut lut, tri, pad_id as u16, min_x, min_y, cell_size);
    }

    (lut, min_x, min_y)
}

/// Fills every raster cell whose center lies inside `tri` with `pad_id`,
/// skipping cells already claimed by an earlier (lower-id) pad.
fn rasterize_one(lut: &mut Array2<u16>, tri: &PadVertices, pad_id: u16, x0: f64, y0: f64, cell_size: f64) {
    let xs = tri.iter().map(|v| v[0]);
    let ys = tri.iter().map(|v| v[1]);
    let bbox_min_x = xs.clone().fold(f64::MAX, f64::min);
    let bbox_max_x = xs.fold(f64::MIN, f64::max);
    let bbox_min_y = ys.clone().fold(f64::MAX, f64::min);
    let bbox_max_y = ys.fold(f64::MIN, f64::max);

    let shape = lut.dim();
    let ix_lo = (((bbox_min_x - x0) / cell_size).floor() as isize).max(0) as usize;
    let ix_hi = ((((bbox_max_x - x0) / cell_size).ceil() as isize).max(0) as usize).min(shape.1 - 1);
    let iy_lo = (((bbox_min_y - y0) / cell_size).floor() as isize).max(0) as usize;
    let iy_hi = ((((bbox_max_y - y0) / cell_size).ceil() as isize).max(0) as usize).min(shape.0 - 1);

    for iy in iy_lo..=iy_hi {
        let cy = y0 + (iy as f64 + 0.5) * cell_size;
        for ix in ix_lo..=ix_hi {
            let cx = x0 + (ix as f64 + 0.5) * cell_size;
            if lut[[iy, ix]] == PAD_NONE && geometry::point_in_triangle(cx, cy, *tri) {
                lut[[iy, ix]] = pad_id;
            }
        }
    }
}
