//! Canonical AT-TPC pad tessellation: a disk of small (4-unit) inner pads
//! surrounded by an annulus of large (8-unit) outer pads, both built from
//! the same alternating up/down equilateral-triangle strip lattice, scaled
//! 2x between the inner and outer regions.

use attpc_common::NUM_PADS;

/// The three (x, y) vertices of one triangular pad, in meters.
pub type PadVertices = [[f64; 2]; 3];

/// Edge length of an inner ("small", 4-unit) pad, in meters.
pub const SMALL_PAD_EDGE_M: f64 = 0.0022;
/// Edge length of an outer ("large", 8-unit) pad, in meters — exactly
/// double the inner edge, matching the 4-unit/8-unit height ratio.
pub const LARGE_PAD_EDGE_M: f64 = 2.0 * SMALL_PAD_EDGE_M;
/// Radius of the inner (small-pad) disk, in meters.
pub const SPLIT_RADIUS_M: f64 = 0.05;

/// Generates the canonical 10240-pad AT-TPC layout, rotated in-plane by
/// `rotation` radians about the origin.
///
/// Pads are produced inner-disk-first (small pads, radius <
/// [`SPLIT_RADIUS_M`]), then outer-annulus (large pads), each region's
/// candidates sorted by centroid radius ascending, truncated to exactly
/// [`NUM_PADS`] pads total. This keeps the layout reproducible independent
/// of how many candidate triangles a generous lattice sweep produces.
pub fn generate_pad_coordinates(rotation: f64) -> Vec<PadVertices> {
    let mut inner = lattice_triangles(SMALL_PAD_EDGE_M, SPLIT_RADIUS_M * 1.4);
    inner.retain(|(_, centroid_r)| *centroid_r < SPLIT_RADIUS_M);
    inner.sort_by(|a, b| a.1.total_cmp(&b.1));

    let inner_count = inner.len().min(NUM_PADS);
    let mut pads: Vec<PadVertices> = inner
        .into_iter()
        .take(inner_count)
        .map(|(tri, _)| tri)
        .collect();

    let remaining = NUM_PADS - pads.len();
    if remaining > 0 {
        // Sweep an outer radius generous enough to yield at least
        // `remaining` candidates; grow geometrically if it isn't.
        let mut outer_radius = SPLIT_RADIUS_M * 2.0;
        let mut outer;
        loop {
            outer = lattice_triangles(LARGE_PAD_EDGE_M, outer_radius);
            outer.retain(|(_, centroid_r)| *centroid_r >= SPLIT_RADIUS_M);
            if outer.len() >= remaining {
                break;
            }
            outer_radius *= 1.5;
        }
        outer.sort_by(|a, b| a.1.total_cmp(&b.1));
        pads.extend(outer.into_iter().take(remaining).map(|(tri, _)| tri));
    }

    debug_assert_eq!(pads.len(), NUM_PADS);

    if rotation != 0.0 {
        for tri in &mut pads {
            for vertex in tri.iter_mut() {
                *vertex = rotate(*vertex, rotation);
            }
        }
    }
    pads
}

/// Generates the up/down equilateral-triangle strip lattice of edge `edge`
/// covering a disk of radius `max_radius` centered at the origin, paired
/// with each triangle's centroid distance from the origin.
fn lattice_triangles(edge: f64, max_radius: f64) -> Vec<(PadVertices, f64)> {
    let row_height = edge * 3f64.sqrt() / 2.0;
    let max_row = (max_radius / row_height).ceil() as i64 + 1;
    let max_col = (max_radius / edge).ceil() as i64 + 1;

    let mut triangles = Vec::new();
    for i in -max_row..=max_row {
        let y0 = i as f64 * row_height;
        let y1 = (i + 1) as f64 * row_height;
        for j in -max_col..=max_col {
            let x0 = j as f64 * edge;

            let up: PadVertices = [[x0, y0], [x0 + edge, y0], [x0 + edge / 2.0, y1]];
            push_if_in_range(&mut triangles, up, max_radius);

            let down: PadVertices = [
                [x0 + edge / 2.0, y1],
                [x0 + 3.0 * edge / 2.0, y1],
                [x0 + edge, y0],
            ];
            push_if_in_range(&mut triangles, down, max_radius);
        }
    }
    triangles
}

fn push_if_in_range(out: &mut Vec<(PadVertices, f64)>, tri: PadVertices, max_radius: f64) {
    let centroid = centroid_of(tri);
    let r = (centroid[0] * centroid[0] + centroid[1] * centroid[1]).sqrt();
    if r <= max_radius {
        out.push((tri, r));
    }
}

/// Returns the centroid of a triangle's three vertices.
pub fn centroid_of(tri: PadVertices) -> [f64; 2] {
    [
        (tri[0][0] + tri[1][0] + tri[2][0]) / 3.0,
        (tri[0][1] + tri[1][1] + tri[2][1]) / 3.0,
    ]
}

fn rotate(p: [f64; 2], theta: f64) -> [f64; 2] {
    let (s, c) = theta.sin_cos();
    [p[0] * c - p[1] * s, p[0] * s + p[1] * c]
}

/// Returns true if `(x, y)` lies inside (or on the boundary of) the
/// triangle `tri`, via the standard same-sign barycentric sign test.
pub fn point_in_triangle(x: f64, y: f64, tri: PadVertices) -> bool {
    let sign = |p: [f64; 2], a: [f64; 2], b: [f64; 2]| {
        (p[0] - b[0]) * (a[1] - b[1]) - (a[0] - b[0]) * (p[1] - b[1])
    };
    let p = [x, y];
    let d1 = sign(p, tri[0], tri[1]);
    let d2 = sign(p, tri[1], tri[2]);
    let d3 = sign(p, tri[2], tri[0]);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn produces_exactly_the_canonical_pad_count() {
        let pads = generate_pad_coordinates(0.0);
        assert_eq!(pads.len(), NUM_PADS);
    }

    #[test]
    fn every_centroid_lies_within_its_own_triangle() {
        let pads = generate_pad_coordinates(0.0);
        for tri in pads {
            let c = centroid_of(tri);
            assert!(point_in_triangle(c[0], c[1], tri));
        }
    }

    #[test]
    fn rotation_preserves_pad_count_and_triangle_shape() {
        let base = generate_pad_coordinates(0.0);
        let rotated = generate_pad_coordinates(std::f64::consts::FRAC_PI_4);
        assert_eq!(base.len(), rotated.len());

        let edge_len = |tri: PadVertices, a: usize, b: usize| {
            ((tri[a][0] - tri[b][0]).powi(2) + (tri[a][1] - tri[b][1]).powi(2)).sqrt()
        };
        for (b, r) in base.iter().zip(rotated.iter()) {
            assert!((edge_len(*b, 0, 1) - edge_len(*r, 0, 1)).abs() < 1e-9);
        }
    }
}
