//! Projective (homography) transforms.
//!
//! A [`Transform`] is a 3×3 matrix acting on homogeneous coordinates:
//!
//! ```text
//! ┌ x' ┐   ┌ a b c ┐ ┌ x ┐
//! │ y' │ ~ │ d e f │ │ y │      x' = (a·x + b·y + c) / (g·x + h·y + 1)
//! └ w  ┘   └ g h 1 ┘ └ 1 ┘      y' = (d·x + e·y + f) / (g·x + h·y + 1)
//! ```
//!
//! Stroke outlines are placed into cells with [`Transform::quad_to_quad`].
//! For axis-aligned cells the solution has `g = h = 0` and reduces to a
//! scale plus translation.

use copybook_common::{Point, Quad};

/// Pivots and determinants below this magnitude count as zero. Solves run
/// on unit-radius quads, so this is relative to the quads' size.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A 3×3 projective transform, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [[f64; 3]; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Scale by `sx`, `sy` then translate by `tx`, `ty`.
    #[must_use]
    pub fn scale_translate(sx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Self {
            m: [
                [f64::from(sx), 0.0, f64::from(tx)],
                [0.0, f64::from(sy), f64::from(ty)],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// The unique projective transform taking each corner of `from` to the
    /// corresponding corner of `to`.
    ///
    /// Both quads are first moved to their centroid and scaled to unit
    /// radius, so the singularity test does not depend on their absolute
    /// size: a cell a thousandth of a point wide solves as well as a page.
    ///
    /// Returns `None` when no invertible mapping exists, e.g. when three
    /// corners of either quad are collinear or `to` collapses to a line or
    /// a point.
    #[must_use]
    pub fn quad_to_quad(from: &Quad, to: &Quad) -> Option<Self> {
        let from_frame = UnitFrame::of(from)?;
        let to_frame = UnitFrame::of(to)?;

        // Two equations per corner pair in the eight unknowns a..h:
        //   a·x + b·y + c - g·x·x' - h·y·x' = x'
        //   d·x + e·y + f - g·x·y' - h·y·y' = y'
        let mut system = [[0.0_f64; 9]; 8];
        for (i, (src, dst)) in from.corners.iter().zip(&to.corners).enumerate() {
            let (x, y) = from_frame.to_unit(*src);
            let (u, v) = to_frame.to_unit(*dst);
            system[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * u, -y * u, u];
            system[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * v, -y * v, v];
        }

        let [a, b, c, d, e, f, g, h] = solve(system)?;
        let unit = Self {
            m: [[a, b, c], [d, e, f], [g, h, 1.0]],
        };
        if unit.determinant().abs() <= SINGULAR_EPSILON {
            return None;
        }

        Some(from_frame.normalizing().then(&unit).then(&to_frame.denormalizing()))
    }

    /// Determinant of the matrix. Zero means the transform collapses the
    /// plane.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Check if the bottom row is `[0 0 1]`, i.e. the transform is affine.
    #[must_use]
    pub fn is_affine(&self) -> bool {
        self.m[2][0].abs() < SINGULAR_EPSILON && self.m[2][1].abs() < SINGULAR_EPSILON
    }

    /// Apply `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        let mut m = [[0.0; 3]; 3];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| next.m[r][k] * self.m[k][c]).sum();
            }
        }
        Self { m }
    }

    /// Map a point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn map_point(&self, p: Point) -> Point {
        let (x, y) = (f64::from(p.x), f64::from(p.y));
        let m = &self.m;
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        Point::new(
            ((m[0][0] * x + m[0][1] * y + m[0][2]) / w) as f32,
            ((m[1][0] * x + m[1][1] * y + m[1][2]) / w) as f32,
        )
    }

    /// Map every corner of a quad.
    #[must_use]
    pub fn map_quad(&self, quad: &Quad) -> Quad {
        Quad {
            corners: quad.corners.map(|p| self.map_point(p)),
        }
    }
}

/// Centroid and radius of a quad, used to solve on unit-sized coordinates.
struct UnitFrame {
    cx: f64,
    cy: f64,
    radius: f64,
}

impl UnitFrame {
    /// `None` if the quad has no extent or a non-finite corner.
    fn of(quad: &Quad) -> Option<Self> {
        let cx = quad.corners.iter().map(|p| f64::from(p.x)).sum::<f64>() / 4.0;
        let cy = quad.corners.iter().map(|p| f64::from(p.y)).sum::<f64>() / 4.0;
        let radius = quad
            .corners
            .iter()
            .map(|p| (f64::from(p.x) - cx).hypot(f64::from(p.y) - cy))
            .fold(0.0, f64::max);
        (radius.is_finite() && radius > 0.0).then_some(Self { cx, cy, radius })
    }

    fn to_unit(&self, p: Point) -> (f64, f64) {
        (
            (f64::from(p.x) - self.cx) / self.radius,
            (f64::from(p.y) - self.cy) / self.radius,
        )
    }

    fn normalizing(&self) -> Transform {
        let s = self.radius.recip();
        Transform {
            m: [[s, 0.0, -self.cx * s], [0.0, s, -self.cy * s], [0.0, 0.0, 1.0]],
        }
    }

    fn denormalizing(&self) -> Transform {
        Transform {
            m: [[self.radius, 0.0, self.cx], [0.0, self.radius, self.cy], [0.0, 0.0, 1.0]],
        }
    }
}

/// Solve an 8×8 linear system given as an augmented matrix, using Gaussian
/// elimination with partial pivoting. `None` if the system is singular.
fn solve(mut a: [[f64; 9]; 8]) -> Option<[f64; 8]> {
    const N: usize = 8;

    for col in 0..N {
        let pivot = (col..N).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < SINGULAR_EPSILON {
            return None;
        }
        a.swap(col, pivot);

        for row in col + 1..N {
            let factor = a[row][col] / a[col][col];
            if factor != 0.0 {
                for k in col..=N {
                    a[row][k] -= factor * a[col][k];
                }
            }
        }
    }

    let mut x = [0.0; N];
    for row in (0..N).rev() {
        let tail: f64 = (row + 1..N).map(|k| a[row][k] * x[k]).sum();
        x[row] = (a[row][N] - tail) / a[row][row];
    }
    Some(x)
}
