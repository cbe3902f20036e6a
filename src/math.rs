//! Closed-form helpers for symmetric 2x2 matrices.
//!
//! Everything here is small enough to stay analytic: no iterative
//! eigensolver, no general matrix inverse.

/// Below this the determinant counts as degenerate and the splat is culled.
pub const DET_EPSILON: f32 = 1e-6;

const OFF_DIAGONAL_EPSILON: f32 = 1e-9;

/// Symmetric 2x2 matrix packed as its three distinct entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cov2 {
    pub xx: f32,
    pub xy: f32,
    pub yy: f32,
}

impl Cov2 {
    pub fn det(&self) -> f32 {
        self.xx * self.yy - self.xy * self.xy
    }

    /// Packed inverse `(a, b, c)` for `[[a, b], [b, c]]`, or `None` when
    /// the determinant is degenerate.
    pub fn conic(&self) -> Option<glam::Vec3> {
        let det = self.det();
        if det.abs() < DET_EPSILON {
            return None;
        }
        Some(glam::Vec3::new(self.yy, -self.xy, self.xx) / det)
    }

    /// Eigenvalues and unit eigenvectors, major axis first.
    ///
    /// The radicand is floored at `floor` so a near-singular matrix yields
    /// a finite split instead of a NaN pair. The returned vectors are
    /// always orthonormal; when the off-diagonal vanishes they fall back
    /// to the coordinate axes ordered by the larger diagonal entry.
    pub fn eigen(&self, floor: f32) -> ((f32, glam::Vec2), (f32, glam::Vec2)) {
        let mid = 0.5 * (self.xx + self.yy);
        let det = self.det();
        let radius = (mid * mid - det).max(floor).sqrt();
        let lambda1 = mid + radius;
        let lambda2 = mid - radius;

        let (v1, v2) = if self.xy.abs() > OFF_DIAGONAL_EPSILON {
            let major = glam::Vec2::new(self.xy, lambda1 - self.xx).normalize();
            (major, glam::Vec2::new(-major.y, major.x))
        } else if self.xx >= self.yy {
            (glam::Vec2::X, glam::Vec2::Y)
        } else {
            (glam::Vec2::Y, glam::Vec2::X)
        };

        ((lambda1, v1), (lambda2, v2))
    }
}
