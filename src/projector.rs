use crate::math::Cov2;
use crate::{FrameParams, Gaussian, RenderParameters};

/// Margin on the frustum box used to clamp the Jacobian linearization point.
const JACOBIAN_CLAMP: f32 = 1.3;

/// Per-primitive output of the projection stage, consumed by [`crate::shade`]
/// for every covered sample and discarded afterwards.
#[derive(Clone, Copy, Debug)]
pub struct Projected {
    /// Screen-space center in normalized device coordinates.
    pub center_ndc: glam::Vec2,
    /// NDC depth of the center; the host's draw-order sort keys on it.
    pub depth_ndc: f32,
    /// Inverse 2D covariance packed as `(a, b, c)` for `[[a, b], [b, c]]`.
    pub conic: glam::Vec3,
    /// Bounding quad half-extents in pixels, along the principal axes.
    pub basis_major: glam::Vec2,
    pub basis_minor: glam::Vec2,
    /// rgb + base opacity.
    pub color: glam::Vec4,
    /// Distance from the primitive center to the sphere mask center.
    pub clip_distance: f32,
    /// Signed half-space value; positive means excluded.
    pub plane_side: f32,
}

/// 3D covariance from per-axis scale and orientation: `(R·S)·(R·S)ᵀ`.
pub(crate) fn compute_cov3d(scale: glam::Vec3, rotation: glam::Quat) -> glam::Mat3 {
    let rs = glam::Mat3::from_quat(rotation) * glam::Mat3::from_diagonal(scale);
    rs * rs.transpose()
}

/// Screen-space 2D covariance via the local perspective Jacobian.
///
/// The camera-space x/y are clamped to a frustum-derived box before
/// building the Jacobian, so splats near the image plane edges do not
/// blow up the linearization. The clamp affects only the Jacobian, not
/// the projected center.
pub(crate) fn compute_cov2d(
    cov3d: glam::Mat3,
    cam_pos: glam::Vec3,
    frame: &FrameParams,
    bias: f32,
) -> Cov2 {
    let lims = JACOBIAN_CLAMP * 0.5 * frame.viewport / frame.focal;
    let xy = (cam_pos.truncate() / cam_pos.z).clamp(-lims, lims) * cam_pos.z;
    let z2 = cam_pos.z * cam_pos.z;

    // 2x3 Jacobian of the perspective projection, embedded in a 3x3.
    let j = glam::Mat3::from_cols(
        glam::Vec3::new(frame.focal.x / cam_pos.z, 0.0, -frame.focal.x * xy.x / z2),
        glam::Vec3::new(0.0, frame.focal.y / cam_pos.z, -frame.focal.y * xy.y / z2),
        glam::Vec3::ZERO,
    );
    let w = glam::Mat3::from_mat4(frame.model_view).transpose();
    let t = w * j;
    let cov = t.transpose() * cov3d.transpose() * t;

    Cov2 {
        xx: cov.x_axis.x + bias,
        xy: cov.x_axis.y,
        yy: cov.y_axis.y + bias,
    }
}

/// Projects one splat into screen space, or returns `None` to cull it.
///
/// Culls happen for a degenerate 2D covariance and for centers at or
/// behind the camera plane; both would otherwise feed Infinity or NaN
/// into the per-sample stage.
pub fn project(
    gaussian: &Gaussian,
    frame: &FrameParams,
    params: &RenderParameters,
) -> Option<Projected> {
    let cam = frame.model_view * gaussian.center.extend(1.0);
    if cam.z.abs() < 1e-6 {
        return None;
    }

    let cov3d = compute_cov3d(gaussian.scale, gaussian.rotation);
    let cov2d = compute_cov2d(cov3d, cam.truncate(), frame, params.covariance_bias);
    let conic = cov2d.conic()?;

    let ((lambda1, v1), (lambda2, v2)) = cov2d.eigen(params.eigen_floor);
    // The floored radicand can push the minor eigenvalue slightly negative;
    // clamp before the root so the extent stays finite.
    let basis_major = params.kernel_radius * lambda1.max(0.0).sqrt() * v1;
    let basis_minor = params.kernel_radius * lambda2.max(0.0).sqrt() * v2;

    let clip = frame.projection * cam;
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;

    Some(Projected {
        center_ndc: ndc.truncate(),
        depth_ndc: ndc.z,
        conic,
        basis_major,
        basis_minor,
        color: gaussian.color.extend(gaussian.opacity),
        clip_distance: (gaussian.center - frame.sphere_center).length(),
        plane_side: gaussian.center.dot(frame.plane_normal) + frame.plane_distance,
    })
}
