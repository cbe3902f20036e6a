use crate::{FrameParams, Projected};

/// Alpha is capped below 1 so a fully opaque splat still blends.
const MAX_ALPHA: f32 = 0.99;

/// One sample's contribution to the host blend stage.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    pub color: glam::Vec3,
    pub alpha: f32,
}

/// Evaluates one screen sample against a projected splat.
///
/// `frag_px` is the sample position in pixels (y up, matching the NDC
/// convention of the projector). Returns `None` when the sample is
/// discarded: clipped by the plane or sphere mask, outside the falloff,
/// or below the frame's alpha threshold.
pub fn shade(splat: &Projected, frag_px: glam::Vec2, frame: &FrameParams) -> Option<Sample> {
    if splat.plane_side > 0.0 {
        return None;
    }
    if frame.sphere_radius != -1.0 && splat.clip_distance > frame.sphere_radius {
        return None;
    }

    // Reconstruct the pixel offset from the splat center instead of
    // trusting interpolated per-vertex offsets.
    let frag_ndc = 2.0 * (frag_px / frame.viewport - 0.5);
    let d = (splat.center_ndc - frag_ndc) * frame.viewport * 0.5;

    // -0.5 * d^T * conic * d; the packed conic is the actual inverse
    // covariance, so the cross term carries its sign as stored.
    let power = -0.5 * (splat.conic.x * d.x * d.x + splat.conic.z * d.y * d.y)
        - splat.conic.y * d.x * d.y;
    if power > 0.0 {
        return None;
    }

    let alpha = (splat.color.w * power.exp()).min(MAX_ALPHA);
    if alpha < frame.min_alpha {
        return None;
    }

    Some(Sample {
        color: splat.color.truncate(),
        alpha,
    })
}
