/// Per-frame uniform set, owned by the host and constant for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameParams {
    pub model_view: glam::Mat4,
    pub projection: glam::Mat4,
    /// Focal length in pixels, per axis.
    pub focal: glam::Vec2,
    /// Viewport size in pixels.
    pub viewport: glam::Vec2,
    /// Contributions below this alpha are dropped.
    pub min_alpha: f32,
    pub sphere_center: glam::Vec3,
    /// Sphere mask radius; -1 disables the mask.
    pub sphere_radius: f32,
    pub plane_normal: glam::Vec3,
    pub plane_distance: f32,
}

impl FrameParams {
    /// Builds the uniform set for one frame, deriving the pixel focal
    /// length from the projection diagonal. Clip masks start disabled.
    pub fn new(model_view: glam::Mat4, projection: glam::Mat4, viewport: glam::Vec2) -> Self {
        let focal = glam::Vec2::new(
            projection.x_axis.x * viewport.x * 0.5,
            projection.y_axis.y * viewport.y * 0.5,
        );
        Self {
            model_view,
            projection,
            focal,
            viewport,
            min_alpha: 1.0 / 255.0,
            sphere_center: glam::Vec3::ZERO,
            sphere_radius: -1.0,
            plane_normal: glam::Vec3::ZERO,
            plane_distance: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn focal_matches_pinhole_projection() {
        let fov_y = std::f32::consts::FRAC_PI_2;
        let viewport = glam::Vec2::new(800.0, 600.0);
        let projection =
            glam::Mat4::perspective_rh(fov_y, viewport.x / viewport.y, 0.1, 100.0);
        let frame = FrameParams::new(glam::Mat4::IDENTITY, projection, viewport);

        // For a 90 degree vertical fov the focal equals half the height.
        assert_relative_eq!(frame.focal.y, 300.0, epsilon = 1e-3);
        assert_relative_eq!(frame.focal.x, frame.focal.y, epsilon = 1e-3);
        assert_eq!(frame.sphere_radius, -1.0);
    }
}
