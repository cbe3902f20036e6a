use crate::{project, shade, FrameParams, Gaussian, RenderParameters};

/// CPU render target with straight-alpha rgba pixels.
///
/// Rows are stored bottom-up so pixel coordinates share the y-up
/// convention of the sample positions fed to the shader stage.
pub struct Target {
    pub width: usize,
    pub height: usize,
    pub data: Vec<[f32; 4]>,
}

impl Target {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![[0.0; 4]; width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.data[y * self.width + x]
    }

    fn blend(&mut self, x: usize, y: usize, color: glam::Vec3, alpha: f32) {
        let dst = &mut self.data[y * self.width + x];
        dst[0] = color.x * alpha + dst[0] * (1.0 - alpha);
        dst[1] = color.y * alpha + dst[1] * (1.0 - alpha);
        dst[2] = color.z * alpha + dst[2] * (1.0 - alpha);
        dst[3] = alpha + dst[3] * (1.0 - alpha);
    }

    /// Encodes the target as a binary PPM, top row first.
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let px = self.pixel(x, y);
                for channel in &px[..3] {
                    out.push((channel.clamp(0.0, 1.0) * 255.0) as u8);
                }
            }
        }
        out
    }
}

/// Renders splats in submission order; the host is expected to have
/// sorted them for whatever compositing policy it wants.
///
/// This is the explicit form of what a GPU does implicitly: rasterize
/// each projected splat's bounding quad and run the per-sample shader
/// inside it. Every (splat, sample) evaluation is independent.
pub fn render(
    gaussians: &[Gaussian],
    frame: &FrameParams,
    params: &RenderParameters,
    target: &mut Target,
) {
    let mut culled = 0usize;
    for gaussian in gaussians {
        let splat = match project(gaussian, frame, params) {
            Some(splat) => splat,
            None => {
                culled += 1;
                continue;
            }
        };

        // Quad corners are center +- major +- minor, so the axis-aligned
        // pixel extent is the sum of the absolute basis vectors.
        let center_px = (splat.center_ndc * 0.5 + 0.5) * frame.viewport;
        let extent = splat.basis_major.abs() + splat.basis_minor.abs();
        let min = (center_px - extent).floor().max(glam::Vec2::ZERO);
        let max = (center_px + extent)
            .ceil()
            .min(frame.viewport - 1.0);
        if min.x > max.x || min.y > max.y {
            continue;
        }

        for y in min.y as usize..=max.y as usize {
            for x in min.x as usize..=max.x as usize {
                let frag_px = glam::Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(sample) = shade(&splat, frag_px, frame) {
                    target.blend(x, y, sample.color, sample.alpha);
                }
            }
        }
    }
    log::debug!(
        "rasterized {} splats, culled {}",
        gaussians.len() - culled,
        culled
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_frame(viewport: f32) -> FrameParams {
        let projection =
            glam::Mat4::perspective_rh(std::f32::consts::FRAC_PI_3, 1.0, 0.1, 100.0);
        FrameParams::new(
            glam::Mat4::IDENTITY,
            projection,
            glam::Vec2::splat(viewport),
        )
    }

    fn red_splat() -> Gaussian {
        Gaussian {
            center: glam::Vec3::new(0.0, 0.0, -5.0),
            rotation: glam::Quat::IDENTITY,
            scale: glam::Vec3::splat(0.1),
            color: glam::Vec3::new(1.0, 0.0, 0.0),
            opacity: 1.0,
        }
    }

    #[test]
    fn on_axis_splat_covers_the_center() {
        let frame = test_frame(64.0);
        let mut target = Target::new(64, 64);
        render(&[red_splat()], &frame, &RenderParameters::default(), &mut target);

        let center = target.pixel(32, 32);
        assert!(center[0] > 0.8, "red channel at center: {}", center[0]);
        assert_eq!(center[1], 0.0);
        assert!(center[3] > 0.8);

        // Corners stay untouched.
        assert_eq!(target.pixel(0, 0), [0.0; 4]);
        assert_eq!(target.pixel(63, 63), [0.0; 4]);
    }

    #[test]
    fn plane_clipped_splat_leaves_no_samples() {
        let mut frame = test_frame(64.0);
        frame.plane_normal = glam::Vec3::Z;
        frame.plane_distance = 10.0; // plane_side = -5 + 10 > 0
        let mut target = Target::new(64, 64);
        render(&[red_splat()], &frame, &RenderParameters::default(), &mut target);
        assert!(target.data.iter().all(|px| *px == [0.0; 4]));
    }

    #[test]
    fn sphere_masked_splat_leaves_no_samples() {
        let mut frame = test_frame(64.0);
        frame.sphere_center = glam::Vec3::ZERO;
        frame.sphere_radius = 1.0; // center sits 5 units away
        let mut target = Target::new(64, 64);
        render(&[red_splat()], &frame, &RenderParameters::default(), &mut target);
        assert!(target.data.iter().all(|px| *px == [0.0; 4]));
    }

    #[test]
    fn later_splats_blend_over_earlier_ones() {
        let frame = test_frame(64.0);
        let mut blue = red_splat();
        blue.color = glam::Vec3::new(0.0, 0.0, 1.0);

        let mut target = Target::new(64, 64);
        render(
            &[red_splat(), blue],
            &frame,
            &RenderParameters::default(),
            &mut target,
        );
        let center = target.pixel(32, 32);
        assert!(center[2] > center[0], "blue drawn last must dominate");
    }

    #[test]
    fn ppm_header_and_size() {
        let target = Target::new(4, 3);
        let ppm = target.to_ppm();
        assert!(ppm.starts_with(b"P6\n4 3\n255\n"));
        assert_eq!(ppm.len(), b"P6\n4 3\n255\n".len() + 4 * 3 * 3);
    }
}
