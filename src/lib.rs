mod frame;
pub mod math;
mod projector;
mod raster;
mod shader;

pub use frame::FrameParams;
pub use projector::{project, Projected};
pub use raster::{render, Target};
pub use shader::{shade, Sample};

/// A single splat primitive, as the host keeps it.
///
/// The caller guarantees a unit `rotation` and non-negative `scale`
/// (per-axis standard deviations); neither is validated here.
#[derive(Clone, Default)]
pub struct Gaussian {
    pub center: glam::Vec3,
    pub rotation: glam::Quat,
    pub scale: glam::Vec3,
    pub color: glam::Vec3,
    pub opacity: f32,
}

/// One record of the host-supplied attribute buffer.
///
/// The field order is part of the wire contract and must not change:
/// center, rgba color, scalar-first quaternion, per-axis scale.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SplatAttributes {
    pub center: [f32; 3],
    pub color: [f32; 4],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl From<&SplatAttributes> for Gaussian {
    fn from(attr: &SplatAttributes) -> Self {
        let [w, x, y, z] = attr.rotation;
        Self {
            center: attr.center.into(),
            rotation: glam::Quat::from_xyzw(x, y, z, w),
            scale: attr.scale.into(),
            color: glam::Vec3::new(attr.color[0], attr.color[1], attr.color[2]),
            opacity: attr.color[3],
        }
    }
}

/// Reinterpret a flat float attribute buffer as splat records.
///
/// Panics if the length is not a whole number of records, which
/// indicates a host-side layout mismatch.
pub fn cast_attributes(data: &[f32]) -> &[SplatAttributes] {
    bytemuck::cast_slice(data)
}

/// Tunable constants of the projection kernel.
#[derive(Clone, Copy, Debug)]
pub struct RenderParameters {
    /// Multiplier on sqrt(eigenvalue) for the bounding quad half-extents.
    /// Covers roughly three standard deviations of the falloff.
    pub kernel_radius: f32,
    /// Isotropic bias added to the 2D covariance diagonal so sub-pixel
    /// splats keep a minimum rasterized footprint.
    pub covariance_bias: f32,
    /// Floor on the eigenvalue radicand; keeps near-singular covariances
    /// from turning into NaN.
    pub eigen_floor: f32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            kernel_radius: 7.0,
            covariance_bias: 0.3,
            eigen_floor: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_record_layout() {
        assert_eq!(std::mem::size_of::<SplatAttributes>(), 14 * 4);

        let floats: Vec<f32> = (0..28).map(|i| i as f32).collect();
        let records = cast_attributes(&floats);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].center, [0.0, 1.0, 2.0]);
        assert_eq!(records[0].color, [3.0, 4.0, 5.0, 6.0]);
        assert_eq!(records[0].rotation, [7.0, 8.0, 9.0, 10.0]);
        assert_eq!(records[0].scale, [11.0, 12.0, 13.0]);
        assert_eq!(records[1].center, [14.0, 15.0, 16.0]);
    }

    #[test]
    fn scalar_first_quaternion_conversion() {
        let attr = SplatAttributes {
            center: [1.0, 2.0, 3.0],
            color: [0.5, 0.25, 0.125, 0.75],
            rotation: [1.0, 0.0, 0.0, 0.0],
            scale: [0.1, 0.2, 0.3],
        };
        let g = Gaussian::from(&attr);
        assert_eq!(g.rotation, glam::Quat::IDENTITY);
        assert_eq!(g.opacity, 0.75);
        assert_eq!(g.color, glam::Vec3::new(0.5, 0.25, 0.125));
    }
}
