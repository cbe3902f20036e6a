use splat_raster as splat;

/// Render a synthetic splat ring to a PPM image.
#[derive(argh::FromArgs)]
struct Args {
    /// image width in pixels
    #[argh(option, default = "512")]
    width: usize,
    /// image height in pixels
    #[argh(option, default = "512")]
    height: usize,
    /// output file path
    #[argh(option, default = "String::from(\"splats.ppm\")")]
    output: String,
    /// sphere mask radius, -1 to disable
    #[argh(option, default = "-1.0")]
    sphere_radius: f32,
}

fn ring(count: usize) -> Vec<splat::Gaussian> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            splat::Gaussian {
                center: glam::Vec3::new(angle.cos() * 1.5, angle.sin() * 1.5, -6.0),
                rotation: glam::Quat::from_rotation_z(angle),
                scale: glam::Vec3::new(0.4, 0.1, 0.1),
                color: glam::Vec3::new(
                    0.5 + 0.5 * angle.cos(),
                    0.5 + 0.5 * angle.sin(),
                    0.8,
                ),
                opacity: 0.9,
            }
        })
        .collect()
}

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();

    let viewport = glam::Vec2::new(args.width as f32, args.height as f32);
    let projection = glam::Mat4::perspective_rh(
        std::f32::consts::FRAC_PI_3,
        viewport.x / viewport.y,
        0.1,
        100.0,
    );
    let mut frame = splat::FrameParams::new(glam::Mat4::IDENTITY, projection, viewport);
    frame.sphere_radius = args.sphere_radius;
    frame.sphere_center = glam::Vec3::new(0.0, 0.0, -6.0);

    let gaussians = ring(24);
    let mut target = splat::Target::new(args.width, args.height);
    splat::render(
        &gaussians,
        &frame,
        &splat::RenderParameters::default(),
        &mut target,
    );

    std::fs::write(&args.output, target.to_ppm()).expect("failed to write output image");
    log::info!("wrote {}x{} image to {}", args.width, args.height, args.output);
}
