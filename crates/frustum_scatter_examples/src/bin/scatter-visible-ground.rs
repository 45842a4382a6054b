use frustum_scatter::prelude::*;
use frustum_scatter_examples::{init_tracing, render_run_to_png, ClassStyle, RenderConfig};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let pose = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
        .with_pitch(60.0)
        .with_vfov(60.0)
        .with_aspect(16.0 / 9.0)
        .with_max_distance(50.0);

    // Two footprint sizes: sparse boulders, frequent shrubs.
    let classes = vec![SizeClass::new(3.0, 0.3), SizeClass::new(1.0, 0.7)];
    let radii: Vec<f32> = classes.iter().map(|c| c.radius).collect();

    let runner = FootprintRunner::try_new(ScatterConfig::new(classes).with_spacing(1.0))?;
    let mut rng = StdRng::seed_from_u64(42);
    let result = runner.run(&pose, &mut rng)?;

    println!(
        "{} placements over a {}-vertex footprint",
        result.placements.len(),
        result.footprint.len()
    );

    let render = RenderConfig::new((1000, 1000))
        .with_class_style(ClassStyle {
            color: [150, 125, 100],
        })
        .with_class_style(ClassStyle {
            color: [90, 170, 90],
        });
    render_run_to_png(&result, &radii, &render, "scatter-visible-ground.png")?;
    println!("wrote scatter-visible-ground.png");

    Ok(())
}
