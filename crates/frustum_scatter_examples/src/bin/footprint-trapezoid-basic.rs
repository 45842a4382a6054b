use frustum_scatter::prelude::*;
use frustum_scatter_examples::init_tracing;
use glam::Vec3;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Forward tilt: the classic trapezoid, near edge through the nadir.
    let tilted = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
        .with_pitch(60.0)
        .with_vfov(60.0)
        .with_aspect(16.0 / 9.0)
        .with_max_distance(50.0);
    print_footprint("tilted 60 degrees", &tilted)?;

    // Straight down with a short range: both edges clamp to the range circle.
    let nadir = tilted
        .clone()
        .with_pitch(90.0)
        .with_aspect(1.0)
        .with_max_distance(11.0);
    print_footprint("straight down, range 11", &nadir)?;

    // Looking above the horizon: nothing visible.
    let skyward = tilted.clone().with_pitch(-35.0);
    print_footprint("skyward", &skyward)?;

    Ok(())
}

fn print_footprint(label: &str, pose: &CameraPose) -> Result<()> {
    let polygon = project_footprint(pose)?;
    println!("{label}: {} vertices", polygon.len());
    for (index, vertex) in polygon.vertices().iter().enumerate() {
        println!("  [{index}] x = {:8.3}, z = {:8.3}", vertex.x, vertex.y);
    }
    Ok(())
}
