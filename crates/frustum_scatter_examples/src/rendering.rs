//! PNG rendering helpers shared by the example binaries.
use anyhow::Context;
use frustum_scatter::runner::RunResult;
use glam::Vec2;
use image::{Rgb, RgbImage};

/// Install a simple stdout tracing subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// How one size class is drawn.
#[derive(Debug, Clone, Copy)]
pub struct ClassStyle {
    pub color: [u8; 3],
}

/// Image size, colors, and the world window derived from the footprint.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub footprint_fill: [u8; 3],
    pub class_styles: Vec<ClassStyle>,
    /// Extra world units drawn around the footprint bounds.
    pub margin: f32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [24, 26, 30],
            footprint_fill: [60, 70, 60],
            class_styles: Vec::new(),
            margin: 2.0,
        }
    }

    pub fn with_class_style(mut self, style: ClassStyle) -> Self {
        self.class_styles.push(style);
        self
    }
}

/// Rasterize a run: footprint region filled, one disc per placement, radius
/// taken from `radii` per class index.
pub fn render_run_to_png(
    result: &RunResult,
    radii: &[f32],
    config: &RenderConfig,
    out_path: &str,
) -> anyhow::Result<()> {
    let (width, height) = config.image_size;
    let mut image = RgbImage::from_pixel(width, height, Rgb(config.background));

    let Some((min, max)) = result.footprint.bounds() else {
        image.save(out_path).context("saving png")?;
        return Ok(());
    };
    let min = min - Vec2::splat(config.margin);
    let max = max + Vec2::splat(config.margin);
    let extent = max - min;
    let scale = (width as f32 / extent.x).min(height as f32 / extent.y);

    let to_world = |px: u32, py: u32| -> Vec2 {
        // Flip the vertical axis so larger z is up in the image.
        Vec2::new(
            min.x + (px as f32 + 0.5) / scale,
            max.y - (py as f32 + 0.5) / scale,
        )
    };

    for py in 0..height {
        for px in 0..width {
            let world = to_world(px, py);
            if result.footprint.contains(world) {
                image.put_pixel(px, py, Rgb(config.footprint_fill));
            }
        }
    }

    for placement in &result.placements {
        let style = config
            .class_styles
            .get(placement.class_index)
            .copied()
            .unwrap_or(ClassStyle {
                color: [220, 220, 220],
            });
        let radius = radii.get(placement.class_index).copied().unwrap_or(0.5);
        draw_disc(&mut image, placement.position, radius, style.color, |p| {
            let px = (p.x - min.x) * scale - 0.5;
            let py = (max.y - p.y) * scale - 0.5;
            (px, py)
        });
    }

    image.save(out_path).context("saving png")?;
    Ok(())
}

fn draw_disc(
    image: &mut RgbImage,
    center: Vec2,
    radius: f32,
    color: [u8; 3],
    to_pixel: impl Fn(Vec2) -> (f32, f32),
) {
    let (cx, cy) = to_pixel(center);
    let (rx, _) = to_pixel(center + Vec2::new(radius, 0.0));
    let pixel_radius = (rx - cx).abs().max(1.0);

    let x0 = (cx - pixel_radius).floor().max(0.0) as u32;
    let x1 = ((cx + pixel_radius).ceil() as u32).min(image.width().saturating_sub(1));
    let y0 = (cy - pixel_radius).floor().max(0.0) as u32;
    let y1 = ((cy + pixel_radius).ceil() as u32).min(image.height().saturating_sub(1));

    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f32 - cx;
            let dy = py as f32 - cy;
            if dx * dx + dy * dy <= pixel_radius * pixel_radius {
                image.put_pixel(px, py, Rgb(color));
            }
        }
    }
}
