#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_run_to_png, ClassStyle, RenderConfig};
