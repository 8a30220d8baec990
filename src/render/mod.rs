mod core;

pub use core::{SketchSettings, sketch_layout};
