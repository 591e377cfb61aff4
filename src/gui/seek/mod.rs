pub mod model;
pub mod view;
pub mod widget;

pub use model::{ArcSeek, Phase, ProgressListener, TouchAction};
pub use view::{Thumb, draw};
pub use widget::{ArcSeekWidget, SeekMsg, SeekOutput};

pub const CENTER_MARKER_RADIUS: f64 = 5.0;
pub const GRADIENT_STEP_DEG: f64 = 2.0; // angular length of one gradient slice
pub const THUMB_FACE_COLOR: (f64, f64, f64) = (0.98, 0.80, 0.18);
pub const THUMB_INK_COLOR: (f64, f64, f64) = (0.20, 0.15, 0.05);
