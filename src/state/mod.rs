pub mod gesture;
pub mod viewport;

pub use gesture::{Gesture, TapTracker};
pub use viewport::{MapViewport, Transform};
