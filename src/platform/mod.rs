//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Input levels and the start/restart edge
//! - Fitting the fixed logical resolution to the viewport

pub mod clock;
pub mod input;
pub mod viewport;

pub use clock::FrameClock;
pub use input::{Action, InputProvider, InputState};
pub use viewport::fit_width;
