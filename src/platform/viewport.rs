//! Fit the fixed logical playfield to the browser window

use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Widest the canvas is ever displayed (CSS px)
pub const MAX_DISPLAY_WIDTH: f32 = 1200.0;
/// Space left around the canvas (CSS px)
pub const VIEWPORT_MARGIN: f32 = 16.0;

/// Display size in CSS pixels for a window `viewport_width` wide,
/// keeping the logical aspect ratio
pub fn fit_width(viewport_width: f32) -> (f32, f32) {
    let width = (viewport_width - VIEWPORT_MARGIN).min(MAX_DISPLAY_WIDTH).max(1.0);
    let scale = width / LOGICAL_WIDTH;
    (LOGICAL_WIDTH * scale, LOGICAL_HEIGHT * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_window() {
        let (w, h) = fit_width(416.0);
        assert_eq!(w, 400.0);
        assert_eq!(h, 225.0);
    }

    #[test]
    fn test_wide_window_capped() {
        let (w, h) = fit_width(3000.0);
        assert_eq!(w, 1200.0);
        assert_eq!(h, 675.0);
    }

    #[test]
    fn test_degenerate_window() {
        let (w, h) = fit_width(0.0);
        assert!(w > 0.0 && h > 0.0);
    }
}
