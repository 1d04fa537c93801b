// Pointer/touch session state for the map viewport.

/// Net pointer movement (per axis) below which a down/up pair counts as a tap.
pub const TAP_SLOP_PX: f64 = 10.0;

/// Ephemeral input session. Exists only while a button or finger is down;
/// anchor data recorded at gesture start stays fixed for the whole gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        /// Pointer position at drag start, viewport coordinates.
        start_x: f64,
        start_y: f64,
        /// Translate at drag start.
        origin_x: f64,
        origin_y: f64,
    },
    Pinching {
        /// Inter-finger distance at pinch start.
        start_distance: f64,
        /// Scale at pinch start.
        start_scale: f64,
        /// Midpoint between the fingers at pinch start; the zoom anchor for
        /// the whole gesture.
        center_x: f64,
        center_y: f64,
        /// Translate at pinch start.
        origin_x: f64,
        origin_y: f64,
    },
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

/// Distance and midpoint of a two-finger touch, viewport coordinates.
pub fn pinch_geometry(x0: f64, y0: f64, x1: f64, y1: f64) -> (f64, f64, f64) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let distance = (dx * dx + dy * dy).sqrt();
    (distance, (x0 + x1) * 0.5, (y0 + y1) * 0.5)
}

/// Distinguishes a tap on a marker's hit area from the start of a drag.
#[derive(Debug, Default, Clone, Copy)]
pub struct TapTracker {
    start: Option<(f64, f64)>,
}

impl TapTracker {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Consumes the tracked start point; true when the pointer stayed within
    /// the tap slop on both axes.
    pub fn finish(&mut self, x: f64, y: f64) -> bool {
        match self.start.take() {
            Some((sx, sy)) => (x - sx).abs() < TAP_SLOP_PX && (y - sy).abs() < TAP_SLOP_PX,
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinch_geometry_distance_and_midpoint() {
        let (distance, cx, cy) = pinch_geometry(0.0, 0.0, 300.0, 400.0);
        assert!((distance - 500.0).abs() < 1e-9);
        assert!((cx - 150.0).abs() < 1e-9);
        assert!((cy - 200.0).abs() < 1e-9);
    }

    #[test]
    fn tap_within_slop_fires() {
        let mut tap = TapTracker::default();
        tap.begin(100.0, 100.0);
        assert!(tap.finish(105.0, 107.0));
        // start point is consumed; a second up without a down is not a tap
        assert!(!tap.finish(105.0, 107.0));
    }

    #[test]
    fn tap_beyond_slop_is_a_drag() {
        let mut tap = TapTracker::default();
        tap.begin(100.0, 100.0);
        assert!(!tap.finish(115.0, 100.0));
    }

    #[test]
    fn cancelled_tap_does_not_fire() {
        let mut tap = TapTracker::default();
        tap.begin(100.0, 100.0);
        tap.cancel();
        assert!(!tap.finish(100.0, 100.0));
    }
}
