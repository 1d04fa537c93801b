// Pan/zoom/pinch transform over the map image. Pure numeric state; the
// component layer feeds it browser events and applies the resulting transform.

use super::gesture::{Gesture, pinch_geometry};

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 4.0;
/// Step factor for the +/- buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.3;
/// Wheel delta to zoom factor: `exp(-delta_y * RATE)`.
const WHEEL_ZOOM_RATE: f64 = 0.001;
/// Pinches narrower than this are ignored to keep the scale ratio finite.
const MIN_PINCH_DISTANCE: f64 = 1.0;

/// Mapping from image pixel space to viewport pixel space:
/// `screen = image * scale + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Rendered (pre-scale) size of the map image. Height always matches the
/// viewport height; width follows the image's natural aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// Viewport transform engine: one committed [`Transform`] plus the in-flight
/// gesture session mutated in place while a button or finger is down.
#[derive(Debug, Clone)]
pub struct MapViewport {
    transform: Transform,
    image: ImageDimensions,
    viewport: ViewportSize,
    natural: Option<(f64, f64)>,
    gesture: Gesture,
}

impl MapViewport {
    pub fn new() -> Self {
        Self {
            transform: Transform::default(),
            image: ImageDimensions::default(),
            viewport: ViewportSize::default(),
            natural: None,
            gesture: Gesture::Idle,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn scale_percent(&self) -> u32 {
        (self.transform.scale * 100.0).round() as u32
    }

    pub fn image_dimensions(&self) -> ImageDimensions {
        self.image
    }

    pub fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_gesturing(&self) -> bool {
        self.gesture.is_active()
    }

    /// Fits the freshly loaded image to the viewport: full viewport height,
    /// width from the natural aspect ratio, horizontally centered at minimum
    /// scale. Degenerate sizes leave the engine uninitialized.
    pub fn image_loaded(
        &mut self,
        natural_width: f64,
        natural_height: f64,
        viewport_height: f64,
        container_width: f64,
    ) {
        if natural_width <= 0.0
            || natural_height <= 0.0
            || viewport_height <= 0.0
            || container_width <= 0.0
        {
            return;
        }
        self.natural = Some((natural_width, natural_height));
        self.viewport = ViewportSize {
            width: container_width,
            height: viewport_height,
        };
        self.fit_image();
        self.gesture = Gesture::Idle;
        self.transform = self.home_transform();
    }

    /// Tracks the live container size. Mid-gesture, dimensions update right
    /// away but the re-clamp waits for the gesture to end.
    pub fn viewport_resized(&mut self, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = ViewportSize { width, height };
        self.fit_image();
        // An in-progress gesture keeps its unclamped translate; release and
        // cancel re-clamp against the new dimensions.
        if !self.gesture.is_active() {
            self.commit_clamped();
        }
    }

    /// Returns to minimum scale with the image horizontally centered.
    pub fn reset(&mut self) {
        if !self.ready() {
            return;
        }
        self.gesture = Gesture::Idle;
        self.transform = self.home_transform();
    }

    /// Button zoom, anchored at the viewport center.
    pub fn zoom_in(&mut self) {
        let (cx, cy) = self.viewport_center();
        self.zoom_about(BUTTON_ZOOM_STEP, cx, cy);
    }

    pub fn zoom_out(&mut self) {
        let (cx, cy) = self.viewport_center();
        self.zoom_about(1.0 / BUTTON_ZOOM_STEP, cx, cy);
    }

    /// Wheel zoom, anchored at the cursor.
    pub fn wheel_zoom(&mut self, delta_y: f64, cursor_x: f64, cursor_y: f64) {
        self.zoom_about((-delta_y * WHEEL_ZOOM_RATE).exp(), cursor_x, cursor_y);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if !self.ready() {
            return;
        }
        self.gesture = Gesture::Dragging {
            start_x: x,
            start_y: y,
            origin_x: self.transform.x,
            origin_y: self.transform.y,
        };
    }

    /// Pans against the session anchor. Unclamped while the pointer is down;
    /// the transform snaps into bounds on release.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Gesture::Dragging {
            start_x,
            start_y,
            origin_x,
            origin_y,
        } = self.gesture
        {
            self.transform.x = origin_x + (x - start_x);
            self.transform.y = origin_y + (y - start_y);
        }
    }

    pub fn pinch_start(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        if !self.ready() {
            return;
        }
        let (distance, cx, cy) = pinch_geometry(x0, y0, x1, y1);
        if distance < MIN_PINCH_DISTANCE {
            return;
        }
        self.gesture = Gesture::Pinching {
            start_distance: distance,
            start_scale: self.transform.scale,
            center_x: cx,
            center_y: cy,
            origin_x: self.transform.x,
            origin_y: self.transform.y,
        };
    }

    /// Rescales against the session's starting scale and translate, anchored
    /// at the initial pinch center so that point stays visually stationary
    /// for the whole gesture. Translate is left unclamped until release.
    pub fn pinch_move(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        if let Gesture::Pinching {
            start_distance,
            start_scale,
            center_x,
            center_y,
            origin_x,
            origin_y,
        } = self.gesture
        {
            let (distance, _, _) = pinch_geometry(x0, y0, x1, y1);
            let scale = (start_scale * distance / start_distance).clamp(MIN_SCALE, MAX_SCALE);
            let ratio = scale / start_scale;
            self.transform = Transform {
                scale,
                x: center_x - (center_x - origin_x) * ratio,
                y: center_y - (center_y - origin_y) * ratio,
            };
        }
    }

    /// Ends the current gesture and commits a clamped transform. `remaining`
    /// carries the one finger still down when a pinch degrades into a drag.
    pub fn release(&mut self, remaining: Option<(f64, f64)>) {
        if !self.gesture.is_active() {
            return;
        }
        self.gesture = Gesture::Idle;
        self.commit_clamped();
        if let Some((x, y)) = remaining {
            self.pointer_down(x, y);
        }
    }

    /// Force-reset to idle (input surface lost capture).
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
        self.commit_clamped();
    }

    /// Bounding policy, per axis independently: when the scaled image fits
    /// the viewport the translate is forced to center it; otherwise it is
    /// clamped so no blank margin shows past either image edge.
    pub fn clamp(&self, x: f64, y: f64, scale: f64) -> (f64, f64) {
        if !self.ready() {
            return (x, y);
        }
        (
            clamp_axis(x, self.image.width * scale, self.viewport.width),
            clamp_axis(y, self.image.height * scale, self.viewport.height),
        )
    }

    /// Viewport position of an image-relative percent coordinate.
    pub fn project(&self, position_x_pct: f64, position_y_pct: f64) -> (f64, f64) {
        let t = self.transform;
        (
            t.x + self.image.width * (position_x_pct / 100.0) * t.scale,
            t.y + self.image.height * (position_y_pct / 100.0) * t.scale,
        )
    }

    // Two-phase update: the scale commits first, then the translate is
    // recomputed around the anchor and clamped against the new scale.
    fn zoom_about(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
        if !self.ready() || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old = self.transform.scale;
        let scale = (old * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = scale / old;
        let x = anchor_x - (anchor_x - self.transform.x) * ratio;
        let y = anchor_y - (anchor_y - self.transform.y) * ratio;
        let (x, y) = self.clamp(x, y, scale);
        self.transform = Transform { scale, x, y };
    }

    fn fit_image(&mut self) {
        if let Some((nw, nh)) = self.natural {
            let height = self.viewport.height;
            self.image = ImageDimensions {
                width: height * (nw / nh),
                height,
            };
        }
    }

    fn home_transform(&self) -> Transform {
        let (x, y) = self.clamp(
            (self.viewport.width - self.image.width) / 2.0,
            0.0,
            MIN_SCALE,
        );
        Transform {
            scale: MIN_SCALE,
            x,
            y,
        }
    }

    fn commit_clamped(&mut self) {
        let (x, y) = self.clamp(self.transform.x, self.transform.y, self.transform.scale);
        self.transform.x = x;
        self.transform.y = y;
    }

    fn viewport_center(&self) -> (f64, f64) {
        (self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    fn ready(&self) -> bool {
        self.image.width > 0.0
            && self.image.height > 0.0
            && self.viewport.width > 0.0
            && self.viewport.height > 0.0
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_axis(value: f64, scaled_extent: f64, viewport_extent: f64) -> f64 {
    if scaled_extent <= viewport_extent {
        (viewport_extent - scaled_extent) / 2.0
    } else {
        value.clamp(viewport_extent - scaled_extent, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // Image exactly fills the viewport: 1600x1200 natural in an 800x600 box.
    fn fitted() -> MapViewport {
        let mut vp = MapViewport::new();
        vp.image_loaded(1600.0, 1200.0, 600.0, 800.0);
        vp
    }

    // Image wider than the viewport: renders 1200x600 in an 800x600 box.
    fn wide() -> MapViewport {
        let mut vp = MapViewport::new();
        vp.image_loaded(2400.0, 1200.0, 600.0, 800.0);
        vp
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn load_fits_height_and_centers() {
        let vp = fitted();
        let dims = vp.image_dimensions();
        assert_close(dims.width, 800.0);
        assert_close(dims.height, 600.0);
        let t = vp.transform();
        assert_close(t.scale, 1.0);
        assert_close(t.x, 0.0);
        assert_close(t.y, 0.0);
    }

    #[test]
    fn load_centers_wide_image_inside_bounds() {
        let vp = wide();
        let t = vp.transform();
        // (800 - 1200) / 2, within the [-400, 0] clamp range
        assert_close(t.x, -200.0);
        assert_close(t.y, 0.0);
    }

    #[test]
    fn scale_stays_within_limits() {
        let mut vp = fitted();
        for _ in 0..20 {
            vp.zoom_in();
        }
        assert_close(vp.scale(), MAX_SCALE);
        vp.wheel_zoom(-10_000.0, 400.0, 300.0);
        assert!(vp.scale() <= MAX_SCALE);
        for _ in 0..20 {
            vp.zoom_out();
        }
        assert_close(vp.scale(), MIN_SCALE);
        vp.wheel_zoom(10_000.0, 400.0, 300.0);
        assert!(vp.scale() >= MIN_SCALE);
    }

    #[test]
    fn clamp_is_idempotent() {
        let vp = wide();
        for (x, y, s) in [
            (500.0, -900.0, 1.0),
            (-3000.0, 250.0, 2.0),
            (0.0, 0.0, 4.0),
        ] {
            let (cx, cy) = vp.clamp(x, y, s);
            let (cx2, cy2) = vp.clamp(cx, cy, s);
            assert_close(cx, cx2);
            assert_close(cy, cy2);
        }
    }

    #[test]
    fn wheel_zoom_keeps_anchor_stationary() {
        let mut vp = wide();
        let (ax, ay) = (250.0, 300.0);
        let before = vp.transform();
        let image_x = (ax - before.x) / before.scale;
        let image_y = (ay - before.y) / before.scale;
        vp.wheel_zoom(-300.0, ax, ay);
        let after = vp.transform();
        assert_close((ax - after.x) / after.scale, image_x);
        assert_close((ay - after.y) / after.scale, image_y);
    }

    #[test]
    fn button_zoom_round_trip_restores_transform() {
        let mut vp = fitted();
        vp.zoom_in();
        assert_close(vp.scale(), BUTTON_ZOOM_STEP);
        vp.zoom_out();
        let t = vp.transform();
        assert_close(t.scale, 1.0);
        assert_close(t.x, 0.0);
        assert_close(t.y, 0.0);
    }

    #[test]
    fn release_centers_image_that_fits() {
        let mut vp = fitted();
        vp.pointer_down(100.0, 100.0);
        vp.pointer_move(150.0, 130.0);
        vp.release(None);
        let t = vp.transform();
        // scaled extents equal the viewport on both axes: forced to center
        assert_close(t.x, 0.0);
        assert_close(t.y, 0.0);
    }

    #[test]
    fn drag_overshoot_clamps_on_release() {
        let mut vp = wide();
        assert_close(vp.transform().x, -200.0);
        vp.pointer_down(0.0, 0.0);
        vp.pointer_move(1000.0, 0.0);
        // mid-gesture overshoot is allowed
        assert_close(vp.transform().x, 800.0);
        vp.release(None);
        let t = vp.transform();
        assert_close(t.x, 0.0);
        assert_close(t.y, 0.0);
    }

    #[test]
    fn pinch_doubles_scale_about_its_center() {
        let mut vp = wide();
        let image_x = (400.0 - vp.transform().x) / vp.scale();
        vp.pinch_start(350.0, 300.0, 450.0, 300.0);
        vp.pinch_move(300.0, 300.0, 500.0, 300.0);
        assert_close(vp.scale(), 2.0);
        // the image point under the initial pinch center has not moved
        assert_close((400.0 - vp.transform().x) / vp.scale(), image_x);
        vp.release(None);
        assert_close(vp.scale(), 2.0);
    }

    #[test]
    fn pinch_degrades_into_drag_with_remaining_finger() {
        let mut vp = wide();
        vp.pinch_start(350.0, 300.0, 450.0, 300.0);
        vp.pinch_move(300.0, 300.0, 500.0, 300.0);
        vp.release(Some((500.0, 300.0)));
        assert!(matches!(vp.gesture(), Gesture::Dragging { .. }));
        let x = vp.transform().x;
        vp.pointer_move(490.0, 300.0);
        assert_close(vp.transform().x, x - 10.0);
    }

    #[test]
    fn near_zero_pinch_distance_is_ignored() {
        let mut vp = wide();
        vp.pinch_start(100.0, 100.0, 100.2, 100.0);
        assert_eq!(vp.gesture(), Gesture::Idle);
        let before = vp.transform();
        vp.pinch_move(100.0, 100.0, 300.0, 100.0);
        assert_eq!(vp.transform(), before);
    }

    #[test]
    fn degenerate_image_leaves_engine_inert() {
        let mut vp = MapViewport::new();
        vp.image_loaded(0.0, 0.0, 600.0, 800.0);
        vp.zoom_in();
        vp.pointer_down(10.0, 10.0);
        assert_eq!(vp.gesture(), Gesture::Idle);
        assert_eq!(vp.transform(), Transform::default());
    }

    #[test]
    fn resize_defers_reclamp_until_gesture_end() {
        let mut vp = wide();
        vp.pointer_down(0.0, 0.0);
        vp.viewport_resized(1400.0, 600.0);
        // dimensions updated, translate untouched while the drag is live
        assert_close(vp.transform().x, -200.0);
        vp.release(None);
        // 1200px image now fits the 1400px viewport: forced to center
        assert_close(vp.transform().x, 100.0);
    }

    #[test]
    fn resize_reclamps_immediately_when_idle() {
        let mut vp = wide();
        vp.viewport_resized(1400.0, 600.0);
        assert_close(vp.transform().x, 100.0);
    }

    #[test]
    fn blur_cancels_gesture_and_clamps() {
        let mut vp = wide();
        vp.pointer_down(0.0, 0.0);
        vp.pointer_move(1000.0, 0.0);
        vp.cancel();
        assert_eq!(vp.gesture(), Gesture::Idle);
        assert_close(vp.transform().x, 0.0);
    }

    #[test]
    fn reset_restores_home_transform() {
        let mut vp = wide();
        vp.zoom_in();
        vp.pointer_down(0.0, 0.0);
        vp.pointer_move(-100.0, -50.0);
        vp.release(None);
        vp.reset();
        let t = vp.transform();
        assert_close(t.scale, MIN_SCALE);
        assert_close(t.x, -200.0);
        assert_close(t.y, 0.0);
    }

    #[test]
    fn markers_project_through_the_transform() {
        let mut vp = wide();
        assert_eq!(vp.project(50.0, 50.0), (400.0, 300.0));
        vp.pinch_start(350.0, 300.0, 450.0, 300.0);
        vp.pinch_move(300.0, 300.0, 500.0, 300.0);
        // the marker at the pinch center stays put through the zoom
        let (mx, my) = vp.project(50.0, 50.0);
        assert_close(mx, 400.0);
        assert_close(my, 300.0);
    }

    #[test]
    fn scale_percent_rounds() {
        let mut vp = fitted();
        assert_eq!(vp.scale_percent(), 100);
        vp.zoom_in();
        assert_eq!(vp.scale_percent(), 130);
    }
}
