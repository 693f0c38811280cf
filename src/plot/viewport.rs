//! Visible-region transform
//!
//! Owns the data-space rectangle currently on screen and maps between
//! data coordinates and canvas pixels. The x and y axes scale
//! independently, so autoscaled data need not be square.

use crate::plot::glyph::Glyph;

/// Wheel step for one zoom notch
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Autoscale margin per side, as a fraction of the data extent
const AUTOSCALE_MARGIN: f64 = 0.05;

/// Spans never collapse below this, keeping the transform invertible
const MIN_SPAN: f64 = 1e-12;

/// Canvas size in pixels, supplied by the host each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

/// Wheel scroll direction as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Other,
}

impl ScrollDirection {
    /// Zoom factor for this wheel signal given the configured step.
    /// Wheel-up zooms in, wheel-down zooms out, anything else is a
    /// no-op factor of 1.
    pub fn zoom_factor(self, step: f64) -> f64 {
        match self {
            ScrollDirection::Up => 1.0 / step,
            ScrollDirection::Down => step,
            ScrollDirection::Other => 1.0,
        }
    }
}

/// The visible data-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

impl Viewport {
    /// Minimal rectangle bounding all glyph centers, with a small
    /// margin. Called once per scene rebuild; pan and zoom take over
    /// from there until the next rebuild.
    pub fn around_glyphs(glyphs: &[Glyph]) -> Self {
        if glyphs.is_empty() {
            return Self::default();
        }

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for g in glyphs {
            x_min = x_min.min(g.x);
            x_max = x_max.max(g.x);
            y_min = y_min.min(g.y);
            y_max = y_max.max(g.y);
        }

        let (x_min, x_max) = pad_extent(x_min, x_max);
        let (y_min, y_max) = pad_extent(y_min, y_max);

        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn x_span(&self) -> f64 {
        (self.x_max - self.x_min).max(MIN_SPAN)
    }

    pub fn y_span(&self) -> f64 {
        (self.y_max - self.y_min).max(MIN_SPAN)
    }

    /// Map a data point to canvas pixels. Screen y grows downward.
    pub fn data_to_screen(&self, x: f64, y: f64, canvas: CanvasSize) -> (f32, f32) {
        let px = (x - self.x_min) / self.x_span() * canvas.width as f64;
        let py = (1.0 - (y - self.y_min) / self.y_span()) * canvas.height as f64;
        (px as f32, py as f32)
    }

    /// Inverse of [`data_to_screen`](Self::data_to_screen).
    pub fn screen_to_data(&self, px: f32, py: f32, canvas: CanvasSize) -> (f64, f64) {
        let x = self.x_min + px as f64 / canvas.width.max(1.0) as f64 * self.x_span();
        let y = self.y_min + (1.0 - py as f64 / canvas.height.max(1.0) as f64) * self.y_span();
        (x, y)
    }

    /// Scale both spans by `factor` while keeping the data point under
    /// the cursor fixed on screen. `factor < 1` zooms in.
    pub fn zoom_around(&mut self, cx: f64, cy: f64, factor: f64) {
        self.x_min = cx - (cx - self.x_min) * factor;
        self.x_max = cx - (cx - self.x_max) * factor;
        self.y_min = cy - (cy - self.y_min) * factor;
        self.y_max = cy - (cy - self.y_max) * factor;
    }

    /// Translate the rectangle by a data-space delta without rescaling.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x_min += dx;
        self.x_max += dx;
        self.y_min += dy;
        self.y_max += dy;
    }
}

fn pad_extent(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span <= 0.0 {
        // Degenerate extent (single point or a shared coordinate)
        (min - 1.0, max + 1.0)
    } else {
        (min - span * AUTOSCALE_MARGIN, max + span * AUTOSCALE_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::color::Rgb;

    fn glyph_at(x: f64, y: f64) -> Glyph {
        Glyph {
            row: 0,
            x,
            y,
            radius: 0.1,
            obverse: Rgb(0, 0, 0),
            reverse: Rgb(0, 0, 0),
        }
    }

    const CANVAS: CanvasSize = CanvasSize {
        width: 500.0,
        height: 500.0,
    };

    #[test]
    fn test_screen_roundtrip() {
        let vp = Viewport {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        };
        let (px, py) = vp.data_to_screen(2.5, 7.5, CANVAS);
        assert_eq!((px, py), (125.0, 125.0));

        let (x, y) = vp.screen_to_data(px, py, CANVAS);
        assert!((x - 2.5).abs() < 1e-9);
        assert!((y - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_around_center() {
        // Viewport [0,10]x[0,10], wheel-up at data (5,5)
        let mut vp = Viewport {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        };
        vp.zoom_around(5.0, 5.0, ScrollDirection::Up.zoom_factor(DEFAULT_ZOOM_STEP));

        assert!((vp.x_min - 0.8333).abs() < 1e-3);
        assert!((vp.x_max - 9.1667).abs() < 1e-3);
        assert!((vp.y_min - 0.8333).abs() < 1e-3);
        assert!((vp.y_max - 9.1667).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_keeps_cursor_fixed() {
        let mut vp = Viewport {
            x_min: -3.0,
            x_max: 17.0,
            y_min: 2.0,
            y_max: 8.0,
        };
        let cursor = (4.5, 6.25);
        let before = vp.data_to_screen(cursor.0, cursor.1, CANVAS);

        vp.zoom_around(cursor.0, cursor.1, ScrollDirection::Up.zoom_factor(DEFAULT_ZOOM_STEP));
        let after = vp.data_to_screen(cursor.0, cursor.1, CANVAS);

        assert!((before.0 - after.0).abs() < 1e-3);
        assert!((before.1 - after.1).abs() < 1e-3);
    }

    #[test]
    fn test_other_scroll_is_noop() {
        let mut vp = Viewport::default();
        let original = vp;
        let factor = ScrollDirection::Other.zoom_factor(DEFAULT_ZOOM_STEP);
        vp.zoom_around(0.5, 0.5, factor);
        assert_eq!(vp, original);
    }

    #[test]
    fn test_pan_translates_without_rescale() {
        let mut vp = Viewport {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 4.0,
        };
        vp.pan_by(-1.0, 2.5);

        assert_eq!(vp.x_min, -1.0);
        assert_eq!(vp.x_max, 9.0);
        assert_eq!(vp.y_min, 2.5);
        assert_eq!(vp.y_max, 6.5);
    }

    #[test]
    fn test_autoscale_bounds_all_centers() {
        let glyphs = vec![glyph_at(0.0, 0.0), glyph_at(10.0, 20.0), glyph_at(5.0, -4.0)];
        let vp = Viewport::around_glyphs(&glyphs);

        assert!(vp.x_min < 0.0 && vp.x_max > 10.0);
        assert!(vp.y_min < -4.0 && vp.y_max > 20.0);
        // 5% margin per side
        assert!((vp.x_min - (-0.5)).abs() < 1e-9);
        assert!((vp.x_max - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_autoscale_single_point() {
        let vp = Viewport::around_glyphs(&[glyph_at(3.0, 3.0)]);
        assert_eq!((vp.x_min, vp.x_max), (2.0, 4.0));
        assert_eq!((vp.y_min, vp.y_max), (2.0, 4.0));
    }

    #[test]
    fn test_autoscale_empty() {
        assert_eq!(Viewport::around_glyphs(&[]), Viewport::default());
    }
}
