//! Scene assembly and rendering
//!
//! Composes the color maps and glyphs for the current column choices,
//! and flattens them into screen-space half-disc primitives under the
//! current viewport. Rendering is a pure function of its inputs and
//! redraws the whole scene every call.

use std::collections::HashMap;

use tracing::info;

use crate::plot::color::{assign_colors, Rgb};
use crate::plot::glyph::{build_glyphs, Glyph, Side};
use crate::plot::viewport::{CanvasSize, Viewport};
use crate::plot::ColumnSelection;
use crate::table::DataTable;

/// A fully built scene: glyphs plus the color maps they were colored
/// with. Rebuilt wholesale whenever the table or a column choice
/// changes, immutable in between.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub glyphs: Vec<Glyph>,
    pub obverse_colors: HashMap<String, Rgb>,
    pub reverse_colors: HashMap<String, Rgb>,
}

impl Scene {
    /// Build color maps for the two categorical columns and one glyph
    /// per plottable row. An incomplete selection yields an empty
    /// scene.
    pub fn build(
        table: &DataTable,
        selection: &ColumnSelection,
        obverse_palette: &[Rgb],
        reverse_palette: &[Rgb],
        radius: f64,
    ) -> Self {
        if !selection.is_complete() {
            return Self::default();
        }

        let obverse_colors = selection
            .obverse
            .as_deref()
            .and_then(|col| table.column_values(col))
            .map(|values| assign_colors(&values, obverse_palette))
            .unwrap_or_default();
        let reverse_colors = selection
            .reverse
            .as_deref()
            .and_then(|col| table.column_values(col))
            .map(|values| assign_colors(&values, reverse_palette))
            .unwrap_or_default();

        let glyphs = build_glyphs(table, selection, &obverse_colors, &reverse_colors, radius);
        info!(
            "Scene built: {} glyphs, {} obverse / {} reverse categories",
            glyphs.len(),
            obverse_colors.len(),
            reverse_colors.len()
        );

        Self {
            glyphs,
            obverse_colors,
            reverse_colors,
        }
    }
}

/// A paintable half-disc in canvas pixels. Pixel radii follow the two
/// axis scales independently, so a coin stays a true data-space circle
/// even when the viewport is not square.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfDiscPrim {
    pub row: usize,
    pub center: (f32, f32),
    pub rx: f32,
    pub ry: f32,
    pub side: Side,
    pub fill: Rgb,
}

impl HalfDiscPrim {
    /// Whether a canvas point falls inside this half-disc.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let dx = (px - self.center.0) / self.rx.max(f32::EPSILON);
        // Canvas y grows downward; flip back so angles match data space
        let dy = (self.center.1 - py) / self.ry.max(f32::EPSILON);
        if dx * dx + dy * dy > 1.0 {
            return false;
        }

        let mut angle = dy.atan2(dx).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        match self.side {
            Side::Obverse => (90.0..270.0).contains(&angle),
            Side::Reverse => !(90.0..270.0).contains(&angle),
        }
    }
}

/// Flatten glyphs into draw-ordered primitives under the current view:
/// rows in input order, obverse before reverse within each glyph.
pub fn render(glyphs: &[Glyph], viewport: &Viewport, canvas: CanvasSize) -> Vec<HalfDiscPrim> {
    let mut prims = Vec::with_capacity(glyphs.len() * 2);
    for g in glyphs {
        let center = viewport.data_to_screen(g.x, g.y, canvas);
        let rx = (g.radius / viewport.x_span() * canvas.width as f64) as f32;
        let ry = (g.radius / viewport.y_span() * canvas.height as f64) as f32;

        prims.push(HalfDiscPrim {
            row: g.row,
            center,
            rx,
            ry,
            side: Side::Obverse,
            fill: g.obverse,
        });
        prims.push(HalfDiscPrim {
            row: g.row,
            center,
            rx,
            ry,
            side: Side::Reverse,
            fill: g.reverse,
        });
    }
    prims
}

/// Topmost primitive containing the canvas point, if any. Later
/// primitives draw over earlier ones, so the search walks draw order
/// in reverse.
pub fn hit_test(prims: &[HalfDiscPrim], px: f32, py: f32) -> Option<&HalfDiscPrim> {
    prims.iter().rev().find(|p| p.contains(px, py))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize {
        width: 500.0,
        height: 500.0,
    };

    fn viewport() -> Viewport {
        Viewport {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        }
    }

    fn glyph(row: usize, x: f64, y: f64) -> Glyph {
        Glyph {
            row,
            x,
            y,
            radius: 1.0,
            obverse: Rgb(255, 0, 0),
            reverse: Rgb(0, 0, 255),
        }
    }

    #[test]
    fn test_two_prims_per_glyph_in_draw_order() {
        let glyphs = vec![glyph(0, 2.0, 2.0), glyph(1, 8.0, 8.0)];
        let prims = render(&glyphs, &viewport(), CANVAS);

        assert_eq!(prims.len(), 4);
        assert_eq!(prims[0].side, Side::Obverse);
        assert_eq!(prims[1].side, Side::Reverse);
        assert_eq!(prims[0].row, 0);
        assert_eq!(prims[3].row, 1);
    }

    #[test]
    fn test_prim_geometry() {
        let prims = render(&[glyph(0, 5.0, 5.0)], &viewport(), CANVAS);
        assert_eq!(prims[0].center, (250.0, 250.0));
        // radius 1.0 over a 10-unit span on 500px
        assert_eq!(prims[0].rx, 50.0);
        assert_eq!(prims[0].ry, 50.0);
    }

    #[test]
    fn test_hit_sides() {
        let prims = render(&[glyph(0, 5.0, 5.0)], &viewport(), CANVAS);

        // Left of center is the obverse half, right the reverse
        let left = hit_test(&prims, 230.0, 250.0).unwrap();
        assert_eq!(left.side, Side::Obverse);
        let right = hit_test(&prims, 270.0, 250.0).unwrap();
        assert_eq!(right.side, Side::Reverse);

        // Outside the disc misses
        assert!(hit_test(&prims, 330.0, 250.0).is_none());
    }

    #[test]
    fn test_topmost_hit_wins() {
        // Two overlapping glyphs; row 1 is drawn later, so it is on top
        let glyphs = vec![glyph(0, 5.0, 5.0), glyph(1, 5.1, 5.0)];
        let prims = render(&glyphs, &viewport(), CANVAS);

        let hit = hit_test(&prims, 250.0, 250.0).unwrap();
        assert_eq!(hit.row, 1);
    }

    #[test]
    fn test_pick_row_zero_scenario() {
        // Dataset of 3 rows; clicking the first coin resolves to row 0
        let glyphs = vec![glyph(0, 2.0, 2.0), glyph(1, 5.0, 5.0), glyph(2, 8.0, 8.0)];
        let prims = render(&glyphs, &viewport(), CANVAS);

        let (px, py) = viewport().data_to_screen(2.0, 2.0, CANVAS);
        let hit = hit_test(&prims, px - 5.0, py).unwrap();
        assert_eq!(hit.row, 0);
    }

    #[test]
    fn test_vertical_boundary_split() {
        let prims = render(&[glyph(0, 5.0, 5.0)], &viewport(), CANVAS);

        // Straight up from center is angle 90, which belongs to the
        // obverse span [90, 270)
        let top = hit_test(&prims, 250.0, 230.0).unwrap();
        assert_eq!(top.side, Side::Obverse);
        // Straight down is angle 270, the start of the reverse span
        let bottom = hit_test(&prims, 250.0, 270.0).unwrap();
        assert_eq!(bottom.side, Side::Reverse);
    }
}
