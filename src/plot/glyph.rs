//! Half-disc glyph construction
//!
//! One glyph per data row: a left (obverse) and right (reverse)
//! semicircle sharing a center, each colored by its categorical value.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::plot::color::Rgb;
use crate::plot::ColumnSelection;
use crate::table::DataTable;

/// Glyph radius in data-space units
pub const DEFAULT_RADIUS: f64 = 0.1;

/// Fill used when a category is missing from its color map
const UNMAPPED: Rgb = Rgb(128, 128, 128);

/// Which semicircle of a glyph. The split is fixed: obverse is always
/// the left half, reverse always the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Obverse,
    Reverse,
}

impl Side {
    /// Angle span in degrees, counterclockwise from +x. The obverse
    /// covers [90, 270), the reverse [270, 450) (i.e. wrapping through
    /// zero back to 90).
    pub fn angle_span(self) -> (f32, f32) {
        match self {
            Side::Obverse => (90.0, 270.0),
            Side::Reverse => (270.0, 450.0),
        }
    }
}

/// One plotted coin: two half-discs sharing a center, carrying the
/// source row index as the only link back to the table
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub obverse: Rgb,
    pub reverse: Rgb,
}

/// Build one glyph per table row.
///
/// Returns an empty vec while any of the four column selectors is
/// unset; that is the not-yet-configured state, not an error. Rows
/// whose x or y cell doesn't parse as a number are skipped.
pub fn build_glyphs(
    table: &DataTable,
    selection: &ColumnSelection,
    obverse_map: &HashMap<String, Rgb>,
    reverse_map: &HashMap<String, Rgb>,
    radius: f64,
) -> Vec<Glyph> {
    let (Some(x_col), Some(y_col), Some(obv_col), Some(rev_col)) = (
        selection.x.as_deref(),
        selection.y.as_deref(),
        selection.obverse.as_deref(),
        selection.reverse.as_deref(),
    ) else {
        return Vec::new();
    };

    let resolved = (
        table.column_index(x_col),
        table.column_index(y_col),
        table.column_index(obv_col),
        table.column_index(rev_col),
    );
    let (Some(xi), Some(yi), Some(oi), Some(ri)) = resolved else {
        warn!("Selected columns not present in table, nothing to plot");
        return Vec::new();
    };

    let mut glyphs = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let (Some(x), Some(y)) = (table.numeric_cell(row, xi), table.numeric_cell(row, yi)) else {
            debug!("Row {} has non-numeric x/y, skipping", row);
            continue;
        };

        let obverse = table
            .cell(row, oi)
            .and_then(|v| obverse_map.get(v))
            .copied()
            .unwrap_or(UNMAPPED);
        let reverse = table
            .cell(row, ri)
            .and_then(|v| reverse_map.get(v))
            .copied()
            .unwrap_or(UNMAPPED);

        glyphs.push(Glyph {
            row,
            x,
            y,
            radius,
            obverse,
            reverse,
        });
    }

    glyphs
}
