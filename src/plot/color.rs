//! Categorical color assignment
//!
//! Distinct values consume palette slots in first-seen order; the
//! palette wraps around when a column has more categories than colors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// RGB color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Obverse palette ("Set1")
pub const OBVERSE_PALETTE: [Rgb; 9] = [
    Rgb(228, 26, 28),
    Rgb(55, 126, 184),
    Rgb(77, 175, 74),
    Rgb(152, 78, 163),
    Rgb(255, 127, 0),
    Rgb(255, 255, 51),
    Rgb(166, 86, 40),
    Rgb(247, 129, 191),
    Rgb(153, 153, 153),
];

/// Reverse palette ("Set2") - disjoint from the obverse palette so the
/// two halves of a glyph never share a color
pub const REVERSE_PALETTE: [Rgb; 8] = [
    Rgb(102, 194, 165),
    Rgb(252, 141, 98),
    Rgb(141, 160, 203),
    Rgb(231, 138, 195),
    Rgb(166, 216, 84),
    Rgb(255, 217, 47),
    Rgb(229, 196, 148),
    Rgb(179, 179, 179),
];

/// Assign a color to every distinct value in `values`.
///
/// Duplicates don't consume palette slots. Slot order is the
/// first-occurrence order of each distinct value, and the palette index
/// wraps modulo its length, so a long-running viewer never runs out of
/// colors. Pure function of its inputs: the same value sequence and
/// palette always produce the same mapping.
pub fn assign_colors(values: &[&str], palette: &[Rgb]) -> HashMap<String, Rgb> {
    let mut map = HashMap::new();
    if palette.is_empty() {
        return map;
    }

    for &value in values {
        if !map.contains_key(value) {
            let color = palette[map.len() % palette.len()];
            map.insert(value.to_string(), color);
        }
    }

    map
}
