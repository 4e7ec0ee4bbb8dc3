//! Glyph advance widths for the built-in Helvetica fonts.
//!
//! The standard 14 PDF fonts are never embedded, so right-aligned text
//! needs the Adobe AFM advance widths (units per 1000 em) to measure a
//! string. Only the printable ASCII range is tabled; anything outside it
//! is measured at the average lowercase width.

/// First character covered by the width tables (space).
const FIRST_CHAR: usize = 0x20;

/// Fallback width for characters outside the table.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica advance widths for 0x20..=0x7E.
#[rustfmt::skip]
pub const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for 0x20..=0x7E.
#[rustfmt::skip]
pub const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of `text` at `size` points in the given font table.
#[must_use]
pub fn text_width(text: &str, size: f32, widths: &[u16; 95]) -> f32 {
    let total: u32 = text
        .chars()
        .map(|c| {
            let idx = (c as usize).wrapping_sub(FIRST_CHAR);
            widths.get(idx).copied().unwrap_or(DEFAULT_WIDTH)
        })
        .map(u32::from)
        .sum();

    #[allow(clippy::cast_precision_loss)] // widths sum stays far below f32 precision loss
    let total = total as f32;
    total * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        // Space is 278/1000 em in both faces.
        assert!((text_width(" ", 10.0, &HELVETICA) - 2.78).abs() < 0.001);
        assert!((text_width(" ", 10.0, &HELVETICA_BOLD) - 2.78).abs() < 0.001);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = text_width("Total:", 11.0, &HELVETICA);
        let bold = text_width("Total:", 11.0, &HELVETICA_BOLD);
        assert!(bold > regular);
    }

    #[test]
    fn test_empty_string_is_zero() {
        assert!(text_width("", 9.0, &HELVETICA).abs() < f32::EPSILON);
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let width = text_width("é", 10.0, &HELVETICA);
        assert!((width - 5.56).abs() < 0.001);
    }
}
