//! Estimate PDF rendering.
//!
//! A fixed, deterministic A4 layout measured in points: header band with
//! an optional logo, client block, itemized table, grand total, and a
//! generation timestamp. The coordinate origin is the PDF default
//! (bottom-left); the cursor walks down from the top margin and starts a
//! fresh page before any row that would land below the bottom guard.

mod metrics;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Local};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Pt,
};

use driftwood_core::{CartLine, ClientInfo, format_amount};

/// Errors from PDF generation.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The document could not be assembled or serialized.
    #[error("pdf rendering failed: {0}")]
    Render(String),
}

// Page geometry, in points (A4).
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PT_PER_MM: f32 = 72.0 / 25.4;
const PAGE_WIDTH: f32 = PAGE_WIDTH_MM * PT_PER_MM;
const PAGE_HEIGHT: f32 = PAGE_HEIGHT_MM * PT_PER_MM;
const MARGIN: f32 = 20.0 * PT_PER_MM;

/// Rows are never drawn below this cursor height; a new page starts first.
const BOTTOM_GUARD: f32 = 80.0;

/// Vertical advance per table row.
const ROW_LEADING: f32 = 14.0;

// Column anchors, offsets from the left margin.
const COL_QTY: f32 = 300.0;
const COL_UNIT: f32 = 350.0;
const COL_UNIT_RIGHT: f32 = 400.0;
const COL_TOTAL: f32 = 430.0;

/// Longest description drawn on a row.
const DESCRIPTION_MAX_CHARS: usize = 80;

/// Logo box: drawn at the left margin, scaled to this width.
const LOGO_WIDTH: f32 = 90.0;

/// Timestamp format used in the footer.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output filename for an estimate: sanitized client token plus a
/// second-resolution timestamp.
#[must_use]
pub fn output_filename(client: &ClientInfo, generated_at: DateTime<Local>) -> String {
    format!(
        "estimate_{}_{}.pdf",
        client.filename_token(),
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Render an estimate document to PDF bytes.
///
/// `logo_path` is best-effort: a missing or undecodable logo is skipped
/// with a debug log and never fails the render.
///
/// # Errors
///
/// Returns [`PdfError::Render`] if the document cannot be assembled or
/// serialized.
pub fn render(
    client: &ClientInfo,
    lines: &[CartLine],
    grand_total: f64,
    generated_at: DateTime<Local>,
    logo_path: Option<&Path>,
) -> Result<Vec<u8>, PdfError> {
    let (doc, page, layer) = PdfDocument::new(
        "Estimate",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_err)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    // Header band: optional logo, title, subtitle.
    if let Some(path) = logo_path {
        if let Err(e) = draw_logo(&layer, path, MARGIN, y - 40.0) {
            tracing::debug!(path = %path.display(), error = %e, "logo skipped");
        }
    }
    draw_text(&layer, &bold, "Driftwood Restoration", 14.0, MARGIN + 100.0, y - 30.0);
    draw_text(&layer, &regular, "Estimate", 10.0, MARGIN + 100.0, y - 45.0);
    y -= 70.0;

    // Client block: four labeled fields in fixed order.
    for (label, value) in [
        ("Client:", client.name.as_str()),
        ("Address:", client.address.as_str()),
        ("Email:", client.email.as_str()),
        ("Phone:", client.phone.as_str()),
    ] {
        draw_text(&layer, &bold, label, 10.0, MARGIN, y);
        draw_text(&layer, &regular, value, 9.0, MARGIN + 60.0, y);
        y -= ROW_LEADING;
    }
    y -= 30.0;

    // Table header.
    draw_text(&layer, &bold, "Description", 10.0, MARGIN, y);
    draw_text(&layer, &bold, "Qty", 10.0, MARGIN + COL_QTY, y);
    draw_text(&layer, &bold, "Unit", 10.0, MARGIN + COL_UNIT, y);
    draw_text(&layer, &bold, "Total", 10.0, MARGIN + COL_TOTAL, y);
    y -= 10.0;
    draw_rule(&layer, MARGIN, PAGE_WIDTH - MARGIN, y);
    y -= ROW_LEADING;

    // Item rows. The break decision is made per row, before drawing, so
    // a row is never split across pages.
    for line in lines {
        if y < BOTTOM_GUARD {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT - MARGIN;
        }

        let description: String = line.description.chars().take(DESCRIPTION_MAX_CHARS).collect();
        draw_text(&layer, &regular, &description, 9.0, MARGIN, y);
        draw_text(&layer, &regular, &line.quantity.to_string(), 9.0, MARGIN + COL_QTY, y);
        draw_text_right(
            &layer,
            &regular,
            &metrics::HELVETICA,
            &format_amount(line.unit_price),
            9.0,
            MARGIN + COL_UNIT_RIGHT,
            y,
        );
        draw_text_right(
            &layer,
            &regular,
            &metrics::HELVETICA,
            &format_amount(line.total()),
            9.0,
            PAGE_WIDTH - MARGIN,
            y,
        );
        y -= ROW_LEADING;
    }

    // Grand total.
    y -= 20.0;
    draw_rule(&layer, MARGIN, PAGE_WIDTH - MARGIN, y);
    y -= 16.0;
    draw_text_right(
        &layer,
        &bold,
        &metrics::HELVETICA_BOLD,
        "Total:",
        11.0,
        PAGE_WIDTH - MARGIN - 50.0,
        y,
    );
    draw_text_right(
        &layer,
        &bold,
        &metrics::HELVETICA_BOLD,
        &format_amount(grand_total),
        11.0,
        PAGE_WIDTH - MARGIN,
        y,
    );
    y -= 40.0;

    // Footer timestamp.
    let footer = format!("Generated: {}", generated_at.format(TIMESTAMP_FORMAT));
    draw_text(&layer, &regular, &footer, 8.0, MARGIN, y);

    doc.save_to_bytes().map_err(render_err)
}

fn render_err(e: impl std::fmt::Display) -> PdfError {
    PdfError::Render(e.to_string())
}

/// Draw left-aligned text at a point position.
fn draw_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, size, Mm::from(Pt(x)), Mm::from(Pt(y)), font);
}

/// Draw text with its right edge at `right_x`.
fn draw_text_right(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    widths: &[u16; 95],
    text: &str,
    size: f32,
    right_x: f32,
    y: f32,
) {
    let x = right_x - metrics::text_width(text, size, widths);
    draw_text(layer, font, text, size, x, y);
}

/// Draw a horizontal rule at height `y`.
fn draw_rule(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    let rule = Line {
        points: vec![
            (Point::new(Mm::from(Pt(x1)), Mm::from(Pt(y))), false),
            (Point::new(Mm::from(Pt(x2)), Mm::from(Pt(y))), false),
        ],
        is_closed: false,
    };
    layer.set_outline_thickness(0.5);
    layer.add_line(rule);
}

/// Decode the PNG logo and place it scaled to [`LOGO_WIDTH`].
fn draw_logo(
    layer: &PdfLayerReference,
    path: &Path,
    x: f32,
    y: f32,
) -> Result<(), PdfError> {
    let file = File::open(path).map_err(render_err)?;
    let decoder =
        printpdf::image_crate::codecs::png::PngDecoder::new(BufReader::new(file))
            .map_err(render_err)?;
    let image = Image::try_from(decoder).map_err(render_err)?;

    // Px -> pt at the default 300 dpi placement, then scale to the box.
    #[allow(clippy::cast_precision_loss)]
    let natural_width = image.image.width.0 as f32 / 300.0 * 72.0;
    let scale = if natural_width > 0.0 {
        LOGO_WIDTH / natural_width
    } else {
        1.0
    };

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm::from(Pt(x))),
            translate_y: Some(Mm::from(Pt(y))),
            scale_x: Some(scale),
            scale_y: Some(scale),
            ..ImageTransform::default()
        },
    );
    Ok(())
}

/// Pagination plan for a run of rows starting at cursor `start_y`.
///
/// Returns `(page_index, y)` per row, applying the same break rule as
/// the renderer: a new page starts whenever the cursor has dropped
/// below [`BOTTOM_GUARD`].
#[cfg(test)]
fn row_positions(start_y: f32, row_count: usize) -> Vec<(usize, f32)> {
    let mut positions = Vec::with_capacity(row_count);
    let mut page = 0;
    let mut y = start_y;
    for _ in 0..row_count {
        if y < BOTTOM_GUARD {
            page += 1;
            y = PAGE_HEIGHT - MARGIN;
        }
        positions.push((page, y));
        y -= ROW_LEADING;
    }
    positions
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_client() -> ClientInfo {
        ClientInfo {
            name: "Jane Doe / Unit 4B".to_owned(),
            address: "12 Shoreline Rd".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: "555-0101".to_owned(),
        }
    }

    fn sample_lines(count: usize) -> Vec<CartLine> {
        (0..count)
            .map(|i| CartLine {
                description: format!("Line item {i}"),
                unit_price: 45.0,
                quantity: 1,
            })
            .collect()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let lines = sample_lines(3);
        let bytes = render(&sample_client(), &lines, 135.0, fixed_time(), None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_missing_logo_is_not_fatal() {
        let lines = sample_lines(1);
        let result = render(
            &sample_client(),
            &lines,
            45.0,
            fixed_time(),
            Some(Path::new("/nonexistent/logo.png")),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_row_positions_stay_above_bottom_guard() {
        let positions = row_positions(PAGE_HEIGHT - MARGIN, 200);
        assert!(positions.iter().all(|&(_, y)| y >= BOTTOM_GUARD));
    }

    #[test]
    fn test_thirty_rows_spill_to_a_second_page() {
        // A realistic first-page start leaves room for ~40 rows; with the
        // header and client block consuming ~160pt, 30 rows starting low
        // enough must break once, and rows never interleave pages.
        let start_y = PAGE_HEIGHT - MARGIN - 300.0;
        let positions = row_positions(start_y, 30);

        let last_page = positions.last().unwrap().0;
        assert!(last_page >= 1);
        let mut seen_page = 0;
        for &(page, _) in &positions {
            assert!(page >= seen_page);
            seen_page = page;
        }
    }

    #[test]
    fn test_long_cart_renders_multiple_pages() {
        let lines = sample_lines(60);
        let bytes = render(&sample_client(), &lines, 2700.0, fixed_time(), None).unwrap();
        // Two page objects plus the page tree.
        let needle = b"/Type /Page";
        let count = bytes
            .windows(needle.len())
            .filter(|w| w == needle)
            .count();
        assert!(count >= 3, "expected multiple pages, found {count} markers");
    }

    #[test]
    fn test_output_filename_sanitized_with_timestamp() {
        let name = output_filename(&sample_client(), fixed_time());
        assert_eq!(name, "estimate_Jane_Doe___Unit_4B_20250314_092653.pdf");
    }

    #[test]
    fn test_output_filename_empty_client_name() {
        let client = ClientInfo::default();
        let name = output_filename(&client, fixed_time());
        assert_eq!(name, "estimate_client_20250314_092653.pdf");
    }
}
