//! Page-fit math for the capture fallback.
//!
//! A capture bitmap arrives at an arbitrary oversampling factor; the page fit
//! depends only on its aspect ratio. Pixels convert to millimeters at CSS
//! density (96 px/inch), then a uniform ratio scales the bitmap into the A4
//! page without distortion, centered horizontally and anchored to the top.

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
/// One CSS pixel in millimeters (25.4 mm / 96 px).
pub const CSS_PX_TO_MM: f32 = 25.4 / 96.0;

/// Placement of the bitmap on the page, in millimeters from the top-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub width_mm: f32,
    pub height_mm: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Fits a bitmap into the A4 page.
///
/// `ratio = min(pageW / w, pageH / h)` in page units, so the scaled bitmap
/// touches the page on its binding axis and keeps its aspect ratio on the
/// other.
pub fn fit_to_page(width_px: u32, height_px: u32) -> PagePlacement {
    let native_width_mm = width_px as f32 * CSS_PX_TO_MM;
    let native_height_mm = height_px as f32 * CSS_PX_TO_MM;

    let ratio = (A4_WIDTH_MM / native_width_mm).min(A4_HEIGHT_MM / native_height_mm);
    let width_mm = native_width_mm * ratio;
    let height_mm = native_height_mm * ratio;

    PagePlacement {
        width_mm,
        height_mm,
        x_mm: (A4_WIDTH_MM - width_mm) / 2.0,
        y_mm: 0.0,
    }
}
