//! Capture fallback: assembles a PDF from a bitmap snapshot of the live
//! preview.
//!
//! When the browser path is unavailable the editing UI ships the staged
//! off-screen capture of its preview along with the request. The bitmap is
//! re-encoded and embedded as a single full-bleed image on one A4 page —
//! visually faithful but not text-selectable, the accepted tradeoff for a
//! fallback path.

pub mod fit;

use base64::Engine;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use thiserror::Error;

use self::fit::{fit_to_page, A4_HEIGHT_MM};

/// Millimeters to PDF points (1 pt = 1/72 inch).
const MM_TO_PT: f32 = 72.0 / 25.4;
/// A4 media box in whole points.
const PAGE_WIDTH_PT: i64 = 595;
const PAGE_HEIGHT_PT: i64 = 842;
const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("capture payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("capture bitmap could not be processed: {0}")]
    Image(#[from] image::ImageError),

    #[error("capture bitmap has zero dimensions")]
    EmptyBitmap,

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] std::io::Error),
}

/// Decodes the capture payload from the request: either a bare base64 string
/// or a full data URL (`data:image/png;base64,...`).
pub fn decode_capture(payload: &str) -> Result<Vec<u8>, RasterError> {
    let trimmed = payload.trim();
    let encoded = trimmed
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    Ok(base64::engine::general_purpose::STANDARD.decode(encoded.trim())?)
}

/// Assembles a single-page A4 PDF embedding the capture bitmap, scaled
/// uniformly into the page, centered horizontally and anchored to the top.
pub fn assemble_capture_pdf(bitmap: &[u8]) -> Result<Vec<u8>, RasterError> {
    let decoded = image::load_from_memory(bitmap)?;
    let (width_px, height_px) = (decoded.width(), decoded.height());
    if width_px == 0 || height_px == 0 {
        return Err(RasterError::EmptyBitmap);
    }

    // JPEG carries no alpha channel; flatten to RGB before encoding.
    let rgb = decoded.to_rgb8();
    let mut jpeg = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder.encode_image(&rgb)?;

    let placement = fit_to_page(width_px, height_px);
    let width_pt = placement.width_mm * MM_TO_PT;
    let height_pt = placement.height_mm * MM_TO_PT;
    let x_pt = placement.x_mm * MM_TO_PT;
    // PDF origin is bottom-left; the placement anchors to the top edge.
    let y_pt = (A4_HEIGHT_MM - placement.y_mm - placement.height_mm) * MM_TO_PT;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width_px as i64,
                "Height" => height_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        )
        .with_compression(false),
    );

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! { "Im0" => image_id },
    });

    let content = format!(
        "q\n{width_pt:.2} 0 0 {height_pt:.2} {x_pt:.2} {y_pt:.2} cm\n/Im0 Do\nQ\n"
    )
    .into_bytes();
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}
