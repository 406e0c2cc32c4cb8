use std::fs;
use std::path::Path;

use log::info;
use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Pt, Px};

use crate::error::ExportError;
use crate::timeline::RasterSurface;

/// Points per logical pixel, taking a logical pixel as a 96 dpi CSS pixel.
const PT_PER_PX: f32 = 0.75;

/// Page size in points for a frame: the logical canvas size.
pub fn page_size(frame: &RasterSurface) -> (f32, f32) {
    let ppp = frame.pixels_per_point().max(f32::EPSILON);
    (
        frame.width() as f32 / ppp * PT_PER_PX,
        frame.height() as f32 / ppp * PT_PER_PX,
    )
}

/// Build a one-page PDF sized to the canvas with `frame` filling the page.
pub fn encode_pdf(frame: &RasterSurface) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyFrame {
            width: width as u32,
            height: height as u32,
        });
    }

    let (page_w, page_h) = page_size(frame);
    let (doc, page, layer) = PdfDocument::new("GanttIt", Mm::from(Pt(page_w)), Mm::from(Pt(page_h)), "Timeline");
    let layer = doc.get_page(page).get_layer(layer);

    // The frame is cleared to an opaque background, so alpha carries nothing.
    let rgb: Vec<u8> = frame
        .to_rgba8()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let image = Image::from(ImageXObject {
        width: Px(width),
        height: Px(height),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb,
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    });
    image.add_to_layer(
        layer,
        ImageTransform {
            dpi: Some(72.0 / PT_PER_PX * frame.pixels_per_point()),
            ..ImageTransform::default()
        },
    );

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(format!("{e:?}")))
}

/// Save `frame` as a PDF at `path`.
pub fn write_pdf(frame: &RasterSurface, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_pdf(frame)?;
    fs::write(path, bytes)?;
    info!(
        "event=pdf_exported path={} size={}x{}",
        path.display(),
        frame.width(),
        frame.height()
    );
    Ok(())
}
