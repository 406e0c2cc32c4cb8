//! Exports of the rendered board.

use std::path::Path;

use chrono::NaiveDate;

use crate::error::ExportError;
use crate::timeline::{paint, RasterSurface, Scene};

pub mod pdf_export;
pub mod png_export;

/// File formats the board can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Png, ExportFormat::Pdf]
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Name of the save dialog filter.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Image",
            ExportFormat::Pdf => "PDF Document",
        }
    }

    /// Suggested file name for an export taken on `date`.
    pub fn default_file_name(self, date: NaiveDate) -> String {
        format!("gantt-it-one-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }

    /// Encode `frame` in this format and save it to `path`.
    pub fn write(self, frame: &RasterSurface, path: &Path) -> Result<(), ExportError> {
        match self {
            ExportFormat::Png => png_export::write_png(frame, path),
            ExportFormat::Pdf => pdf_export::write_pdf(frame, path),
        }
    }
}

/// Paint `scene` into a fresh raster at device resolution.
pub fn rasterize(scene: &Scene, pixels_per_point: f32) -> RasterSurface {
    let mut frame = RasterSurface::new();
    paint(&mut frame, scene, pixels_per_point);
    frame
}
