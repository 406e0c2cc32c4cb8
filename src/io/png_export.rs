use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use png::{BitDepth, ColorType, Encoder};

use crate::error::ExportError;
use crate::timeline::RasterSurface;

/// Encode `frame` as an 8-bit RGBA PNG.
pub fn encode_png<W: Write>(frame: &RasterSurface, out: W) -> Result<(), ExportError> {
    let (width, height) = (frame.width() as u32, frame.height() as u32);
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyFrame { width, height });
    }

    let mut encoder = Encoder::new(out, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgba8())?;
    writer.finish()?;
    Ok(())
}

/// Save `frame` to `path`.
pub fn write_png(frame: &RasterSurface, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    encode_png(frame, BufWriter::new(file))?;
    info!(
        "event=png_exported path={} size={}x{}",
        path.display(),
        frame.width(),
        frame.height()
    );
    Ok(())
}
