//! Offscreen raster target for exporting the board as an image.
//!
//! Shapes go through `tiny_skia`; text is rasterized with `fontdue` from the
//! same proportional face egui draws the canvas with, so an export carries
//! the titles, names and header labels the screen shows.

use std::collections::HashMap;
use std::sync::OnceLock;

use egui::{pos2, vec2, Align2, Color32, FontFamily, FontId, Pos2, Rect, Stroke, Vec2};
use fontdue::{Font, FontSettings, Metrics};
use log::warn;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

use super::render::Surface;

/// Control point distance for a quarter circle drawn as one cubic.
const KAPPA: f32 = 0.552_284_8;

type GlyphCache = HashMap<(char, u32), (Metrics, Vec<u8>)>;

static EXPORT_FONT: OnceLock<Option<Font>> = OnceLock::new();

/// egui's default proportional face, parsed once.
fn export_font() -> Option<&'static Font> {
    EXPORT_FONT
        .get_or_init(|| {
            let fonts = egui::FontDefinitions::default();
            let data = fonts
                .families
                .get(&FontFamily::Proportional)
                .and_then(|names| names.first())
                .and_then(|name| fonts.font_data.get(name))?;
            let settings = FontSettings {
                collection_index: data.index,
                ..FontSettings::default()
            };
            match Font::from_bytes(data.font.as_ref(), settings) {
                Ok(font) => Some(font),
                Err(e) => {
                    warn!("event=export_font_unavailable error={e}");
                    None
                }
            }
        })
        .as_ref()
}

/// Device-pixel framebuffer; drawing calls take logical coordinates.
#[derive(Debug, Clone, Default)]
pub struct RasterSurface {
    pixmap: Option<Pixmap>,
    pixels_per_point: f32,
    glyphs: GlyphCache,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.pixmap.as_ref().map_or(0, |p| p.width() as usize)
    }

    pub fn height(&self) -> usize {
        self.pixmap.as_ref().map_or(0, |p| p.height() as usize)
    }

    /// Device pixels per logical point of the last resize.
    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        let pixmap = self.pixmap.as_ref()?;
        let p = pixmap.pixel(u32::try_from(x).ok()?, u32::try_from(y).ok()?)?;
        Some(Color32::from_rgba_premultiplied(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Row-major, unmultiplied RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let Some(pixmap) = self.pixmap.as_ref() else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.pixels_per_point, self.pixels_per_point)
    }
}

fn paint_for(color: Color32, anti_alias: bool) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = anti_alias;
    paint
}

fn sk_stroke(stroke: Stroke) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: stroke.width,
        ..tiny_skia::Stroke::default()
    }
}

fn rounded_rect_path(rect: Rect, rounding: f32) -> Option<tiny_skia::Path> {
    if !rect.is_finite() || !rect.is_positive() {
        return None;
    }
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let radius = rounding.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    if radius == 0.0 {
        return tiny_skia::Rect::from_ltrb(l, t, r, b).map(PathBuilder::from_rect);
    }

    let k = radius * (1.0 - KAPPA);
    let mut pb = PathBuilder::new();
    pb.move_to(l + radius, t);
    pb.line_to(r - radius, t);
    pb.cubic_to(r - k, t, r, t + k, r, t + radius);
    pb.line_to(r, b - radius);
    pb.cubic_to(r, b - k, r - k, b, r - radius, b);
    pb.line_to(l + radius, b);
    pb.cubic_to(l + k, b, l, b - k, l, b - radius);
    pb.line_to(l, t + radius);
    pb.cubic_to(l, t + k, l + k, t, l + radius, t);
    pb.close();
    pb.finish()
}

/// `color` scaled by glyph coverage, still premultiplied.
fn covered(color: Color32, coverage: u8) -> PremultipliedColorU8 {
    let k = u16::from(coverage);
    let scale = |c: u8| ((u16::from(c) * k + 127) / 255) as u8;
    let [r, g, b, a] = color.to_array();
    PremultipliedColorU8::from_rgba(scale(r), scale(g), scale(b), scale(a))
        .unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

impl Surface for RasterSurface {
    fn resize(&mut self, size: Vec2, pixels_per_point: f32) {
        let scale = if pixels_per_point.is_finite() && pixels_per_point > 0.0 {
            pixels_per_point
        } else {
            1.0
        };
        let device = |logical: f32| (logical * scale).round().max(0.0) as u32;
        self.pixmap = Pixmap::new(device(size.x), device(size.y));
        self.pixels_per_point = scale;
    }

    fn clear(&mut self, color: Color32) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            let [r, g, b, a] = color.to_srgba_unmultiplied();
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        }
    }

    fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color32) {
        let transform = self.transform();
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), rounded_rect_path(rect, rounding)) else {
            return;
        };
        let paint = paint_for(color, rounding > 0.0);
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    fn stroke_rect(&mut self, rect: Rect, rounding: f32, stroke: Stroke) {
        let transform = self.transform();
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), rounded_rect_path(rect, rounding)) else {
            return;
        };
        pixmap.stroke_path(&path, &paint_for(stroke.color, true), &sk_stroke(stroke), transform, None);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        let transform = self.transform();
        let (Some(pixmap), Some(path)) = (
            self.pixmap.as_mut(),
            PathBuilder::from_circle(center.x, center.y, radius),
        ) else {
            return;
        };
        pixmap.fill_path(&path, &paint_for(color, true), FillRule::Winding, transform, None);
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        let transform = self.transform();
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), pb.finish()) else {
            return;
        };
        pixmap.stroke_path(&path, &paint_for(stroke.color, true), &sk_stroke(stroke), transform, None);
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font: FontId, color: Color32, clip: Option<Rect>) {
        if text.is_empty() || color.a() == 0 || self.pixmap.is_none() {
            return;
        }
        let Some(face) = export_font() else {
            return;
        };
        let scale = self.pixels_per_point;
        let px = font.size * scale;
        let Some(line) = face.horizontal_line_metrics(px) else {
            return;
        };

        // Pen position of every glyph along the baseline, in device pixels.
        let mut placed = Vec::with_capacity(text.len());
        let mut pen = 0.0_f32;
        let mut prev = None;
        for ch in text.chars() {
            if let Some(left) = prev {
                pen += face.horizontal_kern(left, ch, px).unwrap_or(0.0);
            }
            let (metrics, _) = self
                .glyphs
                .entry((ch, px.to_bits()))
                .or_insert_with(|| face.rasterize(ch, px));
            placed.push((ch, pen));
            pen += metrics.advance_width;
            prev = Some(ch);
        }

        let height = line.ascent - line.descent;
        let bounds = anchor.anchor_size(pos, vec2(pen / scale, height / scale));
        let origin_x = (bounds.left() * scale).round() as i32;
        let origin_y = (bounds.top() * scale).round() as i32;
        let clip = clip.map(|c| {
            Rect::from_min_max(pos2(c.left() * scale, c.top() * scale), pos2(c.right() * scale, c.bottom() * scale))
        });

        let Some(mut run) = Pixmap::new(pen.ceil() as u32 + 2, height.ceil() as u32 + 2) else {
            return;
        };
        let (run_w, run_h) = (run.width() as i32, run.height() as i32);
        let pixels = run.pixels_mut();
        for (ch, pen_x) in placed {
            let Some((metrics, coverage)) = self.glyphs.get(&(ch, px.to_bits())) else {
                continue;
            };
            let left = (pen_x + metrics.xmin as f32).round() as i32;
            let top = (line.ascent - metrics.ymin as f32 - metrics.height as f32).round() as i32;
            for (i, &alpha) in coverage.iter().enumerate() {
                if alpha == 0 || metrics.width == 0 {
                    continue;
                }
                let x = left + (i % metrics.width) as i32;
                let y = top + (i / metrics.width) as i32;
                if x < 0 || y < 0 || x >= run_w || y >= run_h {
                    continue;
                }
                let device = pos2((origin_x + x) as f32 + 0.5, (origin_y + y) as f32 + 0.5);
                if clip.map_or(false, |c| !c.contains(device)) {
                    continue;
                }
                let dst = &mut pixels[(y * run_w + x) as usize];
                if alpha > dst.alpha() {
                    *dst = covered(color, alpha);
                }
            }
        }

        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.draw_pixmap(
                origin_x,
                origin_y,
                run.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }
}
