//! Date <-> pixel mapping under pan and zoom.
//!
//! ```text
//! x    = (date - origin) / unit_ms * unit_width * zoom + pan
//! date = origin + (x - pan) / (unit_width * zoom) * unit_ms
//! ```
//!
//! Pixel math is `f64` so that `x_to_date(date_to_x(d)) == d` to the
//! millisecond even decades away from the origin.

use chrono::NaiveDateTime;

use crate::model::TimelineConfig;

/// Furthest offset from the origin `x_to_date` will resolve (about 10 000 years).
const MAX_OFFSET_MS: f64 = 10_000.0 * 365.25 * 86_400_000.0;

/// Borrowing view of the config plus the current zoom and pan.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    config: &'a TimelineConfig,
    zoom: f64,
    pan: f64,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(config: &'a TimelineConfig, zoom: f64, pan: f64) -> Self {
        Self {
            config,
            zoom: if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 },
            pan: if pan.is_finite() { pan } else { 0.0 },
        }
    }

    pub fn config(&self) -> &'a TimelineConfig {
        self.config
    }

    /// On-screen width of one unit. Degenerate widths collapse to a tiny
    /// positive scale instead of dividing by zero.
    pub fn unit_px(&self) -> f64 {
        let px = self.config.unit_width * self.zoom;
        if px.is_finite() && px > 0.0 {
            px
        } else {
            f64::EPSILON
        }
    }

    pub fn date_to_x(&self, date: NaiveDateTime) -> f64 {
        let diff_ms = (date - self.config.origin).num_milliseconds() as f64;
        let units = diff_ms / self.config.unit_ms() as f64;
        units * self.unit_px() + self.pan
    }

    pub fn x_to_date(&self, x: f64) -> NaiveDateTime {
        let origin = self.config.origin;
        let units = (x - self.pan) / self.unit_px();
        let offset_ms = (units * self.config.unit_ms() as f64).round();
        if offset_ms.is_nan() {
            return origin;
        }
        let offset_ms = offset_ms.clamp(-MAX_OFFSET_MS, MAX_OFFSET_MS) as i64;
        origin
            .checked_add_signed(chrono::Duration::milliseconds(offset_ms))
            .unwrap_or(origin)
    }

    /// Left edge of header unit `index`.
    pub fn unit_x(&self, index: i64) -> f64 {
        index as f64 * self.unit_px() + self.pan
    }
}
