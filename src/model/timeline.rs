use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Granularity of one timeline column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    pub fn all() -> &'static [TimeUnit] {
        &[TimeUnit::Days, TimeUnit::Weeks, TimeUnit::Months]
    }

    /// Length of one unit in milliseconds.
    ///
    /// Months are a flat 30 days; header labels are computed from the same
    /// approximation, so calendar drift is expected.
    pub fn duration_ms(&self) -> i64 {
        match self {
            TimeUnit::Days => MS_PER_DAY,
            TimeUnit::Weeks => 7 * MS_PER_DAY,
            TimeUnit::Months => 30 * MS_PER_DAY,
        }
    }

    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.duration_ms())
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Days => "Days",
            TimeUnit::Weeks => "Weeks",
            TimeUnit::Months => "Months",
        }
    }
}

/// User-editable timeline layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Instant at unit index 0.
    pub origin: NaiveDateTime,
    pub unit: TimeUnit,
    /// Number of units in the nominal viewport.
    pub units_to_show: u32,
    /// Pixels per unit at zoom 1.
    pub unit_width: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::starting(chrono::Local::now().date_naive())
    }
}

impl TimelineConfig {
    /// Default layout with the origin at midnight of `date`.
    pub fn starting(date: NaiveDate) -> Self {
        Self {
            origin: date.and_time(NaiveTime::MIN),
            unit: TimeUnit::Days,
            units_to_show: 30,
            unit_width: 100.0,
        }
    }

    pub fn unit_ms(&self) -> i64 {
        self.unit.duration_ms()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.units_to_show == 0 {
            return Err(ConfigError::NoUnits);
        }
        if !self.unit_width.is_finite() || self.unit_width <= 0.0 {
            return Err(ConfigError::InvalidUnitWidth(self.unit_width));
        }
        Ok(())
    }

    /// Instant at the left edge of unit `index`.
    pub fn unit_start(&self, index: i64) -> NaiveDateTime {
        index
            .checked_mul(self.unit_ms())
            .and_then(|ms| {
                self.origin
                    .checked_add_signed(chrono::Duration::milliseconds(ms))
            })
            .unwrap_or(self.origin)
    }
}
