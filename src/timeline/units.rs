//! Header labels for timeline units.
//!
//! Labels are computed from `origin + index * unit_ms` only, in a fixed
//! English locale, so the header never depends on the host's locale.

use chrono::{Datelike, NaiveDate};

use crate::model::{TimeUnit, TimelineConfig};

/// Two-line header label for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitLabel {
    pub main: String,
    pub sub: String,
}

pub fn format_unit(config: &TimelineConfig, index: i64) -> UnitLabel {
    let date = config.unit_start(index).date();
    match config.unit {
        TimeUnit::Days => UnitLabel {
            main: date.day().to_string(),
            sub: date.format("%a").to_string(),
        },
        TimeUnit::Weeks => UnitLabel {
            main: format!("Week {}", week_of_year(date)),
            sub: format!("{}/{}", date.month(), date.day()),
        },
        TimeUnit::Months => UnitLabel {
            main: date.format("%b").to_string(),
            sub: date.year().to_string(),
        },
    }
}

/// Whether unit `index` is today. Only day columns ever highlight.
pub fn is_current_unit(config: &TimelineConfig, index: i64, today: NaiveDate) -> bool {
    config.unit == TimeUnit::Days && config.unit_start(index).date() == today
}

/// Weeks elapsed since January 1st, rounded up: Jan 1 is week 0, Jan 2
/// through Jan 8 are week 1.
fn week_of_year(date: NaiveDate) -> u32 {
    (date.ordinal0() + 6) / 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(unit: TimeUnit, y: i32, m: u32, d: u32) -> TimelineConfig {
        let mut config = TimelineConfig::starting(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        config.unit = unit;
        config
    }

    #[test]
    fn day_labels() {
        let config = config(TimeUnit::Days, 2024, 1, 1);
        assert_eq!(
            format_unit(&config, 0),
            UnitLabel { main: "1".into(), sub: "Mon".into() }
        );
        assert_eq!(
            format_unit(&config, 5),
            UnitLabel { main: "6".into(), sub: "Sat".into() }
        );
    }

    #[test]
    fn week_labels() {
        let config = config(TimeUnit::Weeks, 2024, 1, 1);
        assert_eq!(
            format_unit(&config, 0),
            UnitLabel { main: "Week 0".into(), sub: "1/1".into() }
        );
        assert_eq!(
            format_unit(&config, 1),
            UnitLabel { main: "Week 1".into(), sub: "1/8".into() }
        );
        assert_eq!(
            format_unit(&config, 2),
            UnitLabel { main: "Week 2".into(), sub: "1/15".into() }
        );
    }

    #[test]
    fn week_count_rounds_partial_weeks_up() {
        let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert_eq!(week_of_year(jan(1)), 0);
        assert_eq!(week_of_year(jan(2)), 1);
        assert_eq!(week_of_year(jan(8)), 1);
        assert_eq!(week_of_year(jan(9)), 2);
    }

    #[test]
    fn month_labels_follow_flat_thirty_days() {
        let config = config(TimeUnit::Months, 2024, 11, 15);
        assert_eq!(
            format_unit(&config, 0),
            UnitLabel { main: "Nov".into(), sub: "2024".into() }
        );
        // Nov 15 + 60 days = Jan 14.
        assert_eq!(
            format_unit(&config, 2),
            UnitLabel { main: "Jan".into(), sub: "2025".into() }
        );
    }

    #[test]
    fn only_day_units_mark_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let days = config(TimeUnit::Days, 2024, 1, 1);
        assert!(!is_current_unit(&days, 0, today));
        assert!(is_current_unit(&days, 2, today));

        let weeks = config(TimeUnit::Weeks, 2024, 1, 3);
        assert!(!is_current_unit(&weeks, 0, today));
        let months = config(TimeUnit::Months, 2024, 1, 3);
        assert!(!is_current_unit(&months, 0, today));
    }
}
