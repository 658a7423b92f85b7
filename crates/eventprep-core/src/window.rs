use std::fmt;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the three named partitions of the source data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindowLabel {
    PreWar,
    WeekBefore,
    WarPeriod,
}

impl WindowLabel {
    /// Fixed merge/concatenation order.
    pub const ALL: [WindowLabel; 3] = [
        WindowLabel::PreWar,
        WindowLabel::WeekBefore,
        WindowLabel::WarPeriod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowLabel::PreWar => "pre_war",
            WindowLabel::WeekBefore => "week_before",
            WindowLabel::WarPeriod => "war_period",
        }
    }
}

impl fmt::Display for WindowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected date range of a window. An open side means unbounded.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct WindowBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl WindowBounds {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the declared range (inclusive ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_are_inclusive_on_both_ends() {
        let bounds = WindowBounds::new(Some(date(2023, 4, 11)), Some(date(2023, 4, 14)));
        assert!(bounds.contains(date(2023, 4, 11)));
        assert!(bounds.contains(date(2023, 4, 14)));
        assert!(!bounds.contains(date(2023, 4, 10)));
        assert!(!bounds.contains(date(2023, 4, 15)));
    }

    #[test]
    fn open_sides_are_unbounded() {
        let bounds = WindowBounds::new(Some(date(2023, 4, 15)), None);
        assert!(bounds.contains(date(2030, 1, 1)));
        assert!(!bounds.contains(date(2023, 4, 14)));
    }

    #[test]
    fn labels_serialize_snake_case() {
        assert_eq!(WindowLabel::PreWar.as_str(), "pre_war");
        assert_eq!(WindowLabel::WeekBefore.to_string(), "week_before");
        assert_eq!(WindowLabel::WarPeriod.as_str(), "war_period");
    }
}
