use std::path::PathBuf;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::window::{WindowBounds, WindowLabel};

/// Source file and expected date range for one window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WindowSpec {
    /// Path to the raw delimited file for this window.
    pub path: PathBuf,
    /// Declared calendar range used by the temporal sanity pass.
    #[serde(default)]
    pub bounds: WindowBounds,
}

/// Explicit, immutable configuration for a pipeline run.
///
/// Replaces the original implementation's module-level path and boundary
/// literals; engines receive this value and hold no global state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PipelineConfig {
    /// Path of the cleaned, merged output table.
    pub output_path: PathBuf,
    pub pre_war: WindowSpec,
    pub week_before: WindowSpec,
    pub war_period: WindowSpec,
}

impl PipelineConfig {
    pub fn window(&self, label: WindowLabel) -> &WindowSpec {
        match label {
            WindowLabel::PreWar => &self.pre_war,
            WindowLabel::WeekBefore => &self.week_before,
            WindowLabel::WarPeriod => &self.war_period,
        }
    }

    pub fn bounds(&self, label: WindowLabel) -> WindowBounds {
        self.window(label).bounds
    }
}

impl Default for PipelineConfig {
    /// Default calendar: the pre-war window ends the day before the
    /// escalation week, the week-before window spans the 4 days
    /// immediately preceding the war start, and the war period is
    /// open-ended from the start date.
    fn default() -> Self {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        Self {
            output_path: PathBuf::from("data/cleaned_events.csv"),
            pre_war: WindowSpec {
                path: PathBuf::from("data/raw/beforeDDay.csv"),
                bounds: WindowBounds::new(None, day(2023, 4, 10)),
            },
            week_before: WindowSpec {
                path: PathBuf::from("data/raw/weekBeforeDDay.csv"),
                bounds: WindowBounds::new(day(2023, 4, 11), day(2023, 4, 14)),
            },
            war_period: WindowSpec {
                path: PathBuf::from("data/raw/afterDDay.csv"),
                bounds: WindowBounds::new(day(2023, 4, 15), None),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows_are_disjoint_and_contiguous() {
        let config = PipelineConfig::default();
        let pre_end = config.bounds(WindowLabel::PreWar).end.unwrap();
        let week_start = config.bounds(WindowLabel::WeekBefore).start.unwrap();
        let week_end = config.bounds(WindowLabel::WeekBefore).end.unwrap();
        let war_start = config.bounds(WindowLabel::WarPeriod).start.unwrap();

        assert_eq!(pre_end.succ_opt().unwrap(), week_start);
        assert_eq!(week_end.succ_opt().unwrap(), war_start);
        assert_eq!((week_end - week_start).num_days(), 3);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = PipelineConfig::default();
        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: PipelineConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.output_path, config.output_path);
        assert_eq!(
            decoded.bounds(WindowLabel::WeekBefore).start,
            config.bounds(WindowLabel::WeekBefore).start
        );
    }

    #[test]
    fn bounds_default_to_open_when_omitted() {
        let raw = r#"
            output_path = "out/cleaned.csv"

            [pre_war]
            path = "a.csv"

            [week_before]
            path = "b.csv"

            [war_period]
            path = "c.csv"
        "#;
        let config: PipelineConfig = toml::from_str(raw).unwrap();
        assert!(config.bounds(WindowLabel::PreWar).start.is_none());
        assert!(config.bounds(WindowLabel::PreWar).end.is_none());
    }
}
