//! Feedback report: the ad-hoc JSON export bundling a problem description
//! with the configuration, generated tasks, and explanation text for
//! offline diagnosis.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub description: String,
    pub exported_at: NaiveDate,
    pub config: ScheduleConfig,
    pub tasks: Vec<Task>,
    pub explanation: String,
}

impl FeedbackReport {
    pub fn new(
        description: impl Into<String>,
        exported_at: NaiveDate,
        config: ScheduleConfig,
        tasks: Vec<Task>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            exported_at,
            config,
            tasks,
            explanation: explanation.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize feedback report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{describe, occurrence_series};

    #[test]
    fn report_round_trips_with_panel_field_names() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
        let config = ScheduleConfig::sample(today);
        let tasks = occurrence_series(&config, 3, today);
        let explanation = describe(&config, today);

        let report = FeedbackReport::new(
            "third task lands a month late",
            today,
            config,
            tasks,
            explanation,
        );
        let json = report.to_json().unwrap();
        assert!(json.contains("\"exportedAt\""));
        assert!(json.contains("\"sequenceNumber\""));
        assert!(json.contains("\"dueDate\""));
        assert!(json.contains("\"isFloating\""));

        let back: FeedbackReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
