//! Output task model: one entry per scheduled occurrence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CalendarUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskSource {
    Calendar,
    Sensor,
}

/// Echo of the cadence that produced a task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum IntervalInfo {
    #[serde(rename_all = "camelCase")]
    Calendar { repeat_every: u32, unit: CalendarUnit },
    #[serde(rename_all = "camelCase")]
    Sensor { trigger_value: f64 },
}

/// Generated fresh on each computation and never mutated afterwards.
/// A produced list is ordered by `due_date` with sequence numbers 1..N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub sequence_number: usize,
    pub due_date: NaiveDate,
    pub source: TaskSource,
    pub interval_info: IntervalInfo,
}
