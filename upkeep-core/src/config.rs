//! Schedule configuration: the immutable input snapshot for one computation.
//!
//! Field names serialize in camelCase so that exported JSON matches the
//! control-panel payloads consumed elsewhere.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sensor::SensorMode;

/// Which trigger sources are active, and how two active sources combine.
///
/// `coexisting` only matters when both sources are on: true means two
/// independent task streams merged by date, false means the earlier
/// candidate wins each slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    pub calendar: bool,
    pub sensor: bool,
    #[serde(default)]
    pub coexisting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    pub is_repeating: bool,
    pub repeat_every: u32,
    pub unit: CalendarUnit,
    /// When false, the first occurrence of a fresh definition is the base
    /// date itself rather than base + interval.
    #[serde(default)]
    pub schedule_first_from_interval: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorConfig {
    /// One-shot vs periodic threshold series.
    pub is_once: bool,
    /// Usage increment between successive thresholds.
    pub trigger_value: f64,
    /// Preventive on: project future due dates even before the counter
    /// physically reaches the threshold. Off: only emit thresholds the
    /// projected usage has already reached.
    pub preventive: bool,
}

impl SensorConfig {
    pub fn mode(&self) -> SensorMode {
        if self.is_once {
            SensorMode::Single
        } else {
            SensorMode::Periodic
        }
    }
}

/// Usage value recorded at the last completed maintenance, the zero point
/// for floating-mode threshold counting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub value: f64,
    pub date: NaiveDate,
}

/// External context: completion history and the latest sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleContext {
    #[serde(default)]
    pub last_completed_task_date: Option<NaiveDate>,
    pub last_sensor_value: f64,
    pub last_sensor_date: NaiveDate,
    /// Units per day. Non-positive means sensor projection is impossible.
    pub average_sensor_rate: f64,
    #[serde(default)]
    pub maintenance: Option<MaintenanceRecord>,
    /// Recorded for diagnostics/export only; takes no part in scheduling.
    #[serde(default)]
    pub period_change_date: Option<NaiveDate>,
}

/// Where completed tasks are drawn by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletedTaskTrack {
    SensorTrack,
    CalendarTrack,
    SeparateTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub task_count: usize,
    pub completed_task_track: CompletedTaskTrack,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            task_count: 20,
            completed_task_track: CompletedTaskTrack::SeparateTrack,
        }
    }
}

/// Immutable input for one schedule computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    pub is_floating: bool,
    pub triggers: TriggerConfig,
    #[serde(default)]
    pub definition_start_date: Option<NaiveDate>,
    pub calendar_config: CalendarConfig,
    pub sensor_config: SensorConfig,
    pub context: ScheduleContext,
    #[serde(default)]
    pub display_settings: DisplaySettings,
}

impl ScheduleConfig {
    /// Reject configurations that cannot be scheduled at all. The engine
    /// also guards its own loops, so skipping validation degrades to empty
    /// results rather than panics.
    pub fn validate(&self) -> Result<()> {
        if !self.triggers.calendar && !self.triggers.sensor {
            bail!("no trigger source enabled");
        }
        if self.triggers.calendar
            && self.calendar_config.is_repeating
            && self.calendar_config.repeat_every == 0
        {
            bail!("calendar repeatEvery must be > 0");
        }
        if self.triggers.sensor {
            if self.sensor_config.trigger_value <= 0.0 {
                bail!("sensor triggerValue must be > 0");
            }
            if self.context.average_sensor_rate <= 0.0 {
                bail!("averageSensorRate must be > 0 for sensor projections");
            }
        }
        if self.triggers.calendar
            && self.definition_start_date.is_none()
            && self.context.last_completed_task_date.is_none()
        {
            bail!("calendar trigger needs a definition start date or a completed task date");
        }
        Ok(())
    }

    /// Starter configuration matching the control panel defaults: fixed
    /// monthly calendar schedule, sensor trigger off, reading one month old.
    pub fn sample(today: NaiveDate) -> Self {
        let one_month_ago = today
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(today);
        Self {
            is_floating: false,
            triggers: TriggerConfig {
                calendar: true,
                sensor: false,
                coexisting: false,
            },
            definition_start_date: Some(one_month_ago),
            calendar_config: CalendarConfig {
                is_repeating: true,
                repeat_every: 1,
                unit: CalendarUnit::Month,
                schedule_first_from_interval: false,
            },
            sensor_config: SensorConfig {
                is_once: false,
                trigger_value: 500.0,
                preventive: true,
            },
            context: ScheduleContext {
                last_completed_task_date: None,
                last_sensor_value: 100.0,
                last_sensor_date: one_month_ago,
                average_sensor_rate: 10.0,
                maintenance: None,
                period_change_date: None,
            },
            display_settings: DisplaySettings::default(),
        }
    }
}

/// Which anchor the base-date resolution picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BaseDateSource {
    CompletedTask,
    DefinitionStart,
    CurrentDate,
}

/// Base date evaluated once per computation and carried along, so
/// diagnostics can report which anchor was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBase {
    pub date: NaiveDate,
    pub source: BaseDateSource,
}

/// Prioritized anchor resolution: completed-task date, then definition
/// start date, then the current date.
pub fn resolve_base_date(config: &ScheduleConfig, today: NaiveDate) -> ResolvedBase {
    if let Some(completed) = config.context.last_completed_task_date {
        return ResolvedBase {
            date: completed,
            source: BaseDateSource::CompletedTask,
        };
    }
    if let Some(start) = config.definition_start_date {
        return ResolvedBase {
            date: start,
            source: BaseDateSource::DefinitionStart,
        };
    }
    ResolvedBase {
        date: today,
        source: BaseDateSource::CurrentDate,
    }
}
