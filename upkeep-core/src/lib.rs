//! upkeep-core: due-date projection engine for recurring maintenance tasks.
//!
//! Two independent trigger sources, elapsed calendar time and accumulated
//! sensor usage, are merged under configurable interval semantics. Every
//! computation is synchronous and side-effect-free over an immutable
//! `ScheduleConfig` snapshot; the engine exposes three pure operations:
//! [`next_occurrence`], [`occurrence_series`], and [`describe`].

pub mod calendar;
pub mod config;
pub mod explain;
pub mod report;
pub mod sensor;
pub mod series;
pub mod task;

pub use config::{
    resolve_base_date, BaseDateSource, CalendarConfig, CalendarUnit, CompletedTaskTrack,
    DisplaySettings, MaintenanceRecord, ResolvedBase, ScheduleConfig, ScheduleContext,
    SensorConfig, TriggerConfig,
};
pub use explain::describe;
pub use report::FeedbackReport;
pub use sensor::SensorMode;
pub use series::{next_occurrence, occurrence_series, NextOccurrence};
pub use task::{IntervalInfo, Task, TaskSource};
