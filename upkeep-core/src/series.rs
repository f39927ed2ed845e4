//! Series generator: orchestrates the calendar and sensor schedulers per
//! trigger configuration and produces the ordered task list.
//!
//! Each computation is independent and side-effect-free: the generation is
//! a fold over immutable per-iteration snapshots, never an incrementally
//! mutated working config.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::config::{resolve_base_date, BaseDateSource, ResolvedBase, ScheduleConfig};
use crate::sensor;
use crate::task::{IntervalInfo, Task, TaskSource};

/// Projection window for open-ended sensor series; twice the sensor
/// scheduler's 13x30-day result cap, so the cap is the effective bound.
const PROJECTION_WINDOW_DAYS: u64 = 780;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextOccurrence {
    pub due_date: NaiveDate,
    pub source: TaskSource,
}

/// Single next task across whichever sources are active.
pub fn next_occurrence(config: &ScheduleConfig, today: NaiveDate) -> Option<NextOccurrence> {
    occurrence_series(config, 1, today).first().map(|t| NextOccurrence {
        due_date: t.due_date,
        source: t.source,
    })
}

/// Ordered, deduplicated task list, truncated to `count` and renumbered
/// 1..N. Degenerate configurations yield an empty list, never an error.
pub fn occurrence_series(config: &ScheduleConfig, count: usize, today: NaiveDate) -> Vec<Task> {
    let triggers = &config.triggers;
    if count == 0 || (!triggers.calendar && !triggers.sensor) {
        return Vec::new();
    }

    if triggers.calendar && triggers.sensor && triggers.coexisting {
        // Two independent streams merged by date.
        let mut tasks = calendar_series(config, count, today);
        tasks.extend(sensor_series(config, count, today));
        tasks.sort_by_key(|t| t.due_date);
        tasks.truncate(count);
        renumber(&mut tasks);
        return tasks;
    }
    if triggers.calendar && triggers.sensor {
        return first_wins_series(config, count, today);
    }
    if triggers.calendar {
        calendar_series(config, count, today)
    } else {
        sensor_series(config, count, today)
    }
}

/// Anchor for calendar cadences. Fixed intervals stay pinned to the
/// definition start so late completions never shift the schedule; floating
/// intervals re-anchor through the standard resolution chain.
fn calendar_anchor(config: &ScheduleConfig, today: NaiveDate) -> ResolvedBase {
    if !config.is_floating {
        if let Some(start) = config.definition_start_date {
            return ResolvedBase {
                date: start,
                source: BaseDateSource::DefinitionStart,
            };
        }
    }
    resolve_base_date(config, today)
}

fn calendar_series(config: &ScheduleConfig, count: usize, today: NaiveDate) -> Vec<Task> {
    let anchor = calendar_anchor(config, today);
    let info = IntervalInfo::Calendar {
        repeat_every: config.calendar_config.repeat_every,
        unit: config.calendar_config.unit,
    };

    let mut tasks = Vec::new();
    let mut base = anchor.date;
    let mut has_completion = config.context.last_completed_task_date.is_some();
    while tasks.len() < count {
        let Some(due) =
            calendar::next_calendar_date(base, &config.calendar_config, today, has_completion)
        else {
            break;
        };
        tasks.push(Task {
            sequence_number: tasks.len() + 1,
            due_date: due,
            source: TaskSource::Calendar,
            interval_info: info,
        });
        if !config.calendar_config.is_repeating {
            break;
        }
        // Next snapshot: the emitted task is the completion anchor.
        base = due;
        has_completion = true;
    }
    tasks
}

fn sensor_series(config: &ScheduleConfig, count: usize, today: NaiveDate) -> Vec<Task> {
    let anchor = resolve_base_date(config, today);
    let Some(end) = today.checked_add_days(Days::new(PROJECTION_WINDOW_DAYS)) else {
        return Vec::new();
    };
    let dates = sensor::trigger_dates(
        anchor.date,
        end,
        &config.context,
        config.sensor_config.trigger_value,
        config.sensor_config.mode(),
        !config.is_floating,
        config.sensor_config.preventive,
        today,
    );
    let info = IntervalInfo::Sensor {
        trigger_value: config.sensor_config.trigger_value,
    };
    dates
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, due)| Task {
            sequence_number: i + 1,
            due_date: due,
            source: TaskSource::Sensor,
            interval_info: info,
        })
        .collect()
}

/// Both schedulers race from the same evolving base date; the earlier
/// candidate wins each slot (ties go to the sensor).
fn first_wins_series(config: &ScheduleConfig, count: usize, today: NaiveDate) -> Vec<Task> {
    let anchor = calendar_anchor(config, today);

    let mut tasks = Vec::new();
    let mut base = anchor.date;
    let mut has_completion = config.context.last_completed_task_date.is_some();
    let mut context = config.context.clone();

    while tasks.len() < count {
        let cal = calendar::next_calendar_date(base, &config.calendar_config, today, has_completion);
        let sen = sensor::next_date(base, &config.sensor_config, &context, today);

        let (due, source) = match (cal, sen) {
            (Some(c), Some(s)) => {
                if c < s {
                    (c, TaskSource::Calendar)
                } else {
                    (s, TaskSource::Sensor)
                }
            }
            (Some(c), None) => (c, TaskSource::Calendar),
            (None, Some(s)) => (s, TaskSource::Sensor),
            (None, None) => break,
        };

        let interval_info = match source {
            TaskSource::Calendar => IntervalInfo::Calendar {
                repeat_every: config.calendar_config.repeat_every,
                unit: config.calendar_config.unit,
            },
            TaskSource::Sensor => IntervalInfo::Sensor {
                trigger_value: config.sensor_config.trigger_value,
            },
        };
        tasks.push(Task {
            sequence_number: tasks.len() + 1,
            due_date: due,
            source,
            interval_info,
        });

        // A one-time source ends the race after its first emission.
        if !config.calendar_config.is_repeating || config.sensor_config.is_once {
            break;
        }

        // Emitted dates always land on the winning cadence, so re-basing on
        // the emission keeps fixed schedules on their original grid while
        // floating schedules follow it as the new completion anchor.
        base = due;
        has_completion = true;
        if source == TaskSource::Sensor {
            context.last_sensor_value += config.sensor_config.trigger_value;
        }
    }
    tasks
}

fn renumber(tasks: &mut [Task]) {
    for (i, task) in tasks.iter_mut().enumerate() {
        task.sequence_number = i + 1;
    }
}
