//! Explanation generator: human-readable summary of the active
//! configuration. Diagnostic only; never influences scheduling.

use chrono::NaiveDate;

use crate::config::{resolve_base_date, BaseDateSource, ScheduleConfig};

fn unit_label(config: &ScheduleConfig) -> &'static str {
    match config.calendar_config.unit {
        crate::config::CalendarUnit::Day => "day",
        crate::config::CalendarUnit::Month => "month",
        crate::config::CalendarUnit::Year => "year",
    }
}

/// Pure formatting of the configuration: interval type, trigger
/// combination, cadence details, and which base-date anchor resolved.
pub fn describe(config: &ScheduleConfig, today: NaiveDate) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        "Interval Type: {}",
        if config.is_floating { "Floating" } else { "Fixed" }
    ));

    let t = &config.triggers;
    if t.calendar && t.sensor {
        if t.coexisting {
            parts.push("Triggers: Calendar AND Sensor (both run independently)".to_string());
        } else {
            parts.push("Triggers: Calendar OR Sensor (first wins)".to_string());
        }
    } else if t.calendar {
        parts.push("Trigger: Calendar only".to_string());
    } else if t.sensor {
        parts.push("Trigger: Sensor only".to_string());
    } else {
        parts.push("Triggers: none enabled".to_string());
    }

    let base = resolve_base_date(config, today);
    let anchor = match base.source {
        BaseDateSource::CompletedTask => "last completed task",
        BaseDateSource::DefinitionStart => "definition start date",
        BaseDateSource::CurrentDate => "current date",
    };
    parts.push(format!("Base Date: {} (from {anchor})", base.date));

    if t.calendar {
        parts.push("\nCalendar Settings:".to_string());
        if config.calendar_config.is_repeating {
            parts.push(format!(
                "  - Repeats every {} {}(s)",
                config.calendar_config.repeat_every,
                unit_label(config)
            ));
            parts.push(format!(
                "  - First task {}",
                if config.calendar_config.schedule_first_from_interval {
                    "after interval"
                } else {
                    "on start date"
                }
            ));
        } else {
            parts.push("  - One-time task".to_string());
        }
    }

    if t.sensor {
        parts.push("\nSensor Settings:".to_string());
        parts.push(format!(
            "  - Triggers at {} units",
            config.sensor_config.trigger_value
        ));
        parts.push(format!(
            "  - {} task",
            if config.sensor_config.is_once { "One-time" } else { "Recurring" }
        ));
        parts.push(format!(
            "  - Preventive mode: {}",
            if config.sensor_config.preventive { "ON" } else { "OFF" }
        ));
    }

    parts.push("\nScheduling Logic:".to_string());
    if config.is_floating {
        parts.push("Floating interval: tasks adjust to actual completion times.".to_string());
        parts.push(
            "If a task is completed late, the next task is scheduled from the completion date."
                .to_string(),
        );
    } else {
        parts.push("Fixed interval: tasks keep regular intervals from the start point.".to_string());
        parts.push(
            "If a task is completed late, the next task maintains the original schedule."
                .to_string(),
        );
    }
    if t.calendar && t.sensor && !t.coexisting {
        parts.push(
            "Dual trigger mode: the task is scheduled for whichever trigger occurs first."
                .to_string(),
        );
    }
    if t.sensor && config.sensor_config.preventive {
        parts.push(
            "Preventive mode on: future dates are projected even before the sensor threshold is reached."
                .to_string(),
        );
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn describes_calendar_only_config() {
        let cfg = ScheduleConfig::sample(d(2024, 10, 15));
        let text = describe(&cfg, d(2024, 10, 15));
        assert!(text.contains("Interval Type: Fixed"));
        assert!(text.contains("Trigger: Calendar only"));
        assert!(text.contains("Repeats every 1 month(s)"));
        assert!(text.contains("from definition start date"));
    }

    #[test]
    fn describes_dual_trigger_and_anchor() {
        let mut cfg = ScheduleConfig::sample(d(2024, 10, 15));
        cfg.is_floating = true;
        cfg.triggers.sensor = true;
        cfg.context.last_completed_task_date = Some(d(2024, 10, 1));
        let text = describe(&cfg, d(2024, 10, 15));
        assert!(text.contains("Interval Type: Floating"));
        assert!(text.contains("first wins"));
        assert!(text.contains("Base Date: 2024-10-01 (from last completed task)"));
        assert!(text.contains("Preventive mode: ON"));

        cfg.triggers.coexisting = true;
        let text = describe(&cfg, d(2024, 10, 15));
        assert!(text.contains("both run independently"));
    }
}
