//! Sensor scheduler: projects the calendar dates on which a monotonically
//! increasing usage counter is expected to cross successive trigger
//! thresholds, given one historical reading and an average daily rate.
//!
//! Fixed mode counts absolute multiples of the trigger increment; floating
//! mode counts relative to the last maintenance baseline when one exists.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{ScheduleContext, SensorConfig};

/// One-shot vs open-ended threshold series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorMode {
    Single,
    Periodic,
}

/// Periodic requests are bounded to 13 months (of 30 days) after the first
/// returned date.
const CAP_DAYS: u64 = 13 * 30;

/// Hard bound on projection steps; degenerate inputs bail out long before
/// the date bounds would.
const MAX_STEPS: usize = 1024;

/// Whole days from `from` to `to`, never negative.
fn days_since(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days().max(0) as f64
}

/// Next threshold strictly above `value`, counted in increments of
/// `trigger_value` from `origin`.
fn next_threshold(value: f64, origin: f64, trigger_value: f64) -> f64 {
    ((value - origin) / trigger_value).floor() * trigger_value + trigger_value + origin
}

/// Ordered future dates at which the counter is projected to cross
/// successive thresholds, between `start` and `end`.
///
/// A reading that already sits past an owed threshold produces an immediate
/// task at the start date (clamped to `today`); in `Single` mode that is
/// the entire result. Non-positive rate or increment yields no dates.
pub fn trigger_dates(
    start: NaiveDate,
    end: NaiveDate,
    context: &ScheduleContext,
    trigger_value: f64,
    mode: SensorMode,
    is_fixed: bool,
    preventive: bool,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let rate = context.average_sensor_rate;
    if rate <= 0.0 || trigger_value <= 0.0 {
        return Vec::new();
    }

    let adjusted_start = start.max(today);
    let last_value = context.last_sensor_value;
    let last_date = context.last_sensor_date;
    // Fixed mode ignores any maintenance baseline.
    let maintenance = if is_fixed {
        None
    } else {
        context.maintenance
    };
    let origin = maintenance.map(|m| m.value).unwrap_or(0.0);

    // Usage projected out to today, the gate for preventive-off emission.
    let projected_now = last_value + rate * days_since(last_date, today);

    let mut out = Vec::new();

    // Immediate task: the reading already covers a threshold that should
    // have triggered. For maintenance-relative counting the reading only
    // says something once today is past the maintenance date.
    let owed = match maintenance {
        Some(m) => last_value - m.value >= trigger_value && today > m.date,
        None => last_value >= trigger_value,
    };
    if owed {
        out.push(adjusted_start);
        if mode == SensorMode::Single {
            return out;
        }
    }

    let mut accumulated = last_value;
    let mut iter_date = last_date;
    let mut threshold = next_threshold(last_value, origin, trigger_value);

    // Reading exactly one increment past maintenance: that increment is the
    // immediate task above, so re-derive the next threshold from the
    // reading's forward-projected value at the adjusted start instead of
    // counting the same interval twice.
    if let Some(m) = maintenance {
        if last_value - m.value == trigger_value {
            accumulated = last_value + rate * days_since(last_date, adjusted_start);
            iter_date = adjusted_start;
            threshold = next_threshold(accumulated, origin, trigger_value);
        }
    }

    for _ in 0..MAX_STEPS {
        let days_remaining = (threshold - accumulated) / rate;
        if days_remaining <= 0.0 {
            // Threshold already behind the accumulated value: skip it.
            threshold += trigger_value;
            continue;
        }
        if !preventive && threshold > projected_now {
            break;
        }
        let Some(candidate) = iter_date.checked_add_days(Days::new(days_remaining.ceil() as u64))
        else {
            break;
        };
        let due = candidate.max(adjusted_start);
        if due > end {
            if out.is_empty() {
                out.push(due);
            }
            break;
        }
        if out.last() != Some(&due) {
            out.push(due);
            if mode == SensorMode::Single {
                break;
            }
        }
        accumulated = threshold;
        threshold += trigger_value;
        // The unclamped candidate keeps the next day-delta honest even when
        // this due date was pulled forward to the start.
        iter_date = candidate;
    }

    if let Some(cap) = out.first().and_then(|f| f.checked_add_days(Days::new(CAP_DAYS))) {
        out.retain(|d| *d <= cap);
    }
    out
}

/// Single next sensor candidate from `base`, used when racing against the
/// calendar scheduler: one trigger increment's worth of days, stepped past
/// today so the result is never overdue.
pub fn next_date(
    base: NaiveDate,
    config: &SensorConfig,
    context: &ScheduleContext,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let rate = context.average_sensor_rate;
    if rate <= 0.0 || config.trigger_value <= 0.0 {
        return None;
    }

    let step = cadence_days(config.trigger_value, rate);
    let mut next = base.checked_add_days(Days::new(step))?;
    while next < today {
        next = next.checked_add_days(Days::new(step))?;
    }

    if !config.preventive {
        let projected =
            context.last_sensor_value + rate * days_since(context.last_sensor_date, today);
        if projected < config.trigger_value {
            return None;
        }
    }

    Some(next)
}

/// Whole days per trigger increment, at least one.
pub(crate) fn cadence_days(trigger_value: f64, rate: f64) -> u64 {
    ((trigger_value / rate).ceil() as u64).max(1)
}
