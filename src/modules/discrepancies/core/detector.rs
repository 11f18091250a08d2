// Actual against scheduled: what a completed entry did differently from the
// shift it was worked against. Pure and order-stable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::modules::time_accounting::core::time_entry::TimeEntry;
use crate::shared::core::primitives::hours_between;

const LATE_GRACE_MINUTES: i64 = 5;
const LATE_ERROR_MINUTES: i64 = 15;
const EARLY_GRACE_MINUTES: i64 = 5;
const EARLY_ERROR_MINUTES: i64 = 30;
const OVERTIME_GRACE_MINUTES: i64 = 15;
const OVERTIME_ERROR_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    NoShow,
    MissingClockOut,
    LateClockIn,
    EarlyClockOut,
    Overtime,
}

impl DiscrepancyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscrepancyKind::NoShow => "no_show",
            DiscrepancyKind::MissingClockOut => "missing_clock_out",
            DiscrepancyKind::LateClockIn => "late_clock_in",
            DiscrepancyKind::EarlyClockOut => "early_clock_out",
            DiscrepancyKind::Overtime => "overtime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    #[serde(rename = "type")]
    pub kind: DiscrepancyKind,
    pub severity: Severity,
    pub message: String,
    pub minutes: Option<i64>,
}

/// The instants a shift was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScheduledWindow {
    pub fn hours(&self) -> Decimal {
        hours_between(self.start, self.end)
    }
}

fn graded(minutes: i64, error_above: i64) -> Severity {
    if minutes > error_above {
        Severity::Error
    } else {
        Severity::Warning
    }
}

pub fn detect(entry: Option<&TimeEntry>, scheduled: Option<&ScheduledWindow>) -> Vec<Discrepancy> {
    let Some(entry) = entry else {
        return match scheduled {
            Some(_) => vec![Discrepancy {
                kind: DiscrepancyKind::NoShow,
                severity: Severity::Error,
                message: "Scheduled shift was not clocked in".into(),
                minutes: None,
            }],
            None => Vec::new(),
        };
    };
    let Some(clock_out) = entry.clock_out else {
        return vec![Discrepancy {
            kind: DiscrepancyKind::MissingClockOut,
            severity: Severity::Error,
            message: "Shift has no clock-out".into(),
            minutes: None,
        }];
    };
    let Some(scheduled) = scheduled else {
        return Vec::new();
    };

    let mut found = Vec::new();
    let late = (entry.clock_in - scheduled.start).num_minutes();
    if late > LATE_GRACE_MINUTES {
        found.push(Discrepancy {
            kind: DiscrepancyKind::LateClockIn,
            severity: graded(late, LATE_ERROR_MINUTES),
            message: format!("Clocked in {late} minutes late"),
            minutes: Some(late),
        });
    }
    let early = (scheduled.end - clock_out).num_minutes();
    if early > EARLY_GRACE_MINUTES {
        found.push(Discrepancy {
            kind: DiscrepancyKind::EarlyClockOut,
            severity: graded(early, EARLY_ERROR_MINUTES),
            message: format!("Clocked out {early} minutes early"),
            minutes: Some(early),
        });
    }
    let overtime = ((entry.total_hours - scheduled.hours()) * Decimal::from(60))
        .round()
        .to_i64()
        .unwrap_or_default();
    if overtime > OVERTIME_GRACE_MINUTES {
        found.push(Discrepancy {
            kind: DiscrepancyKind::Overtime,
            severity: graded(overtime, OVERTIME_ERROR_MINUTES),
            message: format!("Worked {overtime} minutes over the scheduled hours"),
            minutes: Some(overtime),
        });
    }
    found
}
