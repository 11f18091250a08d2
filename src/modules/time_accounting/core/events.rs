use serde::{Deserialize, Serialize};

use crate::modules::time_accounting::core::time_entry::{BreakLog, TimeEntry};
use crate::shared::core::primitives::{EmployeeId, TenantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimeEvent {
    ClockedIn(TimeEntry),
    BreakStarted {
        entry: TimeEntry,
        break_log: BreakLog,
    },
    BreakEnded {
        entry: TimeEntry,
        break_log: BreakLog,
    },
    ClockedOut {
        entry: TimeEntry,
        closed_break: Option<BreakLog>,
        /// Breaks exceeded the shift; worked hours were floored at zero.
        clamped: bool,
    },
    EntryEdited(TimeEntry),
    PresenceChanged {
        tenant_id: TenantId,
        employee_id: EmployeeId,
        online: bool,
    },
}

impl TimeEvent {
    pub fn entry(&self) -> Option<&TimeEntry> {
        match self {
            TimeEvent::ClockedIn(entry)
            | TimeEvent::BreakStarted { entry, .. }
            | TimeEvent::BreakEnded { entry, .. }
            | TimeEvent::ClockedOut { entry, .. }
            | TimeEvent::EntryEdited(entry) => Some(entry),
            TimeEvent::PresenceChanged { .. } => None,
        }
    }

    pub fn break_log(&self) -> Option<&BreakLog> {
        match self {
            TimeEvent::BreakStarted { break_log, .. } | TimeEvent::BreakEnded { break_log, .. } => {
                Some(break_log)
            }
            TimeEvent::ClockedOut { closed_break, .. } => closed_break.as_ref(),
            _ => None,
        }
    }
}
