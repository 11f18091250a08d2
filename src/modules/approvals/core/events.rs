use serde::{Deserialize, Serialize};

use crate::modules::approvals::core::requests::{ApprovalHistory, LeaveRequest, ShiftSwapRequest};
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::time_accounting::core::time_entry::TimeEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ApprovalEvent {
    TimesheetDecided {
        entry: TimeEntry,
        history: ApprovalHistory,
    },
    LeaveDecided {
        request: LeaveRequest,
        history: ApprovalHistory,
        cancelled: Vec<ShiftAssignment>,
    },
    SwapDecided {
        request: ShiftSwapRequest,
        history: ApprovalHistory,
        exchanged: Vec<ShiftAssignment>,
    },
    LeaveRequested(LeaveRequest),
    SwapRequested(ShiftSwapRequest),
}
