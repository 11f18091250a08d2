use serde::{Deserialize, Serialize};

use crate::modules::scheduling::core::shift::{Rota, ShiftAssignment, ShiftTemplate};

/// State changes accepted by the scheduling deciders. Each carries the row as
/// it must be stored afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SchedulingEvent {
    TemplateCreated(ShiftTemplate),
    TemplateDeactivated(ShiftTemplate),
    RotaCreated(Rota),
    RotaPublished(Rota),
    RotaReverted(Rota),
    ShiftAssigned(ShiftAssignment),
    AssignmentUpdated(ShiftAssignment),
    ShiftsPublished { assignments: Vec<ShiftAssignment> },
    AssignmentDeleted(ShiftAssignment),
}

impl SchedulingEvent {
    pub fn assignment(&self) -> Option<&ShiftAssignment> {
        match self {
            SchedulingEvent::ShiftAssigned(assignment)
            | SchedulingEvent::AssignmentUpdated(assignment)
            | SchedulingEvent::AssignmentDeleted(assignment) => Some(assignment),
            _ => None,
        }
    }

    pub fn rota(&self) -> Option<&Rota> {
        match self {
            SchedulingEvent::RotaCreated(rota)
            | SchedulingEvent::RotaPublished(rota)
            | SchedulingEvent::RotaReverted(rota) => Some(rota),
            _ => None,
        }
    }

    pub fn template(&self) -> Option<&ShiftTemplate> {
        match self {
            SchedulingEvent::TemplateCreated(template)
            | SchedulingEvent::TemplateDeactivated(template) => Some(template),
            _ => None,
        }
    }

    pub fn published(&self) -> &[ShiftAssignment] {
        match self {
            SchedulingEvent::ShiftsPublished { assignments } => assignments,
            _ => &[],
        }
    }
}
