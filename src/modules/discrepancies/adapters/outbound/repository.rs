// Reads joining the scheduled side with the worked side.

use crate::modules::discrepancies::core::detector::ScheduledWindow;
use crate::modules::scheduling::adapters::outbound::repository as scheduling;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::time_accounting::core::time_entry::TimeEntry;
use crate::shared::infrastructure::database::Tables;

pub fn scheduled_window(tables: &Tables, assignment: &ShiftAssignment) -> Option<ScheduledWindow> {
    scheduling::effective_shift(tables, assignment).map(|shift| {
        let (start, end) = shift.window_on(assignment.date);
        ScheduledWindow { start, end }
    })
}

/// The assignment an entry was worked against: the linked one, or the
/// employee's non-cancelled assignment on the clock-in date.
pub fn assignment_for_entry<'a>(tables: &'a Tables, entry: &TimeEntry) -> Option<&'a ShiftAssignment> {
    entry
        .assignment_id
        .and_then(|id| scheduling::find_assignment(tables, entry.tenant_id, id))
        .filter(|assignment| assignment.is_active())
        .or_else(|| {
            scheduling::active_assignment_for(
                tables,
                entry.tenant_id,
                entry.employee_id,
                entry.clock_in.date_naive(),
            )
        })
}
