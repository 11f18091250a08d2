use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::scheduling::core::errors::SchedulingError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishFilter {
    ShiftIds(Vec<Uuid>),
    DateRange { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishShifts {
    pub filter: PublishFilter,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishShiftsBody {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub shift_ids: Option<Vec<Uuid>>,
}

impl TryFrom<PublishShiftsBody> for PublishShifts {
    type Error = SchedulingError;

    /// Explicit ids take precedence over a date range.
    fn try_from(body: PublishShiftsBody) -> Result<Self, Self::Error> {
        let filter = match (body.shift_ids, body.start_date, body.end_date) {
            (Some(ids), _, _) if !ids.is_empty() => PublishFilter::ShiftIds(ids),
            (_, Some(start), Some(end)) if start <= end => PublishFilter::DateRange { start, end },
            (_, Some(_), Some(_)) => {
                return Err(SchedulingError::invalid(
                    "end_date",
                    "end_date must not be before start_date",
                ));
            }
            _ => {
                return Err(SchedulingError::invalid(
                    "shift_ids",
                    "provide shift_ids or both start_date and end_date",
                ));
            }
        };
        Ok(PublishShifts { filter })
    }
}
