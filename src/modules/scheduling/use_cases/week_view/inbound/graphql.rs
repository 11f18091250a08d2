use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::modules::scheduling::use_cases::week_view::handler::WeekViewHandler;
use crate::modules::scheduling::use_cases::week_view::projection::{
    DayShifts, EmployeeWeek, ScheduledShift, WeekView,
};
use crate::modules::scheduling::use_cases::week_view::query::WeekViewQuery;
use crate::shared::core::primitives::AccessContext;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlScheduledShift {
    pub assignment_id: Uuid,
    pub date: NaiveDate,
    pub status: String,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub color: Option<String>,
    pub department: Option<String>,
    pub template_id: Option<Uuid>,
    pub is_override: bool,
    pub notes: String,
    pub scheduled_hours: Decimal,
}

impl From<ScheduledShift> for GqlScheduledShift {
    fn from(v: ScheduledShift) -> Self {
        Self {
            assignment_id: v.assignment_id,
            date: v.date,
            status: v.status.as_str().to_string(),
            name: v.shift.name,
            start_time: v.shift.start_time,
            end_time: v.shift.end_time,
            color: v.shift.color,
            department: v.shift.department,
            template_id: v.shift.template_id,
            is_override: v.shift.is_override,
            notes: v.notes,
            scheduled_hours: v.scheduled_hours,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlDayShifts {
    pub date: NaiveDate,
    pub shifts: Vec<GqlScheduledShift>,
}

impl From<DayShifts> for GqlDayShifts {
    fn from(v: DayShifts) -> Self {
        Self {
            date: v.date,
            shifts: v.shifts.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlEmployeeWeek {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub days: Vec<GqlDayShifts>,
}

impl From<EmployeeWeek> for GqlEmployeeWeek {
    fn from(v: EmployeeWeek) -> Self {
        Self {
            employee_id: v.employee_id,
            employee_name: v.employee_name,
            days: v.days.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlWeekView {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub employees: Vec<GqlEmployeeWeek>,
}

impl From<WeekView> for GqlWeekView {
    fn from(v: WeekView) -> Self {
        Self {
            week_start: v.week_start,
            week_end: v.week_end,
            employees: v.employees.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Default)]
pub struct WeekViewQueryRoot;

#[Object]
impl WeekViewQueryRoot {
    #[allow(clippy::too_many_arguments)]
    async fn week_view(
        &self,
        context: &Context<'_>,
        date: NaiveDate,
        employee_id: Option<Uuid>,
        rota_id: Option<Uuid>,
        published_only: Option<bool>,
        show_drafts_only: Option<bool>,
    ) -> GqlResult<GqlWeekView> {
        let state = context.data_unchecked::<AppState>();
        let caller = context.data::<AccessContext>()?;
        let query = WeekViewQuery {
            employee_id,
            rota_id,
            published_only: published_only.unwrap_or(false),
            show_drafts_only: show_drafts_only.unwrap_or(false),
        };
        let view = WeekViewHandler::new(state.ports.clone())
            .handle(caller, date, query)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(view.into())
    }
}
