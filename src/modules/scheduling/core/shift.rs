use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::scheduling::core::state::{AssignmentStatus, RotaStatus};
use crate::shared::core::primitives::{EmployeeId, TenantId, hours_between};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub department: Option<String>,
    pub color: Option<String>,
    pub required_staff: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// What an assignment is scheduled as: a reusable template, or a one-off
/// shape supplied with the assignment itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftShape {
    Template {
        template_id: Uuid,
    },
    Custom {
        name: String,
        start_time: NaiveTime,
        end_time: NaiveTime,
        color: Option<String>,
    },
}

impl ShiftShape {
    pub fn template_id(&self) -> Option<Uuid> {
        match self {
            ShiftShape::Template { template_id } => Some(*template_id),
            ShiftShape::Custom { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub shape: ShiftShape,
    pub status: AssignmentStatus,
    pub rota_id: Option<Uuid>,
    pub notes: String,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

impl ShiftAssignment {
    pub fn is_active(&self) -> bool {
        self.status != AssignmentStatus::Cancelled
    }

    pub fn is_published(&self) -> bool {
        self.status == AssignmentStatus::Published
    }

    pub fn stream_id(&self) -> String {
        format!("ShiftAssignment-{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rota {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    pub week_start_date: NaiveDate,
    pub status: RotaStatus,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub version: i64,
}

impl Rota {
    pub fn stream_id(&self) -> String {
        format!("Rota-{}", self.id)
    }
}

/// The shift an assignment resolves to once overrides and templates are
/// merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveShift {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub color: Option<String>,
    pub department: Option<String>,
    pub template_id: Option<Uuid>,
    pub is_override: bool,
}

impl EffectiveShift {
    /// `template` must be the row referenced by a `Template` shape; inactive
    /// templates still resolve for assignments that reference them.
    pub fn resolve(shape: &ShiftShape, template: Option<&ShiftTemplate>) -> Option<EffectiveShift> {
        match shape {
            ShiftShape::Custom {
                name,
                start_time,
                end_time,
                color,
            } => Some(EffectiveShift {
                name: name.clone(),
                start_time: *start_time,
                end_time: *end_time,
                color: color.clone(),
                department: None,
                template_id: None,
                is_override: true,
            }),
            ShiftShape::Template { template_id } => template
                .filter(|template| template.id == *template_id)
                .map(|template| EffectiveShift {
                    name: template.name.clone(),
                    start_time: template.start_time,
                    end_time: template.end_time,
                    color: template.color.clone(),
                    department: template.department.clone(),
                    template_id: Some(template.id),
                    is_override: false,
                }),
        }
    }

    /// Start and end instants on `date`. A shift ending at or before its
    /// start runs past midnight.
    pub fn window_on(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = date.and_time(self.start_time).and_utc();
        let mut end = date.and_time(self.end_time).and_utc();
        if end <= start {
            end += Duration::days(1);
        }
        (start, end)
    }

    pub fn scheduled_hours(&self, date: NaiveDate) -> Decimal {
        let (start, end) = self.window_on(date);
        hours_between(start, end)
    }
}

#[cfg(test)]
mod shift_tests {
    use super::*;
    use crate::tests::fixtures::scheduling::TemplateBuilder;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[fixture]
    fn template() -> ShiftTemplate {
        TemplateBuilder::new()
            .name("Early")
            .window(at(9, 0), at(17, 30))
            .color("#00ff00")
            .build()
    }

    #[rstest]
    fn it_should_resolve_a_template_shape(template: ShiftTemplate) {
        let shape = ShiftShape::Template {
            template_id: template.id,
        };
        let shift = EffectiveShift::resolve(&shape, Some(&template)).unwrap();
        assert_eq!(shift.name, "Early");
        assert_eq!(shift.template_id, Some(template.id));
        assert!(!shift.is_override);
    }

    #[rstest]
    fn it_should_prefer_the_custom_shape(template: ShiftTemplate) {
        let shape = ShiftShape::Custom {
            name: "Cover".into(),
            start_time: at(12, 0),
            end_time: at(16, 0),
            color: None,
        };
        let shift = EffectiveShift::resolve(&shape, Some(&template)).unwrap();
        assert_eq!(shift.name, "Cover");
        assert!(shift.is_override);
        assert_eq!(shift.template_id, None);
    }

    #[rstest]
    fn it_should_not_resolve_a_mismatched_template(template: ShiftTemplate) {
        let shape = ShiftShape::Template {
            template_id: Uuid::now_v7(),
        };
        assert_eq!(EffectiveShift::resolve(&shape, Some(&template)), None);
    }

    #[rstest]
    fn it_should_roll_overnight_shifts_into_the_next_day() {
        let shift = EffectiveShift::resolve(
            &ShiftShape::Custom {
                name: "Night".into(),
                start_time: at(22, 0),
                end_time: at(6, 0),
                color: None,
            },
            None,
        )
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let (start, end) = shift.window_on(date);
        assert_eq!(end - start, Duration::hours(8));
        assert_eq!(shift.scheduled_hours(date), dec!(8));
    }
}
