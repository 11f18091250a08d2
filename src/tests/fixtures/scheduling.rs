use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::modules::scheduling::core::shift::{Rota, ShiftAssignment, ShiftShape, ShiftTemplate};
use crate::modules::scheduling::core::state::{AssignmentStatus, RotaStatus};
use crate::shared::core::primitives::{EmployeeId, TenantId};

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub struct TemplateBuilder {
    inner: ShiftTemplate,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TemplateBuilder {
    pub fn new() -> Self {
        Self {
            inner: ShiftTemplate {
                id: Uuid::now_v7(),
                tenant_id: Uuid::now_v7(),
                name: "Day".to_string(),
                start_time: at(9, 0),
                end_time: at(17, 0),
                department: None,
                color: None,
                required_staff: 1,
                is_active: true,
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            },
        }
    }

    pub fn tenant_id(mut self, v: TenantId) -> Self {
        self.inner.tenant_id = v;
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.inner.start_time = start;
        self.inner.end_time = end;
        self
    }

    pub fn color(mut self, v: impl Into<String>) -> Self {
        self.inner.color = Some(v.into());
        self
    }

    pub fn department(mut self, v: impl Into<String>) -> Self {
        self.inner.department = Some(v.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.inner.is_active = false;
        self
    }

    pub fn build(self) -> ShiftTemplate {
        self.inner
    }
}

pub struct AssignmentBuilder {
    inner: ShiftAssignment,
}

impl Default for AssignmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl AssignmentBuilder {
    pub fn new() -> Self {
        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        Self {
            inner: ShiftAssignment {
                id: Uuid::now_v7(),
                tenant_id: Uuid::now_v7(),
                employee_id: Uuid::now_v7(),
                date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                shape: ShiftShape::Custom {
                    name: "Day".to_string(),
                    start_time: at(9, 0),
                    end_time: at(17, 0),
                    color: None,
                },
                status: AssignmentStatus::Draft,
                rota_id: None,
                notes: String::new(),
                cancellation_reason: None,
                created_at,
                updated_at: created_at,
                version: 1,
            },
        }
    }

    pub fn tenant_id(mut self, v: TenantId) -> Self {
        self.inner.tenant_id = v;
        self
    }

    pub fn employee_id(mut self, v: EmployeeId) -> Self {
        self.inner.employee_id = v;
        self
    }

    pub fn date(mut self, v: NaiveDate) -> Self {
        self.inner.date = v;
        self
    }

    pub fn status(mut self, v: AssignmentStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn template(mut self, template: &ShiftTemplate) -> Self {
        self.inner.tenant_id = template.tenant_id;
        self.inner.shape = ShiftShape::Template {
            template_id: template.id,
        };
        self
    }

    pub fn window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.inner.shape = ShiftShape::Custom {
            name: "Custom".to_string(),
            start_time: start,
            end_time: end,
            color: None,
        };
        self
    }

    pub fn rota_id(mut self, v: Uuid) -> Self {
        self.inner.rota_id = Some(v);
        self
    }

    pub fn build(self) -> ShiftAssignment {
        self.inner
    }
}

pub struct RotaBuilder {
    inner: Rota,
}

impl Default for RotaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RotaBuilder {
    pub fn new() -> Self {
        Self {
            inner: Rota {
                id: Uuid::now_v7(),
                tenant_id: Uuid::now_v7(),
                name: "Week 24".to_string(),
                week_start_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                status: RotaStatus::Draft,
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
                published_at: None,
                version: 1,
            },
        }
    }

    pub fn tenant_id(mut self, v: TenantId) -> Self {
        self.inner.tenant_id = v;
        self
    }

    pub fn status(mut self, v: RotaStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn build(self) -> Rota {
        self.inner
    }
}
