use chrono::NaiveTime;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::shift::ShiftShape;

/// Shape fields as clients send them: a template reference and/or a set of
/// override columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShapeRequest {
    pub template_id: Option<Uuid>,
    pub override_name: Option<String>,
    pub override_start_time: Option<NaiveTime>,
    pub override_end_time: Option<NaiveTime>,
    pub override_color: Option<String>,
}

impl ShapeRequest {
    pub fn is_empty(&self) -> bool {
        self.template_id.is_none() && !self.has_override_fields()
    }

    fn has_override_fields(&self) -> bool {
        self.override_name.is_some()
            || self.override_start_time.is_some()
            || self.override_end_time.is_some()
            || self.override_color.is_some()
    }

    /// A complete override wins over a template reference.
    pub fn into_shape(self) -> Result<ShiftShape, SchedulingError> {
        let name = self
            .override_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        match (name, self.override_start_time, self.override_end_time) {
            (Some(_), Some(start), Some(end)) if start == end => Err(SchedulingError::invalid(
                "override_end_time",
                "override end time must differ from its start time",
            )),
            (Some(name), Some(start_time), Some(end_time)) => Ok(ShiftShape::Custom {
                name: name.to_string(),
                start_time,
                end_time,
                color: self.override_color,
            }),
            _ if self.has_override_fields() && self.template_id.is_none() => {
                Err(SchedulingError::invalid(
                    "override",
                    "an override needs a name, a start time and an end time",
                ))
            }
            _ => match self.template_id {
                Some(template_id) => Ok(ShiftShape::Template { template_id }),
                None => Err(SchedulingError::invalid(
                    "template_id",
                    "either a shift template or a complete override is required",
                )),
            },
        }
    }
}
