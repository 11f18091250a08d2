use chrono::Utc;

use crate::modules::scheduling::adapters::outbound::repository;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::ShiftTemplate;
use crate::modules::scheduling::use_cases::manage_templates::command::{
    CreateTemplate, DeactivateTemplate, ListTemplates,
};
use crate::modules::scheduling::use_cases::manage_templates::decide::{
    decide_create_template, decide_deactivate_template,
};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, Role};
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct TemplateHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> TemplateHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id))]
    pub async fn create(
        &self,
        context: &AccessContext,
        command: CreateTemplate,
    ) -> Result<ShiftTemplate, ApplicationError> {
        let (events, _) = decide_create_template(command, context, Utc::now()).into_result()?;
        self.persist(&events).await
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, template_id = %command.id))]
    pub async fn deactivate(
        &self,
        context: &AccessContext,
        command: DeactivateTemplate,
    ) -> Result<ShiftTemplate, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let template =
            repository::find_template(transaction.tables(), context.tenant_id, command.id).cloned();
        let (events, _) =
            decide_deactivate_template(template.as_ref(), command, context).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;
        template_of(&events)
    }

    /// Inactive templates are listed for admins and managers only.
    pub async fn list(
        &self,
        context: &AccessContext,
        query: ListTemplates,
    ) -> Result<Vec<ShiftTemplate>, ApplicationError> {
        let include_inactive = query.include_inactive && context.role != Role::Employee;
        let tenant_id = context.tenant_id;
        let mut templates = self
            .ports
            .database
            .read(|tables| repository::list_templates(tables, tenant_id, include_inactive))
            .await?;
        templates.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.name.cmp(&b.name)));
        Ok(templates)
    }

    async fn persist(&self, events: &[SchedulingEvent]) -> Result<ShiftTemplate, ApplicationError> {
        self.ports
            .database
            .write(|tables| repository::apply_all(tables, events))
            .await?;
        let template = template_of(events)?;
        tracing::info!(template_id = %template.id, "shift template created");
        Ok(template)
    }
}

fn template_of(events: &[SchedulingEvent]) -> Result<ShiftTemplate, ApplicationError> {
    events
        .iter()
        .find_map(SchedulingEvent::template)
        .cloned()
        .ok_or_else(|| ApplicationError::Unexpected("accepted template change without a row".into()))
}
