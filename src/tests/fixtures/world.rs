// A seeded tenant for handler and end-to-end tests: one admin, one manager
// and two employees at the same location, plus one employee elsewhere.

use std::sync::Arc;

use axum::Router;
use rstest::fixture;
use uuid::Uuid;

use crate::modules::dashboard::feed::FeedSettings;
use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::core::notifications::NotificationIntent;
use crate::shared::core::primitives::{AccessContext, Role};
use crate::shared::infrastructure::database::{Database, PoolConfig, Tables};
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::shared::infrastructure::notification_sink::in_memory::InMemoryNotificationSink;
use crate::shared::infrastructure::ports::Ports;
use crate::shell::http::router;
use crate::shell::state::AppState;
use crate::tests::fixtures::directory::{EmployeeBuilder, context_of};

pub const TOPIC: &str = "notifications";

pub struct TestWorld {
    pub database: Arc<Database>,
    pub outbox: Arc<InMemoryDomainOutbox>,
    pub sink: Arc<InMemoryNotificationSink>,
    pub tenant_id: Uuid,
    pub location_id: Uuid,
    pub admin: Employee,
    pub manager: Employee,
    pub alice: Employee,
    pub bob: Employee,
    pub remote: Employee,
}

#[fixture]
pub fn world() -> TestWorld {
    TestWorld::new()
}

#[allow(dead_code)]
impl TestWorld {
    pub fn new() -> Self {
        Self::build(false, false)
    }

    pub fn with_manager_approvals() -> Self {
        Self::build(true, false)
    }

    pub fn offline() -> Self {
        Self::build(false, true)
    }

    fn build(allow_manager_approvals: bool, offline: bool) -> Self {
        let tenant_id = Uuid::now_v7();
        let location_id = Uuid::now_v7();
        let person = |name: &str, role: Role, location: Uuid| {
            EmployeeBuilder::new()
                .tenant_id(tenant_id)
                .name(name)
                .role(role)
                .location_id(location)
                .build()
        };
        let admin = person("Ada Admin", Role::Admin, location_id);
        let manager = person("Max Manager", Role::Manager, location_id);
        let alice = person("Alice", Role::Employee, location_id);
        let bob = person("Bob", Role::Employee, location_id);
        let remote = person("Rita Remote", Role::Employee, Uuid::now_v7());

        let mut tables = Tables::default();
        let mut settings = TenantSettings::defaults_for(tenant_id);
        settings.allow_manager_approvals = allow_manager_approvals;
        tables.tenants.insert(tenant_id, settings);
        for employee in [&admin, &manager, &alice, &bob, &remote] {
            tables.employees.insert(employee.id, employee.clone());
        }

        let mut database = Database::seeded(PoolConfig::default(), tables);
        if offline {
            database.toggle_offline();
        }
        Self {
            database: Arc::new(database),
            outbox: Arc::new(InMemoryDomainOutbox::new()),
            sink: Arc::new(InMemoryNotificationSink::new()),
            tenant_id,
            location_id,
            admin,
            manager,
            alice,
            bob,
            remote,
        }
    }

    pub fn ports(&self) -> Ports<InMemoryDomainOutbox> {
        Ports::new(TOPIC, self.database.clone(), self.outbox.clone())
    }

    pub fn admin_ctx(&self) -> AccessContext {
        context_of(&self.admin)
    }

    pub fn manager_ctx(&self) -> AccessContext {
        context_of(&self.manager)
    }

    pub fn ctx_of(&self, employee: &Employee) -> AccessContext {
        context_of(employee)
    }

    pub async fn seed(&self, seed: impl FnOnce(&mut Tables)) {
        self.database
            .write(|tables| {
                seed(tables);
                Ok(())
            })
            .await
            .unwrap();
    }

    pub async fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> T {
        self.database.read(query).await.unwrap()
    }

    /// Every notification intent not yet relayed, oldest first.
    pub async fn intents(&self) -> Vec<NotificationIntent> {
        self.outbox
            .pending(usize::MAX)
            .await
            .unwrap()
            .into_iter()
            .map(|row| serde_json::from_value(row.payload).unwrap())
            .collect()
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.ports(), FeedSettings::default())
    }

    pub fn app(&self) -> Router {
        router(self.state())
    }
}
