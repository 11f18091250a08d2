use crate::modules::dashboard::feed::FeedSettings;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::shared::infrastructure::ports::Ports;

#[derive(Clone)]
pub struct AppState {
    pub ports: Ports<InMemoryDomainOutbox>,
    pub feed: FeedSettings,
}

impl AppState {
    pub fn new(ports: Ports<InMemoryDomainOutbox>, feed: FeedSettings) -> Self {
        Self { ports, feed }
    }
}
