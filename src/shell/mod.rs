// Composition root: configuration, shared state, the HTTP and GraphQL
// surfaces, and the background relay that delivers queued notifications.

pub mod config;
pub mod graphql;
pub mod http;
pub mod identity;
pub mod response;
pub mod state;
pub mod workers;
