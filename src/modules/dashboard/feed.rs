// Server-sent event feed for supervisor dashboards. Each client gets its own
// stream: a snapshot on connect and every `refresh_interval`, and a heartbeat
// event every `heartbeat_interval`. The stream ends when the client goes away.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use chrono::Utc;
use futures::stream::{self, Stream, StreamExt};
use tokio::time::{Instant, interval, interval_at};
use tokio_stream::wrappers::IntervalStream;

use crate::modules::dashboard::snapshot::snapshot;
use crate::shared::core::access::ensure_can_manage_tenant;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    pub heartbeat_interval: Duration,
    pub refresh_interval: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(30),
            refresh_interval: Duration::from_secs(10),
        }
    }
}

enum Tick {
    Refresh,
    Heartbeat,
}

pub async fn stream(
    State(state): State<AppState>,
    Caller(context): Caller,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApplicationError> {
    ensure_can_manage_tenant(&context)?;
    let settings = state.feed;
    tracing::debug!(tenant_id = %context.tenant_id, user_id = %context.user_id, "dashboard client connected");

    let refresh = IntervalStream::new(interval(settings.refresh_interval)).map(|_| Tick::Refresh);
    let heartbeat = IntervalStream::new(interval_at(
        Instant::now() + settings.heartbeat_interval,
        settings.heartbeat_interval,
    ))
    .map(|_| Tick::Heartbeat);

    let database = state.ports.database.clone();
    let events = stream::select(refresh, heartbeat).then(move |tick| {
        let database = database.clone();
        let context = context.clone();
        async move {
            let event = match tick {
                Tick::Heartbeat => Event::default().event("heartbeat").data(Utc::now().to_rfc3339()),
                Tick::Refresh => {
                    let current = database
                        .read(|tables| snapshot(tables, &context, Utc::now()))
                        .await;
                    match current.map(|current| Event::default().event("snapshot").json_data(current)) {
                        Ok(Ok(event)) => event,
                        Ok(Err(error)) => {
                            tracing::warn!(%error, "dashboard snapshot could not be encoded");
                            Event::default().event("error").data("snapshot unavailable")
                        }
                        Err(error) => {
                            tracing::warn!(%error, "dashboard snapshot could not be read");
                            Event::default().event("error").data("snapshot unavailable")
                        }
                    }
                }
            };
            Ok::<Event, Infallible>(event)
        }
    });
    Ok(Sse::new(events))
}
