use crate::shared::core::notifications::NotificationIntent;

/// Outcome of a pure decide function. Accepted decisions carry the state
/// changes to persist and the notifications to publish once they commit.
#[derive(Debug)]
pub enum Decision<TEvent, TError> {
    Accepted {
        events: Vec<TEvent>,
        intents: Vec<NotificationIntent>,
    },
    Rejected {
        reason: TError,
    },
}

impl<TEvent, TError> Decision<TEvent, TError> {
    pub fn accept(events: Vec<TEvent>, intents: Vec<NotificationIntent>) -> Self {
        Decision::Accepted { events, intents }
    }

    pub fn reject(reason: TError) -> Self {
        Decision::Rejected { reason }
    }

    pub fn into_result(self) -> Result<(Vec<TEvent>, Vec<NotificationIntent>), TError> {
        match self {
            Decision::Accepted { events, intents } => Ok((events, intents)),
            Decision::Rejected { reason } => Err(reason),
        }
    }
}
