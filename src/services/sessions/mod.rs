pub mod http;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Complete,
    Cancel,
}

impl SessionAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            SessionAction::Complete => "Mark this session as completed?",
            SessionAction::Cancel => {
                "Are you sure you want to cancel this session? This action cannot be undone."
            }
        }
    }

    pub fn path(&self, booking_id: i64) -> String {
        match self {
            SessionAction::Complete => format!("/api/complete_booking/{booking_id}"),
            SessionAction::Cancel => format!("/api/cancel_booking/{booking_id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    Declined,
}

#[async_trait]
pub trait SessionClient: Send + Sync {
    async fn perform(&self, action: SessionAction, booking_id: i64) -> Result<(), ActionError>;
}

/// Asks `confirm` with the action's prompt and only then calls the API.
pub async fn run_action<F>(
    client: &dyn SessionClient,
    action: SessionAction,
    booking_id: i64,
    confirm: F,
) -> Result<ActionOutcome, ActionError>
where
    F: FnOnce(&str) -> bool,
{
    if !confirm(action.prompt()) {
        return Ok(ActionOutcome::Declined);
    }

    match client.perform(action, booking_id).await {
        Ok(()) => Ok(ActionOutcome::Done),
        Err(e) => {
            tracing::error!(error = %e, booking_id, ?action, "session action failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockClient {
        calls: Mutex<Vec<(SessionAction, i64)>>,
        reply: Result<(), ActionError>,
    }

    impl MockClient {
        fn new(reply: Result<(), ActionError>) -> Self {
            Self {
                calls: Mutex::new(vec![]),
                reply,
            }
        }
    }

    #[async_trait]
    impl SessionClient for MockClient {
        async fn perform(&self, action: SessionAction, booking_id: i64) -> Result<(), ActionError> {
            self.calls.lock().unwrap().push((action, booking_id));
            self.reply.clone()
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(SessionAction::Complete.path(7), "/api/complete_booking/7");
        assert_eq!(SessionAction::Cancel.path(7), "/api/cancel_booking/7");
    }

    #[tokio::test]
    async fn test_declined_confirmation_sends_nothing() {
        let client = MockClient::new(Ok(()));
        let mut asked = String::new();
        let outcome = run_action(&client, SessionAction::Cancel, 3, |prompt| {
            asked = prompt.to_string();
            false
        })
        .await
        .unwrap();

        assert_eq!(outcome, ActionOutcome::Declined);
        assert!(asked.starts_with("Are you sure"));
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_action_calls_client() {
        let client = MockClient::new(Ok(()));
        let outcome = run_action(&client, SessionAction::Complete, 3, |_| true)
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Done);
        assert_eq!(*client.calls.lock().unwrap(), vec![(SessionAction::Complete, 3)]);
    }

    #[tokio::test]
    async fn test_rejection_is_surfaced() {
        let client = MockClient::new(Err(ActionError::Rejected("Permission denied".into())));
        let err = run_action(&client, SessionAction::Cancel, 3, |_| true)
            .await
            .unwrap_err();
        assert_eq!(err, ActionError::Rejected("Permission denied".into()));
    }
}
