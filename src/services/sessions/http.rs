use async_trait::async_trait;
use serde::Deserialize;

use super::{ActionError, SessionAction, SessionClient};
use crate::config::ClientConfig;

#[derive(Debug, Deserialize)]
struct ActionReply {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

pub struct HttpSessionClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpSessionClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SessionClient for HttpSessionClient {
    async fn perform(&self, action: SessionAction, booking_id: i64) -> Result<(), ActionError> {
        let mut req = self
            .client
            .post(self.config.url(&action.path(booking_id)))
            .json(&serde_json::json!({}));
        if let Some(token) = &self.config.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?;

        // Error replies still carry a JSON body with the reason.
        let status = resp.status();
        let reply: ActionReply = resp
            .json()
            .await
            .map_err(|e| ActionError::Network(format!("unreadable reply ({status}): {e}")))?;

        if reply.success {
            tracing::info!(booking_id, ?action, "session action applied");
            Ok(())
        } else {
            Err(ActionError::Rejected(
                reply.error.unwrap_or_else(|| format!("server returned {status}")),
            ))
        }
    }
}
