use async_trait::async_trait;
use chrono::NaiveDate;

use super::{parse_available_times, FetchError, SlotFetcher};
use crate::config::ClientConfig;
use crate::models::{AvailableTimesRequest, TimeSlot};

pub const AVAILABLE_TIMES_PATH: &str = "/student/get_available_times";

pub struct HttpSlotFetcher {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpSlotFetcher {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SlotFetcher for HttpSlotFetcher {
    async fn fetch_slots(&self, tutor_id: i64, date: NaiveDate) -> Result<Vec<TimeSlot>, FetchError> {
        let body = AvailableTimesRequest::new(tutor_id, date);

        let mut req = self
            .client
            .post(self.config.url(AVAILABLE_TIMES_PATH))
            .json(&body);
        if let Some(token) = &self.config.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let text = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let slots = parse_available_times(&text)?;
        tracing::debug!(tutor_id, %date, count = slots.len(), "fetched available times");
        Ok(slots)
    }
}
