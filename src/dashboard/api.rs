use async_trait::async_trait;
use awc::http::Method;
use serde::{Deserialize, Serialize};

use crate::backend::HttpApi;
use crate::error::Error;

use super::{ActiveCall, CallLog, CampaignProgress, CampaignStats};

#[async_trait(?Send)]
pub trait DashboardApi {
    async fn fetch_stats(&self) -> Result<CampaignStats, Error>;
    async fn fetch_call_logs(&self, limit: u32) -> Result<Vec<CallLog>, Error>;
    async fn fetch_active_calls(&self) -> Result<Vec<ActiveCall>, Error>;
    async fn fetch_campaign_progress(&self) -> Result<CampaignProgress, Error>;
    /// Kicks the backend's campaign processor. Returns the message it
    /// answered with, if any.
    async fn trigger_campaign_processor(&self) -> Result<Option<String>, Error>;
}

#[derive(Deserialize)]
struct LogsEnvelope {
    #[serde(default)]
    logs: Vec<CallLog>,
}

#[derive(Deserialize)]
struct CallsEnvelope {
    #[serde(default)]
    calls: Vec<ActiveCall>,
}

#[derive(Serialize)]
struct LogsQuery {
    limit: u32,
}

#[derive(Deserialize)]
struct ProcessorReply {
    message: Option<String>,
}

#[async_trait(?Send)]
impl DashboardApi for HttpApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_stats(&self) -> Result<CampaignStats, Error> {
        self.get("/stats").await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_call_logs(&self, limit: u32) -> Result<Vec<CallLog>, Error> {
        let envelope: LogsEnvelope = self.get_with_query("/call-logs", &LogsQuery { limit }).await?;

        Ok(envelope.logs)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_active_calls(&self) -> Result<Vec<ActiveCall>, Error> {
        let envelope: CallsEnvelope = self.get("/active-calls").await?;

        Ok(envelope.calls)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_progress(&self) -> Result<CampaignProgress, Error> {
        self.get("/campaign-progress").await
    }

    #[tracing::instrument(skip(self))]
    async fn trigger_campaign_processor(&self) -> Result<Option<String>, Error> {
        let body = self
            .send_empty(Method::POST, "/trigger-campaign-processor")
            .await?;

        // an empty or non-JSON reply still counts as success
        Ok(serde_json::from_slice::<ProcessorReply>(&body)
            .ok()
            .and_then(|reply| reply.message))
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    pub struct MockDashboardApi {
        pub on_fetch_stats: Box<dyn Fn() -> Result<CampaignStats, Error>>,
        pub on_fetch_call_logs: Box<dyn Fn(u32) -> Result<Vec<CallLog>, Error>>,
        pub on_fetch_active_calls: Box<dyn Fn() -> Result<Vec<ActiveCall>, Error>>,
        pub on_fetch_campaign_progress: Box<dyn Fn() -> Result<CampaignProgress, Error>>,
        pub on_trigger_campaign_processor: Box<dyn Fn() -> Result<Option<String>, Error>>,
    }

    impl MockDashboardApi {
        pub fn new() -> MockDashboardApi {
            MockDashboardApi {
                on_fetch_stats: Box::new(|| panic!("unexpected call to fetch_stats")),
                on_fetch_call_logs: Box::new(|_| panic!("unexpected call to fetch_call_logs")),
                on_fetch_active_calls: Box::new(|| panic!("unexpected call to fetch_active_calls")),
                on_fetch_campaign_progress: Box::new(|| {
                    panic!("unexpected call to fetch_campaign_progress")
                }),
                on_trigger_campaign_processor: Box::new(|| {
                    panic!("unexpected call to trigger_campaign_processor")
                }),
            }
        }
    }

    #[async_trait(?Send)]
    impl DashboardApi for MockDashboardApi {
        async fn fetch_stats(&self) -> Result<CampaignStats, Error> {
            (self.on_fetch_stats)()
        }

        async fn fetch_call_logs(&self, limit: u32) -> Result<Vec<CallLog>, Error> {
            (self.on_fetch_call_logs)(limit)
        }

        async fn fetch_active_calls(&self) -> Result<Vec<ActiveCall>, Error> {
            (self.on_fetch_active_calls)()
        }

        async fn fetch_campaign_progress(&self) -> Result<CampaignProgress, Error> {
            (self.on_fetch_campaign_progress)()
        }

        async fn trigger_campaign_processor(&self) -> Result<Option<String>, Error> {
            (self.on_trigger_campaign_processor)()
        }
    }
}
