use chrono::{DateTime, Utc};

use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;

use super::{ActiveCall, CallLog, CampaignProgress, CampaignStats};

#[derive(Debug, Default)]
pub struct DashboardPage {
    stats: Option<CampaignStats>,
    call_logs: Vec<CallLog>,
    active_calls: Vec<ActiveCall>,
    progress: Option<CampaignProgress>,
    last_refresh: Option<DateTime<Utc>>,
    notifications: Notifications,
}

impl DashboardPage {
    pub fn new() -> DashboardPage {
        DashboardPage::default()
    }

    pub fn stats(&self) -> Option<&CampaignStats> {
        self.stats.as_ref()
    }

    pub fn call_logs(&self) -> &[CallLog] {
        &self.call_logs
    }

    pub fn active_calls(&self) -> &[ActiveCall] {
        &self.active_calls
    }

    pub fn progress(&self) -> Option<&CampaignProgress> {
        self.progress.as_ref()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Fetches stats and the latest call logs together. Whatever arrives is
    /// kept even when the other request fails.
    #[tracing::instrument(skip(self, backend))]
    pub async fn refresh(&mut self, backend: &dyn Backend, log_limit: u32) -> Result<(), Error> {
        let dashboard = backend.dashboard();
        let (stats, logs) = futures::join!(
            dashboard.fetch_stats(),
            dashboard.fetch_call_logs(log_limit)
        );

        let mut failure = None;
        match stats {
            Ok(stats) => self.stats = Some(stats),
            Err(err) => failure = Some(err),
        }
        match logs {
            Ok(logs) => self.call_logs = logs,
            Err(err) => failure = failure.or(Some(err)),
        }

        match failure {
            None => {
                self.last_refresh = Some(Utc::now());
                self.notifications.success("Dashboard data refreshed");
                Ok(())
            }
            Some(err) => {
                self.notifications.error("Failed to refresh dashboard data");
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn load_active_calls(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        match backend.dashboard().fetch_active_calls().await {
            Ok(calls) => {
                self.active_calls = calls;
                Ok(())
            }
            Err(err) => {
                self.notifications.failure(
                    &err,
                    "Failed to load active calls",
                    "Error loading active calls",
                );
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn load_progress(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        match backend.dashboard().fetch_campaign_progress().await {
            Ok(progress) => {
                self.progress = Some(progress);
                Ok(())
            }
            Err(err) => {
                self.notifications.failure(
                    &err,
                    "Failed to fetch campaign progress",
                    "Error fetching campaign progress",
                );
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn trigger_processor(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        match backend.dashboard().trigger_campaign_processor().await {
            Ok(message) => {
                self.notifications.success(
                    message.unwrap_or_else(|| "Campaign started successfully".to_owned()),
                );
            }
            Err(err) => {
                self.notifications
                    .failure(&err, "Failed to start campaign", "Failed to start campaign");
                return Err(err);
            }
        }

        self.load_progress(backend).await
    }
}
