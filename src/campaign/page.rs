use tracing::warn;

use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;

use super::{CampaignConfig, RangeViolation};

#[derive(Debug, Default)]
pub struct SettingsPage {
    config: Option<CampaignConfig>,
    notifications: Notifications,
}

impl SettingsPage {
    pub fn new() -> SettingsPage {
        SettingsPage::default()
    }

    pub fn config(&self) -> Option<&CampaignConfig> {
        self.config.as_ref()
    }

    pub fn config_mut(&mut self) -> Result<&mut CampaignConfig, Error> {
        self.config.as_mut().ok_or(Error::ConfigurationNotLoaded)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn load(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        match backend.campaigns().fetch_config().await {
            Ok(config) => {
                self.config = Some(config);
                Ok(())
            }
            Err(err) => {
                self.notifications.failure(
                    &err,
                    "Failed to load campaign configuration",
                    "Error loading configuration",
                );
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn save_medicare(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        let result = {
            let settings = &self.loaded()?.medicare_settings;
            warn_out_of_range(settings.range_violations());
            backend.campaigns().update_medicare(settings).await
        };

        self.report(
            result,
            "Medicare settings saved!",
            "Failed to save Medicare settings",
            "Error saving Medicare settings",
        )
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn save_non_medicare_calls(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        let result = {
            let settings = &self.loaded()?.non_medicare_call_settings;
            warn_out_of_range(settings.range_violations());
            backend.campaigns().update_non_medicare_calls(settings).await
        };

        self.report(
            result,
            "Non-Medicare call settings saved!",
            "Failed to save non-Medicare call settings",
            "Error saving non-Medicare call settings",
        )
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn save_non_medicare_emails(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        let result = {
            let settings = &self.loaded()?.non_medicare_email_settings;
            warn_out_of_range(settings.range_violations());
            backend.campaigns().update_non_medicare_emails(settings).await
        };

        self.report(
            result,
            "Non-Medicare email settings saved!",
            "Failed to save non-Medicare email settings",
            "Error saving non-Medicare email settings",
        )
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn save_anti_spam(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        let result = {
            let settings = &self.loaded()?.anti_spam;
            warn_out_of_range(settings.range_violations());
            backend.campaigns().update_anti_spam(settings).await
        };

        self.report(
            result,
            "Anti-spam settings saved!",
            "Failed to save anti-spam settings",
            "Error saving anti-spam settings",
        )
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn start_campaign(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        let result = backend.campaigns().start_campaign().await;
        self.report(
            result,
            "Campaign started successfully!",
            "Failed to start campaign",
            "Error starting campaign",
        )?;

        self.load(backend).await
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn stop_campaign(&mut self, backend: &dyn Backend, confirmed: bool) -> Result<(), Error> {
        if !confirmed {
            return Err(Error::ConfirmationRequired {
                action: "pause campaign",
            });
        }

        let result = backend.campaigns().stop_campaign().await;
        self.report(
            result,
            "Campaign paused successfully!",
            "Failed to pause campaign",
            "Error pausing campaign",
        )?;

        self.load(backend).await
    }

    fn loaded(&self) -> Result<&CampaignConfig, Error> {
        self.config.as_ref().ok_or(Error::ConfigurationNotLoaded)
    }

    fn report(
        &mut self,
        result: Result<(), Error>,
        succeeded: &str,
        rejected: &str,
        unreachable: &str,
    ) -> Result<(), Error> {
        match result {
            Ok(()) => {
                self.notifications.success(succeeded);
                Ok(())
            }
            Err(err) => {
                self.notifications.failure(&err, rejected, unreachable);
                Err(err)
            }
        }
    }
}

// the backend has the final say on limits, so these are only logged
fn warn_out_of_range(violations: Vec<RangeViolation>) {
    for violation in violations {
        warn!(
            field = violation.field,
            value = violation.value,
            min = violation.min,
            max = violation.max,
            "submitting value outside of its declared range"
        );
    }
}
