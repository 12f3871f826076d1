use async_trait::async_trait;
use awc::http::Method;
use serde::Deserialize;

use crate::backend::HttpApi;
use crate::error::Error;

use super::{
    AntiSpamSettings, CampaignConfig, MedicareSettings, NonMedicareCallSettings,
    NonMedicareEmailSettings,
};

#[async_trait(?Send)]
pub trait CampaignApi {
    async fn fetch_config(&self) -> Result<CampaignConfig, Error>;
    async fn update_medicare(&self, settings: &MedicareSettings) -> Result<(), Error>;
    async fn update_non_medicare_calls(&self, settings: &NonMedicareCallSettings) -> Result<(), Error>;
    async fn update_non_medicare_emails(&self, settings: &NonMedicareEmailSettings) -> Result<(), Error>;
    async fn update_anti_spam(&self, settings: &AntiSpamSettings) -> Result<(), Error>;
    async fn start_campaign(&self) -> Result<(), Error>;
    async fn stop_campaign(&self) -> Result<(), Error>;
}

#[derive(Deserialize)]
struct ConfigEnvelope {
    config: CampaignConfig,
}

#[async_trait(?Send)]
impl CampaignApi for HttpApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_config(&self) -> Result<CampaignConfig, Error> {
        let envelope: ConfigEnvelope = self.get("/campaign/config").await?;

        Ok(envelope.config)
    }

    #[tracing::instrument(skip(self))]
    async fn update_medicare(&self, settings: &MedicareSettings) -> Result<(), Error> {
        self.send_json(Method::PATCH, "/campaign/config/medicare", settings)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_non_medicare_calls(&self, settings: &NonMedicareCallSettings) -> Result<(), Error> {
        self.send_json(Method::PATCH, "/campaign/config/non-medicare-calls", settings)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_non_medicare_emails(&self, settings: &NonMedicareEmailSettings) -> Result<(), Error> {
        self.send_json(Method::PATCH, "/campaign/config/non-medicare-emails", settings)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_anti_spam(&self, settings: &AntiSpamSettings) -> Result<(), Error> {
        self.send_json(Method::PATCH, "/campaign/config/anti-spam", settings)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn start_campaign(&self) -> Result<(), Error> {
        self.send_empty(Method::POST, "/campaign/start").await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn stop_campaign(&self) -> Result<(), Error> {
        self.send_empty(Method::POST, "/campaign/stop").await?;

        Ok(())
    }
}
