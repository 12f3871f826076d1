use async_trait::async_trait;
use awc::http::Method;

use crate::backend::HttpApi;
use crate::error::Error;

use super::CampaignSettings;

#[async_trait(?Send)]
pub trait SettingsApi {
    async fn fetch_settings(&self) -> Result<CampaignSettings, Error>;
    async fn replace_settings(&self, settings: &CampaignSettings) -> Result<CampaignSettings, Error>;
}

#[async_trait(?Send)]
impl SettingsApi for HttpApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_settings(&self) -> Result<CampaignSettings, Error> {
        self.get("/api/settings").await
    }

    #[tracing::instrument(skip(self, settings))]
    async fn replace_settings(&self, settings: &CampaignSettings) -> Result<CampaignSettings, Error> {
        let body = self.send_json(Method::PUT, "/api/settings", settings).await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
