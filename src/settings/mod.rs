//! The flat settings object served at `/api/settings`.
//!
//! Unlike the per-channel campaign configuration this is read and written as
//! a whole, so every key the backend sends is kept and sent back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::backend::Backend;
use crate::campaign::{extend_end_date, limits};
use crate::error::Error;

pub mod api;
pub mod commands;

/// Used when neither a day count nor `auto_extend_days` is available.
pub const DEFAULT_EXTEND_DAYS: u32 = 30;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CampaignSettings {
    #[serde(default = "default_max_call_attempts")]
    pub max_call_attempts: i32,
    #[serde(default = "default_stop_call_outcomes")]
    pub stop_call_outcomes: Vec<String>,
    #[serde(default = "default_cadence")]
    pub medicare_email_cadence_days: Vec<u32>,
    #[serde(default = "default_cadence")]
    pub nonmedicare_email_cadence_days: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_extend_days: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_max_call_attempts() -> i32 {
    6
}

fn default_stop_call_outcomes() -> Vec<String> {
    vec![
        "interested".to_owned(),
        "not_interested".to_owned(),
        "dnc_requested".to_owned(),
    ]
}

fn default_cadence() -> Vec<u32> {
    vec![0, 3, 7, 14]
}

impl Default for CampaignSettings {
    fn default() -> CampaignSettings {
        CampaignSettings {
            max_call_attempts: default_max_call_attempts(),
            stop_call_outcomes: default_stop_call_outcomes(),
            medicare_email_cadence_days: default_cadence(),
            nonmedicare_email_cadence_days: default_cadence(),
            campaign_end_date: None,
            auto_extend_days: None,
            extra: Map::new(),
        }
    }
}

impl CampaignSettings {
    pub fn extension_days(&self) -> u32 {
        self.auto_extend_days
            .and_then(|days| u32::try_from(days).ok())
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_EXTEND_DAYS)
    }

    /// Moves the end date `days` later. A campaign without an end date is
    /// extended from `today`.
    pub fn extend(&mut self, days: u32, today: NaiveDate) -> NaiveDate {
        let end_date = extend_end_date(self.campaign_end_date.unwrap_or(today), days);
        self.campaign_end_date = Some(end_date);
        end_date
    }
}

#[tracing::instrument(skip(backend))]
pub async fn extend_campaign(
    backend: &dyn Backend,
    days: Option<u32>,
    today: NaiveDate,
) -> Result<CampaignSettings, Error> {
    if let Some(days) = days {
        let days = i32::try_from(days).unwrap_or(i32::MAX);
        limits::check("days", days, limits::AUTO_EXTEND_DAYS)?;
    }

    let mut settings = backend.settings().fetch_settings().await?;
    let days = days.unwrap_or_else(|| settings.extension_days());
    let end_date = settings.extend(days, today);
    info!(%end_date, days, "extending campaign");

    backend.settings().replace_settings(&settings).await
}
