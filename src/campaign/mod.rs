use std::collections::BTreeSet;
use std::fmt::{self, Display};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod api;
pub mod commands;
pub mod fields;
pub mod limits;
pub mod page;
pub mod schedule;

pub use fields::{clamp_attempts, format_cadence_list, parse_cadence_list};
pub use limits::RangeViolation;
pub use schedule::{days_remaining, extend_end_date, BusinessHours};

pub type CampaignId = TypedId<CampaignConfig>;

/// Fallbacks applied when a numeric field is given text that isn't a number.
pub const DEFAULT_MAX_EMAIL_ATTEMPTS: i32 = 6;
pub const DEFAULT_MAX_CALL_ATTEMPTS: i32 = 6;
pub const DEFAULT_MAX_DAILY_EMAILS: i32 = 1;
pub const DEFAULT_MAX_DAILY_CALLS: i32 = 1;
pub const DEFAULT_MIN_HOURS_BETWEEN_CONTACTS: i32 = 24;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CampaignConfig {
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    pub status: CampaignStatus,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub campaign_type: String,
    pub medicare_settings: MedicareSettings,
    pub non_medicare_call_settings: NonMedicareCallSettings,
    pub non_medicare_email_settings: NonMedicareEmailSettings,
    #[serde(flatten)]
    pub anti_spam: AntiSpamSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<BusinessHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_extend_days: Option<i32>,
}

impl TypedIdMarker for CampaignConfig {
    fn tag() -> &'static str {
        "CPN"
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Paused,
}

impl CampaignStatus {
    pub fn is_active(self) -> bool {
        self == CampaignStatus::Active
    }
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Active => f.write_str("ACTIVE"),
            CampaignStatus::Paused => f.write_str("PAUSED"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MedicareSettings {
    pub enabled: bool,
    pub max_email_attempts: i32,
    pub email_cadence_days: Vec<u32>,
    #[serde(default)]
    pub email_templates: Vec<String>,
}

impl MedicareSettings {
    pub fn apply_max_email_attempts(&mut self, raw: &str) {
        self.max_email_attempts = clamp_attempts(raw, DEFAULT_MAX_EMAIL_ATTEMPTS);
    }

    pub fn apply_email_cadence(&mut self, raw: &str) {
        self.email_cadence_days = parse_cadence_list(raw);
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NonMedicareCallSettings {
    pub enabled: bool,
    pub max_call_attempts: i32,
    pub call_cadence_days: Vec<u32>,
    #[serde(default)]
    pub stop_conditions: BTreeSet<String>,
}

impl NonMedicareCallSettings {
    pub fn apply_max_call_attempts(&mut self, raw: &str) {
        self.max_call_attempts = clamp_attempts(raw, DEFAULT_MAX_CALL_ATTEMPTS);
    }

    pub fn apply_call_cadence(&mut self, raw: &str) {
        self.call_cadence_days = parse_cadence_list(raw);
    }

    pub fn apply_stop_conditions(&mut self, raw: &str) {
        self.stop_conditions = fields::parse_label_set(raw);
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NonMedicareEmailSettings {
    pub enabled: bool,
    pub max_email_attempts: i32,
    pub email_cadence_days: Vec<u32>,
}

impl NonMedicareEmailSettings {
    pub fn apply_max_email_attempts(&mut self, raw: &str) {
        self.max_email_attempts = clamp_attempts(raw, DEFAULT_MAX_EMAIL_ATTEMPTS);
    }

    pub fn apply_email_cadence(&mut self, raw: &str) {
        self.email_cadence_days = parse_cadence_list(raw);
    }
}

/// Per-client contact caps. These sit at the top level of the backend's
/// config object, so the block is flattened when (de)serialized.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AntiSpamSettings {
    pub max_daily_emails_per_client: i32,
    pub max_daily_calls_per_client: i32,
    pub min_hours_between_contacts: i32,
}

impl AntiSpamSettings {
    pub fn apply_max_daily_emails(&mut self, raw: &str) {
        self.max_daily_emails_per_client = clamp_attempts(raw, DEFAULT_MAX_DAILY_EMAILS);
    }

    pub fn apply_max_daily_calls(&mut self, raw: &str) {
        self.max_daily_calls_per_client = clamp_attempts(raw, DEFAULT_MAX_DAILY_CALLS);
    }

    pub fn apply_min_hours_between_contacts(&mut self, raw: &str) {
        self.min_hours_between_contacts = clamp_attempts(raw, DEFAULT_MIN_HOURS_BETWEEN_CONTACTS);
    }
}

impl Default for AntiSpamSettings {
    fn default() -> AntiSpamSettings {
        AntiSpamSettings {
            max_daily_emails_per_client: DEFAULT_MAX_DAILY_EMAILS,
            max_daily_calls_per_client: DEFAULT_MAX_DAILY_CALLS,
            min_hours_between_contacts: DEFAULT_MIN_HOURS_BETWEEN_CONTACTS,
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub fn sample_config() -> CampaignConfig {
        CampaignConfig {
            campaign_id: Some("cmp_2024_q1".parse().unwrap()),
            status: CampaignStatus::Paused,
            campaign_name: "Q1 Outreach".into(),
            campaign_type: "mixed".into(),
            medicare_settings: MedicareSettings {
                enabled: true,
                max_email_attempts: 6,
                email_cadence_days: vec![0, 2, 4, 7, 10, 14],
                email_templates: vec!["intro".into(), "follow_up".into()],
            },
            non_medicare_call_settings: NonMedicareCallSettings {
                enabled: true,
                max_call_attempts: 3,
                call_cadence_days: vec![0, 2, 4],
                stop_conditions: ["interested", "dnc_requested"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            non_medicare_email_settings: NonMedicareEmailSettings {
                enabled: false,
                max_email_attempts: 6,
                email_cadence_days: vec![0, 3, 7],
            },
            anti_spam: AntiSpamSettings {
                max_daily_emails_per_client: 1,
                max_daily_calls_per_client: 2,
                min_hours_between_contacts: 24,
            },
            batch_size: Some(50),
            business_hours: None,
            campaign_end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
            auto_extend_days: Some(30),
        }
    }

    #[test]
    fn anti_spam_limits_are_top_level_on_the_wire() {
        let json = serde_json::to_value(sample_config()).unwrap();
        assert_eq!(json["max_daily_calls_per_client"], 2);
        assert_eq!(json["min_hours_between_contacts"], 24);
        assert!(json.get("anti_spam").is_none());
        assert_eq!(json["campaign_end_date"], "2024-03-31");
    }

    #[test]
    fn parses_backend_config_without_optional_blocks() {
        let config: CampaignConfig = serde_json::from_value(serde_json::json!({
            "campaign_id": "cmp_1",
            "status": "active",
            "campaign_name": "Spring",
            "campaign_type": "medicare",
            "medicare_settings": {
                "enabled": true,
                "max_email_attempts": 6,
                "email_cadence_days": [0, 2, 4],
                "email_templates": []
            },
            "non_medicare_call_settings": {
                "enabled": false,
                "max_call_attempts": 6,
                "call_cadence_days": [0, 2],
                "stop_conditions": ["interested", "not_interested"]
            },
            "non_medicare_email_settings": {
                "enabled": true,
                "max_email_attempts": 4,
                "email_cadence_days": [1]
            },
            "max_daily_emails_per_client": 1,
            "max_daily_calls_per_client": 1,
            "min_hours_between_contacts": 48,
            "batch_size": 100
        }))
        .unwrap();

        assert!(config.status.is_active());
        assert_eq!(config.anti_spam.min_hours_between_contacts, 48);
        assert_eq!(config.batch_size, Some(100));
        assert_eq!(config.business_hours, None);
        assert_eq!(config.campaign_end_date, None);
        assert!(config
            .non_medicare_call_settings
            .stop_conditions
            .contains("not_interested"));
    }

    #[test]
    fn text_input_falls_back_without_clamping() {
        let mut config = sample_config();

        config.non_medicare_call_settings.apply_max_call_attempts("abc");
        assert_eq!(config.non_medicare_call_settings.max_call_attempts, 6);

        config.non_medicare_call_settings.apply_max_call_attempts("42");
        assert_eq!(config.non_medicare_call_settings.max_call_attempts, 42);

        config.anti_spam.apply_min_hours_between_contacts("");
        assert_eq!(config.anti_spam.min_hours_between_contacts, 24);

        config.medicare_settings.apply_email_cadence("0, 1, x, 5,");
        assert_eq!(config.medicare_settings.email_cadence_days, vec![0, 1, 5]);
    }
}
