use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::nullable::null_as_default;

pub mod api;
pub mod commands;
pub mod page;

pub const DEFAULT_LOG_LIMIT: u32 = 10;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CampaignStats {
    #[serde(deserialize_with = "null_as_default")]
    pub total_clients: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub completed_calls: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub interested_clients: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub not_interested_clients: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub dnc_requests: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub no_answer_clients: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_clients: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub completion_rate: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub interest_rate: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub real_outcomes: BTreeMap<String, u64>,
    pub last_updated: Option<String>,
    pub total_conversations: Option<u64>,
    pub avg_call_duration: Option<f64>,
    pub call_status_breakdown: Option<CallStatusBreakdown>,
    pub conversation_outcomes_breakdown: Option<ConversationOutcomes>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CallStatusBreakdown {
    #[serde(deserialize_with = "null_as_default")]
    pub total_calls_made: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub calls_answered: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub voicemail: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub busy: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub failed: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub no_contact: u64,
}

/// How answered calls ended, keyed by the client's answers to the
/// interest and follow-up questions.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConversationOutcomes {
    #[serde(deserialize_with = "null_as_default")]
    pub interested_yes_no: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub schedule_invite_yes_yes: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub not_interested_no: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub dnc_requested_no_no: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub keep_communications_no_yes: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub voicemail: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub no_outcome: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CallLog {
    #[serde(deserialize_with = "null_as_default")]
    pub call_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_phone: String,
    pub client_email: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub outcome: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub started_at: String,
    pub is_test_call: Option<bool>,
    pub total_attempts: Option<u32>,
    pub attempts_left: Option<u32>,
    pub next_call_scheduled: Option<String>,
    pub agent_assigned: Option<String>,
    pub outreach_method: Option<String>,
    pub client_type: Option<String>,
}

impl CallLog {
    pub fn outcome(&self) -> Outcome {
        Outcome::from(self.outcome.as_str())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ActiveCall {
    pub call_sid: Option<String>,
    pub client_name: Option<String>,
    pub status: Option<String>,
    pub call_status: Option<String>,
    pub conversation_turns: Option<u32>,
    pub turns: Option<u32>,
    pub started_at: Option<String>,
    pub outreach_method: Option<String>,
    pub client_type: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
}

impl ActiveCall {
    /// Older backends report `call_status` and `turns` instead.
    pub fn status(&self) -> &str {
        self.status
            .as_deref()
            .or(self.call_status.as_deref())
            .unwrap_or("in_progress")
    }

    pub fn turns(&self) -> u32 {
        self.conversation_turns.or(self.turns).unwrap_or(0)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChannelProgress {
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pending: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub in_progress: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub interested_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub dnc_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub unsubscribed_count: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CampaignProgress {
    pub medicare: Option<ChannelProgress>,
    pub non_medicare_calls: Option<ChannelProgress>,
    pub non_medicare_emails: Option<ChannelProgress>,
}

impl CampaignProgress {
    pub fn channels(&self) -> Vec<(&'static str, ChannelProgress)> {
        let mut channels = vec![
            ("Medicare", self.medicare.clone().unwrap_or_default()),
            (
                "Non-Medicare calls",
                self.non_medicare_calls.clone().unwrap_or_default(),
            ),
        ];
        if let Some(emails) = self.non_medicare_emails.as_ref().filter(|e| e.total > 0) {
            channels.push(("Non-Medicare emails", emails.clone()));
        }
        channels
    }
}

/// Call outcomes as they are highlighted; labels the backend may add later
/// fall into `Other`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Interested,
    NotInterested,
    DncRequested,
    NoAnswer,
    Other(String),
}

impl From<&str> for Outcome {
    fn from(raw: &str) -> Outcome {
        match raw {
            "interested" => Outcome::Interested,
            "not_interested" => Outcome::NotInterested,
            "dnc_requested" => Outcome::DncRequested,
            "no_answer" => Outcome::NoAnswer,
            other => Outcome::Other(other.to_owned()),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Interested => f.write_str("interested"),
            Outcome::NotInterested => f.write_str("not interested"),
            Outcome::DncRequested => f.write_str("DNC requested"),
            Outcome::NoAnswer => f.write_str("no answer"),
            Outcome::Other(raw) => f.write_str(&raw.replace('_', " ")),
        }
    }
}
