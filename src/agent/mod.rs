use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod api;
pub mod commands;
pub mod page;
pub mod working_hours;

pub use working_hours::{format_working_hours, parse_working_hours, TimeToken, WorkingHours};

pub type AgentId = TypedId<Agent>;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Zones offered when creating an agent, with their display names. Other
/// IANA zones are accepted as well.
pub const TIMEZONE_OPTIONS: [(&str, &str); 4] = [
    ("America/Denver", "Mountain Time (MT)"),
    ("America/New_York", "Eastern Time (ET)"),
    ("America/Chicago", "Central Time (CT)"),
    ("America/Los_Angeles", "Pacific Time (PT)"),
];

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    #[serde(default)]
    pub agent_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub google_calendar_id: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub working_hours: Option<String>,
    #[serde(default)]
    pub tag_identifier: Option<String>,
    #[serde(default)]
    pub client_count: u32,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Agent {
    pub fn working_hours(&self) -> WorkingHours {
        parse_working_hours(self.working_hours.as_deref())
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.name.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }
}

impl TypedIdMarker for Agent {
    fn tag() -> &'static str {
        "AGT"
    }
}

/// What the create and edit forms collect. Working hours are picked as two
/// tokens and only joined when submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub google_calendar_id: String,
    pub timezone: Tz,
    pub start_time: TimeToken,
    pub end_time: TimeToken,
    pub is_active: bool,
}

impl AgentForm {
    pub fn from_agent(agent: &Agent) -> AgentForm {
        let hours = agent.working_hours();
        AgentForm {
            name: agent.name.clone(),
            email: agent.email.clone(),
            phone: agent.phone.clone().unwrap_or_default(),
            google_calendar_id: agent.google_calendar_id.clone(),
            timezone: agent.timezone.parse().unwrap_or(chrono_tz::America::New_York),
            start_time: hours.start,
            end_time: hours.end,
            is_active: agent.is_active,
        }
    }

    pub fn to_body(&self) -> AgentBody {
        let google_calendar_id = if self.google_calendar_id.trim().is_empty() {
            self.email.clone()
        } else {
            self.google_calendar_id.clone()
        };

        AgentBody {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            google_calendar_id,
            timezone: self.timezone.name().to_owned(),
            working_hours: format_working_hours(self.start_time, self.end_time),
            is_active: self.is_active,
        }
    }
}

impl Default for AgentForm {
    fn default() -> AgentForm {
        let hours = WorkingHours::default();
        AgentForm {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            google_calendar_id: String::new(),
            timezone: chrono_tz::America::New_York,
            start_time: hours.start,
            end_time: hours.end,
            is_active: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AgentBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub google_calendar_id: String,
    pub timezone: String,
    pub working_hours: String,
    pub is_active: bool,
}
