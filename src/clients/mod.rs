use serde::{Deserialize, Serialize};

use crate::nullable::null_as_default;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod api;
pub mod commands;
pub mod page;

pub type ClientId = TypedId<ClientRow>;

pub const PAGE_SIZE: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientType {
    Medicare,
    NonMedicare,
    Other(String),
}

impl ClientType {
    pub fn as_str(&self) -> &str {
        match self {
            ClientType::Medicare => "medicare",
            ClientType::NonMedicare => "non_medicare",
            ClientType::Other(other) => other,
        }
    }
}

impl From<String> for ClientType {
    fn from(raw: String) -> ClientType {
        match raw.as_str() {
            "medicare" => ClientType::Medicare,
            "non_medicare" => ClientType::NonMedicare,
            _ => ClientType::Other(raw),
        }
    }
}

impl Serialize for ClientType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ClientType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(ClientType::from)
    }
}

impl Default for ClientType {
    fn default() -> ClientType {
        ClientType::Other(String::new())
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Call,
    Email,
}

/// One row of the paged client listing. Both listing screens of the backend
/// send a subset of these fields, and any of them may come back `null`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientRow {
    pub id: Option<ClientId>,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_type: ClientType,
    #[serde(deserialize_with = "null_as_default")]
    pub campaign_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attempts: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_attempts: u32,
    pub contact_type: Option<ContactType>,
    pub last_contacted: Option<String>,
    pub last_contact_attempt: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ClientRow {
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn last_contact(&self) -> Option<&str> {
        self.last_contacted
            .as_deref()
            .or(self.last_contact_attempt.as_deref())
    }
}

impl TypedIdMarker for ClientRow {
    fn tag() -> &'static str {
        "CLT"
    }
}

/// Filters for `GET /clients`. Unset filters are left out of the query
/// string entirely.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ClientQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Default for ClientQuery {
    fn default() -> ClientQuery {
        ClientQuery {
            page: 1,
            page_size: PAGE_SIZE,
            search: None,
            client_type: None,
            status: None,
            tag: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientPage {
    #[serde(deserialize_with = "null_as_default")]
    pub clients: Vec<ClientRow>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
    pub page: Option<u32>,
}
