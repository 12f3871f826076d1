use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Error;

#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Error,
}

#[derive(Clone, Debug, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Transient messages a page raises after an action. They are shown once and
/// never drive any state.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Notifications {
        Notifications::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.push(Level::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.push(Level::Error, message);
    }

    /// Reports a failed request. A rejection by the backend shows its
    /// `detail` when it sent one, or `rejected` otherwise; a request that
    /// never got an answer shows `unreachable`.
    pub fn failure(&mut self, error: &Error, rejected: &str, unreachable: &str) {
        warn!(error_code = error.error_code(), "{}", error);
        let message = match error {
            Error::UnexpectedStatus { detail, .. } => {
                detail.clone().unwrap_or_else(|| rejected.to_owned())
            }
            _ => unreachable.to_owned(),
        };
        self.push(Level::Error, message);
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }

    pub fn take_from(&mut self, other: &mut Notifications) {
        self.entries.append(&mut other.entries);
    }

    fn push(&mut self, level: Level, message: String) {
        self.entries.push(Notification {
            level,
            message,
            created_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_backend_detail() {
        let mut notifications = Notifications::new();
        let error = Error::UnexpectedStatus {
            status: 400,
            detail: Some("Email already in use".into()),
        };

        notifications.failure(&error, "Failed to create agent", "Error creating agent");

        let latest = notifications.latest().unwrap();
        assert_eq!(latest.level, Level::Error);
        assert_eq!(latest.message, "Email already in use");
    }

    #[test]
    fn rejection_without_detail_uses_fallback() {
        let mut notifications = Notifications::new();
        let error = Error::UnexpectedStatus {
            status: 500,
            detail: None,
        };

        notifications.failure(&error, "Failed to start campaign", "Error starting campaign");

        assert_eq!(notifications.latest().unwrap().message, "Failed to start campaign");
    }

    #[test]
    fn unparseable_response_counts_as_unreachable() {
        let mut notifications = Notifications::new();
        let error = Error::InvalidResponse(serde_json::from_str::<u8>("{").unwrap_err());

        notifications.failure(&error, "Failed to load agents", "Error loading agents");

        assert_eq!(notifications.latest().unwrap().message, "Error loading agents");
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut notifications = Notifications::new();
        notifications.success("Medicare settings saved!");
        notifications.error("Select a file first");

        let drained = notifications.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, Level::Success);
        assert!(notifications.is_empty());
    }

    #[test]
    fn take_from_keeps_order() {
        let mut sink = Notifications::new();
        sink.success("first");
        let mut page = Notifications::new();
        page.error("second");

        sink.take_from(&mut page);

        let messages: Vec<_> = sink.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(page.is_empty());
    }
}
