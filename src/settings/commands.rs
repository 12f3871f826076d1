use chrono::Utc;
use clap::Subcommand;

use crate::backend::Backend;
use crate::campaign::{days_remaining, format_cadence_list};
use crate::error::Error;
use crate::notify::Notifications;
use crate::output::{fields_table, OutputFormat};

use super::{extend_campaign, CampaignSettings};

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the backend's campaign settings
    Show,
    /// Push the campaign end date out
    Extend {
        /// Days to add; defaults to the configured auto-extend period
        #[arg(long)]
        days: Option<u32>,
    },
}

fn settings_rows(settings: &CampaignSettings) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Max call attempts".to_owned(), settings.max_call_attempts.to_string()),
        ("Stop on".to_owned(), settings.stop_call_outcomes.join(", ")),
        (
            "Medicare email cadence".to_owned(),
            format_cadence_list(&settings.medicare_email_cadence_days),
        ),
        (
            "Non-Medicare email cadence".to_owned(),
            format_cadence_list(&settings.nonmedicare_email_cadence_days),
        ),
    ];
    if let Some(end) = settings.campaign_end_date {
        rows.push(("End date".to_owned(), end.to_string()));
        rows.push((
            "  days remaining".to_owned(),
            days_remaining(end, Utc::now()).to_string(),
        ));
    }
    if let Some(days) = settings.auto_extend_days {
        rows.push(("Auto-extend days".to_owned(), days.to_string()));
    }
    for (key, value) in &settings.extra {
        let value = match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        rows.push((key.clone(), value));
    }
    rows
}

pub async fn run(
    command: SettingsCommand,
    backend: &dyn Backend,
    format: OutputFormat,
    notifications: &mut Notifications,
) -> Result<(), Error> {
    let settings = match command {
        SettingsCommand::Show => match backend.settings().fetch_settings().await {
            Ok(settings) => settings,
            Err(err) => {
                notifications.failure(&err, "Failed to load settings", "Error loading settings");
                return Err(err);
            }
        },
        SettingsCommand::Extend { days } => {
            match extend_campaign(backend, days, Utc::now().date_naive()).await {
                Ok(settings) => {
                    if let Some(end) = settings.campaign_end_date {
                        notifications.success(format!("Campaign extended to {}", end));
                    }
                    settings
                }
                Err(err) => {
                    if err.is_network_or_server() {
                        notifications.failure(
                            &err,
                            "Failed to extend campaign",
                            "Error extending campaign",
                        );
                    }
                    return Err(err);
                }
            }
        }
    };

    format.print(&settings, |settings| fields_table(settings_rows(settings)))
}
