use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;
use crate::output::{fields_table, or_dash, yes_no, OutputFormat};

use super::fields::format_label_set;
use super::page::SettingsPage;
use super::{
    clamp_attempts, days_remaining, extend_end_date, format_cadence_list, CampaignConfig,
    DEFAULT_MAX_CALL_ATTEMPTS, DEFAULT_MAX_DAILY_CALLS, DEFAULT_MAX_DAILY_EMAILS,
    DEFAULT_MAX_EMAIL_ATTEMPTS, DEFAULT_MIN_HOURS_BETWEEN_CONTACTS,
};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the campaign configuration
    Show,
    /// Edit the Medicare email campaign
    Medicare(EmailChannelArgs),
    /// Edit non-Medicare voice calls
    Calls(CallChannelArgs),
    /// Edit the non-Medicare email fallback
    Emails(EmailChannelArgs),
    /// Edit per-client contact limits
    AntiSpam(AntiSpamArgs),
}

#[derive(Debug, Args)]
pub struct EmailChannelArgs {
    #[arg(long)]
    pub enabled: Option<bool>,
    /// Maximum email attempts; text that isn't a number resets to the default
    #[arg(long)]
    pub max_attempts: Option<String>,
    /// Comma separated day offsets, e.g. "0, 3, 7, 14"
    #[arg(long)]
    pub cadence: Option<String>,
    /// Refuse values outside their allowed range instead of sending them
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct CallChannelArgs {
    #[arg(long)]
    pub enabled: Option<bool>,
    #[arg(long)]
    pub max_attempts: Option<String>,
    #[arg(long)]
    pub cadence: Option<String>,
    /// Comma separated outcomes that end outreach to a client
    #[arg(long)]
    pub stop_conditions: Option<String>,
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct AntiSpamArgs {
    #[arg(long)]
    pub max_daily_emails: Option<String>,
    #[arg(long)]
    pub max_daily_calls: Option<String>,
    #[arg(long)]
    pub min_hours: Option<String>,
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Subcommand)]
pub enum CampaignCommand {
    /// Show whether the campaign is running
    Status,
    /// Start the campaign
    Start,
    /// Pause every channel of the campaign
    Stop {
        /// Confirm pausing; no client is contacted until started again
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Serialize)]
struct ConfigSummary<'a> {
    #[serde(flatten)]
    config: &'a CampaignConfig,
    days_remaining: Option<i64>,
    auto_extended_end_date: Option<NaiveDate>,
    within_business_hours: Option<bool>,
}

impl<'a> ConfigSummary<'a> {
    fn new(config: &'a CampaignConfig, now: DateTime<Utc>) -> ConfigSummary<'a> {
        let extension = config
            .auto_extend_days
            .and_then(|days| u32::try_from(days).ok());
        ConfigSummary {
            config,
            days_remaining: config.campaign_end_date.map(|end| days_remaining(end, now)),
            auto_extended_end_date: config
                .campaign_end_date
                .zip(extension)
                .map(|(end, days)| extend_end_date(end, days)),
            within_business_hours: config.business_hours.as_ref().map(|hours| hours.contains(now)),
        }
    }

    fn rows(&self) -> Vec<(String, String)> {
        let config = self.config;
        let medicare = &config.medicare_settings;
        let calls = &config.non_medicare_call_settings;
        let emails = &config.non_medicare_email_settings;
        let anti_spam = &config.anti_spam;

        let mut rows = vec![
            ("Campaign".to_owned(), or_dash(Some(config.campaign_name.as_str()))),
            ("Status".to_owned(), config.status.to_string()),
            ("Medicare emails".to_owned(), yes_no(medicare.enabled)),
            ("  max attempts".to_owned(), medicare.max_email_attempts.to_string()),
            ("  cadence (days)".to_owned(), format_cadence_list(&medicare.email_cadence_days)),
            ("Non-Medicare calls".to_owned(), yes_no(calls.enabled)),
            ("  max attempts".to_owned(), calls.max_call_attempts.to_string()),
            ("  cadence (days)".to_owned(), format_cadence_list(&calls.call_cadence_days)),
            ("  stop on".to_owned(), format_label_set(&calls.stop_conditions)),
            ("Non-Medicare emails".to_owned(), yes_no(emails.enabled)),
            ("  max attempts".to_owned(), emails.max_email_attempts.to_string()),
            ("  cadence (days)".to_owned(), format_cadence_list(&emails.email_cadence_days)),
            ("Max daily emails".to_owned(), anti_spam.max_daily_emails_per_client.to_string()),
            ("Max daily calls".to_owned(), anti_spam.max_daily_calls_per_client.to_string()),
            ("Min hours between".to_owned(), anti_spam.min_hours_between_contacts.to_string()),
        ];

        if let Some(hours) = &config.business_hours {
            rows.push((
                "Business hours".to_owned(),
                format!("{}:00-{}:00 {}", hours.start_hour, hours.end_hour, hours.timezone),
            ));
        }
        if let Some(open) = self.within_business_hours {
            rows.push(("  open now".to_owned(), yes_no(open)));
        }
        if let Some(end) = config.campaign_end_date {
            rows.push(("End date".to_owned(), end.to_string()));
        }
        if let Some(days) = self.days_remaining {
            rows.push(("  days remaining".to_owned(), days.to_string()));
        }
        if let (Some(days), Some(extended)) = (config.auto_extend_days, self.auto_extended_end_date) {
            rows.push((format!("  after +{} days", days), extended.to_string()));
        }
        rows
    }
}

pub async fn run_config(
    command: ConfigCommand,
    backend: &dyn Backend,
    format: OutputFormat,
    notifications: &mut Notifications,
) -> Result<(), Error> {
    let mut page = SettingsPage::new();
    let result = config_on_page(&mut page, command, backend, format).await;
    notifications.take_from(page.notifications_mut());
    result
}

async fn config_on_page(
    page: &mut SettingsPage,
    command: ConfigCommand,
    backend: &dyn Backend,
    format: OutputFormat,
) -> Result<(), Error> {
    page.load(backend).await?;

    match command {
        ConfigCommand::Show => {
            let config = page.config().ok_or(Error::ConfigurationNotLoaded)?;
            let summary = ConfigSummary::new(config, Utc::now());
            format.print(&summary, |summary| fields_table(summary.rows()))?;
        }
        ConfigCommand::Medicare(args) => {
            let settings = &mut page.config_mut()?.medicare_settings;
            if let Some(enabled) = args.enabled {
                settings.enabled = enabled;
            }
            if let Some(raw) = &args.max_attempts {
                if args.strict {
                    settings.try_set_max_email_attempts(clamp_attempts(raw, DEFAULT_MAX_EMAIL_ATTEMPTS))?;
                } else {
                    settings.apply_max_email_attempts(raw);
                }
            }
            if let Some(raw) = &args.cadence {
                settings.apply_email_cadence(raw);
            }
            page.save_medicare(backend).await?;
        }
        ConfigCommand::Calls(args) => {
            let settings = &mut page.config_mut()?.non_medicare_call_settings;
            if let Some(enabled) = args.enabled {
                settings.enabled = enabled;
            }
            if let Some(raw) = &args.max_attempts {
                if args.strict {
                    settings.try_set_max_call_attempts(clamp_attempts(raw, DEFAULT_MAX_CALL_ATTEMPTS))?;
                } else {
                    settings.apply_max_call_attempts(raw);
                }
            }
            if let Some(raw) = &args.cadence {
                settings.apply_call_cadence(raw);
            }
            if let Some(raw) = &args.stop_conditions {
                settings.apply_stop_conditions(raw);
            }
            page.save_non_medicare_calls(backend).await?;
        }
        ConfigCommand::Emails(args) => {
            let settings = &mut page.config_mut()?.non_medicare_email_settings;
            if let Some(enabled) = args.enabled {
                settings.enabled = enabled;
            }
            if let Some(raw) = &args.max_attempts {
                if args.strict {
                    settings.try_set_max_email_attempts(clamp_attempts(raw, DEFAULT_MAX_EMAIL_ATTEMPTS))?;
                } else {
                    settings.apply_max_email_attempts(raw);
                }
            }
            if let Some(raw) = &args.cadence {
                settings.apply_email_cadence(raw);
            }
            page.save_non_medicare_emails(backend).await?;
        }
        ConfigCommand::AntiSpam(args) => {
            let settings = &mut page.config_mut()?.anti_spam;
            if let Some(raw) = &args.max_daily_emails {
                if args.strict {
                    settings.try_set_max_daily_emails(clamp_attempts(raw, DEFAULT_MAX_DAILY_EMAILS))?;
                } else {
                    settings.apply_max_daily_emails(raw);
                }
            }
            if let Some(raw) = &args.max_daily_calls {
                if args.strict {
                    settings.try_set_max_daily_calls(clamp_attempts(raw, DEFAULT_MAX_DAILY_CALLS))?;
                } else {
                    settings.apply_max_daily_calls(raw);
                }
            }
            if let Some(raw) = &args.min_hours {
                if args.strict {
                    settings.try_set_min_hours_between_contacts(clamp_attempts(
                        raw,
                        DEFAULT_MIN_HOURS_BETWEEN_CONTACTS,
                    ))?;
                } else {
                    settings.apply_min_hours_between_contacts(raw);
                }
            }
            page.save_anti_spam(backend).await?;
        }
    }

    Ok(())
}

pub async fn run_campaign(
    command: CampaignCommand,
    backend: &dyn Backend,
    format: OutputFormat,
    notifications: &mut Notifications,
) -> Result<(), Error> {
    let mut page = SettingsPage::new();
    let result = campaign_on_page(&mut page, command, backend, format).await;
    notifications.take_from(page.notifications_mut());
    result
}

async fn campaign_on_page(
    page: &mut SettingsPage,
    command: CampaignCommand,
    backend: &dyn Backend,
    format: OutputFormat,
) -> Result<(), Error> {
    match command {
        CampaignCommand::Status => page.load(backend).await?,
        CampaignCommand::Start => page.start_campaign(backend).await?,
        CampaignCommand::Stop { yes } => page.stop_campaign(backend, yes).await?,
    }

    #[derive(Serialize)]
    struct Status<'a> {
        campaign_name: &'a str,
        status: String,
    }

    let config = page.config().ok_or(Error::ConfigurationNotLoaded)?;
    let status = Status {
        campaign_name: &config.campaign_name,
        status: config.status.to_string(),
    };
    format.print(&status, |status| {
        fields_table(vec![
            ("Campaign", or_dash(Some(status.campaign_name))),
            ("Status", status.status.clone()),
        ])
    })
}
