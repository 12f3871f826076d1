use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;
use crate::output::{fields_table, or_dash, rows_table, OutputFormat};

use super::page::DashboardPage;
use super::{ActiveCall, CallLog, CampaignStats, ChannelProgress, DEFAULT_LOG_LIMIT};

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// How many recent calls to show
    #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
    pub logs: u32,
    #[command(subcommand)]
    pub command: Option<DashboardCommand>,
}

#[derive(Debug, Subcommand)]
pub enum DashboardCommand {
    /// Calls in progress right now
    Calls,
    /// Per channel campaign progress
    Progress,
    /// Run the campaign processor
    Trigger,
}

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Started")]
    started_at: String,
    #[tabled(rename = "Attempts left")]
    attempts_left: String,
}

impl From<&CallLog> for LogRow {
    fn from(log: &CallLog) -> LogRow {
        LogRow {
            client: log.client_name.clone(),
            phone: log.client_phone.clone(),
            outcome: log.outcome().to_string(),
            duration: log.duration.clone(),
            started_at: log.started_at.clone(),
            attempts_left: log
                .attempts_left
                .map(|left| left.to_string())
                .unwrap_or_else(|| "-".to_owned()),
        }
    }
}

#[derive(Tabled)]
struct CallRow {
    #[tabled(rename = "Call")]
    call_sid: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Turns")]
    turns: u32,
    #[tabled(rename = "Started")]
    started_at: String,
}

impl From<&ActiveCall> for CallRow {
    fn from(call: &ActiveCall) -> CallRow {
        CallRow {
            call_sid: or_dash(call.call_sid.as_deref()),
            client: or_dash(call.client_name.as_deref()),
            status: call.status().to_owned(),
            turns: call.turns(),
            started_at: or_dash(call.started_at.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Channel")]
    channel: &'static str,
    #[tabled(rename = "Total")]
    total: u64,
    #[tabled(rename = "Pending")]
    pending: u64,
    #[tabled(rename = "In progress")]
    in_progress: u64,
    #[tabled(rename = "Completed")]
    completed: u64,
    #[tabled(rename = "Interested")]
    interested: u64,
    #[tabled(rename = "DNC")]
    dnc: u64,
    #[tabled(rename = "Unsubscribed")]
    unsubscribed: u64,
}

impl ProgressRow {
    fn new(channel: &'static str, progress: ChannelProgress) -> ProgressRow {
        ProgressRow {
            channel,
            total: progress.total,
            pending: progress.pending,
            in_progress: progress.in_progress,
            completed: progress.completed,
            interested: progress.interested_count,
            dnc: progress.dnc_count,
            unsubscribed: progress.unsubscribed_count,
        }
    }
}

fn stats_rows(stats: &CampaignStats) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Total clients".to_owned(), format!("{} ({} pending)", stats.total_clients, stats.pending_clients)),
        ("Completed calls".to_owned(), stats.completed_calls.to_string()),
        ("Completion rate".to_owned(), format!("{:.1}%", stats.completion_rate)),
        ("Interested".to_owned(), stats.interested_clients.to_string()),
        ("Interest rate".to_owned(), format!("{:.1}%", stats.interest_rate)),
        ("Not interested".to_owned(), stats.not_interested_clients.to_string()),
        ("DNC requests".to_owned(), stats.dnc_requests.to_string()),
        ("No answer".to_owned(), stats.no_answer_clients.to_string()),
    ];
    for (outcome, count) in &stats.real_outcomes {
        rows.push((format!("  {}", outcome.replace('_', " ")), count.to_string()));
    }
    if let Some(calls) = &stats.call_status_breakdown {
        rows.push(("Calls made".to_owned(), calls.total_calls_made.to_string()));
        rows.push(("  answered".to_owned(), calls.calls_answered.to_string()));
        rows.push(("  voicemail".to_owned(), calls.voicemail.to_string()));
        rows.push(("  busy".to_owned(), calls.busy.to_string()));
        rows.push(("  failed".to_owned(), calls.failed.to_string()));
        rows.push(("  no contact".to_owned(), calls.no_contact.to_string()));
    }
    if let Some(outcomes) = &stats.conversation_outcomes_breakdown {
        rows.push(("Answered calls".to_owned(), String::new()));
        rows.push(("  interested".to_owned(), outcomes.interested_yes_no.to_string()));
        rows.push(("  scheduled".to_owned(), outcomes.schedule_invite_yes_yes.to_string()));
        rows.push(("  not interested".to_owned(), outcomes.not_interested_no.to_string()));
        rows.push(("  DNC requested".to_owned(), outcomes.dnc_requested_no_no.to_string()));
        rows.push(("  keep in touch".to_owned(), outcomes.keep_communications_no_yes.to_string()));
        rows.push(("  voicemail".to_owned(), outcomes.voicemail.to_string()));
        rows.push(("  no outcome".to_owned(), outcomes.no_outcome.to_string()));
    }
    rows
}

#[derive(Serialize)]
struct Overview<'a> {
    stats: Option<&'a CampaignStats>,
    call_logs: &'a [CallLog],
}

pub async fn run(
    args: DashboardArgs,
    backend: &dyn Backend,
    format: OutputFormat,
    notifications: &mut Notifications,
) -> Result<(), Error> {
    let mut page = DashboardPage::new();
    let result = on_page(&mut page, args, backend, format).await;
    notifications.take_from(page.notifications_mut());
    result
}

async fn on_page(
    page: &mut DashboardPage,
    args: DashboardArgs,
    backend: &dyn Backend,
    format: OutputFormat,
) -> Result<(), Error> {
    match args.command {
        None => {
            page.refresh(backend, args.logs).await?;
            let overview = Overview {
                stats: page.stats(),
                call_logs: page.call_logs(),
            };
            format.print(&overview, |overview| {
                let stats = fields_table(overview.stats.map(stats_rows).unwrap_or_default());
                let logs: Vec<LogRow> = overview.call_logs.iter().map(LogRow::from).collect();
                if logs.is_empty() {
                    return stats.to_string();
                }
                format!("{}\n\nRecent calls\n{}", stats, rows_table(logs))
            })?;
        }
        Some(DashboardCommand::Calls) => {
            page.load_active_calls(backend).await?;
            let rows: Vec<CallRow> = page.active_calls().iter().map(CallRow::from).collect();
            format.print_rows(page.active_calls(), rows)?;
        }
        Some(DashboardCommand::Progress) => {
            page.load_progress(backend).await?;
            print_progress(page, format)?;
        }
        Some(DashboardCommand::Trigger) => {
            page.trigger_processor(backend).await?;
            print_progress(page, format)?;
        }
    }

    Ok(())
}

fn print_progress(page: &DashboardPage, format: OutputFormat) -> Result<(), Error> {
    let progress = page.progress().cloned().unwrap_or_default();
    let rows: Vec<ProgressRow> = progress
        .channels()
        .into_iter()
        .map(|(channel, progress)| ProgressRow::new(channel, progress))
        .collect();
    format.print_rows(&progress, rows)
}
