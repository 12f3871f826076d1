use chrono_tz::Tz;
use clap::{Args, Subcommand};
use tabled::Tabled;

use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;
use crate::output::{or_dash, yes_no, OutputFormat};

use super::page::AgentsPage;
use super::{Agent, AgentForm, AgentId, TimeToken, TIMEZONE_OPTIONS};

#[derive(Debug, Subcommand)]
pub enum AgentCommand {
    /// List agents
    List {
        /// Only agents whose name or email contains this
        #[arg(long)]
        search: Option<String>,
    },
    /// Create an agent
    Add(AgentArgs),
    /// Change an existing agent; omitted fields keep their current value
    Edit {
        id: AgentId,
        #[command(flatten)]
        changes: AgentChanges,
    },
    /// Deactivate an agent
    Deactivate {
        id: AgentId,
        #[arg(long)]
        yes: bool,
    },
    /// List the suggested timezones
    Timezones,
}

#[derive(Debug, Args)]
pub struct AgentArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Defaults to the agent's email
    #[arg(long)]
    pub calendar_id: Option<String>,
    #[arg(long, value_parser = parse_timezone, default_value = super::DEFAULT_TIMEZONE)]
    pub timezone: Tz,
    /// First bookable hour, 8AM through 6PM
    #[arg(long, default_value = "9AM")]
    pub start: TimeToken,
    #[arg(long, default_value = "5PM")]
    pub end: TimeToken,
    /// Create the agent deactivated
    #[arg(long)]
    pub inactive: bool,
}

impl AgentArgs {
    fn into_form(self) -> AgentForm {
        AgentForm {
            name: self.name,
            email: self.email,
            phone: self.phone,
            google_calendar_id: self.calendar_id.unwrap_or_default(),
            timezone: self.timezone,
            start_time: self.start,
            end_time: self.end,
            is_active: !self.inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct AgentChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub calendar_id: Option<String>,
    #[arg(long, value_parser = parse_timezone)]
    pub timezone: Option<Tz>,
    #[arg(long)]
    pub start: Option<TimeToken>,
    #[arg(long)]
    pub end: Option<TimeToken>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl AgentChanges {
    fn apply(self, form: &mut AgentForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(phone) = self.phone {
            form.phone = phone;
        }
        if let Some(calendar_id) = self.calendar_id {
            form.google_calendar_id = calendar_id;
        }
        if let Some(timezone) = self.timezone {
            form.timezone = timezone;
        }
        if let Some(start) = self.start {
            form.start_time = start;
        }
        if let Some(end) = self.end {
            form.end_time = end;
        }
        if let Some(active) = self.active {
            form.is_active = active;
        }
    }
}

fn parse_timezone(raw: &str) -> Result<Tz, String> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|_| format!("unknown timezone '{}'", raw))
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Timezone")]
    timezone: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Clients")]
    clients: u32,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Agent> for AgentRow {
    fn from(agent: &Agent) -> AgentRow {
        AgentRow {
            id: agent.id.to_string(),
            name: agent.name.clone(),
            email: agent.email.clone(),
            phone: or_dash(agent.phone.as_deref()),
            timezone: agent.timezone.clone(),
            hours: agent.working_hours().to_string(),
            clients: agent.client_count,
            active: yes_no(agent.is_active),
        }
    }
}

#[derive(Tabled)]
struct TimezoneRow {
    #[tabled(rename = "Zone")]
    zone: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
}

pub async fn run(
    command: AgentCommand,
    backend: &dyn Backend,
    format: OutputFormat,
    notifications: &mut Notifications,
) -> Result<(), Error> {
    let mut page = AgentsPage::new();
    let result = on_page(&mut page, command, backend, format).await;
    notifications.take_from(page.notifications_mut());
    result
}

async fn on_page(
    page: &mut AgentsPage,
    command: AgentCommand,
    backend: &dyn Backend,
    format: OutputFormat,
) -> Result<(), Error> {
    match command {
        AgentCommand::List { search } => {
            page.load(backend).await?;
            page.set_search(search.unwrap_or_default());
            let agents = page.filtered();
            let rows: Vec<AgentRow> = agents.iter().map(|agent| AgentRow::from(*agent)).collect();
            format.print_rows(&agents, rows)?;
        }
        AgentCommand::Add(args) => {
            page.save(backend, &args.into_form(), None).await?;
        }
        AgentCommand::Edit { id, changes } => {
            page.load(backend).await?;
            let mut form = AgentForm::from_agent(page.find(&id)?);
            changes.apply(&mut form);
            page.save(backend, &form, Some(&id)).await?;
        }
        AgentCommand::Deactivate { id, yes } => {
            page.load(backend).await?;
            page.deactivate(backend, &id, yes).await?;
        }
        AgentCommand::Timezones => {
            let rows: Vec<TimezoneRow> = TIMEZONE_OPTIONS
                .iter()
                .map(|&(zone, name)| TimezoneRow { zone, name })
                .collect();
            let zones: Vec<_> = TIMEZONE_OPTIONS.iter().map(|(zone, _)| *zone).collect();
            format.print_rows(&zones, rows)?;
        }
    }

    Ok(())
}
