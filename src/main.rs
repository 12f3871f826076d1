use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use voxdash::agent::commands::AgentCommand;
use voxdash::campaign::commands::{CampaignCommand, ConfigCommand};
use voxdash::clients::commands::ClientCommand;
use voxdash::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use voxdash::dashboard::commands::DashboardArgs;
use voxdash::notify::{Level, Notifications};
use voxdash::output::OutputFormat;
use voxdash::settings::commands::SettingsCommand;
use voxdash::{agent, campaign, clients, dashboard, settings};
use voxdash::{Backend, DashboardConfig, Error, RestBackend};

#[derive(Parser)]
#[command(name = "voxdash", version, about = "Configure and monitor voice outreach campaigns")]
struct Cli {
    /// Root URL of the campaign backend
    #[arg(long, env = "VOXDASH_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Seconds to wait for each request
    #[arg(long, env = "VOXDASH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout: u64,

    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Log requests and spans at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// View and edit the per-channel campaign configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Start, pause or check the campaign
    Campaign {
        #[command(subcommand)]
        action: CampaignCommand,
    },
    /// Manage the agents clients are booked with
    Agents {
        #[command(subcommand)]
        action: AgentCommand,
    },
    /// Browse clients in the campaign pool
    Clients {
        #[command(subcommand)]
        action: ClientCommand,
    },
    /// Campaign statistics and live activity
    Dashboard(DashboardArgs),
    /// The backend's flat campaign settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

async fn run(
    command: Command,
    backend: &dyn Backend,
    format: OutputFormat,
    notifications: &mut Notifications,
) -> Result<(), Error> {
    match command {
        Command::Config { action } => campaign::commands::run_config(action, backend, format, notifications).await,
        Command::Campaign { action } => campaign::commands::run_campaign(action, backend, format, notifications).await,
        Command::Agents { action } => agent::commands::run(action, backend, format, notifications).await,
        Command::Clients { action } => clients::commands::run(action, backend, format, notifications).await,
        Command::Dashboard(args) => dashboard::commands::run(args, backend, format, notifications).await,
        Command::Settings { action } => settings::commands::run(action, backend, format, notifications).await,
    }
}

fn describe(error: &Error) -> String {
    match error {
        Error::ConfirmationRequired { action } => {
            format!("{}; pass --yes to {}", error.error_message(), action)
        }
        Error::ValueOutOfRange { violation } => format!(
            "{}: {} must be between {} and {}, got {}",
            error.error_message(),
            violation.field,
            violation.min,
            violation.max,
            violation.value
        ),
        Error::AgentNotFound { agent_id } => {
            format!("{}: {}", error.error_message(), agent_id)
        }
        Error::UnexpectedStatus { status, detail } => match detail {
            Some(detail) => format!("{} ({}): {}", error.error_message(), status, detail),
            None => format!("{} ({})", error.error_message(), status),
        },
        _ => error.error_message().to_owned(),
    }
}

#[actix_rt::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(if cli.verbose { FmtSpan::NEW } else { FmtSpan::NONE })
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = DashboardConfig::new(cli.api_url, Duration::from_secs(cli.timeout));
    let backend = RestBackend::from_config(&config);

    let mut notifications = Notifications::new();
    let result = run(cli.command, &backend, cli.format, &mut notifications).await;

    for notification in notifications.drain() {
        match notification.level {
            Level::Success => eprintln!("✓ {}", notification.message),
            Level::Error => eprintln!("✗ {}", notification.message),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if cli.format == OutputFormat::Json {
                if let Ok(report) = serde_json::to_string_pretty(&error.report()) {
                    println!("{}", report);
                }
            }
            eprintln!("error[{}]: {}", error.error_code(), describe(&error));
            ExitCode::FAILURE
        }
    }
}
