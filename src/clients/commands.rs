use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;
use crate::output::{or_dash, OutputFormat};

use super::page::ClientsPage;
use super::{ClientRow, ContactType};

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// List clients in the active campaign pool, 50 per page
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub search: Option<String>,
    /// medicare or non_medicare
    #[arg(long = "type")]
    pub client_type: Option<String>,
    /// pending, in_progress or completed
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Type")]
    client_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Attempts")]
    attempts: u32,
    #[tabled(rename = "Last contact")]
    last_contact: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&ClientRow> for Row {
    fn from(client: &ClientRow) -> Row {
        let contact = match client.contact_type {
            Some(ContactType::Call) => " (call)",
            Some(ContactType::Email) => " (email)",
            None => "",
        };
        Row {
            name: client.display_name(),
            phone: or_dash(Some(client.phone.as_str())),
            email: or_dash(Some(client.email.as_str())),
            agent: or_dash(Some(client.agent.as_str())),
            client_type: client.client_type.as_str().to_owned(),
            status: or_dash(Some(client.status.as_str())),
            attempts: client.attempts.max(client.total_attempts),
            last_contact: match client.last_contact() {
                Some(at) => format!("{}{}", at, contact),
                None => "-".to_owned(),
            },
            tags: client.tags.join(", "),
        }
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    clients: &'a [ClientRow],
    total: u64,
    page: u32,
    page_count: u64,
}

pub async fn run(
    command: ClientCommand,
    backend: &dyn Backend,
    format: OutputFormat,
    notifications: &mut Notifications,
) -> Result<(), Error> {
    let mut page = ClientsPage::new();
    let result = on_page(&mut page, command, backend, format).await;
    notifications.take_from(page.notifications_mut());
    result
}

async fn on_page(
    page: &mut ClientsPage,
    command: ClientCommand,
    backend: &dyn Backend,
    format: OutputFormat,
) -> Result<(), Error> {
    match command {
        ClientCommand::List(args) => {
            page.set_search(args.search);
            page.set_client_type(args.client_type);
            page.set_status(args.status);
            page.set_tag(args.tag);
            page.load(backend, args.page).await?;

            let listing = Listing {
                clients: page.clients(),
                total: page.total(),
                page: page.page(),
                page_count: page.page_count(),
            };
            let rows: Vec<Row> = listing.clients.iter().map(Row::from).collect();
            format.print_rows(&listing, rows)?;
            if format == OutputFormat::Table {
                println!("Page {} of {}, {} total", listing.page, listing.page_count, listing.total);
            }
        }
    }

    Ok(())
}
