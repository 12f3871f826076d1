use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;

use super::{ClientQuery, ClientRow};

#[derive(Debug, Default)]
pub struct ClientsPage {
    query: ClientQuery,
    clients: Vec<ClientRow>,
    total: u64,
    notifications: Notifications,
}

impl ClientsPage {
    pub fn new() -> ClientsPage {
        ClientsPage::default()
    }

    pub fn with_query(query: ClientQuery) -> ClientsPage {
        ClientsPage {
            query,
            ..ClientsPage::default()
        }
    }

    pub fn clients(&self) -> &[ClientRow] {
        &self.clients
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn page_count(&self) -> u64 {
        let size = u64::from(self.query.page_size.max(1));
        (self.total + size - 1) / size
    }

    pub fn has_previous(&self) -> bool {
        self.query.page > 1
    }

    /// The backend does not say whether more pages exist, so a non-empty
    /// page is taken to mean there may be another.
    pub fn has_next(&self) -> bool {
        !self.clients.is_empty()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.query.search = non_empty(search);
        self.query.page = 1;
    }

    pub fn set_client_type(&mut self, client_type: Option<String>) {
        self.query.client_type = non_empty(client_type);
        self.query.page = 1;
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.query.status = non_empty(status);
        self.query.page = 1;
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.query.tag = non_empty(tag);
        self.query.page = 1;
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn load(&mut self, backend: &dyn Backend, page: u32) -> Result<(), Error> {
        let mut query = self.query.clone();
        query.page = page.max(1);

        match backend.clients().fetch_clients(&query).await {
            Ok(listing) => {
                self.clients = listing.clients;
                self.total = listing.total;
                self.query.page = listing.page.unwrap_or(query.page);
                Ok(())
            }
            Err(err) => {
                self.notifications
                    .failure(&err, "Failed to load clients", "Error loading clients");
                Err(err)
            }
        }
    }

    pub async fn next_page(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        let page = self.query.page.saturating_add(1);
        self.load(backend, page).await
    }

    pub async fn previous_page(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        let page = self.query.page.saturating_sub(1).max(1);
        self.load(backend, page).await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
