use async_trait::async_trait;

use crate::backend::HttpApi;
use crate::error::Error;

use super::{ClientPage, ClientQuery};

#[async_trait(?Send)]
pub trait ClientApi {
    async fn fetch_clients(&self, query: &ClientQuery) -> Result<ClientPage, Error>;
}

#[async_trait(?Send)]
impl ClientApi for HttpApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_clients(&self, query: &ClientQuery) -> Result<ClientPage, Error> {
        self.get_with_query("/clients", query).await
    }
}
