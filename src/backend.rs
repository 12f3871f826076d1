use awc::error::PayloadError;
use awc::http::{Method, StatusCode};
use awc::{Client, SendClientRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::agent::api::AgentApi;
use crate::campaign::api::CampaignApi;
use crate::clients::api::ClientApi;
use crate::config::DashboardConfig;
use crate::dashboard::api::DashboardApi;
use crate::error::Error;
use crate::settings::api::SettingsApi;

/// Client listings can outgrow the client's 2MB default.
const BODY_LIMIT: usize = 8 * 1024 * 1024;

pub trait Backend {
    fn campaigns(&self) -> &dyn CampaignApi;
    fn settings(&self) -> &dyn SettingsApi;
    fn agents(&self) -> &dyn AgentApi;
    fn clients(&self) -> &dyn ClientApi;
    fn dashboard(&self) -> &dyn DashboardApi;
}

pub struct RestBackend {
    http: HttpApi,
}

impl RestBackend {
    pub fn new(http: HttpApi) -> RestBackend {
        RestBackend { http }
    }

    pub fn from_config(config: &DashboardConfig) -> RestBackend {
        RestBackend::new(HttpApi::new(config.http_client(), config.api_base()))
    }
}

impl Backend for RestBackend {
    fn campaigns(&self) -> &dyn CampaignApi {
        &self.http
    }

    fn settings(&self) -> &dyn SettingsApi {
        &self.http
    }

    fn agents(&self) -> &dyn AgentApi {
        &self.http
    }

    fn clients(&self) -> &dyn ClientApi {
        &self.http
    }

    fn dashboard(&self) -> &dyn DashboardApi {
        &self.http
    }
}

/// JSON over HTTP against the `/api/dashboard` base. Any non-2xx answer is
/// turned into [`Error::UnexpectedStatus`]; nothing is retried.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> HttpApi {
        HttpApi {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let body = self.dispatch(self.client.get(self.url(path)).send()).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        Q: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .get(self.url(path))
            .query(query)
            .map_err(|err| Error::InvalidQuery(err.to_string()))?;
        let body = self.dispatch(request.send()).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>, Error> {
        let request = self.client.request(method, self.url(path));
        self.dispatch(request.send_json(body)).await
    }

    pub async fn send_empty(&self, method: Method, path: &str) -> Result<Vec<u8>, Error> {
        let request = self.client.request(method, self.url(path));
        self.dispatch(request.send()).await
    }

    async fn dispatch(&self, pending: SendClientRequest) -> Result<Vec<u8>, Error> {
        let mut response = pending.await?;
        let status = response.status();
        let body = response.body().limit(BODY_LIMIT).await;

        read_reply(status, body)
    }
}

/// A non-2xx status is a rejection whether or not its body could be read.
fn read_reply<B>(status: StatusCode, body: Result<B, PayloadError>) -> Result<Vec<u8>, Error>
where
    B: AsRef<[u8]>,
{
    if !status.is_success() {
        debug!(status = status.as_u16(), readable = body.is_ok(), "backend rejected the request");
        return Err(Error::UnexpectedStatus {
            status: status.as_u16(),
            detail: body.ok().and_then(|body| rejection_detail(body.as_ref())),
        });
    }

    let body = body?;
    debug!(status = status.as_u16(), bytes = body.as_ref().len(), "backend responded");

    Ok(body.as_ref().to_vec())
}

/// Pulls `detail` out of an error body. It is usually a sentence but may be
/// a list of validation failures, which is passed along as JSON text.
fn rejection_detail(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct Rejection {
        detail: Option<Value>,
    }

    match serde_json::from_slice::<Rejection>(body).ok()?.detail? {
        Value::String(detail) => Some(detail),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::agent::api::test::MockAgentApi;
    use crate::campaign::api::test::MockCampaignApi;
    use crate::clients::api::test::MockClientApi;
    use crate::dashboard::api::test::MockDashboardApi;
    use crate::settings::api::test::MockSettingsApi;

    pub struct MockBackend {
        pub campaigns: MockCampaignApi,
        pub settings: MockSettingsApi,
        pub agents: MockAgentApi,
        pub clients: MockClientApi,
        pub dashboard: MockDashboardApi,
    }

    impl MockBackend {
        pub fn new() -> MockBackend {
            MockBackend {
                campaigns: MockCampaignApi::new(),
                settings: MockSettingsApi::new(),
                agents: MockAgentApi::new(),
                clients: MockClientApi::new(),
                dashboard: MockDashboardApi::new(),
            }
        }
    }

    impl Backend for MockBackend {
        fn campaigns(&self) -> &dyn CampaignApi {
            &self.campaigns
        }

        fn settings(&self) -> &dyn SettingsApi {
            &self.settings
        }

        fn agents(&self) -> &dyn AgentApi {
            &self.agents
        }

        fn clients(&self) -> &dyn ClientApi {
            &self.clients
        }

        fn dashboard(&self) -> &dyn DashboardApi {
            &self.dashboard
        }
    }

    pub fn rejected(status: u16) -> Error {
        Error::UnexpectedStatus {
            status,
            detail: None,
        }
    }

    #[test]
    fn detail_is_read_from_error_bodies() {
        assert_eq!(
            rejection_detail(br#"{"detail": "Campaign already running"}"#),
            Some("Campaign already running".to_string())
        );
        assert_eq!(
            rejection_detail(br#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#),
            Some(r#"[{"loc":["body"],"msg":"field required"}]"#.to_string())
        );
        assert_eq!(rejection_detail(br#"{"detail": null}"#), None);
        assert_eq!(rejection_detail(b"<html>Bad Gateway</html>"), None);
        assert_eq!(rejection_detail(b""), None);
    }

    #[test]
    fn unreadable_error_body_is_still_a_rejection() {
        let error =
            read_reply::<Vec<u8>>(StatusCode::INTERNAL_SERVER_ERROR, Err(PayloadError::Overflow))
                .unwrap_err();
        assert_eq!(error, rejected(500));
        assert!(error.is_network_or_server());

        let error = read_reply::<Vec<u8>>(StatusCode::OK, Err(PayloadError::Overflow)).unwrap_err();
        assert!(matches!(error, Error::FailedToReadResponse(_)));

        let body = read_reply(StatusCode::OK, Ok(b"{}".to_vec())).unwrap();
        assert_eq!(body, b"{}".to_vec());
    }
}
