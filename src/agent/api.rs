use async_trait::async_trait;
use awc::http::Method;
use serde::Deserialize;

use crate::backend::HttpApi;
use crate::error::Error;

use super::{Agent, AgentBody, AgentId};

#[async_trait(?Send)]
pub trait AgentApi {
    async fn fetch_agents(&self) -> Result<Vec<Agent>, Error>;
    async fn create_agent(&self, body: &AgentBody) -> Result<(), Error>;
    async fn update_agent(&self, agent_id: &AgentId, body: &AgentBody) -> Result<(), Error>;
    async fn deactivate_agent(&self, agent_id: &AgentId) -> Result<(), Error>;
}

#[derive(Deserialize)]
struct AgentsEnvelope {
    #[serde(default)]
    agents: Vec<Agent>,
}

#[async_trait(?Send)]
impl AgentApi for HttpApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_agents(&self) -> Result<Vec<Agent>, Error> {
        let envelope: AgentsEnvelope = self.get("/agents").await?;

        Ok(envelope.agents)
    }

    #[tracing::instrument(skip(self))]
    async fn create_agent(&self, body: &AgentBody) -> Result<(), Error> {
        self.send_json(Method::POST, "/agents", body).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_agent(&self, agent_id: &AgentId, body: &AgentBody) -> Result<(), Error> {
        self.send_json(Method::PUT, &format!("/agents/{}", agent_id), body)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn deactivate_agent(&self, agent_id: &AgentId) -> Result<(), Error> {
        self.send_empty(Method::DELETE, &format!("/agents/{}", agent_id))
            .await?;

        Ok(())
    }
}
