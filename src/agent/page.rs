use crate::backend::Backend;
use crate::error::Error;
use crate::notify::Notifications;

use super::{Agent, AgentForm, AgentId};

#[derive(Debug, Default)]
pub struct AgentsPage {
    agents: Vec<Agent>,
    search: String,
    notifications: Notifications,
}

impl AgentsPage {
    pub fn new() -> AgentsPage {
        AgentsPage::default()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn filtered(&self) -> Vec<&Agent> {
        self.agents
            .iter()
            .filter(|agent| agent.matches(&self.search))
            .collect()
    }

    pub fn find(&self, agent_id: &AgentId) -> Result<&Agent, Error> {
        self.agents
            .iter()
            .find(|agent| agent.id == *agent_id)
            .ok_or_else(|| Error::AgentNotFound {
                agent_id: agent_id.clone(),
            })
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn load(&mut self, backend: &dyn Backend) -> Result<(), Error> {
        match backend.agents().fetch_agents().await {
            Ok(agents) => {
                self.agents = agents;
                Ok(())
            }
            Err(err) => {
                self.notifications
                    .failure(&err, "Failed to load agents", "Error loading agents");
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn save(
        &mut self,
        backend: &dyn Backend,
        form: &AgentForm,
        editing: Option<&AgentId>,
    ) -> Result<(), Error> {
        let body = form.to_body();
        let result = match editing {
            Some(agent_id) => backend.agents().update_agent(agent_id, &body).await,
            None => backend.agents().create_agent(&body).await,
        };
        let (done, verb, verbing) = match editing {
            Some(_) => ("updated", "update", "updating"),
            None => ("created", "create", "creating"),
        };

        match result {
            Ok(()) => {
                self.notifications
                    .success(format!("Agent {} successfully!", done));
            }
            Err(err) => {
                self.notifications.failure(
                    &err,
                    &format!("Failed to {} agent", verb),
                    &format!("Error {} agent", verbing),
                );
                return Err(err);
            }
        }

        self.load(backend).await
    }

    #[tracing::instrument(skip(self, backend))]
    pub async fn deactivate(
        &mut self,
        backend: &dyn Backend,
        agent_id: &AgentId,
        confirmed: bool,
    ) -> Result<(), Error> {
        let name = self.find(agent_id)?.name.clone();
        if !confirmed {
            return Err(Error::ConfirmationRequired {
                action: "deactivate agent",
            });
        }

        match backend.agents().deactivate_agent(agent_id).await {
            Ok(()) => {
                self.notifications
                    .success(format!("Agent {} deactivated successfully!", name));
            }
            Err(err) => {
                self.notifications.failure(
                    &err,
                    "Failed to deactivate agent",
                    "Error deactivating agent",
                );
                return Err(err);
            }
        }

        self.load(backend).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::test::sample_agent;
    use crate::agent::TimeToken;
    use crate::backend::test::{rejected, MockBackend};
    use std::cell::Cell;
    use std::rc::Rc;

    fn backend_with_agents() -> MockBackend {
        let mut backend = MockBackend::new();
        backend.agents.on_fetch_agents = Box::new(|| {
            Ok(vec![
                sample_agent("a1", "Dana Reyes", "dana@example.com"),
                sample_agent("a2", "Morgan Price", "morgan@example.com"),
            ])
        });
        backend
    }

    #[tokio::test]
    async fn search_filters_loaded_agents() {
        let backend = backend_with_agents();
        let mut page = AgentsPage::new();
        page.load(&backend).await.unwrap();

        assert_eq!(page.filtered().len(), 2);
        page.set_search("MORGAN");
        let names: Vec<_> = page.filtered().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Morgan Price"]);
    }

    #[tokio::test]
    async fn create_joins_working_hours_and_reloads() {
        let mut backend = backend_with_agents();
        let created = Rc::new(Cell::new(false));
        let created_clone = Rc::clone(&created);
        backend.agents.on_create_agent = Box::new(move |body| {
            created_clone.set(true);
            assert_eq!(body.working_hours, "8AM-12PM");
            assert_eq!(body.google_calendar_id, "new@example.com");
            Ok(())
        });
        let mut page = AgentsPage::new();
        let form = AgentForm {
            name: "New Agent".into(),
            email: "new@example.com".into(),
            start_time: TimeToken::EightAm,
            end_time: TimeToken::TwelvePm,
            ..AgentForm::default()
        };

        page.save(&backend, &form, None).await.unwrap();

        assert!(created.get(), "create_agent was not called");
        assert_eq!(page.agents().len(), 2);
        assert_eq!(
            page.notifications().latest().unwrap().message,
            "Agent created successfully!"
        );
    }

    #[tokio::test]
    async fn rejected_update_shows_backend_detail() {
        let mut backend = backend_with_agents();
        backend.agents.on_update_agent = Box::new(|agent_id, _| {
            assert_eq!(agent_id.as_str(), "a1");
            Err(Error::UnexpectedStatus {
                status: 400,
                detail: Some("Email already in use".into()),
            })
        });
        let mut page = AgentsPage::new();
        page.load(&backend).await.unwrap();
        let agent_id: AgentId = "a1".parse().unwrap();
        let form = AgentForm::from_agent(page.find(&agent_id).unwrap());

        let result = page.save(&backend, &form, Some(&agent_id)).await;

        assert!(result.is_err());
        assert_eq!(
            page.notifications().latest().unwrap().message,
            "Email already in use"
        );
    }

    #[tokio::test]
    async fn deactivate_requires_a_known_agent_and_confirmation() {
        let mut backend = backend_with_agents();
        backend.agents.on_deactivate_agent = Box::new(|_| Err(rejected(500)));
        let mut page = AgentsPage::new();
        page.load(&backend).await.unwrap();

        let unknown: AgentId = "zz".parse().unwrap();
        assert_eq!(
            page.deactivate(&backend, &unknown, true).await.unwrap_err(),
            Error::AgentNotFound { agent_id: unknown }
        );

        let known: AgentId = "a2".parse().unwrap();
        assert_eq!(
            page.deactivate(&backend, &known, false).await.unwrap_err(),
            Error::ConfirmationRequired {
                action: "deactivate agent"
            }
        );

        assert!(page.deactivate(&backend, &known, true).await.is_err());
        assert_eq!(
            page.notifications().latest().unwrap().message,
            "Failed to deactivate agent"
        );
    }

    #[tokio::test]
    async fn deactivate_names_the_agent() {
        let mut backend = backend_with_agents();
        backend.agents.on_deactivate_agent = Box::new(|_| Ok(()));
        let mut page = AgentsPage::new();
        page.load(&backend).await.unwrap();

        page.deactivate(&backend, &"a1".parse().unwrap(), true)
            .await
            .unwrap();

        assert_eq!(
            page.notifications().latest().unwrap().message,
            "Agent Dana Reyes deactivated successfully!"
        );
    }
}
