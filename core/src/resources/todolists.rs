//! Todo lists of a project.

use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::resources::{record, ProjectResource};
use crate::types::{NamedItem, Record, UpdateTodoList};

#[derive(Debug, Clone)]
pub struct TodoLists<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> ProjectResource<'a> for TodoLists<'a> {
    const SECTION: &'static str = "todolists";

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self {
        Self { endpoint }
    }

    fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }
}

impl TodoLists<'_> {
    /// Open lists, or completed ones when `completed` is set.
    pub fn list(&self, completed: bool) -> BasecampResult<Record> {
        if completed {
            return self.endpoint.fetch(&format!("{}/completed", Self::SECTION), &[]);
        }
        self.endpoint.fetch(Self::SECTION, &[])
    }

    pub fn get(&self, todolist_id: u64) -> BasecampResult<Record> {
        self.endpoint.fetch(&self.item_path(todolist_id), &[])
    }

    pub fn post(&self, name: &str, description: Option<&str>) -> BasecampResult<Record> {
        let body = NamedItem {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        self.endpoint
            .create(Self::SECTION, RequestBody::json(&body)?)
            .map(record)
    }

    pub fn update(
        &self,
        todolist_id: u64,
        name: &str,
        description: Option<&str>,
        position: Option<u32>,
    ) -> BasecampResult<Record> {
        let body = UpdateTodoList {
            name: name.to_string(),
            description: description.map(str::to_string),
            position,
        };
        self.endpoint
            .replace(&self.item_path(todolist_id), &body)
            .map(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::client::Client;
    use crate::config::Config;
    use crate::testing::FakeTransport;

    fn client(transport: &Arc<FakeTransport>) -> Client {
        Client::with_transport(Config::new("t", "ua").with_account_id(3), transport.clone())
    }

    #[test]
    fn update_body_has_exactly_the_documented_keys() {
        let transport = FakeTransport::new();
        transport.push_json(200, serde_json::json!({"id": 4}));
        let client = client(&transport);

        client
            .project(7)
            .todo_lists()
            .update(4, "Sprint 3", None, Some(2))
            .unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://basecamp.com/3/api/v1/projects/7/todolists/4.json"
        );
        assert_eq!(
            transport.last_json(),
            serde_json::json!({"name": "Sprint 3", "description": null, "position": 2})
        );
    }

    #[test]
    fn list_switches_on_completed() {
        let transport = FakeTransport::new();
        transport.push_json(200, serde_json::json!([]));
        client(&transport).project(7).todo_lists().list(true).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://basecamp.com/3/api/v1/projects/7/todolists/completed.json"
        );
    }
}
