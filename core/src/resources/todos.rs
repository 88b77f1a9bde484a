//! Todos inside a project's todo lists.

use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::resources::{record, ProjectResource};
use crate::types::{Record, TodoFields};

#[derive(Debug, Clone)]
pub struct Todos<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> ProjectResource<'a> for Todos<'a> {
    const SECTION: &'static str = "todos";

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self {
        Self { endpoint }
    }

    fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }
}

impl Todos<'_> {
    pub fn get(&self, todo_id: u64) -> BasecampResult<Record> {
        self.endpoint.fetch(&self.item_path(todo_id), &[])
    }

    /// Adds a todo to a list. Only the fields that are set are sent.
    pub fn post(&self, todolist_id: u64, fields: &TodoFields) -> BasecampResult<Record> {
        let action = format!("{}/{todolist_id}/{}", super::todolists::TodoLists::SECTION, Self::SECTION);
        self.endpoint
            .create(&action, RequestBody::json(fields)?)
            .map(record)
    }

    pub fn update(&self, todo_id: u64, fields: &TodoFields) -> BasecampResult<Record> {
        self.endpoint
            .replace(&self.item_path(todo_id), fields)
            .map(record)
    }
}
