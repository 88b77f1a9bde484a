//! People on the account.

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::types::Record;
use crate::url::PathPrefix;

pub const SECTION: &str = "people";

#[derive(Debug, Clone)]
pub struct People<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> People<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            endpoint: Endpoint::new(client, PathPrefix::root()),
        }
    }

    pub fn list(&self) -> BasecampResult<Record> {
        self.endpoint.fetch(SECTION, &[])
    }

    /// A person by id, or the token's owner when `person_id` is `None`.
    pub fn get(&self, person_id: Option<u64>) -> BasecampResult<Record> {
        match person_id {
            Some(id) => self.endpoint.fetch(&format!("{SECTION}/{id}"), &[]),
            None => self.endpoint.fetch(&format!("{SECTION}/me"), &[]),
        }
    }

    /// Todos assigned to the person, grouped by todo list.
    pub fn assigned_todos(&self, person_id: u64) -> BasecampResult<Record> {
        self.endpoint
            .fetch(&format!("{SECTION}/{person_id}/assigned_todos"), &[])
    }

    pub fn delete(&self, person_id: u64) -> BasecampResult<()> {
        self.endpoint.remove(&format!("{SECTION}/{person_id}"))
    }
}
