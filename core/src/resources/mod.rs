//! Typed wrappers over each REST collection.
//!
//! # Design
//! Account-level resources (projects, people, events, attachments,
//! calendars) wrap an `Endpoint` rooted at the account. Resources that live
//! inside a project implement `ProjectResource`: the project id is fixed at
//! construction as a path prefix, and item removal comes from the trait
//! instead of being repeated per resource.

pub mod attachments;
pub mod calendar_events;
pub mod calendars;
pub mod comments;
pub mod documents;
pub mod events;
pub mod messages;
pub mod people;
pub mod projects;
pub mod todolists;
pub mod todos;
pub mod topics;
pub mod uploads;

use serde_json::Value;

use crate::client::Client;
use crate::endpoint::{Endpoint, NO_CONTENT};
use crate::error::{BasecampError, BasecampResult};
use crate::http::RequestBody;
use crate::types::{AccessGrant, Record};
use crate::url::PathPrefix;

/// A collection that only exists inside a project.
pub trait ProjectResource<'a>: Sized {
    /// Collection name in the URL, e.g. `"messages"`.
    const SECTION: &'static str;

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self;

    fn endpoint(&self) -> &Endpoint<'a>;

    /// Fails with a configuration error when `project_id` is `None`.
    fn new(client: &'a Client, project_id: Option<u64>) -> BasecampResult<Self> {
        let project_id = project_id.ok_or_else(|| {
            BasecampError::configuration(format!("{} can only be reached through a project id", Self::SECTION))
        })?;
        Ok(Self::in_project(client, project_id))
    }

    fn in_project(client: &'a Client, project_id: u64) -> Self {
        let prefix = PathPrefix::root().nested(projects::SECTION, project_id);
        Self::from_endpoint(Endpoint::new(client, prefix))
    }

    /// Path of one item of this collection.
    fn item_path(&self, item_id: u64) -> String {
        format!("{}/{}", Self::SECTION, item_id)
    }

    fn delete(&self, item_id: u64) -> BasecampResult<()> {
        self.endpoint().remove(&self.item_path(item_id))
    }
}

/// Body of a create/replace response; `Null` when the service sent none.
pub(crate) fn record(value: Option<Value>) -> Record {
    value.unwrap_or(Value::Null)
}

// Access management is shared by projects and calendars. `owner` is the
// owning item's path, e.g. `projects/7`.

pub(crate) fn list_accesses(endpoint: &Endpoint<'_>, owner: &str) -> BasecampResult<Record> {
    endpoint.fetch(&format!("{owner}/accesses"), &[])
}

/// Does nothing, and sends nothing, when both lists are empty.
pub(crate) fn grant_access(endpoint: &Endpoint<'_>, owner: &str, ids: &[u64], emails: &[&str]) -> BasecampResult<()> {
    if ids.is_empty() && emails.is_empty() {
        return Ok(());
    }
    let grant = AccessGrant {
        ids: ids.to_vec(),
        email_addresses: emails.iter().map(|e| e.to_string()).collect(),
    };
    endpoint.create_expecting(&format!("{owner}/accesses"), RequestBody::json(&grant)?, NO_CONTENT)?;
    Ok(())
}

pub(crate) fn revoke_access(endpoint: &Endpoint<'_>, owner: &str, person_id: u64) -> BasecampResult<()> {
    endpoint.remove(&format!("{owner}/accesses/{person_id}"))
}
