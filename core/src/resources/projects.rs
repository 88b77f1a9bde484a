//! Projects, and the entry point to everything nested inside one.

use chrono::{DateTime, Utc};

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::pagination::Pages;
use crate::resources::attachments::Attachments;
use crate::resources::calendar_events::CalendarEvents;
use crate::resources::comments::Comments;
use crate::resources::documents::Documents;
use crate::resources::events::Events;
use crate::resources::messages::Messages;
use crate::resources::todolists::TodoLists;
use crate::resources::todos::Todos;
use crate::resources::topics::Topics;
use crate::resources::uploads::Uploads;
use crate::resources::{grant_access, list_accesses, record, revoke_access, ProjectResource};
use crate::types::{ArchiveProject, NamedItem, Record};
use crate::url::PathPrefix;

pub const SECTION: &str = "projects";

/// The project collection of the account.
#[derive(Debug, Clone)]
pub struct Projects<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> Projects<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            endpoint: Endpoint::new(client, PathPrefix::root()),
        }
    }

    /// Active projects, or archived ones when `archived` is set.
    pub fn list(&self, archived: bool) -> BasecampResult<Record> {
        if archived {
            return self.endpoint.fetch(&format!("{SECTION}/archived"), &[]);
        }
        self.endpoint.fetch(SECTION, &[])
    }

    pub fn create(&self, name: &str, description: Option<&str>) -> BasecampResult<Record> {
        let body = NamedItem {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        self.endpoint
            .create(SECTION, RequestBody::json(&body)?)
            .map(record)
    }
}

/// One project.
#[derive(Debug, Clone)]
pub struct Project<'a> {
    endpoint: Endpoint<'a>,
    project_id: u64,
}

impl<'a> Project<'a> {
    pub fn new(client: &'a Client, project_id: u64) -> Self {
        Self {
            endpoint: Endpoint::new(client, PathPrefix::root()),
            project_id,
        }
    }

    pub fn id(&self) -> u64 {
        self.project_id
    }

    fn path(&self) -> String {
        format!("{SECTION}/{}", self.project_id)
    }

    pub fn get(&self) -> BasecampResult<Record> {
        self.endpoint.fetch(&self.path(), &[])
    }

    pub fn update(&self, name: &str, description: Option<&str>) -> BasecampResult<Record> {
        let body = NamedItem {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        self.endpoint.replace(&self.path(), &body).map(record)
    }

    pub fn archive(&self, archived: bool) -> BasecampResult<Record> {
        self.endpoint
            .replace(&self.path(), &ArchiveProject { archived })
            .map(record)
    }

    /// Moves an archived project back to the active list.
    pub fn activate(&self) -> BasecampResult<Record> {
        self.archive(false)
    }

    pub fn delete(&self) -> BasecampResult<()> {
        self.endpoint.remove(&self.path())
    }

    /// People with access to the project.
    pub fn accesses(&self) -> BasecampResult<Record> {
        list_accesses(&self.endpoint, &self.path())
    }

    /// Grants access to existing people by id and invites new ones by email.
    /// Returns immediately when both lists are empty.
    pub fn grant_access(&self, ids: &[u64], emails: &[&str]) -> BasecampResult<()> {
        grant_access(&self.endpoint, &self.path(), ids, emails)
    }

    pub fn revoke_access(&self, person_id: u64) -> BasecampResult<()> {
        revoke_access(&self.endpoint, &self.path(), person_id)
    }

    /// Activity in this project, newest first.
    pub fn events(&self, since: Option<DateTime<Utc>>) -> Pages<'a> {
        Events::new(self.endpoint.client()).list(Some(self.project_id), since)
    }

    /// Files attached anywhere in this project.
    pub fn attachments(&self) -> Pages<'a> {
        Attachments::new(self.endpoint.client()).list(self.project_id)
    }

    pub fn messages(&self) -> Messages<'a> {
        Messages::in_project(self.endpoint.client(), self.project_id)
    }

    pub fn comments(&self) -> Comments<'a> {
        Comments::in_project(self.endpoint.client(), self.project_id)
    }

    pub fn topics(&self) -> Topics<'a> {
        Topics::in_project(self.endpoint.client(), self.project_id)
    }

    pub fn todo_lists(&self) -> TodoLists<'a> {
        TodoLists::in_project(self.endpoint.client(), self.project_id)
    }

    pub fn todos(&self) -> Todos<'a> {
        Todos::in_project(self.endpoint.client(), self.project_id)
    }

    pub fn documents(&self) -> Documents<'a> {
        Documents::in_project(self.endpoint.client(), self.project_id)
    }

    pub fn uploads(&self) -> Uploads<'a> {
        Uploads::in_project(self.endpoint.client(), self.project_id)
    }

    pub fn calendar_events(&self) -> CalendarEvents<'a> {
        CalendarEvents::for_project(self.endpoint.client(), self.project_id)
    }
}
