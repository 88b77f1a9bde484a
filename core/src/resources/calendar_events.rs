//! Events on a calendar, reached through either a project or a calendar.

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::{BasecampError, BasecampResult};
use crate::http::RequestBody;
use crate::resources::record;
use crate::types::{CalendarEventFields, Record};
use crate::url::PathPrefix;

pub const SECTION: &str = "calendar_events";

#[derive(Debug, Clone)]
pub struct CalendarEvents<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> CalendarEvents<'a> {
    /// Exactly one of `project_id` and `calendar_id` must be given.
    pub fn new(client: &'a Client, project_id: Option<u64>, calendar_id: Option<u64>) -> BasecampResult<Self> {
        match (project_id, calendar_id) {
            (Some(project_id), None) => Ok(Self::for_project(client, project_id)),
            (None, Some(calendar_id)) => Ok(Self::for_calendar(client, calendar_id)),
            (Some(_), Some(_)) => Err(BasecampError::configuration(
                "give either a project id or a calendar id for calendar events, not both",
            )),
            (None, None) => Err(BasecampError::configuration(
                "calendar events need a project id or a calendar id",
            )),
        }
    }

    pub fn for_project(client: &'a Client, project_id: u64) -> Self {
        Self::scoped(client, PathPrefix::root().nested(super::projects::SECTION, project_id))
    }

    pub fn for_calendar(client: &'a Client, calendar_id: u64) -> Self {
        Self::scoped(client, PathPrefix::root().nested(super::calendars::SECTION, calendar_id))
    }

    fn scoped(client: &'a Client, prefix: PathPrefix) -> Self {
        Self {
            endpoint: Endpoint::new(client, prefix),
        }
    }

    fn path(event_id: u64) -> String {
        format!("{SECTION}/{event_id}")
    }

    /// Upcoming events, or past ones when `past` is set.
    pub fn list(&self, past: bool) -> BasecampResult<Record> {
        if past {
            return self.endpoint.fetch(&format!("{SECTION}/past"), &[]);
        }
        self.endpoint.fetch(SECTION, &[])
    }

    pub fn get(&self, event_id: u64) -> BasecampResult<Record> {
        self.endpoint.fetch(&Self::path(event_id), &[])
    }

    pub fn create(&self, fields: &CalendarEventFields) -> BasecampResult<Record> {
        self.endpoint
            .create(SECTION, RequestBody::json(fields)?)
            .map(record)
    }

    pub fn update(&self, event_id: u64, fields: &CalendarEventFields) -> BasecampResult<Record> {
        self.endpoint.replace(&Self::path(event_id), fields).map(record)
    }

    pub fn delete(&self, event_id: u64) -> BasecampResult<()> {
        self.endpoint.remove(&Self::path(event_id))
    }
}
