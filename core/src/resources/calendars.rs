//! Calendars of the account and who can see them.

use crate::client::Client;
use crate::endpoint::{Endpoint, NO_CONTENT};
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::resources::{grant_access, list_accesses, record, revoke_access};
use crate::types::{CalendarPayload, Record};
use crate::url::PathPrefix;

pub const SECTION: &str = "calendars";

#[derive(Debug, Clone)]
pub struct Calendars<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> Calendars<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            endpoint: Endpoint::new(client, PathPrefix::root()),
        }
    }

    fn path(calendar_id: u64) -> String {
        format!("{SECTION}/{calendar_id}")
    }

    pub fn list(&self) -> BasecampResult<Record> {
        self.endpoint.fetch(SECTION, &[])
    }

    pub fn get(&self, calendar_id: u64) -> BasecampResult<Record> {
        self.endpoint.fetch(&Self::path(calendar_id), &[])
    }

    pub fn create(&self, name: &str) -> BasecampResult<Record> {
        let body = CalendarPayload { name: name.to_string() };
        self.endpoint
            .create(SECTION, RequestBody::json(&body)?)
            .map(record)
    }

    /// Renames a calendar. The service answers 204 with no body.
    pub fn update(&self, calendar_id: u64, name: &str) -> BasecampResult<()> {
        let body = CalendarPayload { name: name.to_string() };
        self.endpoint
            .replace_expecting(&Self::path(calendar_id), &body, NO_CONTENT)?;
        Ok(())
    }

    pub fn delete(&self, calendar_id: u64) -> BasecampResult<()> {
        self.endpoint.remove(&Self::path(calendar_id))
    }

    pub fn accesses(&self, calendar_id: u64) -> BasecampResult<Record> {
        list_accesses(&self.endpoint, &Self::path(calendar_id))
    }

    /// Returns immediately when both lists are empty.
    pub fn grant_access(&self, calendar_id: u64, ids: &[u64], emails: &[&str]) -> BasecampResult<()> {
        grant_access(&self.endpoint, &Self::path(calendar_id), ids, emails)
    }

    pub fn revoke_access(&self, calendar_id: u64, person_id: u64) -> BasecampResult<()> {
        revoke_access(&self.endpoint, &Self::path(calendar_id), person_id)
    }
}
