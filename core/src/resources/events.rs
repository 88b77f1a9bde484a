//! Account and project activity feeds.

use chrono::{DateTime, Utc};

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::pagination::Pages;
use crate::url::PathPrefix;

pub const SECTION: &str = "events";

#[derive(Debug, Clone)]
pub struct Events<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> Events<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            endpoint: Endpoint::new(client, PathPrefix::root()),
        }
    }

    /// Every event visible to the user, or only those of `project_id`.
    /// With `since`, only events newer than that instant are listed.
    pub fn list(&self, project_id: Option<u64>, since: Option<DateTime<Utc>>) -> Pages<'a> {
        let action = match project_id {
            Some(id) => format!("{}/{id}/{SECTION}", super::projects::SECTION),
            None => SECTION.to_string(),
        };
        let params = since
            .map(|since| vec![("since".to_string(), since.to_rfc3339())])
            .unwrap_or_default();
        self.endpoint.paginate(&action, params)
    }
}
