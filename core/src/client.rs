//! The client context shared by every endpoint.
//!
//! # Design
//! `Client` owns the immutable `Config` and a `Transport`. Endpoints borrow
//! the client and never hold state of their own beyond a path prefix, so
//! every call is exactly one round trip with no caching and no retries.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::endpoint::{check_status, parse_json, Endpoint, OK};
use crate::error::{BasecampError, BasecampResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport, JSON_CONTENT_TYPE};
use crate::resources::attachments::Attachments;
use crate::resources::calendar_events::CalendarEvents;
use crate::resources::calendars::Calendars;
use crate::resources::events::Events;
use crate::resources::people::People;
use crate::resources::projects::{Project, Projects};
use crate::types::Record;
use crate::url::{launchpad_url, PathPrefix};

/// Products kept by `basecamp_accounts` when only the new Basecamp is wanted.
const NEXT_PRODUCTS: &[&str] = &["bcx"];
const ALL_PRODUCTS: &[&str] = &["bcx", "basecamp"];

const AUTHORIZATION_PATH: &str = "authorization.json";

/// Synchronous Basecamp API client.
#[derive(Clone)]
pub struct Client {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Client using the default blocking `ureq` transport.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generic endpoint rooted at the account, for actions without a
    /// dedicated resource type.
    pub fn endpoint(&self) -> Endpoint<'_> {
        Endpoint::new(self, PathPrefix::root())
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    /// A single project and the resources nested inside it.
    pub fn project(&self, project_id: u64) -> Project<'_> {
        Project::new(self, project_id)
    }

    pub fn people(&self) -> People<'_> {
        People::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    pub fn attachments(&self) -> Attachments<'_> {
        Attachments::new(self)
    }

    pub fn calendars(&self) -> Calendars<'_> {
        Calendars::new(self)
    }

    /// Events of a calendar. Use `Project::calendar_events` for a project's.
    pub fn calendar_events(&self, calendar_id: u64) -> CalendarEvents<'_> {
        CalendarEvents::for_calendar(self, calendar_id)
    }

    /// Authorization document listing the identity and accounts the token
    /// can reach. Does not require an account id.
    pub fn accounts(&self) -> BasecampResult<Record> {
        let url = launchpad_url(self.config.launchpad_url(), AUTHORIZATION_PATH)?;
        let response = self.execute(HttpMethod::Get, url.clone(), Vec::new(), None)?;
        check_status(&response, OK, HttpMethod::Get, &url)?;
        parse_json(&response.body, &url)
    }

    /// Accounts of the Basecamp products; only the new Basecamp (`bcx`)
    /// when `only_next` is set, classic Basecamp as well otherwise. A
    /// document without an `accounts` list is a decode error.
    pub fn basecamp_accounts(&self, only_next: bool) -> BasecampResult<Vec<Record>> {
        let products = if only_next { NEXT_PRODUCTS } else { ALL_PRODUCTS };
        let mut authorization = self.accounts()?;
        let listed = authorization.get_mut("accounts").map(Value::take).unwrap_or_default();
        let accounts: Vec<Record> = serde_json::from_value(listed).map_err(|source| {
            match launchpad_url(self.config.launchpad_url(), AUTHORIZATION_PATH) {
                Ok(url) => BasecampError::Deserialization { url, source },
                Err(err) => err,
            }
        })?;
        Ok(accounts
            .into_iter()
            .filter(|account| {
                account
                    .get("product")
                    .and_then(Value::as_str)
                    .is_some_and(|product| products.contains(&product))
            })
            .collect())
    }

    /// Sends one request with the session headers attached.
    ///
    /// `body` is the encoded payload and its content type; requests without
    /// a body still advertise JSON.
    pub(crate) fn execute(
        &self,
        method: HttpMethod,
        url: String,
        query: Vec<(String, String)>,
        body: Option<(Vec<u8>, String)>,
    ) -> BasecampResult<HttpResponse> {
        let (body, content_type) = match body {
            Some((bytes, content_type)) => (Some(bytes), content_type),
            None => (None, JSON_CONTENT_TYPE.to_string()),
        };
        let headers = vec![
            ("User-Agent".to_string(), self.config.user_agent().to_string()),
            ("Authorization".to_string(), self.config.authorization_header()),
            ("Content-Type".to_string(), content_type),
        ];

        debug!(%method, %url, "sending request");
        let response = self.transport.send(HttpRequest {
            method,
            url: url.clone(),
            headers,
            query,
            body,
        })?;
        debug!(%method, %url, status = response.status, "received response");
        Ok(response)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("config", &self.config).finish_non_exhaustive()
    }
}
