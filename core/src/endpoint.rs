//! Uniform request/response handling for the four verbs the API uses.
//!
//! # Design
//! An `Endpoint` is a borrowed `Client` plus a `PathPrefix`. Resource types
//! wrap one and map their operations onto `fetch`, `create`, `replace` and
//! `remove`. Each verb has a fixed expected status; a create or replace may
//! override it for actions the service answers differently.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::client::Client;
use crate::error::{BasecampError, BasecampResult};
use crate::http::{HttpMethod, HttpResponse, RequestBody};
use crate::pagination::Pages;
use crate::url::{qualified_url, PathPrefix};

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const NO_CONTENT: u16 = 204;

/// A client bound to a parent-resource path prefix.
#[derive(Debug, Clone)]
pub struct Endpoint<'a> {
    client: &'a Client,
    prefix: PathPrefix,
}

impl<'a> Endpoint<'a> {
    pub fn new(client: &'a Client, prefix: PathPrefix) -> Self {
        Self { client, prefix }
    }

    pub fn client(&self) -> &'a Client {
        self.client
    }

    pub fn prefix(&self) -> &PathPrefix {
        &self.prefix
    }

    /// Absolute URL of `action` under this endpoint's prefix.
    pub fn qualified_url(&self, action: &str) -> BasecampResult<String> {
        qualified_url(self.client.config(), &self.prefix, action)
    }

    /// GET expecting 200; returns the parsed body.
    pub fn fetch(&self, action: &str, query: &[(String, String)]) -> BasecampResult<Value> {
        let url = self.qualified_url(action)?;
        let response = self
            .client
            .execute(HttpMethod::Get, url.clone(), query.to_vec(), None)?;
        check_status(&response, OK, HttpMethod::Get, &url)?;
        parse_json(&response.body, &url)
    }

    /// POST expecting 201.
    pub fn create(&self, action: &str, body: RequestBody) -> BasecampResult<Option<Value>> {
        self.create_expecting(action, body, CREATED)
    }

    /// POST expecting `expect`. Raw bodies are sent verbatim with their
    /// media type; JSON bodies are encoded.
    pub fn create_expecting(&self, action: &str, body: RequestBody, expect: u16) -> BasecampResult<Option<Value>> {
        let url = self.qualified_url(action)?;
        let response = self
            .client
            .execute(HttpMethod::Post, url.clone(), Vec::new(), Some(body.encode()?))?;
        check_status(&response, expect, HttpMethod::Post, &url)?;
        parse_optional_json(&response.body, &url)
    }

    /// PUT expecting 200.
    pub fn replace<T: Serialize + ?Sized>(&self, action: &str, body: &T) -> BasecampResult<Option<Value>> {
        self.replace_expecting(action, body, OK)
    }

    /// PUT expecting `expect`.
    pub fn replace_expecting<T: Serialize + ?Sized>(
        &self,
        action: &str,
        body: &T,
        expect: u16,
    ) -> BasecampResult<Option<Value>> {
        let url = self.qualified_url(action)?;
        let body = RequestBody::json(body)?.encode()?;
        let response = self
            .client
            .execute(HttpMethod::Put, url.clone(), Vec::new(), Some(body))?;
        check_status(&response, expect, HttpMethod::Put, &url)?;
        parse_optional_json(&response.body, &url)
    }

    /// DELETE expecting 204.
    pub fn remove(&self, action: &str) -> BasecampResult<()> {
        let url = self.qualified_url(action)?;
        let response = self
            .client
            .execute(HttpMethod::Delete, url.clone(), Vec::new(), None)?;
        check_status(&response, NO_CONTENT, HttpMethod::Delete, &url)
    }

    /// Lazily walks every page of `action`, starting at page 1.
    pub fn paginate(&self, action: &str, params: Vec<(String, String)>) -> Pages<'a> {
        Pages::new(self.clone(), action.to_string(), params)
    }
}

/// Maps a status other than `expected` to the matching error.
pub(crate) fn check_status(response: &HttpResponse, expected: u16, method: HttpMethod, url: &str) -> BasecampResult<()> {
    if response.status == expected {
        return Ok(());
    }
    warn!(%method, url, status = response.status, expected, "unexpected response status");
    Err(BasecampError::from_status(response.status, method, url))
}

pub(crate) fn parse_json(body: &[u8], url: &str) -> BasecampResult<Value> {
    serde_json::from_slice(body).map_err(|source| BasecampError::Deserialization {
        url: url.to_string(),
        source,
    })
}

fn parse_optional_json(body: &[u8], url: &str) -> BasecampResult<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    parse_json(body, url).map(Some)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::error::ErrorKind;
    use crate::http::JSON_CONTENT_TYPE;
    use crate::testing::FakeTransport;

    fn client(transport: &Arc<FakeTransport>) -> Client {
        Client::with_transport(Config::new("t", "ua").with_account_id(1), transport.clone())
    }

    #[test]
    fn fetch_passes_query_and_parses_body() {
        let transport = FakeTransport::new();
        transport.push_json(200, serde_json::json!({"id": 3}));
        let client = client(&transport);

        let value = client
            .endpoint()
            .fetch("projects/3", &[("page".to_string(), "2".to_string())])
            .unwrap();
        assert_eq!(value["id"], 3);

        let req = transport.last_request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://basecamp.com/1/api/v1/projects/3.json");
        assert_eq!(req.query, vec![("page".to_string(), "2".to_string())]);
        assert!(req.body.is_none());
    }

    #[test]
    fn fetch_rejects_non_200() {
        let transport = FakeTransport::new();
        transport.push_status(404);
        let client = client(&transport);

        let err = client.endpoint().fetch("projects/3", &[]).unwrap_err();
        match err {
            BasecampError::Api { status, method, url } => {
                assert_eq!(status, 404);
                assert_eq!(method, HttpMethod::Get);
                assert_eq!(url, "https://basecamp.com/1/api/v1/projects/3.json");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn fetch_maps_bad_json_to_decode_error() {
        let transport = FakeTransport::new();
        transport.push_raw(200, b"not json".to_vec());
        let err = client(&transport).endpoint().fetch("people", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn create_defaults_to_201() {
        let transport = FakeTransport::new();
        transport.push_status(200);
        let client = client(&transport);

        let body = RequestBody::json(&serde_json::json!({"name": "x"})).unwrap();
        let err = client.endpoint().create("projects", body).unwrap_err();
        assert!(matches!(err, BasecampError::Api { status: 200, method: HttpMethod::Post, .. }));
    }

    #[test]
    fn create_with_empty_body_returns_none() {
        let transport = FakeTransport::new();
        transport.push_status(204);
        let client = client(&transport);

        let body = RequestBody::json(&serde_json::json!({"ids": [1]})).unwrap();
        let result = client
            .endpoint()
            .create_expecting("projects/1/accesses", body, NO_CONTENT)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn create_sends_raw_payload_verbatim() {
        let transport = FakeTransport::new();
        transport.push_json(200, serde_json::json!({"token": "abc"}));
        let client = client(&transport);

        let payload = vec![0u8, 159, 146, 150];
        let result = client
            .endpoint()
            .create_expecting("attachments", RequestBody::raw(payload.clone(), "image/png"), OK)
            .unwrap();
        assert_eq!(result.unwrap()["token"], "abc");

        let req = transport.last_request();
        assert_eq!(req.body.as_deref(), Some(payload.as_slice()));
        assert_eq!(req.header("content-type"), Some("image/png"));
    }

    #[test]
    fn create_encodes_json_payload() {
        let transport = FakeTransport::new();
        transport.push_json(201, serde_json::json!({"id": 9}));
        let client = client(&transport);

        let body = RequestBody::json(&serde_json::json!({"name": "Launch"})).unwrap();
        client.endpoint().create("projects", body).unwrap();

        let req = transport.last_request();
        assert_eq!(req.header("content-type"), Some(JSON_CONTENT_TYPE));
        let sent: Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({"name": "Launch"}));
    }

    #[test]
    fn replace_honours_expected_status_override() {
        let transport = FakeTransport::new();
        transport.push_status(204);
        transport.push_status(204);
        let client = client(&transport);
        let endpoint = client.endpoint();

        assert!(endpoint
            .replace_expecting("calendars/4", &serde_json::json!({"name": "Ops"}), NO_CONTENT)
            .unwrap()
            .is_none());
        let err = endpoint
            .replace("calendars/4", &serde_json::json!({"name": "Ops"}))
            .unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[test]
    fn remove_expects_204() {
        let transport = FakeTransport::new();
        transport.push_status(204);
        transport.push_status(401);
        let client = client(&transport);
        let endpoint = client.endpoint();

        endpoint.remove("people/3").unwrap();
        let err = endpoint.remove("people/3").unwrap_err();
        assert!(matches!(err, BasecampError::Unauthorized { method: HttpMethod::Delete, .. }));
        assert_eq!(transport.last_request().method, HttpMethod::Delete);
    }

    #[test]
    fn missing_account_id_fails_before_any_request() {
        let transport = FakeTransport::new();
        let client = Client::with_transport(Config::new("t", "ua"), transport.clone());

        let err = client.endpoint().fetch("projects", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        let err = client.endpoint().remove("projects/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(transport.calls(), 0);
    }
}
