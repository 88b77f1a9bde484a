//! OAuth2 web-server flow against the launchpad host.
//!
//! The application sends the user to `authorize_url`, receives a `code` on
//! its redirect URL, and trades it for tokens with `access_token`.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::config::DEFAULT_LAUNCHPAD_URL;
use crate::endpoint::{check_status, parse_json, OK};
use crate::error::{BasecampError, BasecampResult};
use crate::http::{HttpMethod, HttpRequest, Transport, UreqTransport};
use crate::types::AccessToken;
use crate::url::launchpad_url;

const AUTHORIZE_PATH: &str = "authorization/new";
const TOKEN_PATH: &str = "authorization/token";
const FLOW_TYPE: &str = "web_server";

/// Registered application credentials.
#[derive(Clone)]
pub struct Auth {
    client_id: String,
    client_secret: SecretString,
    redirect_url: String,
    launchpad_url: String,
    transport: Arc<dyn Transport>,
}

impl Auth {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, redirect_url: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            redirect_url: redirect_url.into(),
            launchpad_url: DEFAULT_LAUNCHPAD_URL.to_string(),
            transport: Arc::new(UreqTransport::new()),
        }
    }

    pub fn with_launchpad_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.launchpad_url = url;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// URL of the dialog where the user grants the application access.
    pub fn authorize_url(&self) -> BasecampResult<String> {
        let base = launchpad_url(&self.launchpad_url, AUTHORIZE_PATH)?;
        let mut url = Url::parse(&base).map_err(|e| BasecampError::configuration(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("type", FLOW_TYPE)
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url);
        Ok(url.into())
    }

    /// Exchanges the authorization `code` for an access token, a refresh
    /// token and the token's lifetime.
    pub fn access_token(&self, code: &str) -> BasecampResult<AccessToken> {
        let url = launchpad_url(&self.launchpad_url, TOKEN_PATH)?;
        let query = vec![
            ("type".to_string(), FLOW_TYPE.to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("redirect_uri".to_string(), self.redirect_url.clone()),
            ("client_secret".to_string(), self.client_secret.expose_secret().clone()),
            ("code".to_string(), code.to_string()),
        ];

        debug!(%url, "exchanging authorization code");
        let response = self.transport.send(HttpRequest {
            method: HttpMethod::Post,
            url: url.clone(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            query,
            body: None,
        })?;
        check_status(&response, OK, HttpMethod::Post, &url)?;

        let body = parse_json(&response.body, &url)?;
        serde_json::from_value(body).map_err(|source| BasecampError::Deserialization { url, source })
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .field("launchpad_url", &self.launchpad_url)
            .finish_non_exhaustive()
    }
}
