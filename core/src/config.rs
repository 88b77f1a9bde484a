//! Client configuration.
//!
//! A `Config` is built once per application session and handed to
//! `Client::new`; it is never mutated afterwards.

use std::env;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{BasecampError, BasecampResult};

/// Account-scoped API base; `{account_id}` is substituted per request.
pub const DEFAULT_API_BASE_URL: &str = "https://basecamp.com/{account_id}/api/v1/";

/// Host of the authorization endpoints.
pub const DEFAULT_LAUNCHPAD_URL: &str = "https://launchpad.37signals.com/";

/// Placeholder replaced by the account id in `api_base_url`.
pub const ACCOUNT_ID_PLACEHOLDER: &str = "{account_id}";

pub const ENV_ACCESS_TOKEN: &str = "BASECAMP_ACCESS_TOKEN";
pub const ENV_USER_AGENT: &str = "BASECAMP_USER_AGENT";
pub const ENV_ACCOUNT_ID: &str = "BASECAMP_ACCOUNT_ID";
pub const ENV_API_BASE_URL: &str = "BASECAMP_API_BASE_URL";
pub const ENV_LAUNCHPAD_URL: &str = "BASECAMP_LAUNCHPAD_URL";

/// Connection settings shared by every endpoint of a `Client`.
#[derive(Clone)]
pub struct Config {
    access_token: SecretString,
    user_agent: String,
    account_id: Option<u64>,
    api_base_url: String,
    launchpad_url: String,
}

impl Config {
    /// `user_agent` identifies the application and a way to reach its
    /// authors, e.g. `"BusyFlow (http://busyflow.com)"`.
    pub fn new(access_token: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            user_agent: user_agent.into(),
            account_id: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            launchpad_url: DEFAULT_LAUNCHPAD_URL.to_string(),
        }
    }

    pub fn with_account_id(mut self, account_id: u64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Overrides the account-scoped base. It should contain
    /// `{account_id}`; a trailing slash is added when missing.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = with_trailing_slash(url.into());
        self
    }

    pub fn with_launchpad_url(mut self, url: impl Into<String>) -> Self {
        self.launchpad_url = with_trailing_slash(url.into());
        self
    }

    /// Reads the configuration from `BASECAMP_*` environment variables.
    pub fn from_env() -> BasecampResult<Self> {
        let token = required_var(ENV_ACCESS_TOKEN)?;
        let user_agent = required_var(ENV_USER_AGENT)?;
        let mut config = Self::new(token, user_agent);

        if let Ok(raw) = env::var(ENV_ACCOUNT_ID) {
            let account_id = raw.trim().parse::<u64>().map_err(|_| {
                BasecampError::configuration(format!("{ENV_ACCOUNT_ID} must be an integer, got {raw:?}"))
            })?;
            config = config.with_account_id(account_id);
        }
        if let Ok(url) = env::var(ENV_API_BASE_URL) {
            config = config.with_api_base_url(url);
        }
        if let Ok(url) = env::var(ENV_LAUNCHPAD_URL) {
            config = config.with_launchpad_url(url);
        }
        Ok(config)
    }

    pub fn account_id(&self) -> Option<u64> {
        self.account_id
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn launchpad_url(&self) -> &str {
        &self.launchpad_url
    }

    pub(crate) fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("account_id", &self.account_id)
            .field("api_base_url", &self.api_base_url)
            .field("launchpad_url", &self.launchpad_url)
            .finish()
    }
}

fn required_var(name: &str) -> BasecampResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BasecampError::configuration(format!("{name} is not set"))),
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
