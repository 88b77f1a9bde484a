//! Resource URL composition.
//!
//! Every API URL has the shape
//! `<api-base>/<account-id>/<section>[/<parent-id>/<section>]*/<action>.json`.
//! A `PathPrefix` carries the parent chain fixed when an endpoint is
//! constructed; the action is supplied per call.

use std::fmt::Display;

use url::Url;

use crate::config::{Config, ACCOUNT_ID_PLACEHOLDER};
use crate::error::{BasecampError, BasecampResult};

/// Ordered parent-resource segments prepended to every action path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPrefix {
    segments: Vec<String>,
}

impl PathPrefix {
    /// Prefix of account-level resources.
    pub fn root() -> Self {
        Self::default()
    }

    /// Appends `<section>/<id>` to the chain.
    pub fn nested(mut self, section: &str, id: impl Display) -> Self {
        self.segments.push(section.to_string());
        self.segments.push(id.to_string());
        self
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Joins the prefix and `action` with `/`.
    pub fn join(&self, action: &str) -> String {
        if self.segments.is_empty() {
            return action.to_string();
        }
        format!("{}/{}", self.segments.join("/"), action)
    }
}

/// Absolute `.json` URL for `action` under `prefix` in the configured account.
///
/// Fails with a configuration error when no account id is set, or when the
/// API base has no `{account_id}` placeholder to put it in.
pub fn qualified_url(config: &Config, prefix: &PathPrefix, action: &str) -> BasecampResult<String> {
    let account_id = config.account_id().ok_or_else(|| {
        BasecampError::configuration("pass an account id to the client to make this request")
    })?;
    if !config.api_base_url().contains(ACCOUNT_ID_PLACEHOLDER) {
        return Err(BasecampError::configuration(format!(
            "API base URL {:?} has no {ACCOUNT_ID_PLACEHOLDER} placeholder",
            config.api_base_url()
        )));
    }
    let account_url = config
        .api_base_url()
        .replace(ACCOUNT_ID_PLACEHOLDER, &account_id.to_string());
    let base = Url::parse(&account_url)
        .map_err(|e| BasecampError::configuration(format!("invalid API base URL {account_url:?}: {e}")))?;
    let relative = format!("{}.json", prefix.join(action));
    base.join(&relative)
        .map(String::from)
        .map_err(|e| BasecampError::configuration(format!("cannot resolve {relative:?}: {e}")))
}

/// Absolute URL of a path on the launchpad host. Needs no account id.
pub fn launchpad_url(base: &str, relative: &str) -> BasecampResult<String> {
    let base = Url::parse(base)
        .map_err(|e| BasecampError::configuration(format!("invalid launchpad URL {base:?}: {e}")))?;
    base.join(relative)
        .map(String::from)
        .map_err(|e| BasecampError::configuration(format!("cannot resolve {relative:?}: {e}")))
}
