//! Synchronous client for the Basecamp (BCX) REST API.
//!
//! # Overview
//! Typed calls that compose account-scoped `.json` URLs, send JSON (or raw
//! upload) bodies over a blocking transport, and hand back the service's
//! JSON records. The service owns all state and validation; this crate adds
//! no caching, retries or schema of its own.
//!
//! # Design
//! - `Client` holds the immutable `Config` and a `Transport`.
//! - `Endpoint` pairs a borrowed client with a parent-resource `PathPrefix`
//!   and implements the four verbs with their expected statuses.
//! - Resources live under `resources`; project-scoped ones share
//!   construction and deletion through `ProjectResource`.
//! - Long collections come back as the lazy `Pages` iterator.
//! - Failures are `BasecampError`, classified by `ErrorKind`.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod pagination;
pub mod resources;
pub mod types;
pub mod url;

#[cfg(test)]
mod testing;

pub use auth::Auth;
pub use client::Client;
pub use config::Config;
pub use endpoint::Endpoint;
pub use error::{BasecampError, BasecampResult, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport, UreqTransport};
pub use pagination::{Pages, PAGE_SIZE};
pub use resources::ProjectResource;
pub use types::*;
pub use crate::url::PathPrefix;
