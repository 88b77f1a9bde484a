//! Request payloads and the opaque record type.
//!
//! # Design
//! Records returned by the service are passed through as JSON values; the
//! client does not impose a schema on them. Payload structs only pin down the
//! field names each operation sends. Where an operation always sends its full
//! field set, `None` is serialized as `null`; where the service accepts any
//! subset (todos, calendar events), unset fields are left out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A remote object (project, message, todo, ...) as returned by the API.
pub type Record = serde_json::Value;

/// Name plus optional description, used by projects and todo lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedItem {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveProject {
    pub archived: bool,
}

/// Who to add to a project or calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessGrant {
    pub ids: Vec<u64>,
    pub email_addresses: Vec<String>,
}

/// A file previously uploaded through `Attachments::upload`, referenced by
/// the token the upload returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttachmentRef {
    pub token: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagePayload {
    pub subject: Option<String>,
    pub content: Option<String>,
    pub attachments: Option<Vec<AttachmentRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentPayload {
    pub content: String,
    pub attachments: Option<Vec<AttachmentRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateTodoList {
    pub name: String,
    pub description: Option<String>,
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentPayload {
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadPayload {
    pub content: Option<String>,
    pub attachments: Vec<AttachmentRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarPayload {
    pub name: String,
}

/// Person or group a todo is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignee {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Assignee {
    pub fn person(id: u64) -> Self {
        Self {
            id,
            kind: "Person".to_string(),
        }
    }
}

/// Fields of a todo. Creation uses the first three; updates may also set
/// `completed` and `position`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TodoFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalendarEventFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Tokens returned by the OAuth2 code exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}
