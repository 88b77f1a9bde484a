//! Comments on messages and todos.

use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::resources::{record, ProjectResource};
use crate::types::{AttachmentRef, CommentPayload, Record};

/// Kinds of item that accept comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commentable {
    Message,
    Todo,
}

impl Commentable {
    pub fn section(&self) -> &'static str {
        match self {
            Self::Message => "messages",
            Self::Todo => "todos",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Comments<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> ProjectResource<'a> for Comments<'a> {
    const SECTION: &'static str = "comments";

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self {
        Self { endpoint }
    }

    fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }
}

impl Comments<'_> {
    pub fn post(
        &self,
        on: Commentable,
        topic_id: u64,
        content: &str,
        attachments: Option<Vec<AttachmentRef>>,
    ) -> BasecampResult<Record> {
        let body = CommentPayload {
            content: content.to_string(),
            attachments,
        };
        let action = format!("{}/{topic_id}/{}", on.section(), Self::SECTION);
        self.endpoint
            .create(&action, RequestBody::json(&body)?)
            .map(record)
    }
}
