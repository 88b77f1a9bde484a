//! Messages posted to a project's message board.

use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::resources::{record, ProjectResource};
use crate::types::{AttachmentRef, MessagePayload, Record};

#[derive(Debug, Clone)]
pub struct Messages<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> ProjectResource<'a> for Messages<'a> {
    const SECTION: &'static str = "messages";

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self {
        Self { endpoint }
    }

    fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }
}

impl Messages<'_> {
    pub fn get(&self, message_id: u64) -> BasecampResult<Record> {
        self.endpoint.fetch(&self.item_path(message_id), &[])
    }

    /// Posts a new message. `attachments` reference files uploaded earlier.
    pub fn post(
        &self,
        subject: &str,
        content: Option<&str>,
        attachments: Option<Vec<AttachmentRef>>,
    ) -> BasecampResult<Record> {
        let body = MessagePayload {
            subject: Some(subject.to_string()),
            content: content.map(str::to_string),
            attachments,
        };
        self.endpoint
            .create(Self::SECTION, RequestBody::json(&body)?)
            .map(record)
    }

    pub fn update(
        &self,
        message_id: u64,
        subject: Option<&str>,
        content: Option<&str>,
        attachments: Option<Vec<AttachmentRef>>,
    ) -> BasecampResult<Record> {
        let body = MessagePayload {
            subject: subject.map(str::to_string),
            content: content.map(str::to_string),
            attachments,
        };
        self.endpoint
            .replace(&self.item_path(message_id), &body)
            .map(record)
    }
}
