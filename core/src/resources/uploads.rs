//! Files in a project's "Files" section.

use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::resources::{record, ProjectResource};
use crate::types::{AttachmentRef, Record, UploadPayload};

#[derive(Debug, Clone)]
pub struct Uploads<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> ProjectResource<'a> for Uploads<'a> {
    const SECTION: &'static str = "uploads";

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self {
        Self { endpoint }
    }

    fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }
}

impl Uploads<'_> {
    pub fn get(&self, upload_id: u64) -> BasecampResult<Record> {
        self.endpoint.fetch(&self.item_path(upload_id), &[])
    }

    /// Publishes previously uploaded attachments, each named by the token
    /// `Attachments::upload` returned.
    pub fn post(&self, attachments: Vec<AttachmentRef>, content: Option<&str>) -> BasecampResult<Record> {
        let body = UploadPayload {
            content: content.map(str::to_string),
            attachments,
        };
        self.endpoint
            .create(Self::SECTION, RequestBody::json(&body)?)
            .map(record)
    }
}
