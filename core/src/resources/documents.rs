//! Text documents of a project.

use crate::endpoint::Endpoint;
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::resources::{record, ProjectResource};
use crate::types::{DocumentPayload, Record};

#[derive(Debug, Clone)]
pub struct Documents<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> ProjectResource<'a> for Documents<'a> {
    const SECTION: &'static str = "documents";

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self {
        Self { endpoint }
    }

    fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }
}

impl Documents<'_> {
    pub fn list(&self) -> BasecampResult<Record> {
        self.endpoint.fetch(Self::SECTION, &[])
    }

    pub fn get(&self, document_id: u64) -> BasecampResult<Record> {
        self.endpoint.fetch(&self.item_path(document_id), &[])
    }

    pub fn post(&self, title: &str, content: Option<&str>) -> BasecampResult<Record> {
        let body = DocumentPayload {
            title: title.to_string(),
            content: content.map(str::to_string),
        };
        self.endpoint
            .create(Self::SECTION, RequestBody::json(&body)?)
            .map(record)
    }

    pub fn update(&self, document_id: u64, title: &str, content: Option<&str>) -> BasecampResult<Record> {
        let body = DocumentPayload {
            title: title.to_string(),
            content: content.map(str::to_string),
        };
        self.endpoint
            .replace(&self.item_path(document_id), &body)
            .map(record)
    }
}
