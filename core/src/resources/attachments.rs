//! Binary uploads and per-project attachment listings.

use crate::client::Client;
use crate::endpoint::{Endpoint, OK};
use crate::error::BasecampResult;
use crate::http::RequestBody;
use crate::pagination::Pages;
use crate::resources::record;
use crate::types::Record;
use crate::url::PathPrefix;

pub const SECTION: &str = "attachments";

/// Media type used when neither the caller nor the file name gives one.
pub const FALLBACK_MEDIA_TYPE: &str = "text/plain";

#[derive(Debug, Clone)]
pub struct Attachments<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> Attachments<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            endpoint: Endpoint::new(client, PathPrefix::root()),
        }
    }

    pub fn list(&self, project_id: u64) -> Pages<'a> {
        let action = format!("{}/{project_id}/{SECTION}", super::projects::SECTION);
        self.endpoint.paginate(&action, Vec::new())
    }

    /// Uploads raw file contents. The response carries the token used to
    /// reference the file from messages, comments and uploads.
    ///
    /// `media_type` wins when given; otherwise it is guessed from
    /// `file_name`.
    pub fn upload(&self, contents: Vec<u8>, file_name: &str, media_type: Option<&str>) -> BasecampResult<Record> {
        let media_type = media_type
            .map(str::to_string)
            .unwrap_or_else(|| guess_media_type(file_name));
        self.endpoint
            .create_expecting(SECTION, RequestBody::raw(contents, media_type), OK)
            .map(record)
    }
}

fn guess_media_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or(FALLBACK_MEDIA_TYPE)
        .to_string()
}
