//! Discussion topics of a project.

use crate::endpoint::Endpoint;
use crate::pagination::Pages;
use crate::resources::ProjectResource;

#[derive(Debug, Clone)]
pub struct Topics<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> ProjectResource<'a> for Topics<'a> {
    const SECTION: &'static str = "topics";

    fn from_endpoint(endpoint: Endpoint<'a>) -> Self {
        Self { endpoint }
    }

    fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }
}

impl<'a> Topics<'a> {
    /// Every topic in the project, page by page.
    pub fn list(&self) -> Pages<'a> {
        self.endpoint.paginate(Self::SECTION, Vec::new())
    }
}
