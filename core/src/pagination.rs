//! Page-by-page listing of unbounded collections.
//!
//! # Design
//! `Pages` is a lazy iterator. It requests page 1 on first use, yields that
//! page's items in order, and requests the next page only once the buffer is
//! drained. A page holding fewer than `PAGE_SIZE` items ends the sequence, so
//! a collection whose size is an exact multiple of the page size always costs
//! one trailing request that comes back empty. Nothing is kept between
//! listings; calling the list operation again starts over at page 1.

use serde_json::Value;
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::{BasecampError, BasecampResult};

/// Number of items the service returns on a full page.
pub const PAGE_SIZE: usize = 50;

/// Lazily produced items of a paginated listing.
///
/// Yields `Err` at most once, after which the sequence ends.
#[derive(Debug)]
pub struct Pages<'a> {
    endpoint: Endpoint<'a>,
    action: String,
    params: Vec<(String, String)>,
    next_page: u32,
    buffer: std::vec::IntoIter<Value>,
    exhausted: bool,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(endpoint: Endpoint<'a>, action: String, params: Vec<(String, String)>) -> Self {
        Self {
            endpoint,
            action,
            params,
            next_page: 1,
            buffer: Vec::new().into_iter(),
            exhausted: false,
        }
    }

    /// Number of the page the next fetch will request.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    fn fetch_page(&self) -> BasecampResult<Vec<Value>> {
        let mut query = self.params.clone();
        query.push(("page".to_string(), self.next_page.to_string()));
        debug!(action = %self.action, page = self.next_page, "fetching page");

        let body = self.endpoint.fetch(&self.action, &query)?;
        serde_json::from_value(body).map_err(|source| match self.endpoint.qualified_url(&self.action) {
            Ok(url) => BasecampError::Deserialization { url, source },
            Err(err) => err,
        })
    }
}

impl Iterator for Pages<'_> {
    type Item = BasecampResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            if self.exhausted {
                return None;
            }
            match self.fetch_page() {
                Ok(items) => {
                    if items.len() < PAGE_SIZE {
                        self.exhausted = true;
                    }
                    self.next_page += 1;
                    self.buffer = items.into_iter();
                }
                Err(err) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
