//! Cursor-based retrieval of complete paged result sets.
//!
//! The remote API caps page size. Each page reports `hasMore`; while it is
//! set, the next request repeats the initial parameters plus a `before`
//! bound equal to the page key of the last item just received.

use tracing::{debug, warn};

use crate::error::{CoreError, TransportError};
use crate::requester::protocol::{check_remote_error, decode};
use crate::requester::{HttpRequester, QueryParams};
use crate::types::{BlockHeight, PageItem};

/// Query parameter carrying the cursor bound on follow-up pages.
const BEFORE_PARAM: &str = "before";

// ==============================================================================
// Page Request / Response
// ==============================================================================

/// A paged GET: endpoint, fixed query parameters, and the JSON key under
/// which the endpoint lists its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub params: QueryParams,
    pub items_key: &'static str,
}

impl PageRequest {
    pub fn new(url: impl Into<String>, items_key: &'static str) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
            items_key,
        }
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_owned(), value.to_string()));
        self
    }

    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.params.extend(params);
        self
    }

    /// The fixed parameters followed by the `before` bound.
    fn params_before(&self, before: BlockHeight) -> QueryParams {
        let mut params = self.params.clone();
        params.push((BEFORE_PARAM.to_owned(), before.to_string()));
        params
    }
}

/// One decoded page.
#[derive(Debug)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T: PageItem> PageResponse<T> {
    /// Decode a page body, failing on an embedded error string first.
    pub fn from_value(raw: serde_json::Value, items_key: &str) -> Result<Self, CoreError> {
        check_remote_error(&raw)?;

        let has_more = raw
            .get("hasMore")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        let items = match raw.get(items_key) {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(list) => decode(list.clone(), items_key)?,
        };

        Ok(Self { items, has_more })
    }

    /// The cursor for the next request: the last item's page key.
    fn next_cursor(&self, items_key: &str) -> Result<BlockHeight, CoreError> {
        self.items.last().map(T::page_key).ok_or_else(|| {
            TransportError::InvalidResponse(format!(
                "page reported hasMore with no `{items_key}` to derive a cursor from"
            ))
            .into()
        })
    }
}

// ==============================================================================
// Fetcher
// ==============================================================================

/// Drives the multi-page loop for one request at a time.
///
/// Holds no state between calls; each [`fetch_all`](Self::fetch_all) owns
/// its accumulator and cursor.
pub struct PaginatedFetcher<'a> {
    requester: &'a dyn HttpRequester,
}

impl<'a> PaginatedFetcher<'a> {
    pub fn new(requester: &'a dyn HttpRequester) -> Self {
        Self { requester }
    }

    /// Fetch every page of `request`, returning items in fetch order.
    ///
    /// Any transport failure or embedded remote error aborts the whole fetch
    /// and drops items already collected from earlier pages.
    pub async fn fetch_all<T: PageItem>(&self, request: &PageRequest) -> Result<Vec<T>, CoreError> {
        let mut results: Vec<T> = Vec::new();
        let mut before: Option<BlockHeight> = None;
        let mut page_number = 1usize;

        loop {
            let params = match before {
                None => request.params.clone(),
                Some(cursor) => request.params_before(cursor),
            };
            let raw = self.requester.get_json(&request.url, &params).await?;
            let page = PageResponse::<T>::from_value(raw, request.items_key)?;
            debug!(
                url = %request.url,
                page = page_number,
                items = page.items.len(),
                has_more = page.has_more,
                before = ?before,
                "fetched page"
            );

            if !page.has_more {
                results.extend(page.items);
                return Ok(results);
            }

            let cursor = page.next_cursor(request.items_key)?;
            // Ordering is the server's responsibility; a rising cursor is
            // reported but followed as-is.
            if let Some(previous) = before {
                if cursor > previous {
                    warn!(
                        url = %request.url,
                        page = page_number,
                        %previous,
                        %cursor,
                        "pagination cursor increased between pages"
                    );
                }
            }

            results.extend(page.items);
            before = Some(cursor);
            page_number += 1;
        }
    }
}
