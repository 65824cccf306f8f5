// src/utils/pagination.rs

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{Uri, request::Parts},
};

use crate::config::QUESTIONS_PER_PAGE;

/// Query parameters accepted by every paginated listing.
///
/// Extraction never rejects: `page` stays a raw string so that malformed or
/// repeated input degrades to page 1 instead of failing the request.
#[derive(Debug, Default)]
pub struct PageParams {
    pub page: Option<String>,
}

impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

impl PageParams {
    /// Reads the first `page` value of the query string, ignoring anything
    /// that does not decode.
    pub fn from_uri(uri: &Uri) -> Self {
        let page = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .ok()
            .and_then(|Query(pairs)| {
                pairs
                    .into_iter()
                    .find(|(key, _)| key == "page")
                    .map(|(_, value)| value)
            });

        Self { page }
    }

    /// The requested 1-based page; absent, non-numeric and non-positive
    /// values all resolve to 1.
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .and_then(|page| usize::try_from(page).ok())
            .unwrap_or(1)
    }
}

/// Returns page `page` of `selection`, rendered into its public form.
///
/// A page past the end is empty.
pub fn paginate<'a, T, R>(page: usize, selection: &'a [T]) -> Vec<R>
where
    R: From<&'a T>,
{
    let start = page
        .max(1)
        .checked_sub(1)
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
        .unwrap_or(usize::MAX);

    selection
        .iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .map(R::from)
        .collect()
}
