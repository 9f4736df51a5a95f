use axum::extract::{FromRequestParts, Query};
use axum::http::{HeaderMap, header::COOKIE, request::Parts};
use serde::Deserialize;

use crate::error::AppError;

/// Shared `?q=&skip=&limit=` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommonQueryParams {
    pub q: Option<String>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

impl CommonQueryParams {
    /// Applies skip/limit to a slice, clamping both ends.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.skip.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }
}

impl<S> FromRequestParts<S> for CommonQueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<CommonQueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request("INVALID_QUERY", e.body_text()))?;
        Ok(params)
    }
}

#[derive(Debug, Deserialize)]
struct QueryOnly {
    q: Option<String>,
}

/// `?q=` when present and non-empty, else the `last_query` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOrCookie(pub Option<String>);

const LAST_QUERY_COOKIE: &str = "last_query";

fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

impl<S> FromRequestParts<S> for QueryOrCookie
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(QueryOnly { q }) = Query::<QueryOnly>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request("INVALID_QUERY", e.body_text()))?;

        match q.filter(|q| !q.is_empty()) {
            Some(q) => Ok(Self(Some(q))),
            None => Ok(Self(
                cookie(&parts.headers, LAST_QUERY_COOKIE).map(str::to_owned),
            )),
        }
    }
}
