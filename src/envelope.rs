// src/envelope.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// The uniform `{status, ...}` body returned by every resource handler.
///
/// The resource fields of `T` are flattened into the top-level object. A
/// failure carries `T::default()`, so clients always see the same keys.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    pub fn success(body: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            body,
        }
    }
}

impl<T: Default> Envelope<T> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            body: T::default(),
        }
    }
}

/// Body for envelopes with no resource fields.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

/// Turns a handler outcome into a response: `code` plus a success envelope,
/// or the error's own code plus a fail envelope shaped like `T`.
pub fn respond<T>(code: StatusCode, result: Result<T, AppError>) -> Response
where
    T: Serialize + Default,
{
    match result {
        Ok(body) => (code, Json(Envelope::success(body))).into_response(),
        Err(err) => err.into_envelope::<T>(),
    }
}
