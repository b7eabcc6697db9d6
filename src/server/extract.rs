use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// `axum::Json` answering malformed bodies with the JSON error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` answering unparsable ids with the JSON 404 envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);
