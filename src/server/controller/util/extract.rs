//! Body and query extractors whose rejections go through the portal's error mapping.
//!
//! Axum's own `Json` and `Query` reject with plain-text 400/415/422 responses. These
//! wrappers turn a rejection into [`RequestError::Validation`], so a malformed request gets
//! the same 400 body as any other validation failure.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::server::error::{request::RequestError, EnvelopedError, Error};

/// JSON body rendered as `{error}` when it cannot be deserialized
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Query string rendered as `{error}` when it cannot be deserialized
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

/// JSON body rendered as `{success: false, error}` when it cannot be deserialized
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopedJson<T>(pub T);

/// Query string rendered as `{success: false, error}` when it cannot be deserialized
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopedQuery<T>(pub T);

async fn json_body<T, S>(req: Request, state: &S) -> Result<T, Error>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    match Json::<T>::from_request(req, state).await {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(RequestError::Validation(rejection.body_text()).into()),
    }
}

async fn query_string<T, S>(parts: &mut Parts, state: &S) -> Result<T, Error>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    match Query::<T>::from_request_parts(parts, state).await {
        Ok(Query(value)) => Ok(value),
        Err(rejection) => Err(RequestError::Validation(rejection.body_text()).into()),
    }
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        json_body(req, state).await.map(Self)
    }
}

impl<T, S> FromRequest<S> for EnvelopedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = EnvelopedError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(json_body(req, state).await?))
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        query_string(parts, state).await.map(Self)
    }
}

impl<T, S> FromRequestParts<S> for EnvelopedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = EnvelopedError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(query_string(parts, state).await?))
    }
}
