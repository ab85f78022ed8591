//! Request builder and response normalizer for Brainstem endpoints.
//!
//! # Design
//! Each operation is split into a `build_*` function producing an
//! `HttpRequest` and an async function that sends it through a `Transport`
//! and normalizes the result. Every request carries the same header set
//! (`Content-Type: application/json` and the CSRF token) and includes
//! credentials.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::http::{Credentials, HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryParams;
use crate::transport::Transport;

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Build a GET for a collection or single resource.
pub fn build_fetch(token: &str, uri: &str, params: &QueryParams) -> HttpRequest {
    let url = format!("{uri}?{}", params.to_query_string());
    make_request(HttpMethod::Get, token, url, None)
}

/// Build a POST whose body is `{model_name: attributes, ...additional}`.
pub fn build_create<A>(
    token: &str,
    uri: &str,
    model_name: &str,
    attributes: &A,
    additional: Option<&Map<String, Value>>,
) -> Result<HttpRequest, ApiError>
where
    A: Serialize + ?Sized,
{
    let body = model_body(model_name, attributes, additional)?;
    Ok(make_request(HttpMethod::Post, token, uri.to_string(), Some(body)))
}

/// Same body as [`build_create`], sent as a PATCH.
pub fn build_update<A>(
    token: &str,
    uri: &str,
    model_name: &str,
    attributes: &A,
    additional: Option<&Map<String, Value>>,
) -> Result<HttpRequest, ApiError>
where
    A: Serialize + ?Sized,
{
    let body = model_body(model_name, attributes, additional)?;
    Ok(make_request(HttpMethod::Patch, token, uri.to_string(), Some(body)))
}

pub fn build_destroy(token: &str, uri: &str) -> HttpRequest {
    make_request(HttpMethod::Delete, token, uri.to_string(), None)
}

/// Fetch a resource with list parameters encoded into the query string.
pub async fn fetch<T: Transport>(
    transport: &T,
    token: &str,
    uri: &str,
    params: &QueryParams,
) -> Result<Value, ApiError> {
    send(transport, build_fetch(token, uri, params)).await
}

pub async fn create<T, A>(
    transport: &T,
    token: &str,
    uri: &str,
    model_name: &str,
    attributes: &A,
    additional: Option<&Map<String, Value>>,
) -> Result<Value, ApiError>
where
    T: Transport,
    A: Serialize + ?Sized,
{
    let request = build_create(token, uri, model_name, attributes, additional)?;
    send(transport, request).await
}

pub async fn update<T, A>(
    transport: &T,
    token: &str,
    uri: &str,
    model_name: &str,
    attributes: &A,
    additional: Option<&Map<String, Value>>,
) -> Result<Value, ApiError>
where
    T: Transport,
    A: Serialize + ?Sized,
{
    let request = build_update(token, uri, model_name, attributes, additional)?;
    send(transport, request).await
}

pub async fn destroy<T: Transport>(transport: &T, token: &str, uri: &str) -> Result<Value, ApiError> {
    send(transport, build_destroy(token, uri)).await
}

/// Send `request` and normalize the response.
pub async fn send<T: Transport>(transport: &T, request: HttpRequest) -> Result<Value, ApiError> {
    debug!(method = %request.method, url = %request.url, "sending request");
    let response = transport.send(request).await.map_err(ApiError::Transport)?;
    normalize_response(response)
}

/// Resolve with the parsed body on 2xx, otherwise reject with it.
pub fn normalize_response(response: HttpResponse) -> Result<Value, ApiError> {
    if response.ok() {
        return response.json();
    }
    let body = response.json()?;
    debug!(status = response.status, "request rejected");
    Err(ApiError::Rejected(body))
}

fn model_body<A>(
    model_name: &str,
    attributes: &A,
    additional: Option<&Map<String, Value>>,
) -> Result<String, ApiError>
where
    A: Serialize + ?Sized,
{
    let attributes =
        serde_json::to_value(attributes).map_err(|e| ApiError::Serialization(e.to_string()))?;
    let mut body = Map::new();
    body.insert(model_name.to_string(), attributes);
    if let Some(additional) = additional {
        for (key, value) in additional {
            body.insert(key.clone(), value.clone());
        }
    }
    serde_json::to_string(&body).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn make_request(method: HttpMethod, token: &str, url: String, body: Option<String>) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (CSRF_HEADER.to_string(), token.to_string()),
        ],
        credentials: Credentials::Include,
        body,
    }
}
