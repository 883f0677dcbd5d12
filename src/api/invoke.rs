use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::Response,
};
use base64::Engine;
use std::sync::Arc;

use super::headers::{to_header_map, HeaderMapExt};
use crate::error::HostError;
use crate::models::{InvocationRequest, InvocationResponse};
use crate::services::FunctionRegistry;

/// Invoke a function with a sub-path
///
/// The remainder after the function name becomes the invocation path, so
/// `/.netlify/functions/resize/img.png/ratio/2` runs `resize` with
/// `/img.png/ratio/2`. Status, headers and body come from the function.
#[utoipa::path(
    get,
    path = "/.netlify/functions/{name}/{rest}",
    responses(
        (status = 200, description = "Function response; status, headers and body are chosen by the function"),
        (status = 404, description = "No function with this name"),
        (status = 502, description = "Function failed or returned an invalid response"),
    ),
    params(
        ("name" = String, Path, description = "Function name, e.g. resize"),
        ("rest" = String, Path, description = "Path passed to the function"),
    ),
    tag = "Functions"
)]
pub async fn handle_invoke(
    State(registry): State<Arc<FunctionRegistry>>,
    Path((name, rest)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, HostError> {
    let path = format!("/{}", rest.trim_start_matches('/'));
    invoke(&registry, &name, &path, &method, &headers).await
}

/// Invoke a function at its root path
#[utoipa::path(
    get,
    path = "/.netlify/functions/{name}",
    responses(
        (status = 200, description = "Function response; status, headers and body are chosen by the function"),
        (status = 404, description = "No function with this name"),
        (status = 502, description = "Function failed or returned an invalid response"),
    ),
    params(
        ("name" = String, Path, description = "Function name, e.g. test"),
    ),
    tag = "Functions"
)]
pub async fn handle_invoke_root(
    State(registry): State<Arc<FunctionRegistry>>,
    Path(name): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, HostError> {
    invoke(&registry, &name, "/", &method, &headers).await
}

async fn invoke(
    registry: &FunctionRegistry,
    name: &str,
    path: &str,
    method: &Method,
    headers: &HeaderMap,
) -> Result<Response, HostError> {
    let function = registry
        .get(name)
        .ok_or_else(|| HostError::FunctionNotFound(name.to_string()))?;

    let request = InvocationRequest {
        path: path.to_string(),
        http_method: method.as_str().to_string(),
        headers: headers.to_invocation_headers(),
    };

    tracing::info!(function = name, path = %request.path, method = %method, "Invoking function");

    // Functions block (origin fetch, pause), keep them off the async workers
    let envelope = tokio::task::spawn_blocking(move || function.invoke(&request))
        .await
        .map_err(|e| HostError::Internal(format!("function task failed: {e}")))??;

    tracing::debug!(
        function = name,
        status = envelope.status_code,
        headers = envelope.headers.len(),
        base64 = envelope.is_base64_encoded,
        builder = envelope.metadata.map(|m| m.builder_function),
        "Function returned"
    );

    into_http_response(envelope)
}

/// Translate a response envelope into a real HTTP response.
pub fn into_http_response(envelope: InvocationResponse) -> Result<Response, HostError> {
    let status = u16::try_from(envelope.status_code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| {
            HostError::InvalidResponse(format!("status code {}", envelope.status_code))
        })?;

    let headers = to_header_map(&envelope.headers)?;

    let body = if envelope.is_base64_encoded {
        base64::engine::general_purpose::STANDARD
            .decode(envelope.body.as_bytes())
            .map_err(|e| HostError::InvalidResponse(format!("body is not valid base64: {e}")))?
    } else {
        envelope.body.into_bytes()
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
