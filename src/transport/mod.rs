//! HTTP/JSON transport layer.
//!
//! Thin routing over the merge engine: three read endpoints plus a health
//! probe, served with hyper http1 and one task per connection. The engine
//! is fully usable without this layer; nothing here adds semantics beyond
//! query decoding and status-code mapping.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::engine::MergeEngine;
use crate::error::LeadError;
use crate::filter::FilterParams;

/// Shared application state.
pub struct AppState {
    /// The merge/query engine behind every endpoint.
    pub engine: MergeEngine,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: bool,
    timestamp: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

/// Decodes the `/api/users` query string into filter parameters.
/// Unknown keys are ignored; values are percent-decoded.
fn parse_filters(query: Option<&str>) -> FilterParams {
    let mut params = FilterParams::new();

    if let Some(q) = query {
        for pair in q.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                let value = urlencoding::decode(value).unwrap_or_default();
                match key {
                    "search" => params = params.search(value),
                    "location_filter" => params = params.location_filter(value),
                    "school_filter" => params = params.school_filter(value),
                    "country_filter" => params = params.country_filter(value),
                    "source_filter" => params = params.source_filter(value),
                    "order_by" => params = params.order_by(value),
                    "order_direction" => params = params.order_direction(value),
                    _ => {}
                }
            }
        }
    }

    params
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let payload = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    let mut response = Response::new(Full::new(Bytes::from(payload)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    response
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response<Full<Bytes>> {
    json_response(
        status,
        &ErrorResponse {
            detail: detail.into(),
        },
    )
}

fn engine_failure(err: &LeadError) -> Response<Full<Bytes>> {
    error!("engine failure: {err}");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Database error: {err}"),
    )
}

/// Route one incoming request.
async fn handle_request<B>(
    state: Arc<AppState>,
    req: Request<B>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    info!("{method} {path}");

    let response = match (method, path.as_str()) {
        (Method::GET, "/api/users") => {
            let filters = parse_filters(req.uri().query());
            match state.engine.list_users(&filters) {
                Ok(users) => json_response(StatusCode::OK, &users),
                Err(err) => engine_failure(&err),
            }
        }

        (Method::GET, p) if p.starts_with("/api/users/") => {
            let raw_uid = &p["/api/users/".len()..];
            let Ok(uid) = urlencoding::decode(raw_uid) else {
                return Ok(error_response(StatusCode::BAD_REQUEST, "Invalid uid encoding"));
            };
            match state.engine.user_detail(&uid) {
                Ok(Some(detail)) => json_response(StatusCode::OK, &detail),
                Ok(None) => error_response(StatusCode::NOT_FOUND, "User not found"),
                Err(err) => engine_failure(&err),
            }
        }

        (Method::GET, "/api/filters") => match state.engine.filter_options() {
            Ok(options) => json_response(StatusCode::OK, &options),
            Err(err) => engine_failure(&err),
        },

        (Method::GET, "/health") => json_response(
            StatusCode::OK,
            &HealthResponse {
                status: "healthy",
                database: state.engine.storage_ready(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        ),

        (method, path) => {
            error_response(StatusCode::NOT_FOUND, format!("No route for {method} {path}"))
        }
    };

    Ok(response)
}

/// Serve requests on `addr` until ctrl-c.
///
/// # Errors
/// Returns the bind error when the listen address is unavailable.
pub async fn run(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {addr}");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        let state = Arc::clone(&state);
                        tokio::spawn(async move {
                            let io = TokioIo::new(stream);
                            let service =
                                service_fn(move |req| handle_request(Arc::clone(&state), req));
                            if let Err(err) =
                                http1::Builder::new().serve_connection(io, service).await
                            {
                                error!("error serving connection from {peer}: {err:?}");
                            }
                        });
                    }
                    Err(err) => error!("error accepting connection: {err:?}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Ok(());
            }
        }
    }
}
