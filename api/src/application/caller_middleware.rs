use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use nutrilens_core::domain::quota::CallerKey;

use crate::application::http::server::app_state::AppState;

const UNKNOWN_CALLER: &str = "unknown";

/// Quota identity of the current request, stored in request extensions
#[derive(Clone, Debug)]
pub struct CallerContext {
    pub key: CallerKey,
}

/// Resolves the caller's address. `X-Forwarded-For` is only honoured when
/// the server runs behind a trusted proxy.
pub async fn caller_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let forwarded = state
        .args
        .server
        .trust_proxy
        .then(|| forwarded_for(req.headers()))
        .flatten();

    let key = forwarded
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| UNKNOWN_CALLER.to_string());

    req.extensions_mut().insert(CallerContext {
        key: CallerKey::new(key),
    });

    next.run(req).await
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}
