//! `/login` handler.
//!
//! Counts requests per client IP and greets the caller:
//! `GET /login?firstname=wulin&lastname=peng` -> `Hello wulin peng`.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::context::client_ip;

const DEFAULT_FIRSTNAME: &str = "Guest";

/// Greeting parameters. A repeated key resolves to its first value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginQuery {
    pub firstname: String,
    pub lastname: String,
}

impl LoginQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self {
            firstname: first("firstname").unwrap_or_else(|| DEFAULT_FIRSTNAME.to_string()),
            lastname: first("lastname").unwrap_or_default(),
        }
    }
}

pub fn greeting(firstname: &str, lastname: &str) -> String {
    format!("Hello {firstname} {lastname}")
}

pub async fn login(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let q = LoginQuery::from_pairs(&pairs);
    let ip = client_ip::resolve(
        &headers,
        peer.map(|ConnectInfo(addr)| addr),
        state.cfg().server.trust_forwarded_headers,
    );

    if let Some(counter) = state.login_count() {
        if let Err(e) = counter.inc(&[ip.as_str()]) {
            tracing::error!(error = %e, code = e.code(), "login counter update failed");
        }
    }
    tracing::debug!(client_ip = %ip, firstname = %q.firstname, "login");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        greeting(&q.firstname, &q.lastname),
    )
        .into_response()
}
