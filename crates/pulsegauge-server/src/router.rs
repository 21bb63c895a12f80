//! Axum router wiring.
//!
//! `/metrics` and `/healthz` are always served; `/login` only when the login
//! counter is enabled.

use axum::{routing::get, Router};

use crate::{app_state::AppState, login, ops};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz));

    if state.cfg().server.login_enabled {
        router = router.route("/login", get(login::login));
    }

    router.with_state(state)
}
