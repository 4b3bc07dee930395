use axum::Router;
use axum::routing::{get, post};

use crate::auth;
use crate::state::AppState;

pub(super) fn build_session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index_handler))
        .route(
            "/login/",
            post(auth::login_handler).get(auth::method_not_allowed_handler),
        )
        .route(
            "/logout/",
            post(auth::logout_handler).get(auth::method_not_allowed_handler),
        )
}
