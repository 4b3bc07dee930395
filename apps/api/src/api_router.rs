use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{handlers, middleware};

mod public_auth;

pub fn build_router<S>(app_state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let protected_routes = Router::new()
        .route(
            "/clients/",
            get(handlers::clients::list_clients_handler),
        )
        .route(
            "/clients/{client_id}/",
            get(handlers::clients::client_detail_handler),
        )
        .route(
            "/clients/{client_id}/update/",
            post(handlers::clients::update_client_handler),
        )
        .route("/dashboard/", get(handlers::reports::dashboard_handler))
        .route("/reports/", get(handlers::reports::dashboard_handler))
        .route(
            "/reports/create/",
            get(handlers::reports::create_audit_metadata_handler)
                .post(handlers::reports::create_audit_handler),
        )
        .route(
            "/reports/{audit_id}/",
            get(handlers::reports::audit_detail_handler),
        )
        .route(
            "/reports/{audit_id}/share/",
            post(handlers::reports::share_audit_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(public_auth::build_session_routes())
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .with_state(app_state)
}
