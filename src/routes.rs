//! Route table.
//!
//! `/datasets/:dataset_id` resolves the dataset for every method before any
//! gate runs; mutations then pass `require_login` and `has_authorization` in
//! that order.

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{self, auth, datasets};
use crate::middleware::{dataset_by_id, has_authorization, require_login};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .merge(auth_routes(state.clone()))
        .merge(dataset_routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::auth_signup))
        .route("/auth/signin", post(auth::auth_signin))
        .route(
            "/users/me",
            get(auth::users_me).route_layer(from_fn_with_state(state, require_login)),
        )
}

fn dataset_routes(state: AppState) -> Router<AppState> {
    let login = from_fn_with_state(state.clone(), require_login);

    let collection = get(datasets::datasets_get)
        .merge(post(datasets::datasets_post).route_layer(login.clone()));

    let mutations = put(datasets::dataset_put)
        .delete(datasets::dataset_delete)
        .route_layer(from_fn(has_authorization))
        .route_layer(login);

    let record = get(datasets::dataset_get)
        .merge(mutations)
        .route_layer(from_fn_with_state(state, dataset_by_id));

    Router::new()
        .route("/datasets", collection)
        .route("/datasets/:dataset_id", record)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
