//! Router assembly: common routes at the root, classroom routes under the API prefix.

mod classroom;
mod common;

pub use classroom::classroom_routes;
pub use common::common_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Full application router with request tracing, timeout and body-size limit.
pub fn app(state: AppState, settings: &Settings) -> Router {
    let api = classroom_routes(state.clone());
    let router = if settings.api_prefix.is_empty() {
        common_routes(state).merge(api)
    } else {
        common_routes(state).nest(&settings.api_prefix, api)
    };
    router
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(TraceLayer::new_for_http())
}
