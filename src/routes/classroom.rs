//! Classroom CRUD routes, mounted under the API prefix.

use crate::handlers::classroom::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn classroom_routes(state: AppState) -> Router {
    Router::new()
        .route("/classrooms", get(list).post(create))
        .route("/classrooms/", get(list).post(create))
        .route(
            "/classrooms/:id",
            get(read).put(update).delete(delete_handler),
        )
        .route(
            "/classrooms/:id/",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
