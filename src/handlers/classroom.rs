//! Classroom handlers: list, read, create, update, delete.

use crate::error::{AppError, ValidationErrors};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    match body {
        Ok(Json(Value::Object(m))) => Ok(m),
        Ok(Json(_)) => Err(AppError::Validation(ValidationErrors::single(
            "body",
            "must be a JSON object",
        ))),
        Err(rejection) => Err(AppError::Validation(ValidationErrors::single(
            "body",
            rejection.body_text(),
        ))),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = RequestValidator::page(&params)?;
    let rows = state.classrooms.list(page).await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::id(&id_str)?;
    let row = state.classrooms.get(id).await?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let input = RequestValidator::create(&body)?;
    let row = state.classrooms.create(input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::id(&id_str)?;
    let body = body_to_map(body)?;
    let patch = RequestValidator::update(&body)?;
    let row = state.classrooms.update(id, patch).await?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::id(&id_str)?;
    state.classrooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
