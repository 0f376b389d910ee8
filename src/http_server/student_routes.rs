//! Student HTTP Routes
//!
//! `POST /students` validates and stores one student; `GET /students`
//! lists every stored student, newest first.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::errors::ApiError;
use crate::schema::{validate_payload, StudentRecord};
use crate::storage::{RecordStore, StoreError};

// ==================
// Shared State
// ==================

/// Student state shared across handlers
pub struct StudentState {
    pub store: Arc<dyn RecordStore>,
}

impl StudentState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct StudentCreatedResponse {
    pub message: String,
    pub student: StudentRecord,
}

// ==================
// Student Routes
// ==================

/// Create student routes
pub fn student_routes(state: Arc<StudentState>) -> Router {
    Router::new()
        .route(
            "/students",
            get(list_students_handler).post(create_student_handler),
        )
        .with_state(state)
}

async fn create_student_handler(
    State(state): State<Arc<StudentState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentCreatedResponse>), ApiError> {
    let Json(payload) = body.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "rejected student body");
        ApiError::InvalidBody(rejection.body_text())
    })?;

    let student = validate_payload(&payload).map_err(|err| {
        warn!(failures = err.details().len(), "student failed validation");
        ApiError::Validation(err)
    })?;

    let store = Arc::clone(&state.store);
    let inserted = tokio::task::spawn_blocking(move || store.insert_one(student))
        .await
        .map_err(|e| {
            error!(error = %e, "insert task did not complete");
            ApiError::SaveFailed
        })?;

    let record = inserted.map_err(|err| match err {
        StoreError::Validation(err) => {
            warn!(failures = err.details().len(), "store rejected student");
            ApiError::Validation(err)
        }
        other => {
            error!(error = %other, "failed to save student");
            ApiError::SaveFailed
        }
    })?;

    info!(id = %record.id, roll_no = %record.student.roll_no, "student saved");

    Ok((
        StatusCode::CREATED,
        Json(StudentCreatedResponse {
            message: "Student saved".to_string(),
            student: record,
        }),
    ))
}

async fn list_students_handler(
    State(state): State<Arc<StudentState>>,
) -> Result<Json<Vec<StudentRecord>>, ApiError> {
    let store = Arc::clone(&state.store);
    let records = tokio::task::spawn_blocking(move || store.find_all_sorted_desc())
        .await
        .map_err(|e| {
            error!(error = %e, "list task did not complete");
            ApiError::FetchFailed
        })?
        .map_err(|e| {
            error!(error = %e, "failed to list students");
            ApiError::FetchFailed
        })?;

    Ok(Json(records))
}
