//! Student registration handlers: register, list, get.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{RegistrationRequest, RegistrationResponse};
use crate::app_state::AppState;
use crate::domain::{Student, StudentId};
use crate::error::{ErrorResponse, RegistryError};

/// `POST /api/register` — Register a new student.
///
/// # Errors
///
/// Returns [`RegistryError`] on a missing field, an unusable value, a
/// malformed body, or an email that is already registered.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Students",
    summary = "Register a student",
    description = "Validates that name, email and grade are present, rejects emails that are already registered, and stores the student under the next sequential id.",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Student registered", body = RegistrationResponse),
        (status = 400, description = "Missing field or duplicate email", body = ErrorResponse),
    )
)]
pub async fn register_student(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RegistryError> {
    let Json(req) = payload?;
    let student = state.registration_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(student))))
}

/// `GET /api/students` — List all registered students.
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    summary = "List students",
    description = "Returns every registered student in registration order.",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
    )
)]
pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.registration_service.list_students().await)
}

/// `GET /api/students/{id}` — Get one student.
///
/// # Errors
///
/// Returns [`RegistryError::StudentNotFound`] if the student does not exist,
/// [`RegistryError::StudentIdOutOfRange`] for negative ids, or
/// [`RegistryError::MalformedBody`] if `id` is not an integer.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "Students",
    summary = "Get a student",
    description = "Returns the student registered under the given id.",
    params(
        ("id" = i64, Path, description = "Student id"),
    ),
    responses(
        (status = 200, description = "Student record", body = Student),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, RegistryError> {
    let Path(raw) = id?;
    let id = u64::try_from(raw).map_err(|_| RegistryError::StudentIdOutOfRange(raw))?;
    let student = state
        .registration_service
        .get_student(StudentId::new(id))
        .await?;
    Ok(Json(student))
}

/// Student routes, mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_student))
        .route("/students", get(list_students))
        .route("/students/{id}", get(get_student))
}
