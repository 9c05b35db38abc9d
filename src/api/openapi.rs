//! OpenAPI document for the REST endpoints.

use utoipa::OpenApi;

use crate::api::dto::{RegistrationRequest, RegistrationResponse};
use crate::api::handlers::{students, system};
use crate::domain::{Student, StudentId};
use crate::error::ErrorResponse;

/// Generated OpenAPI description of the service.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "student-registry",
        description = "Register students and look them up by id."
    ),
    paths(
        students::register_student,
        students::list_students,
        students::get_student,
        system::health_handler,
    ),
    components(schemas(
        Student,
        StudentId,
        RegistrationRequest,
        RegistrationResponse,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Students", description = "Student registration"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Routes serving Swagger UI at `/swagger-ui` and the document at
/// `/api-docs/openapi.json`.
#[cfg(feature = "swagger-ui")]
pub fn swagger_routes<S>() -> axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
