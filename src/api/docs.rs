//! OpenAPI document served next to the Swagger UI.

use utoipa::OpenApi;

use super::handlers;
use crate::error::ErrorBody;
use crate::users::{NewUser, User};

/// Path of the Swagger UI.
pub const SWAGGER_PATH: &str = "/swagger";
/// Path of the raw OpenAPI JSON document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "1.0.0",
        description = "CRUD operations on the users table"
    ),
    paths(
        handlers::health,
        handlers::list_users,
        handlers::create_user,
        handlers::get_user,
        handlers::update_user,
        handlers::delete_user
    ),
    components(schemas(User, NewUser, ErrorBody, handlers::HealthResponse)),
    tags(
        (name = "users", description = "User management"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
