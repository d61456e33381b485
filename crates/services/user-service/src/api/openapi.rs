//! OpenAPI documentation.

use utoipa::OpenApi;

use domain::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::user_handler::list_users,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::update_user,
        crate::api::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
        )
    ),
    tags(
        (name = "Users", description = "User record management endpoints"),
    )
)]
pub struct ApiDoc;
