//! OpenAPI description of the user API.
//!
//! Paths are relative to the `/api/v1` server URL, matching where
//! [`create_router`](crate::routes::create_router) nests them.

use userdir_core::{User, UserDraft, UserId};
use utoipa::OpenApi;

use crate::{
    error::{ErrorBody, MessageBody},
    routes,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = "1.0",
        description = "This is a sample server for managing users.",
        contact(
            name = "API Support",
            url = "http://www.swagger.io/support",
            email = "support@swagger.io",
        ),
        license(name = "Apache 2.0", url = "http://www.apache.org/licenses/LICENSE-2.0.html"),
    ),
    servers((url = "/api/v1")),
    paths(
        routes::list_users,
        routes::get_user,
        routes::create_user,
        routes::update_user,
        routes::delete_user,
    ),
    components(schemas(User, UserDraft, UserId, MessageBody, ErrorBody)),
    tags((name = "users", description = "User records")),
)]
pub struct ApiDoc;

/// Build the OpenAPI document served next to the Swagger UI.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
