//! Users API handlers.
//!
//! ```text
//! POST /users {"name":"Ana","email":"a@x.com","age":30}
//! GET /users
//! GET /users/1
//! GET /users/1/processed
//! DELETE /users/1
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, ProcessedUser, User, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users`.
///
/// Example JSON:
/// `{"name":"Ana","email":"a@x.com","age":30}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Accepted for compatibility; any integer is ignored and the service
    /// assigns the id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name; must not be blank.
    #[schema(example = "Ana")]
    pub name: String,
    /// Contact address.
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Age in years.
    #[schema(example = 30)]
    pub age: i64,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.name, value.email, value.age)
    }
}

/// Confirmation returned by `DELETE /users/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    /// Human-readable confirmation.
    #[schema(example = "User Ana deleted successfully")]
    pub message: String,
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyName => Error::invalid_request("name must not be empty")
            .with_details(json!({ "field": "name", "code": "empty_name" })),
    }
}

/// Create a user and notify the processing service.
///
/// The response does not depend on whether the notification succeeded.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let candidate =
        NewUser::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let user = state.users.create_user(candidate).await;
    Ok(web::Json(user))
}

/// List users in creation order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users", body = [User])),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> web::Json<Vec<User>> {
    web::Json(state.users.list_users().await)
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get_user(UserId::new(path.into_inner())).await?;
    Ok(web::Json(user))
}

/// Fetch one user joined with downstream processing output.
///
/// Downstream failures degrade `delegation_status` instead of failing the
/// request.
#[utoipa::path(
    get,
    path = "/users/{id}/processed",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User with processing output", body = ProcessedUser),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getProcessedUser"
)]
#[get("/users/{id}/processed")]
pub async fn get_processed_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<ProcessedUser>> {
    let view = state
        .users
        .get_processed_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(view))
}

/// Delete a user and notify the processing service.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    let removed = state.users.delete_user(UserId::new(path.into_inner())).await?;
    Ok(web::Json(DeleteUserResponse {
        message: format!("User {} deleted successfully", removed.name()),
    }))
}
