//! Users API handlers.
//!
//! ```text
//! POST /users {"name":"Ada Lovelace","email":"ada@example.com","role":"admin"}
//! GET /users
//! GET /users/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, USER_NOT_FOUND_DETAIL, User, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_user_validation_error;

/// Create request body for `POST /users`.
///
/// Example JSON:
/// `{"name":"Ada Lovelace","email":"ada@example.com"}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name, 2 to 100 characters.
    #[schema(example = "Ada Lovelace", min_length = 2, max_length = 100)]
    pub name: String,
    /// Unique email address, 5 to 100 characters.
    #[schema(example = "ada@example.com", min_length = 5, max_length = 100)]
    pub email: String,
    /// Role label, 2 to 50 characters; defaults to `user`.
    #[schema(example = "user", min_length = 2, max_length = 50)]
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let CreateUserRequest { name, email, role } = value;
        NewUser::try_from_strings(name, email, role)
    }
}

/// Register a user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::inbound::http::users::create_user;
///
/// let app = App::new().service(create_user);
/// ```
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request or email already registered", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let user = state.users.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(user))
}

/// List every registered user in creation order.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user by identifier.
///
/// Identifiers that are not UUIDs cannot name a stored user, so they get
/// the same 404 as an unknown UUID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner()).map_err(|_| Error::not_found(USER_NOT_FOUND_DETAIL))?;
    let user = state.users_query.get_user(&id).await?;
    Ok(web::Json(user))
}
