//! User administration routes (admin only).

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::query::UserListParams;
use crate::models::user::{BanUser, CreateUser, SetDepartment, SetPassword, SetRole, UserResponse};
use crate::services::user_admin::{self, UserPage};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UserCount {
    pub count: i64,
}

/// GET /api/v1/users — filtered, paginated user listing.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListParams>,
) -> Result<Json<ApiResponse<UserPage>>, AppError> {
    let result = user_admin::list(&state.db, &params).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/users/count — total user count.
pub async fn count(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<UserCount>>, AppError> {
    let count = user_admin::count(&state.db).await?;
    Ok(ApiResponse::success(UserCount { count }))
}

/// POST /api/v1/users — create a new user.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    body.validate()?;
    let user = user_admin::create(&state.db, &body).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// POST /api/v1/users/:id/ban — ban a user (reason required).
pub async fn ban(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<BanUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    body.validate()?;
    let user = user_admin::ban(&state.db, id, &body).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// POST /api/v1/users/:id/unban — lift a ban.
pub async fn unban(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = user_admin::unban(&state.db, id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// PUT /api/v1/users/:id/role — change a user's role.
pub async fn set_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<SetRole>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = user_admin::set_role(&state.db, id, &body).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// PUT /api/v1/users/:id/password — reset a user's password.
pub async fn set_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<SetPassword>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    body.validate()?;
    let user = user_admin::set_password(&state.db, id, &body.new_password).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// PUT /api/v1/users/:id/department — assign or clear department.
pub async fn set_department(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<SetDepartment>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = user_admin::set_department(&state.db, id, body.department_id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}
