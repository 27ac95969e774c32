//! Department routes: paginated listing and CRUD (admin only).

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::models::pagination::Pagination;
use crate::services::department::{self as department_service, DepartmentFilters, DepartmentPage};
use crate::AppState;

/// GET /api/v1/departments — list with pagination and search.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<DepartmentFilters>,
) -> Result<Json<ApiResponse<DepartmentPage>>, AppError> {
    let result = department_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/departments — create a new department.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateDepartment>,
) -> Result<Json<ApiResponse<Department>>, AppError> {
    body.validate()?;
    let dept = department_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(dept))
}

/// GET /api/v1/departments/:id — get department by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Department>>, AppError> {
    let dept = department_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(dept))
}

/// PUT /api/v1/departments/:id — update department.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDepartment>,
) -> Result<Json<ApiResponse<Department>>, AppError> {
    body.validate()?;
    let dept = department_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(dept))
}

/// DELETE /api/v1/departments/:id — delete an empty department.
pub async fn delete_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    department_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success("Department deleted successfully"))
}
