//! Department service: paginated listing and CRUD with case-insensitive
//! name uniqueness.
//!
//! Uniqueness is enforced by a unique index on LOWER(name); the pre-checks
//! here exist to return precise Conflict messages, with the unique-violation
//! mapping as the authoritative backstop for concurrent writers.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::models::pagination::Pagination;

const SELECT_COLUMNS: &str = "d.id, d.name, d.description, \
     (SELECT COUNT(*) FROM users u WHERE u.department_id = d.id) AS user_count, \
     d.created_at, d.updated_at";

/// Filters for listing departments.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DepartmentFilters {
    pub search: Option<String>,
}

/// Paged department listing envelope.
#[derive(Debug, Serialize)]
pub struct DepartmentPage {
    pub records: Vec<Department>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

/// List departments with an optional search over name and description.
///
/// The page fetch and the filtered count are independent reads and run
/// concurrently.
pub async fn list(
    pool: &PgPool,
    filters: &DepartmentFilters,
    pagination: &Pagination,
) -> Result<DepartmentPage, AppError> {
    let search = filters
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));

    let where_clause = if search.is_some() {
        "WHERE (d.name ILIKE $1 OR d.description ILIKE $1)"
    } else {
        ""
    };

    let count_sql = format!("SELECT COUNT(*) FROM departments d {where_clause}");
    let data_sql = format!(
        "SELECT {SELECT_COLUMNS} FROM departments d {where_clause} \
         ORDER BY d.created_at DESC, d.id DESC LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, Department>(&data_sql);
    if let Some(ref pattern) = search {
        count_query = count_query.bind(pattern.clone());
        data_query = data_query.bind(pattern.clone());
    }

    let (total, records) =
        tokio::try_join!(count_query.fetch_one(pool), data_query.fetch_all(pool))?;

    Ok(DepartmentPage {
        records,
        total,
        page: pagination.current_page(),
        limit: pagination.limit(),
        offset: pagination.offset(),
    })
}

/// Find a department by ID, including its user count.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Department, AppError> {
    sqlx::query_as::<_, Department>(&format!(
        "SELECT {SELECT_COLUMNS} FROM departments d WHERE d.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Department not found".to_string()))
}

/// Find a department whose name matches case-insensitively, optionally
/// excluding one ID (for rename checks).
async fn find_by_name(
    pool: &PgPool,
    name: &str,
    exclude_id: Option<Uuid>,
) -> Result<Option<Uuid>, AppError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM departments WHERE LOWER(name) = LOWER($1) AND ($2::uuid IS NULL OR id <> $2)",
    )
    .bind(name)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(id)
}

/// Create a new department. Fails with Conflict on a case-insensitive
/// duplicate name.
pub async fn create(pool: &PgPool, input: &CreateDepartment) -> Result<Department, AppError> {
    if find_by_name(pool, &input.name, None).await?.is_some() {
        return Err(AppError::Conflict(
            "Department with this name already exists".to_string(),
        ));
    }

    let dept = sqlx::query_as::<_, Department>(
        "INSERT INTO departments (name, description) VALUES ($1, $2) \
         RETURNING id, name, description, 0::BIGINT AS user_count, created_at, updated_at",
    )
    .bind(&input.name)
    .bind(&input.description)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Department with this name already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(department_id = %dept.id, name = %dept.name, "Created department");
    Ok(dept)
}

/// Update a department's name and description.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &UpdateDepartment,
) -> Result<Department, AppError> {
    let existing = find_by_id(pool, id).await?;

    if find_by_name(pool, &input.name, Some(existing.id))
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Department with this name already exists".to_string(),
        ));
    }

    sqlx::query("UPDATE departments SET name = $2, description = $3, updated_at = NOW() WHERE id = $1")
        .bind(existing.id)
        .bind(&input.name)
        .bind(&input.description)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Department with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    find_by_id(pool, id).await
}

/// Delete a department. Blocked while any user is still assigned to it.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let existing = find_by_id(pool, id).await?;

    if existing.user_count > 0 {
        return Err(AppError::PreconditionFailed(
            "Cannot delete department with assigned users".to_string(),
        ));
    }

    sqlx::query("DELETE FROM departments WHERE id = $1")
        .bind(existing.id)
        .execute(pool)
        .await
        .map_err(|e| match e {
            // ON DELETE RESTRICT backstop for a user assigned concurrently
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::PreconditionFailed(
                    "Cannot delete department with assigned users".to_string(),
                )
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!(department_id = %id, "Deleted department");
    Ok(())
}
