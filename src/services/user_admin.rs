//! Admin user management: filtered listing, creation, ban lifecycle, role
//! and password changes, and department assignment.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::query::{where_clause, UserListParams};
use crate::models::user::{
    BanUser, CreateUser, DepartmentRef, SetRole, User, UserRecord, UserResponse, UserRole,
};
use crate::services::auth as auth_service;
use crate::services::department as department_service;

/// Paged user listing envelope.
#[derive(Debug, Serialize)]
pub struct UserPage {
    pub records: Vec<UserRecord>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// One joined row of the user listing query.
#[derive(Debug, FromRow)]
struct UserListRow {
    id: Uuid,
    name: String,
    email: String,
    username: Option<String>,
    role: UserRole,
    banned: bool,
    ban_reason: Option<String>,
    ban_expires: Option<DateTime<Utc>>,
    department_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    department_name: Option<String>,
}

impl From<UserListRow> for UserRecord {
    fn from(row: UserListRow) -> Self {
        let department = match (row.department_id, row.department_name) {
            (Some(id), Some(name)) => Some(DepartmentRef { id, name }),
            _ => None,
        };
        UserRecord {
            user: UserResponse {
                id: row.id,
                name: row.name,
                email: row.email,
                username: row.username,
                role: row.role,
                banned: row.banned,
                ban_reason: row.ban_reason,
                ban_expires: row.ban_expires,
                department_id: row.department_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            department,
        }
    }
}

/// List users with search/filter predicates and an offset window.
///
/// Records are ordered by creation time descending with the ID as a
/// deterministic tie-break; `total` is the filtered count. The page fetch
/// and the count are independent reads and run concurrently.
pub async fn list(pool: &PgPool, params: &UserListParams) -> Result<UserPage, AppError> {
    let predicates = params.predicates();
    let clause = where_clause(&predicates, "u.");

    let count_sql = format!("SELECT COUNT(*) FROM users u {clause}");
    let data_sql = format!(
        "SELECT u.id, u.name, u.email, u.username, u.role, u.banned, u.ban_reason, \
                u.ban_expires, u.department_id, u.created_at, u.updated_at, \
                d.name AS department_name \
         FROM users u LEFT JOIN departments d ON d.id = u.department_id {clause} \
         ORDER BY u.created_at DESC, u.id DESC LIMIT {} OFFSET {}",
        params.limit(),
        params.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, UserListRow>(&data_sql);
    for predicate in &predicates {
        count_query = count_query.bind(predicate.bind_value());
        data_query = data_query.bind(predicate.bind_value());
    }

    let (total, rows) =
        tokio::try_join!(count_query.fetch_one(pool), data_query.fetch_all(pool))?;

    Ok(UserPage {
        records: rows.into_iter().map(UserRecord::from).collect(),
        total,
        limit: params.limit(),
        offset: params.offset(),
    })
}

/// Count all users.
pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Create a new user with a hashed password.
pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, AppError> {
    let password_hash = auth_service::hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, username, password_hash, role) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.username)
    .bind(&password_hash)
    .bind(input.role)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Email or username already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = %user.id, "Created user");
    Ok(user)
}

/// Ban a user. The reason is required; an optional duration (seconds from
/// now) fills `ban_expires`, which is stored but never auto-enforced.
pub async fn ban(pool: &PgPool, id: Uuid, input: &BanUser) -> Result<User, AppError> {
    let ban_expires = input
        .expires_in_secs
        .map(|secs| Utc::now() + Duration::seconds(secs));

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET banned = true, ban_reason = $2, ban_expires = $3, updated_at = NOW() \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&input.reason)
    .bind(ban_expires)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, reason = %input.reason, "Banned user");
    Ok(user)
}

/// Lift a ban. No precondition: unbanning an active user is a no-op.
pub async fn unban(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET banned = false, ban_reason = NULL, ban_expires = NULL, \
                updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, "Unbanned user");
    Ok(user)
}

/// Change a user's role.
pub async fn set_role(pool: &PgPool, id: Uuid, input: &SetRole) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(input.role)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, role = ?input.role, "Changed user role");
    Ok(user)
}

/// Reset a user's password.
pub async fn set_password(pool: &PgPool, id: Uuid, new_password: &str) -> Result<User, AppError> {
    let password_hash = auth_service::hash_password(new_password)?;

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&password_hash)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, "Reset user password");
    Ok(user)
}

/// Assign a user to a department, or clear the assignment with `None`.
pub async fn set_department(
    pool: &PgPool,
    id: Uuid,
    department_id: Option<Uuid>,
) -> Result<User, AppError> {
    if let Some(dept_id) = department_id {
        department_service::find_by_id(pool, dept_id).await?;
    }

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET department_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(department_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, department_id = ?department_id, "Assigned department");
    Ok(user)
}
