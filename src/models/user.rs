//! User model with role-based access control and ban state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// Ban status of a user account.
///
/// Transitions: Active -> Banned via "ban" (reason required);
/// Banned -> Active via "unban" (no precondition). A stored expiry is
/// informational only; no automatic Banned -> Active transition exists.
#[derive(Debug, Clone, PartialEq)]
pub enum BanState {
    Active,
    Banned {
        reason: String,
        expires: Option<DateTime<Utc>>,
    },
}

/// Full user row from database (includes password_hash — never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub banned: bool,
    pub ban_reason: Option<String>,
    pub ban_expires: Option<DateTime<Utc>>,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn ban_state(&self) -> BanState {
        if self.banned {
            BanState::Banned {
                reason: self.ban_reason.clone().unwrap_or_default(),
                expires: self.ban_expires,
            }
        } else {
            BanState::Active
        }
    }
}

/// Minimal department reference embedded in user listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: Uuid,
    pub name: String,
}

/// User response DTO — excludes password_hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub role: UserRole,
    pub banned: bool,
    pub ban_reason: Option<String>,
    pub ban_expires: Option<DateTime<Utc>>,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            username: u.username,
            role: u.role,
            banned: u.banned,
            ban_reason: u.ban_reason,
            ban_expires: u.ban_expires,
            department_id: u.department_id,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// User listing record with the joined department reference.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: UserResponse,
    pub department: Option<DepartmentRef>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub username: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BanUser {
    #[validate(length(min = 1, message = "ban reason is required"))]
    pub reason: String,
    /// Ban duration in seconds; absent means a permanent ban.
    pub expires_in_secs: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetRole {
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPassword {
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetDepartment {
    pub department_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::nil(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            username: Some("test".to_string()),
            password_hash: "secret_hash".to_string(),
            role: UserRole::User,
            banned: false,
            ban_reason: None,
            ban_expires: None,
            department_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn user_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn unknown_role_rejected() {
        let result: Result<UserRole, _> = serde_json::from_str("\"superadmin\"");
        assert!(result.is_err());
    }

    #[test]
    fn user_response_excludes_password() {
        let response: UserResponse = sample_user().into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn ban_state_active_by_default() {
        assert_eq!(sample_user().ban_state(), BanState::Active);
    }

    #[test]
    fn ban_state_carries_reason_and_expiry() {
        let mut user = sample_user();
        user.banned = true;
        user.ban_reason = Some("policy violation".to_string());
        match user.ban_state() {
            BanState::Banned { reason, expires } => {
                assert_eq!(reason, "policy violation");
                assert!(expires.is_none());
            }
            BanState::Active => panic!("expected banned state"),
        }
    }

    #[test]
    fn create_user_validation() {
        let valid = CreateUser {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret1".to_string(),
            username: None,
            role: UserRole::User,
        };
        assert!(valid.validate().is_ok());

        let short_password = CreateUser {
            password: "abc".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let bad_email = CreateUser {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn ban_request_requires_reason() {
        let missing = BanUser {
            reason: String::new(),
            expires_in_secs: None,
        };
        assert!(missing.validate().is_err());

        let ok = BanUser {
            reason: "spam".to_string(),
            expires_in_secs: Some(86400),
        };
        assert!(ok.validate().is_ok());
    }
}
