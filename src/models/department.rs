//! Department model and request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Department row with the derived count of assigned users.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartment {
    #[validate(length(min = 1, message = "department name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, message = "department name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_department_requires_name() {
        let missing = CreateDepartment {
            name: String::new(),
            description: None,
        };
        assert!(missing.validate().is_err());

        let ok = CreateDepartment {
            name: "Engineering".to_string(),
            description: Some("Builds things".to_string()),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn department_serializes_user_count() {
        let dept = Department {
            id: Uuid::nil(),
            name: "Engineering".to_string(),
            description: None,
            user_count: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&dept).unwrap();
        assert_eq!(json["user_count"], 3);
        assert_eq!(json["name"], "Engineering");
    }
}
