//! List query construction: a closed vocabulary of searchable/filterable
//! fields mapped to SQL predicates with positional binds.
//!
//! Field and operator names arrive as query-string values; anything outside
//! the enumerated sets fails deserialization at the boundary instead of
//! reaching the query builder.

use serde::Deserialize;

/// Fields the free-text search may target.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    Name,
    Email,
    Username,
}

impl SearchField {
    fn column(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Email => "email",
            SearchField::Username => "username",
        }
    }
}

/// Fields the structured filter may target.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Name,
    Email,
    Username,
    Role,
    Banned,
    DepartmentId,
}

impl FilterField {
    fn column(self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Email => "email",
            FilterField::Username => "username",
            FilterField::Role => "role",
            FilterField::Banned => "banned",
            FilterField::DepartmentId => "department_id",
        }
    }
}

/// Predicate operator: exact match or case-insensitive substring.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    #[default]
    Eq,
    Contains,
}

/// One WHERE-clause condition with its bind value.
///
/// Columns are compared through a text cast so a single construction covers
/// string, enum, boolean, and uuid columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: FilterOp,
    value: String,
}

impl Predicate {
    pub fn new(column: &'static str, op: FilterOp, value: &str) -> Self {
        Self {
            column,
            op,
            value: value.to_string(),
        }
    }

    /// SQL fragment for this predicate, using positional parameter `param`.
    /// `alias` qualifies the column ("" or a table alias like "u.").
    pub fn to_sql(&self, alias: &str, param: usize) -> String {
        match self.op {
            FilterOp::Eq => format!("{alias}{}::text = ${param}", self.column),
            FilterOp::Contains => format!("{alias}{}::text ILIKE ${param}", self.column),
        }
    }

    /// Value to bind for this predicate (ILIKE pattern for Contains).
    pub fn bind_value(&self) -> String {
        match self.op {
            FilterOp::Eq => self.value.clone(),
            FilterOp::Contains => format!("%{}%", self.value),
        }
    }
}

/// Query parameters accepted by the user listing endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserListParams {
    pub search_value: Option<String>,
    pub search_field: Option<SearchField>,
    pub filter_field: Option<FilterField>,
    pub filter_value: Option<String>,
    pub filter_operator: FilterOp,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl UserListParams {
    const MAX_LIMIT: i64 = 100;
    const DEFAULT_LIMIT: i64 = 10;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Build the filter descriptor for these parameters.
    ///
    /// Search and filter compose conjunctively (AND). A search or filter with
    /// a missing half (value without field, field without value) applies
    /// nothing. Empty parameters produce an empty descriptor (matches all).
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let (Some(value), Some(field)) = (&self.search_value, self.search_field) {
            if !value.is_empty() {
                predicates.push(Predicate::new(field.column(), FilterOp::Contains, value));
            }
        }

        if let (Some(field), Some(value)) = (self.filter_field, &self.filter_value) {
            if !value.is_empty() {
                predicates.push(Predicate::new(field.column(), self.filter_operator, value));
            }
        }

        predicates
    }
}

/// Render predicates into a WHERE clause, with parameters numbered from 1.
pub fn where_clause(predicates: &[Predicate], alias: &str) -> String {
    if predicates.is_empty() {
        return String::new();
    }
    let conditions: Vec<String> = predicates
        .iter()
        .enumerate()
        .map(|(i, p)| p.to_sql(alias, i + 1))
        .collect();
    format!("WHERE {}", conditions.join(" AND "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_match_all() {
        let params = UserListParams::default();
        assert!(params.predicates().is_empty());
        assert_eq!(where_clause(&params.predicates(), ""), "");
    }

    #[test]
    fn search_builds_case_insensitive_contains() {
        let params = UserListParams {
            search_value: Some("ann".to_string()),
            search_field: Some(SearchField::Name),
            ..Default::default()
        };
        let predicates = params.predicates();
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].to_sql("", 1), "name::text ILIKE $1");
        assert_eq!(predicates[0].bind_value(), "%ann%");
    }

    #[test]
    fn filter_eq_is_exact() {
        let params = UserListParams {
            filter_field: Some(FilterField::Role),
            filter_value: Some("admin".to_string()),
            filter_operator: FilterOp::Eq,
            ..Default::default()
        };
        let predicates = params.predicates();
        assert_eq!(predicates[0].to_sql("u.", 1), "u.role::text = $1");
        assert_eq!(predicates[0].bind_value(), "admin");
    }

    #[test]
    fn search_and_filter_compose_conjunctively() {
        let params = UserListParams {
            search_value: Some("ann".to_string()),
            search_field: Some(SearchField::Email),
            filter_field: Some(FilterField::Banned),
            filter_value: Some("true".to_string()),
            filter_operator: FilterOp::Eq,
            ..Default::default()
        };
        let predicates = params.predicates();
        assert_eq!(predicates.len(), 2);
        assert_eq!(
            where_clause(&predicates, "u."),
            "WHERE u.email::text ILIKE $1 AND u.banned::text = $2"
        );
    }

    #[test]
    fn search_value_without_field_applies_nothing() {
        let params = UserListParams {
            search_value: Some("ann".to_string()),
            ..Default::default()
        };
        assert!(params.predicates().is_empty());
    }

    #[test]
    fn unknown_search_field_rejected_at_boundary() {
        let result: Result<SearchField, _> = serde_json::from_str("\"passwordHash\"");
        assert!(result.is_err());
        let result: Result<FilterField, _> = serde_json::from_str("\"banReason\"");
        assert!(result.is_err());
    }

    #[test]
    fn known_fields_deserialize_from_camel_case() {
        let field: FilterField = serde_json::from_str("\"departmentId\"").unwrap();
        assert_eq!(field, FilterField::DepartmentId);
        let op: FilterOp = serde_json::from_str("\"contains\"").unwrap();
        assert_eq!(op, FilterOp::Contains);
    }

    #[test]
    fn operator_defaults_to_eq() {
        assert_eq!(FilterOp::default(), FilterOp::Eq);
    }

    #[test]
    fn limit_and_offset_defaults() {
        let params = UserListParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);

        let params = UserListParams {
            limit: Some(1000),
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
    }
}
