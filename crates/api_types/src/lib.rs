use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Page size used when a list request carries no `limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Pagination window shared by every list endpoint.
///
/// A `limit` of zero or less disables pagination and returns every match.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

pub mod category {
    use super::*;

    /// Request body for creating or replacing a category.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CategoryRequest {
        pub name: String,
        pub description: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryResponse {
        pub id: i32,
        pub name: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pub description: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Query string of `GET /v1/categories`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryList {
        pub offset: Option<i64>,
        pub limit: Option<i64>,
        /// Case-insensitive partial match on the name.
        pub name: Option<String>,
    }

    impl CategoryList {
        pub fn page(&self) -> Pagination {
            Pagination {
                offset: self.offset,
                limit: self.limit,
            }
        }
    }
}

pub mod expense {
    use super::*;

    /// Request body for creating or replacing an expense.
    ///
    /// Missing fields take their zero value and are rejected by validation.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ExpenseRequest {
        pub category_id: i32,
        pub amount: f64,
        pub description: String,
        /// `dd-mm-yyyy` or `yyyy-mm-dd`.
        pub date: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseResponse {
        pub id: i32,
        pub category_id: i32,
        /// Empty when the category no longer exists.
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pub category_name: String,
        pub amount: f64,
        pub description: String,
        /// Always serialized as `yyyy-mm-dd`.
        pub date: NaiveDate,
    }

    /// Query string of `GET /v1/expenses`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseList {
        pub offset: Option<i64>,
        pub limit: Option<i64>,
        /// Case-insensitive partial match on the description.
        pub description: Option<String>,
        /// Zero or less means "any category".
        pub category_id: Option<i32>,
    }

    impl ExpenseList {
        pub fn page(&self) -> Pagination {
            Pagination {
                offset: self.offset,
                limit: self.limit,
            }
        }
    }
}

pub mod error {
    use super::*;

    /// JSON body of every non-2xx response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub rule: Option<String>,
    }

    impl ErrorBody {
        /// An error not tied to a single field.
        pub fn new(error: impl Into<String>) -> Self {
            Self {
                error: error.into(),
                field: None,
                rule: None,
            }
        }
    }
}
