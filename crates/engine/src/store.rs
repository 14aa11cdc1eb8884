//! Storage port.
//!
//! The services only talk to persistence through [`Store`]. The production
//! implementation is [`DatabaseStore`](crate::DatabaseStore); tests can swap
//! in a mock.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;
use thiserror::Error;

use crate::Money;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} not found in store")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseRecord {
    pub id: i32,
    pub category_id: i32,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An expense that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub category_id: i32,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Window over an id-ordered listing.
///
/// `limit: None` returns every match and ignores `offset`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: Option<u64>,
}

impl Page {
    /// Builds a page from raw wire integers. A `limit` of zero or less means
    /// "no pagination"; negative offsets are treated as zero.
    pub fn new(offset: i64, limit: i64) -> Self {
        if limit <= 0 {
            return Self::default();
        }
        Self {
            offset: offset.max(0) as u64,
            limit: Some(limit as u64),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    pub page: Page,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub page: Page,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    pub category_id: Option<i32>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_category(&self, draft: &CategoryDraft) -> Result<CategoryRecord, StoreError>;
    async fn list_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Vec<CategoryRecord>, StoreError>;
    async fn category(&self, id: i32) -> Result<Option<CategoryRecord>, StoreError>;
    async fn update_category(&self, category: &CategoryRecord) -> Result<(), StoreError>;
    async fn delete_category(&self, id: i32) -> Result<(), StoreError>;

    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseRecord, StoreError>;
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<ExpenseRecord>, StoreError>;
    async fn expense(&self, id: i32) -> Result<Option<ExpenseRecord>, StoreError>;
    async fn update_expense(&self, expense: &ExpenseRecord) -> Result<(), StoreError>;
    async fn delete_expense(&self, id: i32) -> Result<(), StoreError>;
}
