//! Relational implementation of [`Store`] on top of sea-orm.

use async_trait::async_trait;
use sea_orm::{
    QueryFilter, QueryOrder, QuerySelect,
    prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};

use crate::{
    categories, expenses,
    store::{
        CategoryDraft, CategoryQuery, CategoryRecord, ExpenseDraft, ExpenseQuery, ExpenseRecord,
        Page, Store, StoreError,
    },
};

#[derive(Clone, Debug)]
pub struct DatabaseStore {
    database: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// `LOWER(column) LIKE '%needle%'`, portable across SQLite and PostgreSQL.
fn contains_ignore_case<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

trait ApplyPage: QuerySelect + Sized {
    fn apply_page(self, page: Page) -> Self;
}

impl<T> ApplyPage for T
where
    T: QuerySelect + Sized,
{
    fn apply_page(self, page: Page) -> Self {
        match page.limit {
            Some(limit) => self.offset(page.offset).limit(limit),
            None => self,
        }
    }
}

fn not_updated(err: DbErr, what: String) -> StoreError {
    match err {
        DbErr::RecordNotUpdated => StoreError::NotFound(what),
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl Store for DatabaseStore {
    async fn create_category(&self, draft: &CategoryDraft) -> Result<CategoryRecord, StoreError> {
        let model = categories::ActiveModel::from(draft)
            .insert(&self.database)
            .await?;
        tracing::debug!("inserted category {}", model.id);
        Ok(model.into())
    }

    async fn list_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        let mut select = categories::Entity::find().order_by_asc(categories::Column::Id);
        if let Some(name) = &query.name {
            select = select.filter(contains_ignore_case(categories::Column::Name, name));
        }
        let models = select.apply_page(query.page).all(&self.database).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn category(&self, id: i32) -> Result<Option<CategoryRecord>, StoreError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn update_category(&self, category: &CategoryRecord) -> Result<(), StoreError> {
        categories::ActiveModel::from(category)
            .update(&self.database)
            .await
            .map_err(|err| not_updated(err, format!("category {}", category.id)))?;
        Ok(())
    }

    async fn delete_category(&self, id: i32) -> Result<(), StoreError> {
        let res = categories::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        tracing::debug!("deleted {} category rows for id {id}", res.rows_affected);
        Ok(())
    }

    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseRecord, StoreError> {
        let model = expenses::ActiveModel::from(draft)
            .insert(&self.database)
            .await?;
        tracing::debug!("inserted expense {}", model.id);
        Ok(model.into())
    }

    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<ExpenseRecord>, StoreError> {
        let mut select = expenses::Entity::find().order_by_asc(expenses::Column::Id);
        if let Some(description) = &query.description {
            select = select.filter(contains_ignore_case(
                expenses::Column::Description,
                description,
            ));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(expenses::Column::CategoryId.eq(category_id));
        }
        let models = select.apply_page(query.page).all(&self.database).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn expense(&self, id: i32) -> Result<Option<ExpenseRecord>, StoreError> {
        let model = expenses::Entity::find_by_id(id).one(&self.database).await?;
        Ok(model.map(Into::into))
    }

    async fn update_expense(&self, expense: &ExpenseRecord) -> Result<(), StoreError> {
        expenses::ActiveModel::from(expense)
            .update(&self.database)
            .await
            .map_err(|err| not_updated(err, format!("expense {}", expense.id)))?;
        Ok(())
    }

    async fn delete_expense(&self, id: i32) -> Result<(), StoreError> {
        let res = expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        tracing::debug!("deleted {} expense rows for id {id}", res.rows_affected);
        Ok(())
    }
}
