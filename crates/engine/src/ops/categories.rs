use std::sync::Arc;

use api_types::category::{CategoryRequest, CategoryResponse};

use crate::{
    Clock, EngineError, ResultEngine,
    store::{CategoryDraft, CategoryQuery, CategoryRecord, Page, Store},
    util::{normalize_category_name, normalize_filter, validate_description},
};

/// Category domain service.
///
/// Validates and persists categories and offers the existence check the
/// expense service relies on.
#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Create a category. The name is stored trimmed.
    pub async fn create(&self, request: CategoryRequest) -> ResultEngine<CategoryResponse> {
        let name = normalize_category_name(&request.name)?;
        validate_description(&request.description)?;

        let now = self.clock.now();
        let record = self
            .store
            .create_category(&CategoryDraft {
                name,
                description: request.description,
                created_at: now,
                updated_at: now,
            })
            .await?;
        tracing::info!("created category {} '{}'", record.id, record.name);
        Ok(to_response(record))
    }

    /// List categories in id order.
    ///
    /// `name` is a case-insensitive partial match; a `limit` of zero or less
    /// returns every match.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        name: Option<&str>,
    ) -> ResultEngine<Vec<CategoryResponse>> {
        let query = CategoryQuery {
            page: Page::new(offset, limit),
            name: normalize_filter(name),
        };
        let records = self.store.list_categories(&query).await?;
        Ok(records.into_iter().map(to_response).collect())
    }

    pub async fn get(&self, id: i32) -> ResultEngine<CategoryResponse> {
        self.require(id).await.map(to_response)
    }

    /// Replace name and description of an existing category.
    pub async fn update(
        &self,
        id: i32,
        request: CategoryRequest,
    ) -> ResultEngine<CategoryResponse> {
        let name = normalize_category_name(&request.name)?;
        validate_description(&request.description)?;

        let mut category = self.require(id).await?;
        category.name = name;
        category.description = request.description;
        category.updated_at = self.clock.now();

        self.store.update_category(&category).await?;
        tracing::info!("updated category {id}");
        Ok(to_response(category))
    }

    /// Delete a category by id.
    ///
    /// Expenses pointing at it are left alone, they will report an empty
    /// category name from then on.
    pub async fn delete(&self, id: i32) -> ResultEngine<()> {
        self.store.delete_category(id).await?;
        tracing::info!("deleted category {id}");
        Ok(())
    }

    /// Look a category up without treating absence as an error.
    pub async fn find(&self, id: i32) -> ResultEngine<Option<CategoryRecord>> {
        Ok(self.store.category(id).await?)
    }

    async fn require(&self, id: i32) -> ResultEngine<CategoryRecord> {
        self.find(id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("category {id}")))
    }
}

fn to_response(record: CategoryRecord) -> CategoryResponse {
    CategoryResponse {
        id: record.id,
        name: record.name,
        description: record.description,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
