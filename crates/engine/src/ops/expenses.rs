use std::{collections::HashMap, sync::Arc};

use api_types::expense::{ExpenseRequest, ExpenseResponse};
use chrono::NaiveDate;

use crate::{
    Clock, EngineError, Money, ResultEngine,
    dates::{ensure_not_past, parse_date},
    store::{ExpenseDraft, ExpenseQuery, ExpenseRecord, Page, Store},
    util::{normalize_filter, positive_amount, validate_description},
};

use super::CategoryService;

/// Fields of an expense request that passed validation.
struct ValidExpense {
    amount: Money,
    date: NaiveDate,
}

/// Expense domain service.
///
/// Every write checks that the referenced category exists; every response
/// carries the category name looked up at response time.
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    categories: CategoryService,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, categories: CategoryService) -> Self {
        Self {
            store,
            clock,
            categories,
        }
    }

    /// Create an expense.
    ///
    /// Checks run in order: category exists, date parses, amount is
    /// positive, description fits, date is not before today.
    pub async fn create(&self, request: ExpenseRequest) -> ResultEngine<ExpenseResponse> {
        self.require_category(request.category_id).await?;
        let valid = self.validate(&request)?;

        let now = self.clock.now();
        let record = self
            .store
            .create_expense(&ExpenseDraft {
                category_id: request.category_id,
                amount: valid.amount,
                description: request.description,
                date: valid.date,
                created_at: now,
                updated_at: now,
            })
            .await?;
        tracing::info!(
            "created expense {} of {} in category {}",
            record.id,
            record.amount,
            record.category_id
        );

        let name = match self.category_name(record.category_id).await {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(
                    "expense {} is stored but its category lookup failed: {err}",
                    record.id
                );
                return Err(err);
            }
        };
        Ok(to_response(record, name))
    }

    /// List expenses in id order.
    ///
    /// `description` is a case-insensitive partial match, a `category_id` of
    /// zero or less does not filter. A `limit` of zero or less returns every
    /// match.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        description: Option<&str>,
        category_id: i32,
    ) -> ResultEngine<Vec<ExpenseResponse>> {
        let query = ExpenseQuery {
            page: Page::new(offset, limit),
            description: normalize_filter(description),
            category_id: (category_id > 0).then_some(category_id),
        };
        let records = self.store.list_expenses(&query).await?;

        // One lookup per distinct category within this call.
        let mut names: HashMap<i32, String> = HashMap::new();
        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            let name = match names.get(&record.category_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.category_name(record.category_id).await?;
                    names.insert(record.category_id, name.clone());
                    name
                }
            };
            responses.push(to_response(record, name));
        }
        Ok(responses)
    }

    /// Return an expense. A deleted category yields an empty name.
    pub async fn get(&self, id: i32) -> ResultEngine<ExpenseResponse> {
        let record = self.require(id).await?;
        let name = self.category_name(record.category_id).await?;
        Ok(to_response(record, name))
    }

    /// Replace every mutable field of an existing expense.
    ///
    /// The category is only checked again when it changes.
    pub async fn update(&self, id: i32, request: ExpenseRequest) -> ResultEngine<ExpenseResponse> {
        let mut expense = self.require(id).await?;
        if expense.category_id != request.category_id {
            self.require_category(request.category_id).await?;
        }
        let valid = self.validate(&request)?;

        expense.category_id = request.category_id;
        expense.amount = valid.amount;
        expense.description = request.description;
        expense.date = valid.date;
        expense.updated_at = self.clock.now();

        self.store.update_expense(&expense).await?;
        tracing::info!("updated expense {id}");

        let name = self.category_name(expense.category_id).await?;
        Ok(to_response(expense, name))
    }

    pub async fn delete(&self, id: i32) -> ResultEngine<()> {
        self.store.delete_expense(id).await?;
        tracing::info!("deleted expense {id}");
        Ok(())
    }

    fn validate(&self, request: &ExpenseRequest) -> ResultEngine<ValidExpense> {
        let date = parse_date(&request.date)?;
        let amount = positive_amount(request.amount)?;
        validate_description(&request.description)?;
        ensure_not_past(date, self.clock.today())?;
        Ok(ValidExpense { amount, date })
    }

    async fn require(&self, id: i32) -> ResultEngine<ExpenseRecord> {
        self.store
            .expense(id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {id}")))
    }

    async fn require_category(&self, category_id: i32) -> ResultEngine<()> {
        match self.categories.find(category_id).await? {
            Some(_) => Ok(()),
            None => Err(EngineError::Reference("category".to_string())),
        }
    }

    async fn category_name(&self, category_id: i32) -> ResultEngine<String> {
        Ok(self
            .categories
            .find(category_id)
            .await?
            .map(|category| category.name)
            .unwrap_or_default())
    }
}

fn to_response(record: ExpenseRecord, category_name: String) -> ExpenseResponse {
    ExpenseResponse {
        id: record.id,
        category_id: record.category_id,
        category_name,
        amount: record.amount.to_major(),
        description: record.description,
        date: record.date,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::{Sequence, predicate::eq};
    use sea_orm::DbErr;

    use super::*;
    use crate::{
        FixedClock, Rule,
        store::{CategoryRecord, MockStore, StoreError},
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn service(store: MockStore) -> ExpenseService {
        let store: Arc<dyn Store> = Arc::new(store);
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
        let categories = CategoryService::new(store.clone(), clock.clone());
        ExpenseService::new(store, clock, categories)
    }

    fn category(id: i32, name: &str) -> CategoryRecord {
        CategoryRecord {
            id,
            name: name.to_string(),
            description: String::new(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn lunch() -> ExpenseRecord {
        ExpenseRecord {
            id: 3,
            category_id: 1,
            amount: Money::from_major(12.5).unwrap(),
            description: "Lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn request(category_id: i32, amount: f64, date: &str) -> ExpenseRequest {
        ExpenseRequest {
            category_id,
            amount,
            description: "Lunch".to_string(),
            date: date.to_string(),
        }
    }

    fn validation_rule(err: EngineError) -> Rule {
        match err {
            EngineError::Validation(field) => field.rule,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_category_before_anything_else() {
        let mut store = MockStore::new();
        store
            .expect_category()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(None));

        // Date and amount are invalid too, the reference check wins.
        let err = service(store)
            .create(request(5, 0.0, "garbage"))
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::Reference("category".to_string()));
        assert_eq!(err.to_string(), "category not found");
    }

    #[tokio::test]
    async fn create_validates_in_order() {
        let mut store = MockStore::new();
        store
            .expect_category()
            .returning(|id| Ok(Some(category(id, "Food"))));
        let service = service(store);

        let err = service.create(request(1, 0.0, "nope")).await.unwrap_err();
        assert_eq!(validation_rule(err), Rule::DateFormat);

        let err = service
            .create(request(1, 0.0, "09-03-2025"))
            .await
            .unwrap_err();
        assert_eq!(validation_rule(err), Rule::GreaterThanZero);

        let err = service
            .create(request(1, 10.0, "09-03-2025"))
            .await
            .unwrap_err();
        assert_eq!(validation_rule(err), Rule::NotInPast);
    }

    #[tokio::test]
    async fn create_resolves_the_name_after_writing() {
        let mut store = MockStore::new();
        let mut seq = Sequence::new();
        store
            .expect_category()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(Some(category(id, "Food"))));
        store
            .expect_create_expense()
            .withf(|draft| draft.amount.to_major() == 12.5 && draft.created_at == now())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|draft| {
                Ok(ExpenseRecord {
                    id: 3,
                    category_id: draft.category_id,
                    amount: draft.amount,
                    description: draft.description.clone(),
                    date: draft.date,
                    created_at: draft.created_at,
                    updated_at: draft.updated_at,
                })
            });
        // Renamed between the check and the response.
        store
            .expect_category()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(Some(category(id, "Groceries"))));

        let created = service(store)
            .create(request(1, 12.5, "15-03-2025"))
            .await
            .unwrap();
        assert_eq!(created.category_name, "Groceries");
        assert_eq!(created.amount, 12.5);
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[tokio::test]
    async fn create_keeps_sub_cent_amounts() {
        let mut store = MockStore::new();
        store
            .expect_category()
            .returning(|id| Ok(Some(category(id, "Food"))));
        store
            .expect_create_expense()
            .withf(|draft| draft.amount.to_major() == 19.999)
            .times(1)
            .returning(|draft| {
                let mut record = lunch();
                record.amount = draft.amount;
                Ok(record)
            });

        let created = service(store)
            .create(request(1, 19.999, "2025-03-15"))
            .await
            .unwrap();
        assert_eq!(created.amount, 19.999);
    }

    #[tokio::test]
    async fn create_reports_lookup_failure_after_write() {
        let mut store = MockStore::new();
        let mut seq = Sequence::new();
        store
            .expect_category()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(Some(category(id, "Food"))));
        store
            .expect_create_expense()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(lunch()));
        store
            .expect_category()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::Database(DbErr::Custom("gone".to_string()))));

        let err = service(store)
            .create(request(1, 12.5, "2025-03-15"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Storage(_)));
    }

    #[tokio::test]
    async fn today_is_accepted() {
        let mut store = MockStore::new();
        store
            .expect_category()
            .returning(|id| Ok(Some(category(id, "Food"))));
        store
            .expect_create_expense()
            .withf(|draft| draft.date == now().date_naive())
            .times(1)
            .returning(|_| Ok(lunch()));

        assert!(service(store)
            .create(request(1, 1.0, "2025-03-10"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn update_with_same_category_skips_the_reference_check() {
        let mut store = MockStore::new();
        store.expect_expense().with(eq(3)).returning(|_| Ok(Some(lunch())));
        // Only the name lookup for the response.
        store
            .expect_category()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Some(category(id, "Food"))));
        store
            .expect_update_expense()
            .withf(|e| e.amount.to_major() == 20.0 && e.updated_at == now())
            .times(1)
            .returning(|_| Ok(()));

        let updated = service(store)
            .update(3, request(1, 20.0, "2025-04-01"))
            .await
            .unwrap();
        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.category_name, "Food");
    }

    #[tokio::test]
    async fn update_to_missing_category_leaves_the_row_alone() {
        let mut store = MockStore::new();
        store.expect_expense().returning(|_| Ok(Some(lunch())));
        store
            .expect_category()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(None));
        store.expect_update_expense().never();

        let err = service(store)
            .update(3, request(2, 20.0, "2025-04-01"))
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::Reference("category".to_string()));
    }

    #[tokio::test]
    async fn update_missing_expense_is_not_found() {
        let mut store = MockStore::new();
        store.expect_expense().returning(|_| Ok(None));

        let err = service(store)
            .update(99, request(1, 20.0, "2025-04-01"))
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::KeyNotFound("expense 99".to_string()));
    }

    #[tokio::test]
    async fn get_with_deleted_category_has_empty_name() {
        let mut store = MockStore::new();
        store.expect_expense().returning(|_| Ok(Some(lunch())));
        store.expect_category().returning(|_| Ok(None));

        let expense = service(store).get(3).await.unwrap();
        assert_eq!(expense.category_name, "");
        assert_eq!(expense.description, "Lunch");
    }

    #[tokio::test]
    async fn get_does_not_swallow_storage_errors() {
        let mut store = MockStore::new();
        store.expect_expense().returning(|_| Ok(Some(lunch())));
        store
            .expect_category()
            .returning(|_| Err(StoreError::Database(DbErr::Custom("gone".to_string()))));

        let err = service(store).get(3).await.unwrap_err();
        assert!(matches!(err, EngineError::Storage(_)));
    }

    #[tokio::test]
    async fn list_maps_filters_and_looks_each_category_up_once() {
        let mut store = MockStore::new();
        store
            .expect_list_expenses()
            .withf(|q| {
                q.category_id.is_none()
                    && q.description.as_deref() == Some("lun")
                    && q.page
                        == Page {
                            offset: 0,
                            limit: Some(10),
                        }
            })
            .times(1)
            .returning(|_| {
                let mut second = lunch();
                second.id = 4;
                Ok(vec![lunch(), second])
            });
        store
            .expect_category()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Some(category(id, "Food"))));

        let listed = service(store).list(0, 10, Some("lun"), 0).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|e| e.category_name == "Food"));
    }
}
