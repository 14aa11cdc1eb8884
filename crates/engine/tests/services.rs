use std::sync::Arc;

use api_types::{category::CategoryRequest, expense::ExpenseRequest};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, FixedClock, Rule};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap());
    let engine = Engine::builder()
        .database(db.clone())
        .clock(Arc::new(clock))
        .build();
    (engine, db)
}

fn category(name: &str) -> CategoryRequest {
    CategoryRequest {
        name: name.to_string(),
        description: String::new(),
    }
}

fn expense(category_id: i32, amount: f64, description: &str, date: &str) -> ExpenseRequest {
    ExpenseRequest {
        category_id,
        amount,
        description: description.to_string(),
        date: date.to_string(),
    }
}

#[tokio::test]
async fn category_crud() {
    let (engine, _db) = engine_with_db().await;
    let categories = engine.categories();

    let food = categories.create(category("  Food ")).await.unwrap();
    assert_eq!(food.id, 1);
    assert_eq!(food.name, "Food");
    assert_eq!(food.created_at, food.updated_at);

    let fetched = categories.get(food.id).await.unwrap();
    assert_eq!(fetched, food);

    let updated = categories
        .update(
            food.id,
            CategoryRequest {
                name: "Groceries".to_string(),
                description: "supermarket".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Groceries");
    assert_eq!(updated.description, "supermarket");
    assert_eq!(updated.created_at, food.created_at);

    categories.delete(food.id).await.unwrap();
    assert_eq!(
        categories.get(food.id).await.unwrap_err(),
        EngineError::KeyNotFound("category 1".to_string())
    );
    // Deleting again is not an error.
    categories.delete(food.id).await.unwrap();
}

#[tokio::test]
async fn category_listing_filters_and_paginates() {
    let (engine, _db) = engine_with_db().await;
    let categories = engine.categories();
    for name in ["Food", "Transport", "Fast food", "Rent"] {
        categories.create(category(name)).await.unwrap();
    }

    let names = |list: Vec<api_types::category::CategoryResponse>| {
        list.into_iter().map(|c| c.name).collect::<Vec<_>>()
    };

    let matched = categories.list(0, 10, Some("FOOD")).await.unwrap();
    assert_eq!(names(matched), ["Food", "Fast food"]);

    let page = categories.list(1, 2, None).await.unwrap();
    assert_eq!(names(page), ["Transport", "Fast food"]);

    // Limit zero disables pagination, the offset is ignored.
    let all = categories.list(3, 0, None).await.unwrap();
    assert_eq!(all.len(), 4);

    let past_end = categories.list(10, 5, None).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn expense_lifecycle() {
    let (engine, _db) = engine_with_db().await;
    let food = engine.categories().create(category("Food")).await.unwrap();
    let expenses = engine.expenses();

    let lunch = expenses
        .create(expense(food.id, 12.5, "Lunch", "15-03-2025"))
        .await
        .unwrap();
    assert_eq!(lunch.category_name, "Food");
    assert_eq!(lunch.amount, 12.5);
    assert_eq!(lunch.date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());

    let updated = expenses
        .update(lunch.id, expense(food.id, 20.0, "Dinner", "2025-03-20"))
        .await
        .unwrap();
    assert_eq!(updated.amount, 20.0);
    assert_eq!(updated.description, "Dinner");

    expenses.delete(lunch.id).await.unwrap();
    assert_eq!(
        expenses.get(lunch.id).await.unwrap_err(),
        EngineError::KeyNotFound(format!("expense {}", lunch.id))
    );
}

#[tokio::test]
async fn expense_validation_order() {
    let (engine, _db) = engine_with_db().await;
    let food = engine.categories().create(category("Food")).await.unwrap();
    let expenses = engine.expenses();

    let err = expenses
        .create(expense(99, -1.0, "", "bad"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Reference("category".to_string()));

    let rule = |err: EngineError| match err {
        EngineError::Validation(field) => field.rule,
        other => panic!("unexpected {other:?}"),
    };
    let err = expenses
        .create(expense(food.id, 1.0, "", "31-02-2025"))
        .await
        .unwrap_err();
    assert_eq!(rule(err), Rule::DateFormat);
    let err = expenses
        .create(expense(food.id, 0.0, "", "2025-03-15"))
        .await
        .unwrap_err();
    assert_eq!(rule(err), Rule::GreaterThanZero);
    let err = expenses
        .create(expense(food.id, 1.0, "", "15-03-25"))
        .await
        .unwrap_err();
    assert_eq!(rule(err), Rule::DateFormat);
    let err = expenses
        .create(expense(food.id, 1.0, "", "09-03-2025"))
        .await
        .unwrap_err();
    assert_eq!(rule(err), Rule::NotInPast);

    assert!(expenses.list(0, 0, None, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn amounts_are_stored_exactly() {
    let (engine, _db) = engine_with_db().await;
    let food = engine.categories().create(category("Food")).await.unwrap();
    let expenses = engine.expenses();

    for amount in [12.345, 0.001, 19.999, 0.1 + 0.2] {
        let created = expenses
            .create(expense(food.id, amount, "", "2025-03-15"))
            .await
            .unwrap();
        let fetched = expenses.get(created.id).await.unwrap();
        assert_eq!(fetched.amount, amount);
    }
}

#[tokio::test]
async fn expenses_survive_their_category() {
    let (engine, _db) = engine_with_db().await;
    let food = engine.categories().create(category("Food")).await.unwrap();
    let lunch = engine
        .expenses()
        .create(expense(food.id, 8.0, "Lunch", "2025-03-10"))
        .await
        .unwrap();

    engine.categories().delete(food.id).await.unwrap();

    let orphan = engine.expenses().get(lunch.id).await.unwrap();
    assert_eq!(orphan.category_id, food.id);
    assert_eq!(orphan.category_name, "");

    // Updating without moving it still works, moving it needs a live category.
    engine
        .expenses()
        .update(lunch.id, expense(food.id, 9.0, "Lunch", "2025-03-10"))
        .await
        .unwrap();
    let err = engine
        .expenses()
        .update(lunch.id, expense(food.id + 1, 9.0, "Lunch", "2025-03-10"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Reference("category".to_string()));
}

#[tokio::test]
async fn expense_listing_reflects_renames() {
    let (engine, _db) = engine_with_db().await;
    let food = engine.categories().create(category("Food")).await.unwrap();
    let travel = engine.categories().create(category("Travel")).await.unwrap();
    let expenses = engine.expenses();
    expenses
        .create(expense(food.id, 5.0, "Coffee beans", "2025-03-11"))
        .await
        .unwrap();
    expenses
        .create(expense(travel.id, 50.0, "Train", "2025-03-12"))
        .await
        .unwrap();
    expenses
        .create(expense(food.id, 3.2, "coffee to go", "2025-03-12"))
        .await
        .unwrap();

    engine
        .categories()
        .update(food.id, category("Groceries"))
        .await
        .unwrap();

    let coffee = expenses.list(0, 10, Some("COFFEE"), 0).await.unwrap();
    assert_eq!(coffee.len(), 2);
    assert!(coffee.iter().all(|e| e.category_name == "Groceries"));

    let travel_only = expenses.list(0, 10, None, travel.id).await.unwrap();
    assert_eq!(travel_only.len(), 1);
    assert_eq!(travel_only[0].description, "Train");

    let second = expenses.list(1, 1, None, 0).await.unwrap();
    assert_eq!(second[0].description, "Train");
}
