use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use clock::{Clock, FixedClock, SystemClock};
pub use database::DatabaseStore;
pub use dates::{DATE_FORMATS, ensure_not_past, parse_date};
pub use error::{EngineError, FieldError, Rule};
pub use money::Money;
pub use ops::{CategoryService, ExpenseService};
pub use store::{
    CategoryDraft, CategoryQuery, CategoryRecord, ExpenseDraft, ExpenseQuery, ExpenseRecord, Page,
    Store, StoreError,
};

mod categories;
mod clock;
mod database;
mod dates;
mod error;
mod expenses;
mod money;
mod ops;
mod store;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Entry point of the domain: both services wired to one store and clock.
#[derive(Clone)]
pub struct Engine {
    categories: CategoryService,
    expenses: ExpenseService,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub fn expenses(&self) -> &ExpenseService {
        &self.expenses
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    store: Option<Arc<dyn Store>>,
    clock: Option<Arc<dyn Clock>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Use a custom store instead of the database one.
    pub fn store(mut self, store: Arc<dyn Store>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Override the system clock, mostly for tests.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> EngineBuilder {
        self.clock = Some(clock);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(DatabaseStore::new(self.database)));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let categories = CategoryService::new(store.clone(), clock.clone());
        let expenses = ExpenseService::new(store, clock, categories.clone());
        Engine {
            categories,
            expenses,
        }
    }
}
