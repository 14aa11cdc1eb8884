//! Expenses table.
//!
//! `category_id` is a weak reference: there is no foreign key, the services
//! check it on write and resolve it on read.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    Money,
    store::{ExpenseDraft, ExpenseRecord},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    pub amount: f64,
    pub description: String,
    pub date: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpenseRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            // Only finite values are ever written.
            amount: Money::from_major(model.amount).unwrap_or_default(),
            description: model.description,
            date: model.date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&ExpenseDraft> for ActiveModel {
    fn from(draft: &ExpenseDraft) -> Self {
        Self {
            id: ActiveValue::NotSet,
            category_id: ActiveValue::Set(draft.category_id),
            amount: ActiveValue::Set(draft.amount.to_major()),
            description: ActiveValue::Set(draft.description.clone()),
            date: ActiveValue::Set(draft.date),
            created_at: ActiveValue::Set(draft.created_at),
            updated_at: ActiveValue::Set(draft.updated_at),
        }
    }
}

impl From<&ExpenseRecord> for ActiveModel {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            id: ActiveValue::Unchanged(record.id),
            category_id: ActiveValue::Set(record.category_id),
            amount: ActiveValue::Set(record.amount.to_major()),
            description: ActiveValue::Set(record.description.clone()),
            date: ActiveValue::Set(record.date),
            created_at: ActiveValue::Set(record.created_at),
            updated_at: ActiveValue::Set(record.updated_at),
        }
    }
}
