//! Categories table.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::store::{CategoryDraft, CategoryRecord};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CategoryRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&CategoryDraft> for ActiveModel {
    fn from(draft: &CategoryDraft) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(draft.name.clone()),
            description: ActiveValue::Set(draft.description.clone()),
            created_at: ActiveValue::Set(draft.created_at),
            updated_at: ActiveValue::Set(draft.updated_at),
        }
    }
}

impl From<&CategoryRecord> for ActiveModel {
    fn from(record: &CategoryRecord) -> Self {
        Self {
            id: ActiveValue::Unchanged(record.id),
            name: ActiveValue::Set(record.name.clone()),
            description: ActiveValue::Set(record.description.clone()),
            created_at: ActiveValue::Set(record.created_at),
            updated_at: ActiveValue::Set(record.updated_at),
        }
    }
}
