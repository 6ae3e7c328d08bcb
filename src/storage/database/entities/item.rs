use crate::core::items::types::{Item, ItemStatus, NewItem};
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Auto-assigned primary key
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Name (max 100 chars)
    pub name: String,

    /// Optional description (max 255 chars)
    pub description: Option<String>,

    /// Status as its wire string (max 20 chars)
    pub status: String,

    /// Email address (unique, max 120 chars)
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion between the SeaORM model and the domain model
impl Model {
    /// Convert a database row into the domain item
    pub fn into_domain(self) -> Item {
        let status = ItemStatus::from_str(&self.status).unwrap_or(ItemStatus::New);
        Item {
            id: self.id,
            name: self.name,
            description: self.description,
            status,
            email: self.email,
        }
    }

    /// Active model for inserting a new item (id left to the database)
    pub fn from_new(item: &NewItem) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            status: Set(item.status.to_string()),
            email: Set(item.email.clone()),
        }
    }

    /// Active model carrying the full state of an existing item
    pub fn from_domain(item: &Item) -> ActiveModel {
        ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            status: Set(item.status.to_string()),
            email: Set(item.email.clone()),
        }
    }
}
