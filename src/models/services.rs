use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::PublicationStatus;
use crate::ordering::Ordered;

/// SeaORM entity for the `services` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub short_description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Name of an icon in the frontend's icon set.
    pub icon: Option<String>,
    pub order_index: i32,
    pub status: PublicationStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Ordered for Model {
    fn id(&self) -> Uuid {
        self.id
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }

    fn set_order_index(&mut self, order_index: i32) {
        self.order_index = order_index;
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub status: Option<PublicationStatus>,
}

impl CreateService {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub status: Option<PublicationStatus>,
}

impl UpdateService {
    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err("Title cannot be empty".to_string());
        }
        Ok(())
    }
}
