use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{PublicationStatus, non_blank};
use crate::ordering::Ordered;
use crate::slug::slugify;

/// Maximum length of the description snippet used for page metadata.
pub const META_DESCRIPTION_LEN: usize = 160;

/// SeaORM entity for the `portfolios` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
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
pub struct CreatePortfolio {
    pub title: String,
    /// Derived from `title` when missing or blank.
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub status: Option<PublicationStatus>,
}

impl CreatePortfolio {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.resolved_slug().is_empty() {
            return Err("Slug cannot be derived from the title; provide one explicitly".to_string());
        }
        Ok(())
    }

    /// The slug to store: the supplied one, or one generated from the title.
    pub fn resolved_slug(&self) -> String {
        match non_blank(self.slug.clone()) {
            Some(slug) => slug.trim().to_string(),
            None => slugify(&self.title),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePortfolio {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub status: Option<PublicationStatus>,
}

impl UpdatePortfolio {
    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err("Title cannot be empty".to_string());
        }
        if matches!(&self.slug, Some(s) if s.trim().is_empty()) {
            return Err("Slug cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Trim each tag, drop blanks and keep only the first occurrence of a tag.
pub fn normalize_tech_stack(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// A published portfolio as served on `/api/public/portfolios/{slug}`.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioDetail {
    #[serde(flatten)]
    pub portfolio: Model,
    pub meta_description: Option<String>,
}

impl From<Model> for PortfolioDetail {
    fn from(portfolio: Model) -> Self {
        let meta_description = portfolio
            .description
            .as_deref()
            .map(|d| d.chars().take(META_DESCRIPTION_LEN).collect::<String>())
            .filter(|d| !d.is_empty());
        Self {
            portfolio,
            meta_description,
        }
    }
}
