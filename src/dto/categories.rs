use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cache::CategoryCacheStats;
use crate::domain::category::Category;
use crate::domain::tree::CategoryNode;

/// Flat projection of a stored category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.map(|d| d.into_inner()),
            parent_id: value.parent_id.map(|p| p.get()),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Forest of category trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTreeDto {
    pub categories: Vec<CategoryNode>,
}

impl From<Vec<CategoryNode>> for CategoryTreeDto {
    fn from(categories: Vec<CategoryNode>) -> Self {
        Self { categories }
    }
}

/// Taxonomy and cache counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatisticsDto {
    pub total_categories: usize,
    pub root_categories: usize,
    pub child_categories: usize,
    pub orphan_ids: Vec<i32>,
    pub cache: CategoryCacheStats,
}
