use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::types::{CategoryDescription, CategoryName, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`]. The id is allocated by the caller.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub parent_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Mutable columns of an existing row. `None` clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories, treat_none_as_null = true)]
pub struct CategoryChanges<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub parent_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            description: category
                .description
                .map(CategoryDescription::new)
                .transpose()?,
            parent_id: category.parent_id.map(TryInto::try_into).transpose()?,
            created_at: Some(category.created_at),
            updated_at: Some(category.updated_at),
        })
    }
}

impl<'a> NewCategory<'a> {
    pub fn from_domain(category: &'a DomainCategory, now: NaiveDateTime) -> Self {
        Self {
            id: category.id.get(),
            name: category.name.as_str(),
            description: category.description.as_ref().map(|d| d.as_str()),
            parent_id: category.parent_id.map(|p| p.get()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> CategoryChanges<'a> {
    pub fn from_domain(category: &'a DomainCategory, now: NaiveDateTime) -> Self {
        Self {
            name: category.name.as_str(),
            description: category.description.as_ref().map(|d| d.as_str()),
            parent_id: category.parent_id.map(|p| p.get()),
            updated_at: now,
        }
    }
}
