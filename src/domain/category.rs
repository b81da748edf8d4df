use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryDescription, CategoryId, CategoryName, TypeConstraintError};

/// Canonical category record.
///
/// Categories reference their parent by id only; trees are assembled on demand
/// by [`crate::domain::tree::build_category_tree`]. Timestamps are owned by the
/// storage layer and stay `None` until the record has been saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub parent_id: Option<CategoryId>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Category {
    /// Build a category without a parent.
    pub fn new_root(
        id: CategoryId,
        name: CategoryName,
        description: Option<CategoryDescription>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            parent_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build a category placed under `parent_id`.
    pub fn new_child(
        id: CategoryId,
        name: CategoryName,
        description: Option<CategoryDescription>,
        parent_id: CategoryId,
    ) -> Result<Self, TypeConstraintError> {
        let mut category = Self::new_root(id, name, description);
        category.change_parent(Some(parent_id))?;
        Ok(category)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Replace name and description.
    pub fn update_info(&mut self, name: CategoryName, description: Option<CategoryDescription>) {
        self.name = name;
        self.description = description;
    }

    /// Reassign the parent. `None` turns the category into a root.
    ///
    /// Only the direct self-reference is rejected here; deeper cycles are
    /// detected by [`crate::services::hierarchy::would_create_cycle`].
    pub fn change_parent(
        &mut self,
        parent_id: Option<CategoryId>,
    ) -> Result<(), TypeConstraintError> {
        if parent_id == Some(self.id) {
            return Err(TypeConstraintError::SelfParent);
        }
        self.parent_id = parent_id;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i32) -> CategoryId {
        CategoryId::new(value).unwrap()
    }

    #[test]
    fn root_has_no_parent_and_no_timestamps() {
        let category = Category::new_root(id(1), CategoryName::new("Electronics").unwrap(), None);
        assert!(category.is_root());
        assert!(category.created_at.is_none());
        assert!(category.updated_at.is_none());
    }

    #[test]
    fn child_rejects_itself_as_parent() {
        let err =
            Category::new_child(id(4), CategoryName::new("Loop").unwrap(), None, id(4)).unwrap_err();
        assert_eq!(err, TypeConstraintError::SelfParent);
    }

    #[test]
    fn change_parent_keeps_previous_parent_on_error() {
        let mut category =
            Category::new_child(id(2), CategoryName::new("Phones").unwrap(), None, id(1)).unwrap();

        assert!(category.change_parent(Some(id(2))).is_err());
        assert_eq!(category.parent_id, Some(id(1)));

        category.change_parent(None).unwrap();
        assert!(category.is_root());
    }
}
