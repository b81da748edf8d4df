use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CategoryId, TypeConstraintError};
use crate::services::categories::{CreateCategoryCommand, UpdateCategoryCommand};

/// JSON body accepted when creating or updating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl CategoryForm {
    fn parent_id(&self) -> Result<Option<CategoryId>, CategoryFormError> {
        Ok(self.parent_id.map(CategoryId::new).transpose()?)
    }

    /// Validate the body and build the update command for `category_id`.
    pub fn into_update_command(
        self,
        category_id: CategoryId,
    ) -> Result<UpdateCategoryCommand, CategoryFormError> {
        self.validate()?;
        let parent_id = self.parent_id()?;
        Ok(UpdateCategoryCommand {
            category_id,
            name: self.name,
            description: self.description,
            parent_id,
        })
    }
}

impl TryFrom<CategoryForm> for CreateCategoryCommand {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let parent_id = value.parent_id()?;
        Ok(Self {
            name: value.name,
            description: value.description,
            parent_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, parent_id: Option<i32>) -> CategoryForm {
        CategoryForm {
            name: name.to_string(),
            description: None,
            parent_id,
        }
    }

    #[test]
    fn builds_create_command() {
        let command: CreateCategoryCommand = form("Phones", Some(1)).try_into().unwrap();
        assert_eq!(command.name, "Phones");
        assert_eq!(command.parent_id, Some(CategoryId::new(1).unwrap()));
    }

    #[test]
    fn rejects_empty_and_oversized_names() {
        let result: Result<CreateCategoryCommand, _> = form("", None).try_into();
        assert!(matches!(result, Err(CategoryFormError::Validation(_))));

        let result: Result<CreateCategoryCommand, _> = form(&"x".repeat(101), None).try_into();
        assert!(matches!(result, Err(CategoryFormError::Validation(_))));
    }

    #[test]
    fn rejects_non_positive_parent() {
        let result = form("Phones", Some(0)).into_update_command(CategoryId::new(2).unwrap());
        assert!(matches!(result, Err(CategoryFormError::Validation(_))));
    }

    #[test]
    fn rejects_oversized_description() {
        let mut body = form("Phones", None);
        body.description = Some("d".repeat(501));
        let result: Result<CreateCategoryCommand, _> = body.try_into();
        assert!(result.is_err());
    }
}
