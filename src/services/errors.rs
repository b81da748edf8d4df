use thiserror::Error;

use crate::domain::types::CategoryId;

/// Failures reported by the category service layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A referenced category or parent does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Name/description validation failed or a category was made its own parent.
    #[error("{0}")]
    InvalidArgument(String),
    /// Moving the category would place it under one of its descendants.
    #[error("circular reference: category {category_id} cannot be moved under {parent_id}")]
    CircularReference {
        category_id: CategoryId,
        parent_id: CategoryId,
    },
    /// Deletion was attempted on a category that still has children.
    #[error("category {0} has child categories and cannot be deleted")]
    HasChildren(CategoryId),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
