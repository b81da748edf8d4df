//! Error conversion glue between the domain, repository and service layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here.

use crate::domain::tree::TreeError;
use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::InvalidArgument(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<TreeError> for ServiceError {
    fn from(val: TreeError) -> Self {
        match val {
            TreeError::RootNotFound(id) => {
                ServiceError::NotFound(format!("Category not found: {id}"))
            }
        }
    }
}
