use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::types::CategoryId;

pub mod category;
pub mod errors;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every stored category ordered by id.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Whether a category with `id` is stored.
    fn category_exists(&self, id: CategoryId) -> RepositoryResult<bool>;
    /// Whether any stored category names `id` as its parent.
    fn has_children(&self, id: CategoryId) -> RepositoryResult<bool>;
    /// Next free identifier: the largest stored id plus one, or 1 when empty.
    fn next_category_id(&self) -> RepositoryResult<CategoryId>;
    /// Total number of stored categories.
    fn count_categories(&self) -> RepositoryResult<usize>;
    /// Number of stored categories without a parent.
    fn count_root_categories(&self) -> RepositoryResult<usize>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Insert or update a category, returning the stored record with
    /// timestamps populated.
    fn save_category(&self, category: &Category) -> RepositoryResult<Category>;
    /// Delete a category by id.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}
