//! Ancestor-chain checks used before reparenting a category.

use std::collections::HashSet;

use crate::domain::types::CategoryId;
use crate::repository::{CategoryReader, RepositoryResult};

/// Whether placing `category_id` under `new_parent_id` would create a cycle.
///
/// Walks upward from `new_parent_id`, one storage lookup per hop, and reports
/// a cycle when the walk reaches `category_id`. The walk ends without a cycle
/// at a root, at a parent missing from storage, or when it revisits an id.
pub fn would_create_cycle<R>(
    repo: &R,
    category_id: CategoryId,
    new_parent_id: CategoryId,
) -> RepositoryResult<bool>
where
    R: CategoryReader + ?Sized,
{
    let mut visited = HashSet::new();
    let mut current = Some(new_parent_id);

    while let Some(ancestor) = current {
        if ancestor == category_id {
            return Ok(true);
        }
        if !visited.insert(ancestor) {
            return Ok(false);
        }
        current = repo
            .get_category_by_id(ancestor)?
            .and_then(|category| category.parent_id);
    }

    Ok(false)
}
