use crate::cache::{CategoryCache, TreeKey};
use crate::domain::category::Category;
use crate::domain::tree::{build_category_tree, find_orphans};
use crate::domain::types::{CategoryDescription, CategoryId, CategoryName, TypeConstraintError};
use crate::dto::categories::{CategoryDto, CategoryStatisticsDto, CategoryTreeDto};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::hierarchy::would_create_cycle;

use super::{ServiceError, ServiceResult};

/// Input for [`create_category`]. Name and description are validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
}

/// Input for [`update_category`]. An absent `parent_id` makes the category a root.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryCommand {
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
}

fn ensure_parent_exists<R>(repo: &R, parent_id: CategoryId) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match repo.category_exists(parent_id) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ServiceError::NotFound(format!(
            "Parent category not found: {parent_id}"
        ))),
        Err(e) => {
            log::error!("Failed to check parent category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn validate_info(
    name: String,
    description: Option<String>,
) -> Result<(CategoryName, Option<CategoryDescription>), TypeConstraintError> {
    let name = CategoryName::new(name)?;
    let description = description.map(CategoryDescription::new).transpose()?;
    Ok((name, description))
}

pub fn create_category<R>(
    command: CreateCategoryCommand,
    repo: &R,
    cache: &CategoryCache,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    if let Some(parent_id) = command.parent_id {
        ensure_parent_exists(repo, parent_id)?;
    }

    let id = repo.next_category_id().map_err(|e| {
        log::error!("Failed to allocate category id: {e}");
        ServiceError::Internal
    })?;

    let (name, description) = validate_info(command.name, command.description)?;
    let category = match command.parent_id {
        Some(parent_id) => Category::new_child(id, name, description, parent_id)?,
        None => Category::new_root(id, name, description),
    };

    let saved = repo.save_category(&category).map_err(|e| {
        log::error!("Failed to create category: {e}");
        ServiceError::Internal
    })?;

    cache.invalidate_all();

    Ok(CategoryDto::from(saved))
}

pub fn update_category<R>(
    command: UpdateCategoryCommand,
    repo: &R,
    cache: &CategoryCache,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    let category_id = command.category_id;

    let mut category = match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => category,
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "Category not found: {category_id}"
            )));
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if let Some(parent_id) = command.parent_id {
        if parent_id == category_id {
            return Err(TypeConstraintError::SelfParent.into());
        }

        ensure_parent_exists(repo, parent_id)?;

        match would_create_cycle(repo, category_id, parent_id) {
            Ok(false) => {}
            Ok(true) => {
                return Err(ServiceError::CircularReference {
                    category_id,
                    parent_id,
                });
            }
            Err(e) => {
                log::error!("Failed to walk category ancestors: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    let (name, description) = validate_info(command.name, command.description)?;
    category.update_info(name, description);
    category.change_parent(command.parent_id)?;

    let saved = repo.save_category(&category).map_err(|e| {
        log::error!("Failed to update category: {e}");
        ServiceError::Internal
    })?;

    cache.invalidate_all();

    Ok(CategoryDto::from(saved))
}

pub fn delete_category<R>(
    category_id: CategoryId,
    repo: &R,
    cache: &CategoryCache,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.category_exists(category_id) {
        Ok(true) => {}
        Ok(false) => {
            return Err(ServiceError::NotFound(format!(
                "Category not found: {category_id}"
            )));
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.has_children(category_id) {
        Ok(false) => {}
        Ok(true) => return Err(ServiceError::HasChildren(category_id)),
        Err(e) => {
            log::error!("Failed to check child categories: {e}");
            return Err(ServiceError::Internal);
        }
    }

    repo.delete_category(category_id).map_err(|e| {
        log::error!("Failed to delete category: {e}");
        ServiceError::Internal
    })?;

    cache.invalidate_all();

    Ok(())
}

pub fn get_category<R>(
    category_id: CategoryId,
    repo: &R,
    cache: &CategoryCache,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    if let Some(category) = cache.get_category(category_id) {
        return Ok(category);
    }

    let category = match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => CategoryDto::from(category),
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "Category not found: {category_id}"
            )));
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    cache.insert_category(category_id, category.clone());
    Ok(category)
}

pub fn get_all_categories<R>(repo: &R, cache: &CategoryCache) -> ServiceResult<CategoryTreeDto>
where
    R: CategoryReader,
{
    if let Some(tree) = cache.get_tree(TreeKey::All) {
        return Ok(tree);
    }

    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    let tree = CategoryTreeDto::from(build_category_tree(&categories, None)?);
    cache.insert_tree(TreeKey::All, tree.clone());
    Ok(tree)
}

pub fn get_category_tree<R>(
    root_id: CategoryId,
    repo: &R,
    cache: &CategoryCache,
) -> ServiceResult<CategoryTreeDto>
where
    R: CategoryReader,
{
    match repo.category_exists(root_id) {
        Ok(true) => {}
        Ok(false) => {
            return Err(ServiceError::NotFound(format!(
                "Category not found: {root_id}"
            )));
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let key = TreeKey::Root(root_id);
    if let Some(tree) = cache.get_tree(key) {
        return Ok(tree);
    }

    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    let tree = CategoryTreeDto::from(build_category_tree(&categories, Some(root_id))?);
    cache.insert_tree(key, tree.clone());
    Ok(tree)
}

/// Taxonomy counts, orphaned categories and cache counters. Never cached.
pub fn category_statistics<R>(
    repo: &R,
    cache: &CategoryCache,
) -> ServiceResult<CategoryStatisticsDto>
where
    R: CategoryReader,
{
    let total_categories = repo.count_categories().map_err(|e| {
        log::error!("Failed to count categories: {e}");
        ServiceError::Internal
    })?;
    let root_categories = repo.count_root_categories().map_err(|e| {
        log::error!("Failed to count root categories: {e}");
        ServiceError::Internal
    })?;
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    Ok(CategoryStatisticsDto {
        total_categories,
        root_categories,
        child_categories: total_categories.saturating_sub(root_categories),
        orphan_ids: find_orphans(&categories)
            .into_iter()
            .map(CategoryId::get)
            .collect(),
        cache: cache.stats(),
    })
}
