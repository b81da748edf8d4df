//! Assembly of category forests from flat parent-pointer records.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::category::Category;
use crate::domain::types::{CategoryDescription, CategoryId, CategoryName};

/// Read-only tree projection of a [`Category`] and its descendants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub children: Vec<CategoryNode>,
}

/// Errors produced while assembling a tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The requested root is not part of the supplied records.
    #[error("root category not found: {0}")]
    RootNotFound(CategoryId),
}

/// Children indices grouped by parent id; `None` holds the roots.
type ParentIndex = HashMap<Option<CategoryId>, Vec<usize>>;

fn group_by_parent(categories: &[Category]) -> ParentIndex {
    let mut groups: ParentIndex = HashMap::new();
    for (idx, category) in categories.iter().enumerate() {
        groups.entry(category.parent_id).or_default().push(idx);
    }
    groups
}

fn build_node(
    categories: &[Category],
    idx: usize,
    groups: &ParentIndex,
    expanded: &mut HashSet<CategoryId>,
) -> Option<CategoryNode> {
    let category = &categories[idx];
    if !expanded.insert(category.id) {
        return None;
    }

    let children = groups
        .get(&Some(category.id))
        .map(|indices| {
            indices
                .iter()
                .filter_map(|&child| build_node(categories, child, groups, expanded))
                .collect()
        })
        .unwrap_or_default();

    Some(CategoryNode {
        id: category.id,
        name: category.name.clone(),
        description: category.description.clone(),
        created_at: category.created_at,
        updated_at: category.updated_at,
        children,
    })
}

/// Build a forest from `categories`.
///
/// Without `root_id` the forest holds every parentless category. With
/// `root_id` it holds exactly one tree rooted at that category. Siblings keep
/// their input order. Categories whose parent is missing from `categories`
/// are left out, and a category is never expanded twice within one build.
pub fn build_category_tree(
    categories: &[Category],
    root_id: Option<CategoryId>,
) -> Result<Vec<CategoryNode>, TreeError> {
    let groups = group_by_parent(categories);
    let mut expanded = HashSet::new();

    match root_id {
        None => Ok(groups
            .get(&None)
            .map(|roots| {
                roots
                    .iter()
                    .filter_map(|&idx| build_node(categories, idx, &groups, &mut expanded))
                    .collect()
            })
            .unwrap_or_default()),
        Some(root_id) => {
            let idx = categories
                .iter()
                .position(|c| c.id == root_id)
                .ok_or(TreeError::RootNotFound(root_id))?;
            Ok(build_node(categories, idx, &groups, &mut expanded)
                .into_iter()
                .collect())
        }
    }
}

/// Ids of categories whose declared parent is absent from `categories`.
pub fn find_orphans(categories: &[Category]) -> Vec<CategoryId> {
    let known: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();
    categories
        .iter()
        .filter(|c| c.parent_id.is_some_and(|parent| !known.contains(&parent)))
        .map(|c| c.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i32) -> CategoryId {
        CategoryId::new(value).unwrap()
    }

    fn category(value: i32, parent: Option<i32>) -> Category {
        Category {
            id: id(value),
            name: CategoryName::new(format!("category-{value}")).unwrap(),
            description: None,
            parent_id: parent.map(id),
            created_at: None,
            updated_at: None,
        }
    }

    fn edges(nodes: &[CategoryNode], parent: Option<CategoryId>, out: &mut Vec<(i32, Option<i32>)>) {
        for node in nodes {
            out.push((node.id.get(), parent.map(CategoryId::get)));
            edges(&node.children, Some(node.id), out);
        }
    }

    #[test]
    fn builds_forest_from_roots_in_input_order() {
        let categories = vec![
            category(3, None),
            category(1, None),
            category(2, Some(1)),
            category(4, Some(2)),
            category(5, Some(1)),
        ];

        let forest = build_category_tree(&categories, None).unwrap();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, 3);
        assert_eq!(forest[1].id, 1);
        let children: Vec<i32> = forest[1].children.iter().map(|n| n.id.get()).collect();
        assert_eq!(children, vec![2, 5]);
        assert_eq!(forest[1].children[0].children[0].id, 4);
    }

    #[test]
    fn flattening_the_forest_reproduces_edges_without_orphans() {
        let categories = vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(2)),
            category(4, None),
            category(5, Some(4)),
            category(6, Some(99)),
        ];

        let forest = build_category_tree(&categories, None).unwrap();
        let mut flattened = Vec::new();
        edges(&forest, None, &mut flattened);
        flattened.sort();

        let mut expected: Vec<(i32, Option<i32>)> = categories
            .iter()
            .filter(|c| c.id != 6)
            .map(|c| (c.id.get(), c.parent_id.map(CategoryId::get)))
            .collect();
        expected.sort();

        assert_eq!(flattened, expected);
    }

    #[test]
    fn rooted_build_returns_single_subtree() {
        let categories = vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(2)),
            category(4, Some(1)),
        ];

        let forest = build_category_tree(&categories, Some(id(2))).unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 2);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, 3);
    }

    #[test]
    fn rooted_build_fails_for_unknown_root() {
        let categories = vec![category(1, None)];
        assert_eq!(
            build_category_tree(&categories, Some(id(9))).unwrap_err(),
            TreeError::RootNotFound(id(9))
        );
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(build_category_tree(&[], None).unwrap().is_empty());
    }

    #[test]
    fn stored_cycle_does_not_recurse_forever() {
        let categories = vec![category(1, Some(2)), category(2, Some(1))];

        assert!(build_category_tree(&categories, None).unwrap().is_empty());

        let forest = build_category_tree(&categories, Some(id(1))).unwrap();
        assert_eq!(forest[0].id, 1);
        assert_eq!(forest[0].children[0].id, 2);
        assert!(forest[0].children[0].children.is_empty());
    }

    #[test]
    fn finds_orphans() {
        let categories = vec![category(1, None), category(2, Some(1)), category(3, Some(42))];
        assert_eq!(find_orphans(&categories), vec![id(3)]);
    }
}
