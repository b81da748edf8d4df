use category_tree::domain::category::Category;
use category_tree::domain::types::{CategoryDescription, CategoryId, CategoryName};
use category_tree::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryError,
};
use category_tree::schema::categories;
use diesel::prelude::*;

mod common;

fn id(value: i32) -> CategoryId {
    CategoryId::new(value).expect("valid category id")
}

fn name(value: &str) -> CategoryName {
    CategoryName::new(value).expect("valid category name")
}

#[test]
fn empty_store_allocates_first_id() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    assert_eq!(repo.next_category_id().expect("should allocate id"), id(1));
    assert!(repo.list_categories().expect("should list").is_empty());
    assert_eq!(repo.count_categories().expect("should count"), 0);
}

#[test]
fn save_inserts_then_updates_with_timestamps() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let root = Category::new_root(
        id(1),
        name("Electronics"),
        Some(CategoryDescription::new("Gadgets").expect("valid description")),
    );
    let saved = repo.save_category(&root).expect("should insert category");
    assert_eq!(saved.id, id(1));
    assert_eq!(saved.description.as_ref().map(|d| d.as_str()), Some("Gadgets"));
    let created_at = saved.created_at.expect("created_at populated on insert");
    assert!(saved.updated_at.is_some());

    let mut child = Category::new_child(id(2), name("Phones"), None, id(1))
        .expect("valid child category");
    repo.save_category(&child).expect("should insert child");

    child.update_info(name("Mobile phones"), None);
    child.change_parent(None).expect("root reassignment");
    let updated = repo.save_category(&child).expect("should update child");
    assert_eq!(updated.name, "Mobile phones");
    assert_eq!(updated.parent_id, None);

    let reloaded = repo
        .get_category_by_id(id(1))
        .expect("should query")
        .expect("root should exist");
    assert_eq!(reloaded.created_at, Some(created_at));
}

#[test]
fn tracks_children_counts_and_next_id() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.save_category(&Category::new_root(id(1), name("A"), None))
        .expect("should insert A");
    repo.save_category(&Category::new_child(id(5), name("B"), None, id(1)).expect("valid child"))
        .expect("should insert B");

    assert!(repo.has_children(id(1)).expect("should query children"));
    assert!(!repo.has_children(id(5)).expect("should query children"));
    assert!(repo.category_exists(id(5)).expect("should query existence"));
    assert!(!repo.category_exists(id(3)).expect("should query existence"));
    assert_eq!(repo.next_category_id().expect("should allocate id"), id(6));
    assert_eq!(repo.count_categories().expect("should count"), 2);
    assert_eq!(repo.count_root_categories().expect("should count roots"), 1);

    let ids: Vec<i32> = repo
        .list_categories()
        .expect("should list")
        .into_iter()
        .map(|c| c.id.get())
        .collect();
    assert_eq!(ids, vec![1, 5]);

    assert_eq!(repo.delete_category(id(5)).expect("should delete"), 1);
    assert!(!repo.has_children(id(1)).expect("should query children"));
    assert!(
        repo.get_category_by_id(id(5))
            .expect("should query")
            .is_none()
    );
}

#[test]
fn invalid_stored_rows_surface_as_validation_errors() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    diesel::insert_into(categories::table)
        .values((
            categories::id.eq(1),
            categories::name.eq("   "),
            categories::created_at.eq(diesel::dsl::now),
            categories::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .expect("should insert raw row");

    assert!(repo.get_category_by_id(id(1)).is_err());
}

#[test]
fn next_id_reports_exhausted_identifier_space() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.save_category(&Category::new_root(id(i32::MAX), name("Last"), None))
        .expect("should insert category");

    assert!(matches!(
        repo.next_category_id(),
        Err(RepositoryError::IdSpaceExhausted)
    ));
}
