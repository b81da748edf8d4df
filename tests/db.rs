use category_tree::schema::categories;
use diesel::prelude::*;

mod common;

#[test]
fn migrations_create_an_empty_categories_table() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    let total: i64 = categories::table
        .count()
        .get_result(&mut conn)
        .expect("categories table should exist");
    assert_eq!(total, 0);
}
