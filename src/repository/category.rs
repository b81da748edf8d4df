use chrono::Utc;
use diesel::dsl::{exists, max};
use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::models::category::{Category as DbCategory, CategoryChanges, NewCategory};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryError, RepositoryResult,
};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn category_exists(&self, id: CategoryId) -> RepositoryResult<bool> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let found = diesel::select(exists(categories::table.find(id.get())))
            .get_result::<bool>(&mut conn)?;
        Ok(found)
    }

    fn has_children(&self, id: CategoryId) -> RepositoryResult<bool> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let found = diesel::select(exists(
            categories::table.filter(categories::parent_id.eq(Some(id.get()))),
        ))
        .get_result::<bool>(&mut conn)?;
        Ok(found)
    }

    fn next_category_id(&self) -> RepositoryResult<CategoryId> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let current = categories::table
            .select(max(categories::id))
            .first::<Option<i32>>(&mut conn)?;

        let next = current
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(RepositoryError::IdSpaceExhausted)?;
        Ok(CategoryId::new(next)?)
    }

    fn count_categories(&self) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let total = categories::table.count().get_result::<i64>(&mut conn)? as usize;
        Ok(total)
    }

    fn count_root_categories(&self) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let total = categories::table
            .filter(categories::parent_id.is_null())
            .count()
            .get_result::<i64>(&mut conn)? as usize;
        Ok(total)
    }
}

impl CategoryWriter for DieselRepository {
    fn save_category(&self, category: &Category) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let saved = conn.transaction(|conn| {
            let stored = diesel::select(exists(categories::table.find(category.id.get())))
                .get_result::<bool>(conn)?;

            if stored {
                diesel::update(categories::table.find(category.id.get()))
                    .set(CategoryChanges::from_domain(category, now))
                    .get_result::<DbCategory>(conn)
            } else {
                diesel::insert_into(categories::table)
                    .values(NewCategory::from_domain(category, now))
                    .get_result::<DbCategory>(conn)
            }
        })?;

        Ok(saved.try_into()?)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(categories::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
