use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};
use diesel::dsl::{count_star, exists, select};
use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable, Timestamp};
use diesel::sqlite::SqliteConnection;

use crate::domain::category::{
    Category as DomainCategory, CategoryNode as DomainCategoryNode, CategoryUpdated,
    NewCategory as DomainNewCategory, UpdateCategory as DomainUpdateCategory,
};
use crate::domain::product::ProductNode as DomainProductNode;
use crate::domain::translation::Translation as DomainTranslation;
use crate::models::category::{
    Category as DbCategory, CategoryTranslation as DbCategoryTranslation,
    NewCategory as DbNewCategory, NewCategoryTranslation as DbNewCategoryTranslation,
    UpdateCategory as DbUpdateCategory,
};
use crate::models::product::Product as DbProduct;
use crate::repository::brand::ensure_brand_exists;
use crate::repository::product::load_product_translations;
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, InvariantViolation, RepositoryError,
    RepositoryResult,
};
use crate::slug::unique_slug;

/// Overwrites the brand of every transitive descendant of the bound category.
/// `UNION` (not `UNION ALL`) keeps the walk finite even over corrupted, cyclic data.
const CASCADE_BRAND_SQL: &str = "\
WITH RECURSIVE descendants(id) AS (
    SELECT id FROM categories WHERE parent_id = ?
    UNION
    SELECT categories.id FROM categories
    JOIN descendants ON categories.parent_id = descendants.id
)
UPDATE categories SET brand_id = ?, updated_at = ?
WHERE id IN (SELECT id FROM descendants)";

/// Returns the bound category and all of its ancestors up to the root.
const ANCESTORS_SQL: &str = "\
WITH RECURSIVE ancestors(id, parent_id) AS (
    SELECT id, parent_id FROM categories WHERE id = ?
    UNION
    SELECT categories.id, categories.parent_id FROM categories
    JOIN ancestors ON categories.id = ancestors.parent_id
)
SELECT id FROM ancestors";

#[derive(QueryableByName)]
struct CategoryIdRow {
    #[diesel(sql_type = Integer)]
    id: i32,
}

impl CategoryReader for DieselRepository {
    fn list_root_categories(&self) -> RepositoryResult<Vec<DomainCategoryNode>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let rows = categories::table
            .filter(categories::parent_id.is_null())
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?;

        build_nodes(&mut conn, rows, 0)
    }

    fn list_subcategories(
        &self,
        parent_id: i32,
        level: i32,
    ) -> RepositoryResult<Vec<DomainCategoryNode>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let rows = categories::table
            .filter(categories::parent_id.eq(parent_id))
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?;

        build_nodes(&mut conn, rows, level + 1)
    }

    fn list_category_products(
        &self,
        category_id: i32,
        level: i32,
    ) -> RepositoryResult<Vec<DomainProductNode>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let rows = products::table
            .filter(products::category_id.eq(category_id))
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut translations = load_product_translations(&mut conn, &ids)?;

        let mut nodes = Vec::with_capacity(rows.len());
        for row in rows {
            let own = translations.remove(&row.id).unwrap_or_default();
            nodes.push(row.into_node(own, level + 1)?);
        }

        Ok(nodes)
    }

    fn list_all_categories(&self) -> RepositoryResult<Vec<DomainCategoryNode>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let rows = categories::table
            .order((categories::parent_id.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?;

        build_nodes(&mut conn, rows, 0)
    }

    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let row = categories::table
            .filter(categories::id.eq(category_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(attach_translations(&mut conn, row)?)),
            None => Ok(None),
        }
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let row = categories::table
            .filter(categories::slug.eq(slug))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(attach_translations(&mut conn, row)?)),
            None => Ok(None),
        }
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            if let Some(parent_id) = new_category.parent_id {
                ensure_category_exists(conn, parent_id)?;
                if count_products(conn, parent_id)? > 0 {
                    return Err(InvariantViolation::ParentHoldsProducts.into());
                }
            }

            if let Some(brand_id) = new_category.brand_id {
                ensure_brand_exists(conn, brand_id)?;
            }

            let slug = unique_slug(&new_category.slug, |candidate| {
                category_slug_taken(conn, candidate)
            })?;

            let insertable = DbNewCategory::from_domain(new_category, &slug);

            let created = diesel::insert_into(categories::table)
                .values(&insertable)
                .get_result::<DbCategory>(conn)?;

            insert_translations(conn, created.id, &new_category.translations)?;

            attach_translations(conn, created)
        })
    }

    fn update_category(
        &self,
        category_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<CategoryUpdated> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<CategoryUpdated, RepositoryError, _>(|conn| {
            let current = categories::table
                .filter(categories::id.eq(category_id))
                .first::<DbCategory>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            if let Some(brand_id) = updates.brand_id {
                ensure_brand_exists(conn, brand_id)?;
            }

            replace_translations(conn, category_id, &updates.translations)?;

            diesel::update(categories::table.filter(categories::id.eq(category_id)))
                .set(&DbUpdateCategory::from(updates))
                .execute(conn)?;

            let cascaded = if current.brand_id != updates.brand_id {
                cascade_to_descendants(conn, category_id, updates.brand_id, updates.updated_at)?
            } else {
                0
            };

            let category = load_category(conn, category_id)?;

            Ok(CategoryUpdated { category, cascaded })
        })
    }

    fn cascade_brand(&self, category_id: i32, brand_id: Option<i32>) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            ensure_category_exists(conn, category_id)?;
            if let Some(brand_id) = brand_id {
                ensure_brand_exists(conn, brand_id)?;
            }

            cascade_to_descendants(conn, category_id, brand_id, Local::now().naive_utc())
        })
    }

    fn move_category(
        &self,
        category_id: i32,
        parent_id: Option<i32>,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            ensure_category_exists(conn, category_id)?;

            if let Some(parent_id) = parent_id {
                ensure_category_exists(conn, parent_id)?;

                let ancestors = diesel::sql_query(ANCESTORS_SQL)
                    .bind::<Integer, _>(parent_id)
                    .load::<CategoryIdRow>(conn)?;

                if ancestors.iter().any(|row| row.id == category_id) {
                    return Err(InvariantViolation::CyclicParent.into());
                }

                if count_products(conn, parent_id)? > 0 {
                    return Err(InvariantViolation::ParentHoldsProducts.into());
                }
            }

            diesel::update(categories::table.filter(categories::id.eq(category_id)))
                .set((
                    categories::parent_id.eq(parent_id),
                    categories::updated_at.eq(Local::now().naive_utc()),
                ))
                .execute(conn)?;

            load_category(conn, category_id)
        })
    }

    fn delete_category(&self, category_id: i32) -> RepositoryResult<()> {
        use crate::schema::{categories, category_translations};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            ensure_category_exists(conn, category_id)?;

            let children = count_children(conn, category_id)?;
            if children > 0 {
                return Err(InvariantViolation::CategoryHasChildren { count: children }.into());
            }

            let products = count_products(conn, category_id)?;
            if products > 0 {
                return Err(InvariantViolation::CategoryHasProducts { count: products }.into());
            }

            diesel::delete(
                category_translations::table
                    .filter(category_translations::category_id.eq(category_id)),
            )
            .execute(conn)?;

            diesel::delete(categories::table.filter(categories::id.eq(category_id)))
                .execute(conn)?;

            Ok(())
        })
    }
}

fn cascade_to_descendants(
    conn: &mut SqliteConnection,
    category_id: i32,
    brand_id: Option<i32>,
    updated_at: NaiveDateTime,
) -> RepositoryResult<usize> {
    let affected = diesel::sql_query(CASCADE_BRAND_SQL)
        .bind::<Integer, _>(category_id)
        .bind::<Nullable<Integer>, _>(brand_id)
        .bind::<Timestamp, _>(updated_at)
        .execute(conn)?;

    Ok(affected)
}

fn build_nodes(
    conn: &mut SqliteConnection,
    rows: Vec<DbCategory>,
    level: i32,
) -> RepositoryResult<Vec<DomainCategoryNode>> {
    use crate::schema::{brands, categories, products};

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();

    let child_counts: HashMap<i32, i64> = categories::table
        .filter(categories::parent_id.eq_any(&ids))
        .group_by(categories::parent_id)
        .select((categories::parent_id, count_star()))
        .load::<(Option<i32>, i64)>(conn)?
        .into_iter()
        .filter_map(|(parent_id, count)| parent_id.map(|id| (id, count)))
        .collect();

    let product_counts: HashMap<i32, i64> = products::table
        .filter(products::category_id.eq_any(&ids))
        .group_by(products::category_id)
        .select((products::category_id, count_star()))
        .load::<(i32, i64)>(conn)?
        .into_iter()
        .collect();

    let brand_ids: Vec<i32> = rows.iter().filter_map(|row| row.brand_id).collect();
    let brand_names: HashMap<i32, String> = if brand_ids.is_empty() {
        HashMap::new()
    } else {
        brands::table
            .filter(brands::id.eq_any(&brand_ids))
            .select((brands::id, brands::name))
            .load::<(i32, String)>(conn)?
            .into_iter()
            .collect()
    };

    let mut translations = load_category_translations(conn, &ids)?;

    let nodes = rows
        .into_iter()
        .map(|row| {
            let child_count = child_counts.get(&row.id).copied().unwrap_or(0);
            let brand_name = row
                .brand_id
                .and_then(|brand_id| brand_names.get(&brand_id).cloned())
                .unwrap_or_default();

            DomainCategoryNode {
                id: row.id,
                parent_id: row.parent_id,
                slug: row.slug,
                brand_id: row.brand_id,
                brand_name,
                translations: translations.remove(&row.id).unwrap_or_default(),
                child_count,
                product_count: product_counts.get(&row.id).copied().unwrap_or(0),
                is_end_category: child_count == 0,
                level,
            }
        })
        .collect();

    Ok(nodes)
}

fn load_category_translations(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTranslation>>> {
    use crate::schema::category_translations;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = category_translations::table
        .filter(category_translations::category_id.eq_any(category_ids))
        .order(category_translations::id.asc())
        .load::<DbCategoryTranslation>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTranslation>> = HashMap::new();
    for row in rows {
        let category_id = row.category_id;
        map.entry(category_id)
            .or_default()
            .push(DomainTranslation::try_from(row)?);
    }

    Ok(map)
}

fn attach_translations(
    conn: &mut SqliteConnection,
    row: DbCategory,
) -> RepositoryResult<DomainCategory> {
    let mut translations = load_category_translations(conn, &[row.id])?;
    let own = translations.remove(&row.id).unwrap_or_default();
    Ok(row.into_domain(own))
}

fn load_category(conn: &mut SqliteConnection, category_id: i32) -> RepositoryResult<DomainCategory> {
    use crate::schema::categories;

    let row = categories::table
        .filter(categories::id.eq(category_id))
        .first::<DbCategory>(conn)?;

    attach_translations(conn, row)
}

fn insert_translations(
    conn: &mut SqliteConnection,
    category_id: i32,
    translations: &[DomainTranslation],
) -> RepositoryResult<()> {
    use crate::schema::category_translations;

    for translation in translations {
        diesel::insert_into(category_translations::table)
            .values(&DbNewCategoryTranslation::from_domain(category_id, translation))
            .execute(conn)?;
    }

    Ok(())
}

fn replace_translations(
    conn: &mut SqliteConnection,
    category_id: i32,
    translations: &[DomainTranslation],
) -> RepositoryResult<()> {
    use crate::schema::category_translations;

    diesel::delete(
        category_translations::table.filter(category_translations::category_id.eq(category_id)),
    )
    .execute(conn)?;

    insert_translations(conn, category_id, translations)
}

fn category_slug_taken(conn: &mut SqliteConnection, slug: &str) -> RepositoryResult<bool> {
    use crate::schema::categories;

    Ok(select(exists(categories::table.filter(categories::slug.eq(slug)))).get_result(conn)?)
}

fn count_children(conn: &mut SqliteConnection, category_id: i32) -> RepositoryResult<i64> {
    use crate::schema::categories;

    Ok(categories::table
        .filter(categories::parent_id.eq(category_id))
        .count()
        .get_result(conn)?)
}

fn count_products(conn: &mut SqliteConnection, category_id: i32) -> RepositoryResult<i64> {
    use crate::schema::products;

    Ok(products::table
        .filter(products::category_id.eq(category_id))
        .count()
        .get_result(conn)?)
}

pub(crate) fn ensure_category_exists(
    conn: &mut SqliteConnection,
    category_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::categories;

    let exists: bool = select(exists(
        categories::table.filter(categories::id.eq(category_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

/// Products may only live in a category that has no subcategories.
pub(crate) fn ensure_end_category(
    conn: &mut SqliteConnection,
    category_id: i32,
) -> RepositoryResult<()> {
    ensure_category_exists(conn, category_id)?;

    if count_children(conn, category_id)? > 0 {
        return Err(InvariantViolation::NotEndCategory.into());
    }

    Ok(())
}
