use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::translation::Translation as DomainTranslation;
use crate::models::product::{
    NewProduct as DbNewProduct, NewProductTranslation as DbNewProductTranslation,
    Product as DbProduct, ProductTranslation as DbProductTranslation,
    UpdateProduct as DbUpdateProduct,
};
use crate::repository::category::ensure_end_category;
use crate::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult,
};
use crate::slug::unique_slug;

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let row = products::table
            .filter(products::id.eq(product_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(attach_translations(&mut conn, row)?)),
            None => Ok(None),
        }
    }

    fn get_product_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let row = products::table
            .filter(products::slug.eq(slug))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(attach_translations(&mut conn, row)?)),
            None => Ok(None),
        }
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let details = &new_product.details;

            ensure_end_category(conn, details.category_id)?;
            ensure_sku_available(conn, &details.sku, None)?;

            let slug = unique_slug(&new_product.slug, |candidate| {
                product_slug_taken(conn, candidate)
            })?;

            let insertable = DbNewProduct::from_domain(details, &slug, new_product.updated_at)?;

            let created = diesel::insert_into(products::table)
                .values(&insertable)
                .get_result::<DbProduct>(conn)?;

            insert_translations(conn, created.id, &details.translations)?;

            attach_translations(conn, created)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_translations, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let details = &updates.details;

            let exists: bool = select(exists(products::table.filter(products::id.eq(product_id))))
                .get_result(conn)?;
            if !exists {
                return Err(RepositoryError::NotFound);
            }

            ensure_end_category(conn, details.category_id)?;
            ensure_sku_available(conn, &details.sku, Some(product_id))?;

            let changes = DbUpdateProduct::from_domain(details, updates.updated_at)?;

            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&changes)
                .get_result::<DbProduct>(conn)?;

            diesel::delete(
                product_translations::table
                    .filter(product_translations::product_id.eq(product_id)),
            )
            .execute(conn)?;
            insert_translations(conn, product_id, &details.translations)?;

            attach_translations(conn, updated)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_translations, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(
                product_translations::table
                    .filter(product_translations::product_id.eq(product_id)),
            )
            .execute(conn)?;

            let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
                .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

/// Reject `sku` when another product (other than `own_id`) already uses it.
fn ensure_sku_available(
    conn: &mut SqliteConnection,
    sku: &str,
    own_id: Option<i32>,
) -> RepositoryResult<()> {
    use crate::schema::products;

    let mut query = products::table
        .filter(products::sku.eq(sku))
        .into_boxed::<diesel::sqlite::Sqlite>();

    if let Some(own_id) = own_id {
        query = query.filter(products::id.ne(own_id));
    }

    let taken = query.count().get_result::<i64>(conn)?;

    if taken > 0 {
        Err(RepositoryError::Conflict {
            field: "sku",
            value: sku.to_string(),
        })
    } else {
        Ok(())
    }
}

fn product_slug_taken(conn: &mut SqliteConnection, slug: &str) -> RepositoryResult<bool> {
    use crate::schema::products;

    Ok(select(exists(products::table.filter(products::slug.eq(slug)))).get_result(conn)?)
}

fn insert_translations(
    conn: &mut SqliteConnection,
    product_id: i32,
    translations: &[DomainTranslation],
) -> RepositoryResult<()> {
    use crate::schema::product_translations;

    for translation in translations {
        diesel::insert_into(product_translations::table)
            .values(&DbNewProductTranslation::from_domain(product_id, translation))
            .execute(conn)?;
    }

    Ok(())
}

fn attach_translations(
    conn: &mut SqliteConnection,
    row: DbProduct,
) -> RepositoryResult<DomainProduct> {
    let mut translations = load_product_translations(conn, &[row.id])?;
    let own = translations.remove(&row.id).unwrap_or_default();
    Ok(row.into_domain(own)?)
}

pub(crate) fn load_product_translations(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTranslation>>> {
    use crate::schema::product_translations;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_translations::table
        .filter(product_translations::product_id.eq_any(product_ids))
        .order(product_translations::id.asc())
        .load::<DbProductTranslation>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTranslation>> = HashMap::new();
    for row in rows {
        let product_id = row.product_id;
        map.entry(product_id)
            .or_default()
            .push(DomainTranslation::try_from(row)?);
    }

    Ok(map)
}
