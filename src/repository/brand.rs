use std::collections::HashMap;

use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::brand::{
    Brand as DomainBrand, BrandDescription as DomainBrandDescription, NewBrand as DomainNewBrand,
    UpdateBrand as DomainUpdateBrand,
};
use crate::models::brand::{
    Brand as DbBrand, BrandTranslation as DbBrandTranslation, NewBrand as DbNewBrand,
    NewBrandTranslation as DbNewBrandTranslation, UpdateBrand as DbUpdateBrand,
};
use crate::repository::{
    BrandReader, BrandWriter, DieselRepository, RepositoryError, RepositoryResult,
};
use crate::slug::unique_slug;

impl BrandReader for DieselRepository {
    fn list_brands(&self) -> RepositoryResult<Vec<DomainBrand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let rows = brands::table
            .order((brands::name.asc(), brands::id.asc()))
            .load::<DbBrand>(&mut conn)?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut descriptions = load_descriptions(&mut conn, &ids)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let own = descriptions.remove(&row.id).unwrap_or_default();
                row.into_domain(own)
            })
            .collect())
    }

    fn get_brand_by_id(&self, brand_id: i32) -> RepositoryResult<Option<DomainBrand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let row = brands::table
            .filter(brands::id.eq(brand_id))
            .first::<DbBrand>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(attach_descriptions(&mut conn, row)?)),
            None => Ok(None),
        }
    }
}

impl BrandWriter for DieselRepository {
    fn create_brand(&self, new_brand: &DomainNewBrand) -> RepositoryResult<DomainBrand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        conn.transaction::<DomainBrand, RepositoryError, _>(|conn| {
            let slug = unique_slug(&new_brand.slug, |candidate| brand_slug_taken(conn, candidate))?;

            let created = diesel::insert_into(brands::table)
                .values(&DbNewBrand::from_domain(new_brand, &slug))
                .get_result::<DbBrand>(conn)?;

            insert_descriptions(conn, created.id, &new_brand.descriptions)?;

            attach_descriptions(conn, created)
        })
    }

    fn update_brand(
        &self,
        brand_id: i32,
        updates: &DomainUpdateBrand,
    ) -> RepositoryResult<DomainBrand> {
        use crate::schema::{brand_translations, brands};

        let mut conn = self.conn()?;

        conn.transaction::<DomainBrand, RepositoryError, _>(|conn| {
            let updated = diesel::update(brands::table.filter(brands::id.eq(brand_id)))
                .set(&DbUpdateBrand::from(updates))
                .get_result::<DbBrand>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            diesel::delete(
                brand_translations::table.filter(brand_translations::brand_id.eq(brand_id)),
            )
            .execute(conn)?;
            insert_descriptions(conn, brand_id, &updates.descriptions)?;

            attach_descriptions(conn, updated)
        })
    }

    fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()> {
        use crate::schema::{brand_translations, brands, categories};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            ensure_brand_exists(conn, brand_id)?;

            diesel::update(categories::table.filter(categories::brand_id.eq(brand_id)))
                .set((
                    categories::brand_id.eq::<Option<i32>>(None),
                    categories::updated_at.eq(Local::now().naive_utc()),
                ))
                .execute(conn)?;

            diesel::delete(
                brand_translations::table.filter(brand_translations::brand_id.eq(brand_id)),
            )
            .execute(conn)?;

            diesel::delete(brands::table.filter(brands::id.eq(brand_id))).execute(conn)?;

            Ok(())
        })
    }
}

pub(crate) fn ensure_brand_exists(
    conn: &mut SqliteConnection,
    brand_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::brands;

    let exists: bool = select(exists(brands::table.filter(brands::id.eq(brand_id)))).get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

fn brand_slug_taken(conn: &mut SqliteConnection, slug: &str) -> RepositoryResult<bool> {
    use crate::schema::brands;

    Ok(select(exists(brands::table.filter(brands::slug.eq(slug)))).get_result(conn)?)
}

fn insert_descriptions(
    conn: &mut SqliteConnection,
    brand_id: i32,
    descriptions: &[DomainBrandDescription],
) -> RepositoryResult<()> {
    use crate::schema::brand_translations;

    for description in descriptions {
        diesel::insert_into(brand_translations::table)
            .values(&DbNewBrandTranslation::from_domain(brand_id, description))
            .execute(conn)?;
    }

    Ok(())
}

fn attach_descriptions(conn: &mut SqliteConnection, row: DbBrand) -> RepositoryResult<DomainBrand> {
    let mut descriptions = load_descriptions(conn, &[row.id])?;
    let own = descriptions.remove(&row.id).unwrap_or_default();
    Ok(row.into_domain(own))
}

fn load_descriptions(
    conn: &mut SqliteConnection,
    brand_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainBrandDescription>>> {
    use crate::schema::brand_translations;

    if brand_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = brand_translations::table
        .filter(brand_translations::brand_id.eq_any(brand_ids))
        .order(brand_translations::id.asc())
        .load::<DbBrandTranslation>(conn)?;

    let mut map: HashMap<i32, Vec<DomainBrandDescription>> = HashMap::new();
    for row in rows {
        let brand_id = row.brand_id;
        map.entry(brand_id)
            .or_default()
            .push(DomainBrandDescription::try_from(row)?);
    }

    Ok(map)
}
