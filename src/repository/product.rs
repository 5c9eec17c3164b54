use std::collections::HashMap;

use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::domain::types::ProductId;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductChangeset,
};
use crate::models::product_image::{NewProductImage, ProductImage};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, RepositoryError,
    RepositoryResult,
};

/// Loads gallery urls for the given rows and converts them to domain records.
fn attach_images(
    conn: &mut DbConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<Product>> {
    use crate::schema::product_images;

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let images = product_images::table
        .filter(product_images::product_id.eq_any(&ids))
        .order((
            product_images::product_id.asc(),
            product_images::position.asc(),
        ))
        .load::<ProductImage>(conn)?;

    let mut by_product: HashMap<i32, Vec<String>> = HashMap::new();
    for image in images {
        by_product.entry(image.product_id).or_default().push(image.url);
    }

    rows.into_iter()
        .map(|row| {
            let gallery = by_product.remove(&row.id).unwrap_or_default();
            row.into_domain(gallery).map_err(Into::into)
        })
        .collect()
}

/// Replaces a product's gallery rows inside the caller's transaction.
fn replace_gallery<C>(
    conn: &mut C,
    product_id: i32,
    urls: &[String],
) -> Result<(), diesel::result::Error>
where
    C: diesel::Connection<Backend = diesel::sqlite::Sqlite>,
{
    use crate::schema::product_images;

    diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
        .execute(conn)?;

    let rows: Vec<NewProductImage> = urls
        .iter()
        .enumerate()
        .map(|(position, url)| NewProductImage {
            product_id,
            position: position as i32,
            url: url.clone(),
        })
        .collect();

    if !rows.is_empty() {
        diesel::insert_into(product_images::table)
            .values(&rows)
            .execute(conn)?;
    }

    Ok(())
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(category_id) = query.category_id {
                items = items.filter(products::category_id.eq(category_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let rows = items.order(products::id.asc()).load::<DbProduct>(&mut conn)?;
        let products = attach_images(&mut conn, rows)?;

        Ok((total, products))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let row = products::table
            .filter(products::id.eq(id.get()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(attach_images(&mut conn, vec![row])?.into_iter().next()),
            None => Ok(None),
        }
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();
        let urls: Vec<String> = product.images.iter().map(|i| i.as_str().to_string()).collect();

        let row = conn.transaction(|conn| {
            let row = diesel::insert_into(products::table)
                .values(&db_product)
                .get_result::<DbProduct>(conn)?;
            replace_gallery(conn, row.id, &urls)?;
            Ok::<_, diesel::result::Error>(row)
        })?;

        Ok(row.into_domain(urls)?)
    }

    fn update_product(&self, id: ProductId, patch: &ProductPatch) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let changeset = ProductChangeset::from(patch);

        // Existence is checked inside the transaction so a miss rolls back
        // any gallery rows instead of committing them against a ghost id.
        let row = conn.transaction(|conn| {
            products::table
                .filter(products::id.eq(id.get()))
                .first::<DbProduct>(conn)
                .optional()?
                .ok_or_else(|| RepositoryError::NotFound {
                    id: format!("product {id}"),
                })?;

            if !changeset.is_empty() {
                diesel::update(products::table.filter(products::id.eq(id.get())))
                    .set(&changeset)
                    .execute(conn)?;
            }

            if let Some(images) = &patch.images {
                let urls: Vec<String> = images.iter().map(|i| i.as_str().to_string()).collect();
                replace_gallery(conn, id.get(), &urls)?;
            }

            products::table
                .filter(products::id.eq(id.get()))
                .first::<DbProduct>(conn)
                .map_err(RepositoryError::from)
        })?;

        Ok(attach_images(&mut conn, vec![row])?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound {
                id: format!("product {id}"),
            })?)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            diesel::delete(product_images::table.filter(product_images::product_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(products::table.filter(products::id.eq(id.get()))).execute(conn)
        })?;

        Ok(affected)
    }
}
