//! Category Repository Implementation
//!
//! SQLite-backed implementation for Category CRUD and the category-product join.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::db::SharedConnection;
use super::eager::group_rows;
use super::traits::{EagerLoadProducts, Repository};
use crate::domain::{
    Category, CategoryPayload, DomainError, DomainResult, Product, ProductSummary, WithProducts,
};

/// SQLite implementation of Category repository
pub struct CategoryRepository {
    conn: SharedConnection,
}

impl CategoryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Category> for CategoryRepository {
    async fn create(&self, payload: &CategoryPayload) -> DomainResult<Category> {
        let conn = self.conn.lock().await;

        // A missing name is rejected by the NOT NULL constraint
        conn.execute(
            "INSERT INTO category (category_name) VALUES (?1)",
            params![payload.category_name],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "Category created");

        select_category(&conn, id)?
            .ok_or_else(|| DomainError::Internal(format!("Category {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Category>> {
        let conn = self.conn.lock().await;
        Ok(select_category(&conn, id)?)
    }

    async fn update(&self, id: i64, payload: &CategoryPayload) -> DomainResult<usize> {
        let conn = self.conn.lock().await;

        let affected = conn.execute(
            "UPDATE category SET category_name = COALESCE(?1, category_name) WHERE id = ?2",
            params![payload.category_name, id],
        )?;
        debug!(id, affected, "Category updated");
        Ok(affected)
    }

    async fn delete(&self, id: i64) -> DomainResult<usize> {
        let conn = self.conn.lock().await;

        // Products of this category are kept with a NULL category_id
        let affected = conn.execute("DELETE FROM category WHERE id = ?1", params![id])?;
        debug!(id, affected, "Category deleted");
        Ok(affected)
    }
}

#[async_trait]
impl EagerLoadProducts<Category> for CategoryRepository {
    type Detail = Product;

    async fn list_with_products(
        &self,
    ) -> DomainResult<Vec<WithProducts<Category, ProductSummary>>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT c.id, c.category_name, p.id, p.product_name, p.price, p.stock
             FROM category c
             LEFT JOIN product p ON p.category_id = c.id
             ORDER BY c.id, p.id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let product = match row.get::<_, Option<i64>>(2)? {
                    Some(id) => Some(ProductSummary {
                        id,
                        product_name: row.get(3)?,
                        price: row.get(4)?,
                        stock: row.get(5)?,
                    }),
                    None => None,
                };
                Ok((row_to_category(row)?, product))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(group_rows(rows))
    }

    async fn find_with_products(
        &self,
        id: i64,
    ) -> DomainResult<Option<WithProducts<Category, Product>>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT c.id, c.category_name, p.id, p.product_name, p.price, p.stock, p.category_id
             FROM category c
             LEFT JOIN product p ON p.category_id = c.id
             WHERE c.id = ?1
             ORDER BY p.id",
        )?;
        let rows = stmt
            .query_map(params![id], |row| {
                let product = match row.get::<_, Option<i64>>(2)? {
                    Some(id) => Some(Product {
                        id,
                        product_name: row.get(3)?,
                        price: row.get(4)?,
                        stock: row.get(5)?,
                        category_id: row.get(6)?,
                    }),
                    None => None,
                };
                Ok((row_to_category(row)?, product))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(group_rows(rows).into_iter().next())
    }
}

fn select_category(conn: &Connection, id: i64) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        "SELECT id, category_name FROM category WHERE id = ?1",
        params![id],
        row_to_category,
    )
    .optional()
}

/// Convert the first two columns of a row to Category
fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        category_name: row.get(1)?,
    })
}
