//! Product Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Product CRUD.
//! Writes that touch tags run in one transaction with the product row.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::product_tag::{replace_product_tags, tags_by_product, tags_for_product};
use super::super::db::SharedConnection;
use crate::domain::{
    Category, DomainError, DomainResult, Product, ProductDetail, ProductPayload, DEFAULT_STOCK,
};
use crate::repository::traits::Repository;

const DETAIL_SELECT: &str =
    "SELECT p.id, p.product_name, p.price, p.stock, p.category_id, c.id, c.category_name
     FROM product p
     LEFT JOIN category c ON c.id = p.category_id";

/// SQLite implementation of Product repository
pub struct ProductRepository {
    conn: SharedConnection,
}

impl ProductRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// All products with their category and tags
    pub async fn list_detailed(&self) -> DomainResult<Vec<ProductDetail>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!("{} ORDER BY p.id", DETAIL_SELECT))?;
        let rows = stmt
            .query_map([], row_to_detail)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tags = tags_by_product(&conn)?;
        Ok(rows
            .into_iter()
            .map(|mut detail| {
                detail.tags = tags.remove(&detail.product.id).unwrap_or_default();
                detail
            })
            .collect())
    }

    /// One product with its category and tags
    pub async fn find_detail(&self, id: i64) -> DomainResult<Option<ProductDetail>> {
        let conn = self.conn.lock().await;
        Ok(select_detail(&conn, id)?)
    }
}

#[async_trait]
impl Repository<Product> for ProductRepository {
    async fn create(&self, payload: &ProductPayload) -> DomainResult<Product> {
        payload.validate_new()?;
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO product (product_name, price, stock, category_id) VALUES (?1, ?2, ?3, ?4)",
            params![
                payload.product_name,
                payload.price,
                payload.stock.unwrap_or(DEFAULT_STOCK),
                payload.category_id,
            ],
        )?;
        let id = tx.last_insert_rowid();

        if let Some(tag_ids) = &payload.tag_ids {
            replace_product_tags(&tx, id, tag_ids)?;
        }

        let product = select_product(&tx, id)?;
        tx.commit()?;
        debug!(id, "Product created");

        product.ok_or_else(|| DomainError::Internal(format!("Product {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>> {
        let conn = self.conn.lock().await;
        Ok(select_product(&conn, id)?)
    }

    async fn update(&self, id: i64, payload: &ProductPayload) -> DomainResult<usize> {
        payload.validate_changes()?;
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let affected = tx.execute(
            "UPDATE product SET
                product_name = COALESCE(?1, product_name),
                price = COALESCE(?2, price),
                stock = COALESCE(?3, stock),
                category_id = COALESCE(?4, category_id)
             WHERE id = ?5",
            params![
                payload.product_name,
                payload.price,
                payload.stock,
                payload.category_id,
                id,
            ],
        )?;

        if affected > 0 {
            if let Some(tag_ids) = &payload.tag_ids {
                replace_product_tags(&tx, id, tag_ids)?;
            }
        }

        tx.commit()?;
        debug!(id, affected, "Product updated");
        Ok(affected)
    }

    async fn delete(&self, id: i64) -> DomainResult<usize> {
        let conn = self.conn.lock().await;

        let affected = conn.execute("DELETE FROM product WHERE id = ?1", params![id])?;
        debug!(id, affected, "Product deleted");
        Ok(affected)
    }
}

fn select_product(conn: &Connection, id: i64) -> rusqlite::Result<Option<Product>> {
    conn.query_row(
        "SELECT id, product_name, price, stock, category_id FROM product WHERE id = ?1",
        params![id],
        row_to_product,
    )
    .optional()
}

fn select_detail(conn: &Connection, id: i64) -> rusqlite::Result<Option<ProductDetail>> {
    let detail = conn
        .query_row(
            &format!("{} WHERE p.id = ?1", DETAIL_SELECT),
            params![id],
            row_to_detail,
        )
        .optional()?;

    match detail {
        Some(mut detail) => {
            detail.tags = tags_for_product(conn, id)?;
            Ok(Some(detail))
        }
        None => Ok(None),
    }
}

/// Convert a database row to Product
fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        product_name: row.get(1)?,
        price: row.get(2)?,
        stock: row.get(3)?,
        category_id: row.get(4)?,
    })
}

/// Convert a `DETAIL_SELECT` row to ProductDetail, tags left empty
fn row_to_detail(row: &Row) -> rusqlite::Result<ProductDetail> {
    let category = match row.get::<_, Option<i64>>(5)? {
        Some(id) => Some(Category {
            id,
            category_name: row.get(6)?,
        }),
        None => None,
    };

    Ok(ProductDetail {
        product: row_to_product(row)?,
        category,
        tags: Vec::new(),
    })
}
