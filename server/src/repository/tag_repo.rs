//! Tag Repository Implementation
//!
//! SQLite-backed implementation for Tag CRUD.
//! Related products are reached through the `product_tag` join table.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::db::SharedConnection;
use super::eager::group_rows;
use super::traits::{EagerLoadProducts, Repository};
use crate::domain::{DomainError, DomainResult, ProductSummary, Tag, TagPayload, WithProducts};

/// SQLite implementation of Tag repository
pub struct TagRepository {
    conn: SharedConnection,
}

impl TagRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Tag> for TagRepository {
    async fn create(&self, payload: &TagPayload) -> DomainResult<Tag> {
        let tag_name = payload.tag_name()?;
        let conn = self.conn.lock().await;

        conn.execute("INSERT INTO tag (tag_name) VALUES (?1)", params![tag_name])?;
        let id = conn.last_insert_rowid();
        debug!(id, "Tag created");

        Ok(Tag::new(id, tag_name.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Tag>> {
        let conn = self.conn.lock().await;
        Ok(select_tag(&conn, id)?)
    }

    /// Only `tag_name` is writable; associations are left untouched
    async fn update(&self, id: i64, payload: &TagPayload) -> DomainResult<usize> {
        let tag_name = payload.tag_name()?;
        let conn = self.conn.lock().await;

        let affected = conn.execute(
            "UPDATE tag SET tag_name = ?1 WHERE id = ?2",
            params![tag_name, id],
        )?;
        debug!(id, affected, "Tag updated");
        Ok(affected)
    }

    async fn delete(&self, id: i64) -> DomainResult<usize> {
        let conn = self.conn.lock().await;

        // product_tag rows go with it (ON DELETE CASCADE)
        let affected = conn.execute("DELETE FROM tag WHERE id = ?1", params![id])?;
        debug!(id, affected, "Tag deleted");
        Ok(affected)
    }
}

#[async_trait]
impl EagerLoadProducts<Tag> for TagRepository {
    type Detail = ProductSummary;

    async fn list_with_products(&self) -> DomainResult<Vec<WithProducts<Tag, ProductSummary>>> {
        let conn = self.conn.lock().await;
        let rows = select_tags_with_products(&conn, None)?;
        Ok(group_rows(rows))
    }

    async fn find_with_products(
        &self,
        id: i64,
    ) -> DomainResult<Option<WithProducts<Tag, ProductSummary>>> {
        let conn = self.conn.lock().await;
        let rows = select_tags_with_products(&conn, Some(id))?;
        Ok(group_rows(rows).into_iter().next())
    }
}

/// Tags joined to their products through `product_tag`, optionally for one tag only
fn select_tags_with_products(
    conn: &Connection,
    only: Option<i64>,
) -> DomainResult<Vec<(Tag, Option<ProductSummary>)>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.tag_name, p.id, p.product_name, p.price, p.stock
         FROM tag t
         LEFT JOIN product_tag pt ON pt.tag_id = t.id
         LEFT JOIN product p ON p.id = pt.product_id
         WHERE ?1 IS NULL OR t.id = ?1
         ORDER BY t.id, p.id",
    )?;

    let rows = stmt
        .query_map(params![only], |row| {
            let product = match row.get::<_, Option<i64>>(2)? {
                Some(id) => Some(ProductSummary {
                    id,
                    product_name: row.get(3)?,
                    price: row.get(4)?,
                    stock: row.get(5)?,
                }),
                None => None,
            };
            Ok((row_to_tag(row)?, product))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(DomainError::from)?;

    Ok(rows)
}

fn select_tag(conn: &Connection, id: i64) -> rusqlite::Result<Option<Tag>> {
    conn.query_row(
        "SELECT id, tag_name FROM tag WHERE id = ?1",
        params![id],
        row_to_tag,
    )
    .optional()
}

/// Convert the first two columns of a row to Tag
pub(super) fn row_to_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        tag_name: row.get(1)?,
    })
}
