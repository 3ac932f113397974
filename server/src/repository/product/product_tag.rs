//! Product-Tag Relationship Operations
//!
//! Operations on the many-to-many join between products and tags.
//! These run on a borrowed connection so they can share the caller's transaction.

use rusqlite::{params, Connection};
use std::collections::{BTreeSet, HashMap};

use super::super::tag_repo::row_to_tag;
use crate::domain::{ProductTag, Tag};

/// Join rows of one product
pub(super) fn product_tags_for(conn: &Connection, product_id: i64) -> rusqlite::Result<Vec<ProductTag>> {
    let mut stmt = conn.prepare(
        "SELECT id, product_id, tag_id FROM product_tag WHERE product_id = ?1 ORDER BY tag_id",
    )?;
    let rows = stmt
        .query_map(params![product_id], |row| {
            Ok(ProductTag {
                id: row.get(0)?,
                product_id: row.get(1)?,
                tag_id: row.get(2)?,
            })
        })?
        .collect();
    rows
}

/// All tags attached to one product
pub(super) fn tags_for_product(conn: &Connection, product_id: i64) -> rusqlite::Result<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.tag_name FROM tag t
         JOIN product_tag pt ON pt.tag_id = t.id
         WHERE pt.product_id = ?1
         ORDER BY t.id",
    )?;
    let tags = stmt.query_map(params![product_id], row_to_tag)?.collect();
    tags
}

/// Tags of every product, keyed by product ID
pub(super) fn tags_by_product(conn: &Connection) -> rusqlite::Result<HashMap<i64, Vec<Tag>>> {
    let mut stmt = conn.prepare(
        "SELECT pt.product_id, t.id, t.tag_name FROM product_tag pt
         JOIN tag t ON t.id = pt.tag_id
         ORDER BY pt.product_id, t.id",
    )?;
    let mut rows = stmt.query([])?;

    let mut by_product: HashMap<i64, Vec<Tag>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let product_id: i64 = row.get(0)?;
        by_product.entry(product_id).or_default().push(Tag {
            id: row.get(1)?,
            tag_name: row.get(2)?,
        });
    }
    Ok(by_product)
}

/// Make `tag_ids` the exact tag set of a product
///
/// Rows for tags no longer listed are removed, new ones inserted, unchanged
/// ones kept. An unknown tag ID fails on the foreign key.
pub(super) fn replace_product_tags(
    conn: &Connection,
    product_id: i64,
    tag_ids: &[i64],
) -> rusqlite::Result<()> {
    let wanted: BTreeSet<i64> = tag_ids.iter().copied().collect();
    let current = product_tags_for(conn, product_id)?;

    for stale in current.iter().filter(|pt| !wanted.contains(&pt.tag_id)) {
        conn.execute("DELETE FROM product_tag WHERE id = ?1", params![stale.id])?;
    }

    let existing: BTreeSet<i64> = current.iter().map(|pt| pt.tag_id).collect();
    for tag_id in wanted.difference(&existing) {
        conn.execute(
            "INSERT INTO product_tag (product_id, tag_id) VALUES (?1, ?2)",
            params![product_id, tag_id],
        )?;
    }

    Ok(())
}
