//! Demo Catalog Seeding
//!
//! Fills an empty database with a small storefront so the API has something to show.

use rusqlite::params;
use tracing::info;

use super::db::DbState;
use crate::domain::DomainResult;

const CATEGORIES: &[&str] = &["Shirts", "Shorts", "Music", "Hats", "Shoes"];

/// (product_name, price, stock, category_id)
const PRODUCTS: &[(&str, f64, i64, i64)] = &[
    ("Plain T-Shirt", 14.99, 14, 1),
    ("Running Sneakers", 90.0, 25, 5),
    ("Branded Baseball Hat", 22.99, 12, 4),
    ("Top 40 Music Compilation Vinyl Record", 12.99, 50, 3),
    ("Cargo Shorts", 29.99, 22, 2),
];

const TAGS: &[&str] = &[
    "rock music",
    "pop music",
    "blue",
    "red",
    "green",
    "white",
    "gold",
    "pop culture",
];

/// (product_id, tag_id)
const PRODUCT_TAGS: &[(i64, i64)] = &[
    (1, 6),
    (1, 7),
    (1, 8),
    (2, 6),
    (3, 1),
    (3, 3),
    (3, 4),
    (3, 5),
    (4, 1),
    (4, 2),
    (4, 8),
    (5, 3),
];

/// Insert the demo catalog if no category exists yet
///
/// Returns whether anything was written.
pub async fn seed_db(db: &DbState) -> DomainResult<bool> {
    let shared = db.connection();
    let mut conn = shared.lock().await;

    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM category", [], |row| row.get(0))?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping seed");
        return Ok(false);
    }

    let tx = conn.transaction()?;
    for name in CATEGORIES {
        tx.execute("INSERT INTO category (category_name) VALUES (?1)", params![name])?;
    }
    for (name, price, stock, category_id) in PRODUCTS {
        tx.execute(
            "INSERT INTO product (product_name, price, stock, category_id) VALUES (?1, ?2, ?3, ?4)",
            params![name, price, stock, category_id],
        )?;
    }
    for name in TAGS {
        tx.execute("INSERT INTO tag (tag_name) VALUES (?1)", params![name])?;
    }
    for (product_id, tag_id) in PRODUCT_TAGS {
        tx.execute(
            "INSERT INTO product_tag (product_id, tag_id) VALUES (?1, ?2)",
            params![product_id, tag_id],
        )?;
    }
    tx.commit()?;

    info!(
        categories = CATEGORIES.len(),
        products = PRODUCTS.len(),
        tags = TAGS.len(),
        "Seeded demo catalog"
    );
    Ok(true)
}
