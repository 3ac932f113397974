//! Eager-load helpers
//!
//! A LEFT JOIN yields one row per (record, product) pair, with a NULL product
//! for records that have none. These helpers fold such rows back into records.

use crate::domain::{Entity, WithProducts};

/// Group joined rows by record
///
/// Rows must arrive ordered by record ID so that all rows of one record are adjacent.
pub(crate) fn group_rows<T, P, I>(rows: I) -> Vec<WithProducts<T, P>>
where
    T: Entity,
    I: IntoIterator<Item = (T, Option<P>)>,
{
    let mut grouped: Vec<WithProducts<T, P>> = Vec::new();

    for (record, product) in rows {
        match grouped.last_mut() {
            Some(last) if last.record.id() == record.id() => {
                last.products.extend(product);
            }
            _ => {
                let mut entry = WithProducts::new(record);
                entry.products.extend(product);
                grouped.push(entry);
            }
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn test_group_rows_keeps_empty_records() {
        let shirts = Category::new(1, "Shirts".to_string());
        let shorts = Category::new(2, "Shorts".to_string());
        let rows = vec![
            (shirts.clone(), Some(10u32)),
            (shirts.clone(), Some(11u32)),
            (shorts.clone(), None),
        ];

        let grouped = group_rows(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].products, vec![10, 11]);
        assert!(grouped[1].products.is_empty());
        assert_eq!(grouped[1].record, shorts);
    }
}
