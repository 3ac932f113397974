//! Product Repository Module
//!
//! - product_repo: Core CRUD operations and product detail reads
//! - product_tag: Product-Tag join table operations

mod product_repo;
mod product_tag;

pub use product_repo::ProductRepository;
