//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod category_repo;
mod db;
mod eager;
mod product;
mod seed;
mod tag_repo;
mod traits;


pub use category_repo::CategoryRepository;
pub use db::{init_db, DbState, SharedConnection};
pub use product::ProductRepository;
pub use seed::seed_db;
pub use tag_repo::TagRepository;
pub use traits::{EagerLoadProducts, Repository};
