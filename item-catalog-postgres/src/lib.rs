pub mod repository;
pub mod utils;

pub use repository::db_init::{cleanup_database, init_database};
pub use repository::item_repository::ItemRepositoryImpl;

#[cfg(test)]
pub mod test_helper;
