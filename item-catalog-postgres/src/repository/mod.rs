pub mod db_init;
pub mod item_repository;

pub use item_repository::ItemRepositoryImpl;
