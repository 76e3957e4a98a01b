pub mod delete;
pub mod item_store;
pub mod list_ids;
pub mod load;
pub mod load_all;
pub mod save;

// Re-exports
pub use delete::*;
pub use item_store::*;
pub use list_ids::*;
pub use load::*;
pub use load_all::*;
pub use save::*;
