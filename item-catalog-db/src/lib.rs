pub mod memory;
pub mod models;
pub mod repository;

pub use memory::*;
pub use models::*;
pub use repository::*;
