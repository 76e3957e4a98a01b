pub mod identifiable;
pub mod item;

// Re-exports
pub use identifiable::*;
pub use item::*;
