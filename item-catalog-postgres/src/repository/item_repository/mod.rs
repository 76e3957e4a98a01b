pub mod repo_impl;
pub mod delete;
pub mod list_ids;
pub mod load;
pub mod load_all;
pub mod save;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ItemRepositoryImpl;
