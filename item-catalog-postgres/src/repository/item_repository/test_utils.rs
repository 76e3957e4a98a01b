#[cfg(test)]
pub mod test_utils {
    use item_catalog_db::models::item::ItemModel;

    pub fn create_test_item(name: &str) -> ItemModel {
        ItemModel::new(
            name,
            &format!("Description of {name}"),
            &format!("{name}@gmail.com"),
        )
        .unwrap()
    }
}
