pub(crate) mod create;
pub(crate) mod get;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use till_app::domain::products::models::{Product, ProductUuid};

    pub(crate) fn make_product(uuid: ProductUuid, price: u64) -> Product {
        Product {
            uuid,
            price,
            inventory_count: 5,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
