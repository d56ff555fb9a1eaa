//! Product Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    /// Unit price in minor units.
    pub price: u64,
    /// Units currently in stock. Never decremented below zero.
    pub inventory_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub price: u64,
    pub inventory_count: u64,
}

/// Product Update Model; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductUpdate {
    pub price: Option<u64>,
    pub inventory_count: Option<u64>,
}
