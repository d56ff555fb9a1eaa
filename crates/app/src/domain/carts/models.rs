//! Cart Models

use jiff::Timestamp;

use crate::{auth::models::UserUuid, domain::products::models::ProductUuid, uuids::TypedUuid};

/// Cart item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// A single (user, product, quantity) cart entry.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart entry joined with the current catalog price. Checkout and display
/// both read this shape so a price change always takes effect immediately.
#[derive(Debug, Clone, Copy)]
pub struct CartLine {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    /// The product's price as of the read, in minor units.
    pub unit_price: u64,
}

impl From<CartLine> for till::LineItem {
    fn from(line: CartLine) -> Self {
        Self {
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}
