pub(crate) mod get;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::domain::orders::models::{Order, OrderItem};

/// One snapshotted line of an order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// Order item UUID
    pub uuid: Uuid,

    /// Product UUID
    pub product_uuid: Uuid,

    /// Units ordered
    pub quantity: u32,

    /// Unit price at order time, in minor units
    pub unit_price: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Order UUID
    pub uuid: Uuid,

    /// Amount charged, in minor units
    pub total_amount: u64,

    /// The discount rule applied at creation time, if it still exists
    pub discount_uuid: Option<Uuid>,

    /// Order status: pending, paid or shipped
    pub status: String,

    /// When the order was created
    pub created_at: String,

    /// The snapshotted order lines
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            total_amount: order.total_amount,
            discount_uuid: order.discount_uuid.map(Into::into),
            status: order.status.as_str().to_string(),
            created_at: order.created_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}
