//! Order Models

use std::str::FromStr;

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    auth::models::UserUuid,
    domain::{discounts::models::DiscountRuleUuid, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Lifecycle of an order. Transitions only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
        }
    }

    /// The next status in the lifecycle, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Paid),
            Self::Paid => Some(Self::Shipped),
            Self::Shipped => None,
        }
    }
}

/// Error returned for unrecognized status names.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "shipped" => Ok(Self::Shipped),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// Order Model
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    /// Amount payable in minor units, discount already subtracted.
    pub total_amount: u64,
    /// The rule in effect at creation time, nulled if the rule is later
    /// deleted. Order history itself is never cascaded into.
    pub discount_uuid: Option<DiscountRuleUuid>,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub items: Vec<OrderItem>,
}

/// A quantity/price snapshot of one cart line at checkout time.
#[derive(Debug, Clone, Copy)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    /// The product's price when the order was created, in minor units.
    /// Later catalog changes never touch this.
    pub unit_price: u64,
}

/// New Order Model
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub total_amount: u64,
    pub discount_uuid: Option<DiscountRuleUuid>,
    pub status: OrderStatus,
}

/// New Order Item Model
#[derive(Debug, Clone, Copy)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}
