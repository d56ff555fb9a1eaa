//! Checkout service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use till::{LineItem, Totals, compute_totals};

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::{
        carts::{models::CartLine, repository::PgCartItemsRepository},
        checkout::{
            errors::CheckoutServiceError,
            models::{AppliedDiscount, CheckoutPreview, CheckoutReceipt, DroppedDiscount},
        },
        discounts::{models::DiscountRule, repository::PgDiscountsRepository},
        orders::{
            models::{NewOrder, NewOrderItem, OrderItemUuid, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts: PgCartItemsRepository,
    discounts: PgDiscountsRepository,
    orders: PgOrdersRepository,
    products: PgProductsRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartItemsRepository::new(),
            discounts: PgDiscountsRepository::new(),
            orders: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Read the user's applied discount inside the transaction and
    /// re-validate it at `now`. A rule that no longer holds degrades to
    /// "no discount" with a dropped notice; it never fails the caller.
    async fn resolve_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<(Option<DiscountRule>, Option<DroppedDiscount>), CheckoutServiceError> {
        let Some(rule) = self.discounts.get_applied_rule(tx, user).await? else {
            return Ok((None, None));
        };

        match rule.check_valid_at(now) {
            Ok(()) => Ok((Some(rule), None)),
            Err(reason) => {
                warn!(user_uuid = %user, code = %rule.code, %reason, "dropping discount that no longer applies");

                Ok((
                    None,
                    Some(DroppedDiscount {
                        code: rule.code,
                        reason,
                    }),
                ))
            }
        }
    }
}

fn price_lines(
    lines: &[CartLine],
    rule: Option<&DiscountRule>,
) -> Result<Totals, CheckoutServiceError> {
    let items: Vec<LineItem> = lines.iter().copied().map(Into::into).collect();

    Ok(compute_totals(
        &items,
        rule.map(|rule| rule.discount_percent),
    )?)
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn preview(
        &self,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<CheckoutPreview, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.carts.list_cart(&mut tx, user).await?;
        let (rule, dropped_discount) = self.resolve_discount(&mut tx, user, now).await?;

        tx.commit().await?;

        let totals = price_lines(&lines, rule.as_ref())?;

        Ok(CheckoutPreview {
            lines,
            totals,
            discount: rule.as_ref().map(AppliedDiscount::from),
            dropped_discount,
        })
    }

    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn checkout(
        &self,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<CheckoutReceipt, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        // Locking the cart rows serializes concurrent checkouts for the
        // same user; the loser of the race re-reads an emptied cart.
        let lines = self.carts.list_cart_for_update(&mut tx, user).await?;

        if lines.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        let (rule, dropped_discount) = self.resolve_discount(&mut tx, user, now).await?;
        let totals = price_lines(&lines, rule.as_ref())?;

        // Reserve stock line by line. The lines arrive ordered by product,
        // so concurrent checkouts take these row locks in a stable order.
        for line in &lines {
            let updated = self
                .products
                .decrement_inventory(&mut tx, line.product_uuid, line.quantity)
                .await?;

            if updated == 0 {
                return Err(CheckoutServiceError::InsufficientInventory);
            }
        }

        let order_uuid = OrderUuid::new();

        self.orders
            .create_order(
                &mut tx,
                NewOrder {
                    uuid: order_uuid,
                    user_uuid: user,
                    total_amount: totals.total,
                    discount_uuid: rule.as_ref().map(|rule| rule.uuid),
                    status: OrderStatus::Pending,
                },
            )
            .await?;

        for line in &lines {
            self.orders
                .create_order_item(
                    &mut tx,
                    order_uuid,
                    NewOrderItem {
                        uuid: OrderItemUuid::new(),
                        product_uuid: line.product_uuid,
                        quantity: line.quantity,
                        unit_price: line.unit_price,
                    },
                )
                .await?;
        }

        self.carts.clear_cart(&mut tx, user).await?;
        self.discounts.clear_applied(&mut tx, user).await?;

        tx.commit().await?;

        info!(order_uuid = %order_uuid, total_amount = totals.total, "checkout committed");

        Ok(CheckoutReceipt {
            order_uuid,
            totals,
            discount: rule.as_ref().map(AppliedDiscount::from),
            dropped_discount,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Price the user's cart without committing anything.
    async fn preview(
        &self,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<CheckoutPreview, CheckoutServiceError>;

    /// Convert the user's cart into an order. Order creation, item
    /// snapshots, inventory decrement, cart clearing and discount clearing
    /// commit as one transaction.
    async fn checkout(
        &self,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<CheckoutReceipt, CheckoutServiceError>;
}
