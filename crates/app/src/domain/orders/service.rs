//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{Order, OrderStatus, OrderUuid},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self.repository.get_order(&mut tx, user, order).await?;
        let items = self.repository.list_order_items(&mut tx, order).await?;

        tx.commit().await?;

        found.items = items;

        Ok(found)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx, user).await?;

        for order in &mut orders {
            order.items = self.repository.list_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn advance_status(
        &self,
        order: OrderUuid,
        to: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_order_status(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if current.next() != Some(to) {
            return Err(OrdersServiceError::InvalidTransition);
        }

        let rows_affected = self
            .repository
            .advance_order_status(&mut tx, order, to, current)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order_uuid = %order, status = to.as_str(), "advanced order status");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve one of the user's orders, items included.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// All of the user's orders, newest first, items included.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order's status one step forward (pending → paid → shipped).
    async fn advance_status(
        &self,
        order: OrderUuid,
        to: OrderStatus,
    ) -> Result<(), OrdersServiceError>;
}
