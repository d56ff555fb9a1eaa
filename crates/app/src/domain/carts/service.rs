//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartItem, CartItemUuid, CartLine},
            repository::PgCartItemsRepository,
        },
        products::models::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let item = self
            .repository
            .upsert_item(&mut tx, user, product, quantity)
            .await
            .map_err(|error| match CartsServiceError::from(error) {
                // The only foreign key on the insert path is the product.
                CartsServiceError::InvalidReference => CartsServiceError::NotFound,
                other => other,
            })?;

        tx.commit().await?;

        Ok(item)
    }

    async fn set_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = if quantity == 0 {
            self.repository.delete_item(&mut tx, user, item).await?
        } else {
            self.repository
                .set_quantity(&mut tx, user, item, quantity)
                .await?
        };

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn adjust_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        delta: i32,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut rows_affected = self
            .repository
            .adjust_quantity(&mut tx, user, item, delta)
            .await?;

        if rows_affected == 0 && delta < 0 {
            // The guarded update skipped the row; the line is either gone or
            // the delta takes it to zero, in which case it gets deleted.
            rows_affected = self
                .repository
                .delete_item_at_floor(&mut tx, user, item, delta)
                .await?;
        }

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_item(&mut tx, user, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_cart(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.repository.list_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(lines)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add `quantity` units of a product to the user's cart, folding into
    /// the existing line if one exists.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError>;

    /// Set a line's quantity; zero deletes the line.
    async fn set_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError>;

    /// Apply a signed delta to a line's quantity; reaching zero or below
    /// deletes the line.
    async fn adjust_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        delta: i32,
    ) -> Result<(), CartsServiceError>;

    /// Remove a line from the user's cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// The user's cart lines joined with current product prices.
    async fn list_cart(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{
            ProductsService,
            models::{ProductUpdate, ProductUuid},
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn add_item_creates_a_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        let item = ctx.carts.add_item(user, product.uuid, 1).await?;

        assert_eq!(item.user_uuid, user);
        assert_eq!(item.product_uuid, product.uuid);
        assert_eq!(item.quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn adding_twice_folds_into_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        let first = ctx.carts.add_item(user, product.uuid, 1).await?;
        let second = ctx.carts.add_item(user, product.uuid, 1).await?;

        assert_eq!(first.uuid, second.uuid, "repeat add must reuse the line");
        assert_eq!(second.quantity, 2);

        let lines = ctx.carts.list_cart(user).await?;

        assert_eq!(lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_never_produce_two_rows() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(5_00, 10).await;

        let (a, b) = tokio::join!(
            ctx.carts.add_item(user, product.uuid, 1),
            ctx.carts.add_item(user, product.uuid, 1),
        );

        a?;
        b?;

        let lines = ctx.carts.list_cart(user).await?;

        assert_eq!(lines.len(), 1, "upsert must reconcile concurrent adds");
        assert_eq!(lines.first().map(|line| line.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(UserUuid::new(), ProductUuid::new(), 1)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound for unknown product, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_item_zero_quantity_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(UserUuid::new(), ProductUuid::new(), 0)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_cart_reflects_current_product_price() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        ctx.carts.add_item(user, product.uuid, 2).await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductUpdate {
                    price: Some(15_00),
                    inventory_count: None,
                },
            )
            .await?;

        let lines = ctx.carts.list_cart(user).await?;

        assert_eq!(lines.first().map(|line| line.unit_price), Some(15_00));

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_zero_deletes_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        let item = ctx.carts.add_item(user, product.uuid, 3).await?;

        ctx.carts.set_quantity(user, item.uuid, 0).await?;

        assert!(ctx.carts.list_cart(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn decrease_at_quantity_one_deletes_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        let item = ctx.carts.add_item(user, product.uuid, 1).await?;

        ctx.carts.adjust_quantity(user, item.uuid, -1).await?;

        assert!(
            ctx.carts.list_cart(user).await?.is_empty(),
            "a decrease at quantity one must delete, not persist zero"
        );

        Ok(())
    }

    #[tokio::test]
    async fn increase_and_decrease_move_the_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        let item = ctx.carts.add_item(user, product.uuid, 1).await?;

        ctx.carts.adjust_quantity(user, item.uuid, 1).await?;
        ctx.carts.adjust_quantity(user, item.uuid, 1).await?;
        ctx.carts.adjust_quantity(user, item.uuid, -1).await?;

        let lines = ctx.carts.list_cart(user).await?;

        assert_eq!(lines.first().map(|line| line.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        let item = ctx.carts.add_item(user, product.uuid, 1).await?;

        ctx.carts.remove_item(user, item.uuid).await?;

        assert!(ctx.carts.list_cart(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn operations_on_another_users_line_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = UserUuid::new();
        let intruder = UserUuid::new();
        let product = ctx.create_product(10_00, 10).await;

        let item = ctx.carts.add_item(owner, product.uuid, 2).await?;

        let removed = ctx.carts.remove_item(intruder, item.uuid).await;
        let adjusted = ctx.carts.adjust_quantity(intruder, item.uuid, -1).await;
        let set = ctx.carts.set_quantity(intruder, item.uuid, 5).await;

        assert!(matches!(removed, Err(CartsServiceError::NotFound)));
        assert!(matches!(adjusted, Err(CartsServiceError::NotFound)));
        assert!(matches!(set, Err(CartsServiceError::NotFound)));

        let lines = ctx.carts.list_cart(owner).await?;

        assert_eq!(
            lines.first().map(|line| line.quantity),
            Some(2),
            "the owner's line must be untouched"
        );

        Ok(())
    }
}
