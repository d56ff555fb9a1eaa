//! Test context for service-level integration tests.

use crate::{
    auth::PgIdentityService,
    database::Db,
    domain::{
        carts::PgCartsService,
        checkout::PgCheckoutService,
        discounts::{PgDiscountsService, models::DiscountRuleUuid},
        orders::PgOrdersService,
        products::{
            PgProductsService, ProductsService,
            models::{NewProduct, Product, ProductUuid},
        },
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub discounts: PgDiscountsService,
    pub orders: PgOrdersService,
    pub checkout: PgCheckoutService,
    pub identity: PgIdentityService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            discounts: PgDiscountsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone()),
            identity: PgIdentityService::new(db),
            db: test_db,
        }
    }

    /// Seed a product with the given price and stock level.
    pub async fn create_product(&self, price: u64, inventory_count: u64) -> Product {
        self.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                price,
                inventory_count,
            })
            .await
            .expect("Failed to create test product")
    }

    /// Flip a rule's active flag off, bypassing the service layer the way
    /// an admin tool would.
    pub async fn deactivate_discount(&self, rule: DiscountRuleUuid) {
        sqlx::query("UPDATE discount_rules SET active = FALSE, updated_at = now() WHERE uuid = $1")
            .bind(rule.into_uuid())
            .execute(self.db.pool())
            .await
            .expect("Failed to deactivate test discount rule");
    }
}
