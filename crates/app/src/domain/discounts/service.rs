//! Discounts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::discounts::{
        errors::DiscountsServiceError,
        models::{DiscountRule, NewDiscountRule},
        repository::PgDiscountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgDiscountsService {
    db: Db,
    repository: PgDiscountsRepository,
}

impl PgDiscountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgDiscountsRepository::new(),
        }
    }
}

#[async_trait]
impl DiscountsService for PgDiscountsService {
    async fn resolve_code(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<DiscountRule, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let rule = self.repository.get_rule_by_code(&mut tx, code).await?;

        tx.commit().await?;

        let rule = rule.ok_or(DiscountsServiceError::NotFound)?;

        rule.check_valid_at(now)?;

        Ok(rule)
    }

    async fn apply_to_user(
        &self,
        user: UserUuid,
        code: &str,
        now: Timestamp,
    ) -> Result<DiscountRule, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let rule = self.repository.get_rule_by_code(&mut tx, code).await?;

        let outcome = match rule {
            None => Err(DiscountsServiceError::NotFound),
            Some(rule) => rule
                .check_valid_at(now)
                .map(|()| rule)
                .map_err(DiscountsServiceError::from),
        };

        match outcome {
            Ok(rule) => {
                self.repository.upsert_applied(&mut tx, user, rule.uuid).await?;

                tx.commit().await?;

                info!(user_uuid = %user, code = %rule.code, "applied discount code");

                Ok(rule)
            }
            Err(error) => {
                // A failed apply also resets any previously applied code.
                self.repository.clear_applied(&mut tx, user).await?;

                tx.commit().await?;

                Err(error)
            }
        }
    }

    async fn applied_discount(
        &self,
        user: UserUuid,
    ) -> Result<Option<DiscountRule>, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let rule = self.repository.get_applied_rule(&mut tx, user).await?;

        tx.commit().await?;

        Ok(rule)
    }

    async fn create_rule(
        &self,
        rule: NewDiscountRule,
    ) -> Result<DiscountRule, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_rule(&mut tx, rule).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Look up a code and validate it at `now`.
    async fn resolve_code(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<DiscountRule, DiscountsServiceError>;

    /// Resolve a code and attach it to the user's pending checkout. An
    /// invalid code clears any previously applied discount instead.
    async fn apply_to_user(
        &self,
        user: UserUuid,
        code: &str,
        now: Timestamp,
    ) -> Result<DiscountRule, DiscountsServiceError>;

    /// The discount currently applied to the user's pending checkout, if any.
    async fn applied_discount(
        &self,
        user: UserUuid,
    ) -> Result<Option<DiscountRule>, DiscountsServiceError>;

    /// Create a new discount rule.
    async fn create_rule(
        &self,
        rule: NewDiscountRule,
    ) -> Result<DiscountRule, DiscountsServiceError>;
}
