//! Discount Rules Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::UserUuid,
    database::db_quantity,
    domain::discounts::models::{DiscountRule, DiscountRuleUuid, NewDiscountRule},
};

const GET_RULE_BY_CODE_SQL: &str = include_str!("sql/get_rule_by_code.sql");
const CREATE_RULE_SQL: &str = include_str!("sql/create_rule.sql");
const GET_APPLIED_RULE_SQL: &str = include_str!("sql/get_applied_rule.sql");
const UPSERT_APPLIED_DISCOUNT_SQL: &str = include_str!("sql/upsert_applied_discount.sql");
const CLEAR_APPLIED_DISCOUNT_SQL: &str = include_str!("sql/clear_applied_discount.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDiscountsRepository;

impl PgDiscountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_rule_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<DiscountRule>, sqlx::Error> {
        query_as::<Postgres, DiscountRule>(GET_RULE_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_rule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rule: NewDiscountRule,
    ) -> Result<DiscountRule, sqlx::Error> {
        let min_quantity = rule
            .min_quantity
            .map(|quantity| db_quantity(quantity, "min_quantity"))
            .transpose()?;

        query_as::<Postgres, DiscountRule>(CREATE_RULE_SQL)
            .bind(rule.uuid.into_uuid())
            .bind(&rule.code)
            .bind(rule.discount_percent)
            .bind(min_quantity)
            .bind(rule.active)
            .bind(rule.starts_at.map(SqlxTimestamp::from))
            .bind(rule.ends_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    /// The rule currently applied to the user's pending checkout, if any.
    pub(crate) async fn get_applied_rule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<DiscountRule>, sqlx::Error> {
        query_as::<Postgres, DiscountRule>(GET_APPLIED_RULE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_applied(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        rule: DiscountRuleUuid,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_APPLIED_DISCOUNT_SQL)
            .bind(user.into_uuid())
            .bind(rule.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn clear_applied(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_APPLIED_DISCOUNT_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for DiscountRule {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let min_quantity: Option<i32> = row.try_get("min_quantity")?;

        let min_quantity = min_quantity
            .map(|quantity| {
                u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "min_quantity".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: DiscountRuleUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            discount_percent: row.try_get::<Decimal, _>("discount_percent")?,
            min_quantity,
            active: row.try_get("active")?,
            starts_at: row
                .try_get::<Option<SqlxTimestamp>, _>("starts_at")?
                .map(SqlxTimestamp::to_jiff),
            ends_at: row
                .try_get::<Option<SqlxTimestamp>, _>("ends_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
