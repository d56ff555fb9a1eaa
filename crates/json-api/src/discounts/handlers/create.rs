//! Create Discount Rule Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::domain::discounts::models::{DiscountRuleUuid, NewDiscountRule};

use crate::{discounts::errors::into_status_error, extensions::*, state::State};

/// Create Discount Rule Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateDiscountRequest {
    /// Unique discount code, e.g. SAVE10
    pub code: String,

    /// Percentage off the subtotal, 0-100 with up to two decimal places
    pub discount_percent: String,

    /// Minimum cart quantity recorded on the rule
    pub min_quantity: Option<u32>,

    /// Whether the rule starts out active; defaults to true
    pub active: Option<bool>,

    /// Window start (RFC 3339); requires `ends_at`
    pub starts_at: Option<String>,

    /// Window end (RFC 3339); requires `starts_at`
    pub ends_at: Option<String>,
}

/// Discount Rule Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountRuleResponse {
    /// Created rule UUID
    pub uuid: Uuid,

    /// Discount code
    pub code: String,

    /// Percentage off the subtotal
    pub discount_percent: String,

    /// Whether the rule is active
    pub active: bool,
}

/// Create Discount Rule Handler
#[endpoint(
    tags("discounts"),
    summary = "Create Discount Rule",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Rule created"),
        (status_code = StatusCode::CONFLICT, description = "Discount code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateDiscountRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DiscountRuleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _identity = depot.identity_or_401()?;

    let request = json.into_inner();

    let discount_percent = request
        .discount_percent
        .parse::<Decimal>()
        .map_err(|_error| StatusError::bad_request().brief("Invalid discount percentage"))?;

    let starts_at = parse_window_bound(request.starts_at.as_deref())?;
    let ends_at = parse_window_bound(request.ends_at.as_deref())?;

    if starts_at.is_some() != ends_at.is_some() {
        return Err(
            StatusError::bad_request().brief("starts_at and ends_at must be given together")
        );
    }

    let rule = state
        .app
        .discounts
        .create_rule(NewDiscountRule {
            uuid: DiscountRuleUuid::new(),
            code: request.code,
            discount_percent,
            min_quantity: request.min_quantity,
            active: request.active.unwrap_or(true),
            starts_at,
            ends_at,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(DiscountRuleResponse {
        uuid: rule.uuid.into(),
        code: rule.code,
        discount_percent: rule.discount_percent.to_string(),
        active: rule.active,
    }))
}

fn parse_window_bound(raw: Option<&str>) -> Result<Option<Timestamp>, StatusError> {
    raw.map(str::parse::<Timestamp>)
        .transpose()
        .map_err(|_error| StatusError::bad_request().brief("Invalid window timestamp"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use till_app::domain::discounts::{DiscountsServiceError, MockDiscountsService};

    use crate::test_helpers::discounts_service;

    use super::{super::tests::make_rule, *};

    fn make_service(discounts: MockDiscountsService) -> Service {
        discounts_service(discounts, Router::with_path("discounts").post(handler))
    }

    #[tokio::test]
    async fn test_create_rule_returns_201() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_create_rule()
            .once()
            .withf(|rule| rule.code == "SAVE10" && rule.active)
            .return_once(|_| Ok(make_rule("SAVE10")));

        let mut res = TestClient::post("http://example.com/discounts")
            .json(&json!({ "code": "SAVE10", "discount_percent": "10" }))
            .send(&make_service(discounts))
            .await;

        let body: DiscountRuleResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.code, "SAVE10");
        assert!(body.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_code_returns_409() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_create_rule()
            .once()
            .return_once(|_| Err(DiscountsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/discounts")
            .json(&json!({ "code": "SAVE10", "discount_percent": "10" }))
            .send(&make_service(discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_percent_returns_400() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts.expect_create_rule().never();

        let res = TestClient::post("http://example.com/discounts")
            .json(&json!({ "code": "SAVE10", "discount_percent": "ten" }))
            .send(&make_service(discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_half_open_window_returns_400() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts.expect_create_rule().never();

        let res = TestClient::post("http://example.com/discounts")
            .json(&json!({
                "code": "SUMMER",
                "discount_percent": "10",
                "starts_at": "2026-06-01T00:00:00Z"
            }))
            .send(&make_service(discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
