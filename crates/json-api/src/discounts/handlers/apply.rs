//! Apply Discount Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::domain::discounts::DiscountsServiceError;

use crate::{discounts::errors::into_status_error, extensions::*, state::State};

/// Apply Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyDiscountRequest {
    /// The discount code to apply
    pub code: String,
}

/// Discount Applied Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountAppliedResponse {
    /// Applied rule UUID
    pub uuid: Uuid,

    /// Applied code
    pub code: String,

    /// Percentage off the subtotal
    pub discount_percent: String,
}

/// Apply Discount Handler
///
/// Validates a code and attaches it to the caller's pending checkout. The
/// code is validated again at checkout time. An invalid or expired code
/// clears any previously applied one.
#[endpoint(
    tags("discounts"),
    summary = "Apply Discount Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Discount applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired discount code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyDiscountRequest>,
    depot: &mut Depot,
) -> Result<Json<DiscountAppliedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let request = json.into_inner();

    let outcome = state
        .app
        .discounts
        .apply_to_user(identity.user, &request.code, Timestamp::now())
        .await;

    match outcome {
        Ok(rule) => Ok(Json(DiscountAppliedResponse {
            uuid: rule.uuid.into(),
            code: rule.code,
            discount_percent: rule.discount_percent.to_string(),
        })),
        Err(
            DiscountsServiceError::NotFound
            | DiscountsServiceError::Inactive
            | DiscountsServiceError::OutOfWindow,
        ) => Err(StatusError::bad_request().brief("Invalid or expired discount code")),
        Err(other) => Err(into_status_error(other)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use till_app::domain::discounts::MockDiscountsService;

    use crate::test_helpers::{TEST_USER_UUID, discounts_service};

    use super::{super::tests::make_rule, *};

    fn make_service(discounts: MockDiscountsService) -> Service {
        discounts_service(discounts, Router::with_path("discount").post(handler))
    }

    #[tokio::test]
    async fn test_apply_valid_code_returns_200() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_apply_to_user()
            .once()
            .withf(|user, code, _now| *user == TEST_USER_UUID && code == "SAVE10")
            .return_once(|_, _, _| Ok(make_rule("SAVE10")));

        let mut res = TestClient::post("http://example.com/discount")
            .json(&json!({ "code": "SAVE10" }))
            .send(&make_service(discounts))
            .await;

        let body: DiscountAppliedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.code, "SAVE10");
        assert_eq!(body.discount_percent, "10");

        Ok(())
    }

    #[tokio::test]
    async fn test_apply_unknown_code_returns_400() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_apply_to_user()
            .once()
            .return_once(|_, _, _| Err(DiscountsServiceError::NotFound));

        let res = TestClient::post("http://example.com/discount")
            .json(&json!({ "code": "BOGUS" }))
            .send(&make_service(discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_apply_expired_code_returns_400() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_apply_to_user()
            .once()
            .return_once(|_, _, _| Err(DiscountsServiceError::OutOfWindow));

        let res = TestClient::post("http://example.com/discount")
            .json(&json!({ "code": "SUMMER" }))
            .send(&make_service(discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
