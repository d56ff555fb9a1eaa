//! Increase Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Increase Cart Item Quantity Handler
///
/// Adds one unit to one of the caller's cart lines.
#[endpoint(
    tags("cart"),
    summary = "Increase Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Quantity increased"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .carts
        .adjust_quantity(identity.user, item.into_inner().into(), 1)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use till_app::domain::carts::{CartsServiceError, MockCartsService, models::CartItemUuid};

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("cart/items/{item}/increase").post(handler),
        )
    }

    #[tokio::test]
    async fn test_increase_adjusts_by_plus_one() -> TestResult {
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_adjust_quantity()
            .once()
            .withf(move |user, i, delta| {
                *user == TEST_USER_UUID && *i == item && *delta == 1
            })
            .return_once(|_, _, _| Ok(()));

        let res = TestClient::post(format!("http://example.com/cart/items/{item}/increase"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_increase_foreign_item_returns_404() -> TestResult {
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_adjust_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/cart/items/{item}/increase"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
