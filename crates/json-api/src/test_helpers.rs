//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use till_app::{
    auth::{
        MockIdentityService,
        models::{Identity, Role, UserUuid},
    },
    context::AppContext,
    domain::{
        carts::MockCartsService, checkout::MockCheckoutService, discounts::MockDiscountsService,
        orders::MockOrdersService, products::MockProductsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Stand-in for the auth chain: a plain customer identity.
#[salvo::handler]
pub(crate) async fn inject_identity(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        user: TEST_USER_UUID,
        role: Role::Customer,
    });
    ctrl.call_next(req, depot, res).await;
}

/// Stand-in for the auth chain: a staff identity.
#[salvo::handler]
pub(crate) async fn inject_staff_identity(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        user: TEST_USER_UUID,
        role: Role::Staff,
    });
    ctrl.call_next(req, depot, res).await;
}

/// Fresh mocks panic on any call, which keeps the services not under test
/// strict by construction.
fn app_with(
    products: MockProductsService,
    carts: MockCartsService,
    discounts: MockDiscountsService,
    orders: MockOrdersService,
    checkout: MockCheckoutService,
    identity: MockIdentityService,
) -> AppContext {
    AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
        discounts: Arc::new(discounts),
        orders: Arc::new(orders),
        checkout: Arc::new(checkout),
        identity: Arc::new(identity),
    }
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(app_with(
        products,
        MockCartsService::new(),
        MockDiscountsService::new(),
        MockOrdersService::new(),
        MockCheckoutService::new(),
        MockIdentityService::new(),
    )))
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    Arc::new(State::new(app_with(
        MockProductsService::new(),
        carts,
        MockDiscountsService::new(),
        MockOrdersService::new(),
        MockCheckoutService::new(),
        MockIdentityService::new(),
    )))
}

pub(crate) fn state_with_discounts(discounts: MockDiscountsService) -> Arc<State> {
    Arc::new(State::new(app_with(
        MockProductsService::new(),
        MockCartsService::new(),
        discounts,
        MockOrdersService::new(),
        MockCheckoutService::new(),
        MockIdentityService::new(),
    )))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(app_with(
        MockProductsService::new(),
        MockCartsService::new(),
        MockDiscountsService::new(),
        orders,
        MockCheckoutService::new(),
        MockIdentityService::new(),
    )))
}

pub(crate) fn state_with_checkout(checkout: MockCheckoutService) -> Arc<State> {
    Arc::new(State::new(app_with(
        MockProductsService::new(),
        MockCartsService::new(),
        MockDiscountsService::new(),
        MockOrdersService::new(),
        checkout,
        MockIdentityService::new(),
    )))
}

pub(crate) fn state_with_identity(identity: MockIdentityService) -> Arc<State> {
    Arc::new(State::new(app_with(
        MockProductsService::new(),
        MockCartsService::new(),
        MockDiscountsService::new(),
        MockOrdersService::new(),
        MockCheckoutService::new(),
        identity,
    )))
}

fn service_with(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_identity)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_with(state_with_products(products), route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service_with(state_with_carts(carts), route)
}

pub(crate) fn discounts_service(discounts: MockDiscountsService, route: Router) -> Service {
    service_with(state_with_discounts(discounts), route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service_with(state_with_orders(orders), route)
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service_with(state_with_checkout(checkout), route)
}
