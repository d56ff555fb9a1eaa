//! App Router

use salvo::Router;

use crate::{auth, carts, checkout, discounts, orders, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart").get(carts::get::handler).push(
                Router::with_path("items")
                    .post(carts::add_item::handler)
                    .push(
                        Router::with_path("{item}")
                            .delete(carts::remove_item::handler)
                            .push(Router::with_path("increase").post(carts::increase::handler))
                            .push(Router::with_path("decrease").post(carts::decrease::handler)),
                    ),
            ),
        )
        .push(Router::with_path("discount").post(discounts::apply::handler))
        .push(
            Router::with_path("discounts").push(
                Router::new()
                    .hoop(auth::middleware::require_staff)
                    .post(discounts::create::handler),
            ),
        )
        .push(
            Router::with_path("checkout")
                .get(checkout::preview::handler)
                .post(checkout::place::handler),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("products")
                .push(
                    Router::new()
                        .hoop(auth::middleware::require_staff)
                        .post(products::create::handler),
                )
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}
