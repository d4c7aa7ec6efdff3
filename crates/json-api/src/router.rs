//! App Router

use salvo::Router;

use crate::{
    app_links, auth,
    auth::RoleGate,
    healthcheck, observability::metrics_handler, subscriptions, tickets, users,
};

/// Every route except the OpenAPI document and Swagger UI.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("api")
                .push(auth_router())
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .push(users_router())
                        .push(tickets_router())
                        .push(
                            Router::with_path("app-links")
                                .hoop(RoleGate::Staff)
                                .get(app_links::index),
                        )
                        .push(Router::with_path("subscriptions").get(subscriptions::mine)),
                ),
        )
}

fn auth_router() -> Router {
    use auth::handlers::{customer_login, employee_login, logout, me, register};

    Router::with_path("auth")
        .push(Router::with_path("employee/login").post(employee_login::handler))
        .push(Router::with_path("customer/login").post(customer_login::handler))
        .push(Router::with_path("customer/register").post(register::handler))
        .push(Router::with_path("logout").post(logout::handler))
        .push(
            Router::with_path("me")
                .hoop(auth::middleware::handler)
                .get(me::handler),
        )
}

fn users_router() -> Router {
    use users::handlers::{approve, create, index, pending, update};

    Router::with_path("users")
        .push(
            Router::new()
                .hoop(RoleGate::Admin)
                .get(index::handler)
                .post(create::handler)
                .push(Router::with_path("pending").get(pending::handler))
                .push(Router::with_path("{id}/approve").post(approve::handler)),
        )
        .push(Router::with_path("{id}").patch(update::handler))
}

fn tickets_router() -> Router {
    use tickets::handlers::{comment, create, get, index, mine, stats, sync, update};

    Router::with_path("tickets")
        .push(Router::new().hoop(RoleGate::Staff).get(index::handler))
        .post(create::handler)
        .push(Router::with_path("my").get(mine::handler))
        .push(Router::with_path("stats").get(stats::handler))
        .push(
            Router::with_path("{id}")
                .get(get::handler)
                .patch(update::handler)
                .push(Router::with_path("comments").post(comment::handler))
                .push(
                    Router::with_path("sync")
                        .hoop(RoleGate::Staff)
                        .post(sync::handler),
                ),
        )
}
