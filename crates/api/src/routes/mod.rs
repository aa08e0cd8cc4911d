pub mod auth;
pub mod cashiers;
pub mod categories;
pub mod health;
pub mod items;
pub mod sales;
pub mod sellers;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                          login (public)
/// /logout                         logout (session)
///
/// /users                          list, create (admin)
/// /users/{id}                     detail (admin or self)
///
/// /categories                     names (admin, seller) or counts (admin)
///
/// /items                          list or CSV export (admin)
/// /items/{id}                     detail (admin, cashier, owner), update (admin, owner)
///
/// /sellers/{id}/items             rollup, add item (seller self or admin)
/// /sellers/{id}/labels            render labels then freeze (seller self)
///
/// /cashiers/{id}/sales            sale summaries (cashier self or admin)
///
/// /sales                          register (cashier), overview (admin)
/// /sales/{id}                     detail (admin or registering cashier)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/categories", categories::router())
        .nest("/items", items::router())
        .nest("/sellers", sellers::router())
        .nest("/cashiers", cashiers::router())
        .nest("/sales", sales::router())
}
