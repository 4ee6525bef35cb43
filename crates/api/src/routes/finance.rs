//! Route definitions for the ledger: budgets, expenses, income.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::budget;
use crate::state::AppState;

/// Routes mounted at `/budgets`, `/expenses`, and `/income`.
///
/// ```text
/// GET    /budgets               -> list
/// POST   /budgets               -> create
/// GET    /budgets/{id}/summary  -> spent/remaining/percent
/// PUT    /budgets/{id}          -> update
/// DELETE /budgets/{id}          -> delete
///
/// GET    /expenses       -> list
/// POST   /expenses       -> create (publishes budget.exceeded on overspend)
/// DELETE /expenses/{id}  -> delete
///
/// GET    /income         -> list
/// POST   /income         -> create
/// DELETE /income/{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(budget::list).post(budget::create))
        .route("/budgets/{id}/summary", get(budget::summary))
        .route(
            "/budgets/{id}",
            axum::routing::put(budget::update).delete(budget::delete),
        )
        .route(
            "/expenses",
            get(budget::list_expenses).post(budget::create_expense),
        )
        .route("/expenses/{id}", delete(budget::delete_expense))
        .route(
            "/income",
            get(budget::list_income).post(budget::create_income),
        )
        .route("/income/{id}", delete(budget::delete_income))
}
