//! Handlers for budgets and the expense/income ledger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::budget::{progress_percent, remaining_cents};
use farrowtrack_core::error::CoreError;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::budget::{
    Budget, BudgetSummary, CreateBudget, CreateExpense, CreateIncome, ExpenseRecord, IncomeRecord,
    UpdateBudget,
};
use farrowtrack_db::repositories::BudgetRepo;
use farrowtrack_events::FarmEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/budgets
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Budget>>> {
    let budgets = BudgetRepo::list_by_organization(&state.pool, user.organization_id).await?;
    Ok(Json(budgets))
}

/// POST /api/v1/budgets
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateBudget>,
) -> AppResult<(StatusCode, Json<Budget>)> {
    if input.period_end < input.period_start {
        return Err(AppError::Core(CoreError::Validation(
            "Budget period end cannot precede its start".into(),
        )));
    }
    if input.amount_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Budget amount cannot be negative".into(),
        )));
    }
    let budget = BudgetRepo::create(&state.pool, user.organization_id, &input).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

/// GET /api/v1/budgets/{id}/summary
///
/// Spent/remaining/percent for the progress-bar display.
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<BudgetSummary>> {
    let budget = BudgetRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Budget", id))?;

    let spent_cents = BudgetRepo::spent_cents(&state.pool, budget.id).await?;
    let summary = BudgetSummary {
        spent_cents,
        remaining_cents: remaining_cents(budget.amount_cents, spent_cents),
        percent_spent: progress_percent(budget.amount_cents, spent_cents),
        budget,
    };
    Ok(Json(summary))
}

/// PUT /api/v1/budgets/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBudget>,
) -> AppResult<Json<Budget>> {
    let budget = BudgetRepo::update(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Budget", id))?;
    Ok(Json(budget))
}

/// DELETE /api/v1/budgets/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BudgetRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Budget", id))
    }
}

// -- Expenses --

/// GET /api/v1/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ExpenseRecord>>> {
    let expenses = BudgetRepo::list_expenses(&state.pool, user.organization_id).await?;
    Ok(Json(expenses))
}

/// POST /api/v1/expenses
///
/// Recording an expense that pushes its budget past 100% publishes a
/// `budget.exceeded` event.
pub async fn create_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateExpense>,
) -> AppResult<(StatusCode, Json<ExpenseRecord>)> {
    if input.amount_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Expense amount cannot be negative".into(),
        )));
    }

    let budget = match input.budget_id {
        Some(budget_id) => Some(
            BudgetRepo::find_by_id(&state.pool, user.organization_id, budget_id)
                .await?
                .ok_or(AppError::not_found("Budget", budget_id))?,
        ),
        None => None,
    };

    let expense = BudgetRepo::create_expense(&state.pool, user.organization_id, &input).await?;

    if let Some(budget) = budget {
        let spent = BudgetRepo::spent_cents(&state.pool, budget.id).await?;
        if spent > budget.amount_cents {
            state.event_bus.publish(
                FarmEvent::new("budget.exceeded")
                    .for_organization(user.organization_id)
                    .with_source("budget", budget.id)
                    .with_actor(user.user_id)
                    .with_payload(serde_json::json!({
                        "budget_name": budget.name,
                        "amount_cents": budget.amount_cents,
                        "spent_cents": spent,
                    })),
            );
        }
    }

    Ok((StatusCode::CREATED, Json(expense)))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BudgetRepo::delete_expense(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ExpenseRecord", id))
    }
}

// -- Income --

/// GET /api/v1/income
pub async fn list_income(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<IncomeRecord>>> {
    let income = BudgetRepo::list_income(&state.pool, user.organization_id).await?;
    Ok(Json(income))
}

/// POST /api/v1/income
pub async fn create_income(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateIncome>,
) -> AppResult<(StatusCode, Json<IncomeRecord>)> {
    if input.amount_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Income amount cannot be negative".into(),
        )));
    }
    let income = BudgetRepo::create_income(&state.pool, user.organization_id, &input).await?;
    Ok((StatusCode::CREATED, Json(income)))
}

/// DELETE /api/v1/income/{id}
pub async fn delete_income(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BudgetRepo::delete_income(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("IncomeRecord", id))
    }
}
