//! Budget and ledger models and DTOs. Amounts are integer cents.

use chrono::NaiveDate;
use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `budgets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Budget {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub category: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount_cents: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `expense_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExpenseRecord {
    pub id: DbId,
    pub organization_id: DbId,
    pub budget_id: Option<DbId>,
    pub category: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub incurred_on: NaiveDate,
    pub created_at: Timestamp,
}

/// A row from the `income_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IncomeRecord {
    pub id: DbId,
    pub organization_id: DbId,
    pub category: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub received_on: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for creating a budget.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBudget {
    pub name: String,
    pub category: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount_cents: i64,
}

/// DTO for updating a budget. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBudget {
    pub name: Option<String>,
    pub category: Option<String>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub amount_cents: Option<i64>,
}

/// DTO for creating an expense record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpense {
    pub budget_id: Option<DbId>,
    pub category: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub incurred_on: NaiveDate,
}

/// DTO for creating an income record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIncome {
    pub category: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub received_on: NaiveDate,
}

/// Budget progress summary computed for the progress-bar display.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub budget: Budget,
    pub spent_cents: i64,
    pub remaining_cents: i64,
    pub percent_spent: f64,
}
