//! Repository for the `budgets`, `expense_records`, and `income_records`
//! tables.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::budget::{
    Budget, CreateBudget, CreateExpense, CreateIncome, ExpenseRecord, IncomeRecord, UpdateBudget,
};

const BUDGET_COLUMNS: &str = "id, organization_id, name, category, period_start, period_end, \
     amount_cents, created_at, updated_at";

const EXPENSE_COLUMNS: &str = "id, organization_id, budget_id, category, description, \
     amount_cents, incurred_on, created_at";

const INCOME_COLUMNS: &str =
    "id, organization_id, category, description, amount_cents, received_on, created_at";

/// Provides CRUD operations for the ledger.
pub struct BudgetRepo;

impl BudgetRepo {
    /// Insert a new budget, returning the created row.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateBudget,
    ) -> Result<Budget, sqlx::Error> {
        let query = format!(
            "INSERT INTO budgets (organization_id, name, category, period_start, period_end, amount_cents)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {BUDGET_COLUMNS}"
        );
        sqlx::query_as::<_, Budget>(&query)
            .bind(organization_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.amount_cents)
            .fetch_one(pool)
            .await
    }

    /// Find a budget by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Budget>, sqlx::Error> {
        let query =
            format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Budget>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List budgets for an organization, newest period first.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<Budget>, sqlx::Error> {
        let query = format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets
             WHERE organization_id = $1
             ORDER BY period_start DESC, name ASC"
        );
        sqlx::query_as::<_, Budget>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Update a budget. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateBudget,
    ) -> Result<Option<Budget>, sqlx::Error> {
        let query = format!(
            "UPDATE budgets SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                period_start = COALESCE($5, period_start),
                period_end = COALESCE($6, period_end),
                amount_cents = COALESCE($7, amount_cents),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {BUDGET_COLUMNS}"
        );
        sqlx::query_as::<_, Budget>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.amount_cents)
            .fetch_optional(pool)
            .await
    }

    /// Delete a budget. Linked expenses keep their rows with `budget_id`
    /// set NULL.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total spend recorded against a budget.
    pub async fn spent_cents(pool: &PgPool, budget_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM expense_records WHERE budget_id = $1",
        )
        .bind(budget_id)
        .fetch_one(pool)
        .await
    }

    // -- Expenses --

    /// Insert an expense record.
    pub async fn create_expense(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateExpense,
    ) -> Result<ExpenseRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO expense_records
                (organization_id, budget_id, category, description, amount_cents, incurred_on)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {EXPENSE_COLUMNS}"
        );
        sqlx::query_as::<_, ExpenseRecord>(&query)
            .bind(organization_id)
            .bind(input.budget_id)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.amount_cents)
            .bind(input.incurred_on)
            .fetch_one(pool)
            .await
    }

    /// List expenses for an organization, newest first.
    pub async fn list_expenses(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<ExpenseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense_records
             WHERE organization_id = $1
             ORDER BY incurred_on DESC, id DESC"
        );
        sqlx::query_as::<_, ExpenseRecord>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an expense record.
    pub async fn delete_expense(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM expense_records WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Income --

    /// Insert an income record.
    pub async fn create_income(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateIncome,
    ) -> Result<IncomeRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO income_records
                (organization_id, category, description, amount_cents, received_on)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {INCOME_COLUMNS}"
        );
        sqlx::query_as::<_, IncomeRecord>(&query)
            .bind(organization_id)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.amount_cents)
            .bind(input.received_on)
            .fetch_one(pool)
            .await
    }

    /// List income for an organization, newest first.
    pub async fn list_income(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<IncomeRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {INCOME_COLUMNS} FROM income_records
             WHERE organization_id = $1
             ORDER BY received_on DESC, id DESC"
        );
        sqlx::query_as::<_, IncomeRecord>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an income record.
    pub async fn delete_income(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM income_records WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
