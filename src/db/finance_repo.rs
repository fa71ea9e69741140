// src/db/finance_repo.rs

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::{
    common::error::AppError,
    db::source::FinanceSource,
    models::{
        dashboard::EntityKind,
        finance::{
            CashClosure, Expense, FixedCost, MonetaryMovement, Product, SalaryWithdrawal, Sale,
            SaleItem, StockOrder, StockOrderItem,
        },
    },
};

// Os casts (::numeric, ::int4, ::text) deixam a leitura estável mesmo quando a
// coluna foi criada como float/bigint/enum no painel do Supabase.

const SALES_SQL: &str = r#"
    SELECT id, created_at, total_amount::numeric AS total_amount, payment_method
    FROM sales
    ORDER BY created_at ASC
"#;

const SALE_ITEMS_SQL: &str = r#"
    SELECT id, sale_id, product_id, quantity::int4 AS quantity, unit_price::numeric AS unit_price
    FROM sale_items
"#;

const EXPENSES_SQL: &str = r#"
    SELECT id, expense_date::date AS expense_date, amount::numeric AS amount, category
    FROM expenses
    ORDER BY expense_date ASC
"#;

const CASH_CLOSURES_SQL: &str = r#"
    SELECT id, closure_date::date AS closure_date, created_at,
           actual_cash::numeric AS actual_cash, notes
    FROM cash_closures
    ORDER BY created_at ASC
"#;

const FIXED_COSTS_SQL: &str = r#"
    SELECT id, name, amount::numeric AS amount, frequency::text AS frequency, is_active
    FROM fixed_costs
"#;

const SALARY_WITHDRAWALS_SQL: &str = r#"
    SELECT id, withdrawal_date::date AS withdrawal_date, amount::numeric AS amount, person_name
    FROM salary_withdrawals
    ORDER BY withdrawal_date ASC
"#;

const MONETARY_MOVEMENTS_SQL: &str = r#"
    SELECT id, movement_date::date AS movement_date, amount::numeric AS amount,
           type::text AS type, description
    FROM monetary_movements
    ORDER BY movement_date ASC
"#;

const STOCK_ORDERS_SQL: &str = r#"
    SELECT id, status::text AS status, created_at,
           total_cost::numeric AS total_cost,
           total_potential_income::numeric AS total_potential_income,
           total_potential_profit::numeric AS total_potential_profit
    FROM stock_orders
    ORDER BY created_at ASC
"#;

const STOCK_ORDER_ITEMS_SQL: &str = r#"
    SELECT id, order_id, product_id, quantity::int4 AS quantity, unit_cost::numeric AS unit_cost
    FROM stock_order_items
"#;

const PRODUCTS_SQL: &str = r#"
    SELECT id, name, cost::numeric AS cost, stock::int4 AS stock
    FROM products
"#;

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_table<T>(&self, entity: EntityKind, sql: &'static str) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let rows = sqlx::query_as::<_, T>(sql).fetch_all(&self.pool).await?;

        tracing::debug!(table = entity.table(), rows = rows.len(), "Tabela carregada");
        Ok(rows)
    }
}

#[async_trait]
impl FinanceSource for FinanceRepository {
    async fn fetch_sales(&self) -> Result<Vec<Sale>, AppError> {
        self.fetch_table(EntityKind::Sales, SALES_SQL).await
    }

    async fn fetch_sale_items(&self) -> Result<Vec<SaleItem>, AppError> {
        self.fetch_table(EntityKind::SaleItems, SALE_ITEMS_SQL).await
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>, AppError> {
        self.fetch_table(EntityKind::Expenses, EXPENSES_SQL).await
    }

    async fn fetch_cash_closures(&self) -> Result<Vec<CashClosure>, AppError> {
        self.fetch_table(EntityKind::CashClosures, CASH_CLOSURES_SQL).await
    }

    async fn fetch_fixed_costs(&self) -> Result<Vec<FixedCost>, AppError> {
        self.fetch_table(EntityKind::FixedCosts, FIXED_COSTS_SQL).await
    }

    async fn fetch_salary_withdrawals(&self) -> Result<Vec<SalaryWithdrawal>, AppError> {
        self.fetch_table(EntityKind::SalaryWithdrawals, SALARY_WITHDRAWALS_SQL).await
    }

    async fn fetch_monetary_movements(&self) -> Result<Vec<MonetaryMovement>, AppError> {
        self.fetch_table(EntityKind::MonetaryMovements, MONETARY_MOVEMENTS_SQL).await
    }

    async fn fetch_stock_orders(&self) -> Result<Vec<StockOrder>, AppError> {
        self.fetch_table(EntityKind::StockOrders, STOCK_ORDERS_SQL).await
    }

    async fn fetch_stock_order_items(&self) -> Result<Vec<StockOrderItem>, AppError> {
        self.fetch_table(EntityKind::StockOrderItems, STOCK_ORDER_ITEMS_SQL).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        self.fetch_table(EntityKind::Products, PRODUCTS_SQL).await
    }
}
