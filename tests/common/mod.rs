// Fixtures compartilhadas pelos testes de integração
#![allow(dead_code)]

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use joalheria_admin::common::error::AppError;
use joalheria_admin::db::source::FinanceSource;
use joalheria_admin::models::dashboard::EntityKind;
use joalheria_admin::models::finance::{
    CashClosure, Expense, FixedCost, MonetaryMovement, Product, SalaryWithdrawal, Sale, SaleItem,
    StockOrder, StockOrderItem,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

// Fonte em memória; tabelas listadas em `missing` falham como se não existissem
#[derive(Default)]
pub struct InMemorySource {
    pub sales: Vec<Sale>,
    pub sale_items: Vec<SaleItem>,
    pub closures: Vec<CashClosure>,
    pub products: Vec<Product>,
    pub missing: HashSet<EntityKind>,
}

impl InMemorySource {
    fn rows<T: Clone>(&self, entity: EntityKind, rows: &[T]) -> Result<Vec<T>, AppError> {
        if self.missing.contains(&entity) {
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "relation \"{}\" does not exist",
                entity.table()
            )));
        }
        Ok(rows.to_vec())
    }
}

#[async_trait]
impl FinanceSource for InMemorySource {
    async fn fetch_sales(&self) -> Result<Vec<Sale>, AppError> {
        self.rows(EntityKind::Sales, &self.sales)
    }
    async fn fetch_sale_items(&self) -> Result<Vec<SaleItem>, AppError> {
        self.rows(EntityKind::SaleItems, &self.sale_items)
    }
    async fn fetch_expenses(&self) -> Result<Vec<Expense>, AppError> {
        self.rows::<Expense>(EntityKind::Expenses, &[])
    }
    async fn fetch_cash_closures(&self) -> Result<Vec<CashClosure>, AppError> {
        self.rows(EntityKind::CashClosures, &self.closures)
    }
    async fn fetch_fixed_costs(&self) -> Result<Vec<FixedCost>, AppError> {
        self.rows::<FixedCost>(EntityKind::FixedCosts, &[])
    }
    async fn fetch_salary_withdrawals(&self) -> Result<Vec<SalaryWithdrawal>, AppError> {
        self.rows::<SalaryWithdrawal>(EntityKind::SalaryWithdrawals, &[])
    }
    async fn fetch_monetary_movements(&self) -> Result<Vec<MonetaryMovement>, AppError> {
        self.rows::<MonetaryMovement>(EntityKind::MonetaryMovements, &[])
    }
    async fn fetch_stock_orders(&self) -> Result<Vec<StockOrder>, AppError> {
        self.rows::<StockOrder>(EntityKind::StockOrders, &[])
    }
    async fn fetch_stock_order_items(&self) -> Result<Vec<StockOrderItem>, AppError> {
        self.rows::<StockOrderItem>(EntityKind::StockOrderItems, &[])
    }
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        self.rows(EntityKind::Products, &self.products)
    }
}

pub fn shop() -> InMemorySource {
    let closed_at = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 0).unwrap();
    let before = Sale {
        id: Uuid::new_v4(),
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()),
        total_amount: Some(dec!(120.60)),
        payment_method: Some("pix".to_string()),
        items: Vec::new(),
    };
    let after = Sale {
        id: Uuid::new_v4(),
        created_at: Some(Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap()),
        total_amount: Some(dec!(80)),
        payment_method: Some("cartão".to_string()),
        items: Vec::new(),
    };
    let items = vec![
        SaleItem { id: Uuid::new_v4(), sale_id: Some(after.id), quantity: Some(3), ..Default::default() },
        SaleItem { id: Uuid::new_v4(), sale_id: Some(after.id), quantity: Some(1), ..Default::default() },
    ];

    InMemorySource {
        sales: vec![before, after],
        sale_items: items,
        closures: vec![CashClosure {
            id: Uuid::new_v4(),
            created_at: Some(closed_at),
            actual_cash: Some(dec!(120.60)),
            ..Default::default()
        }],
        products: vec![Product { id: Uuid::new_v4(), name: None, cost: Some(dec!(20)), stock: Some(3) }],
        missing: HashSet::new(),
    }
}
