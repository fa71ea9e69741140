// src/db/source.rs

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{EntityKind, SourceWarning},
        finance::{
            CashClosure, Expense, FinanceSnapshot, FixedCost, MonetaryMovement, Product,
            SalaryWithdrawal, Sale, SaleItem, StockOrder, StockOrderItem,
        },
    },
};

/// Acesso remoto às tabelas do financeiro. Uma chamada por entidade, sempre a
/// tabela inteira (os filtros de período são feitos em memória).
#[async_trait]
pub trait FinanceSource: Send + Sync {
    async fn fetch_sales(&self) -> Result<Vec<Sale>, AppError>;
    async fn fetch_sale_items(&self) -> Result<Vec<SaleItem>, AppError>;
    async fn fetch_expenses(&self) -> Result<Vec<Expense>, AppError>;
    async fn fetch_cash_closures(&self) -> Result<Vec<CashClosure>, AppError>;
    async fn fetch_fixed_costs(&self) -> Result<Vec<FixedCost>, AppError>;
    async fn fetch_salary_withdrawals(&self) -> Result<Vec<SalaryWithdrawal>, AppError>;
    async fn fetch_monetary_movements(&self) -> Result<Vec<MonetaryMovement>, AppError>;
    async fn fetch_stock_orders(&self) -> Result<Vec<StockOrder>, AppError>;
    async fn fetch_stock_order_items(&self) -> Result<Vec<StockOrderItem>, AppError>;
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError>;
}

// Fonte indisponível vira lista vazia + aviso. Nunca aborta o cálculo.
fn or_empty<T>(
    entity: EntityKind,
    result: Result<Vec<T>, AppError>,
    warnings: &mut Vec<SourceWarning>,
) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(table = entity.table(), "⚠️ Fonte indisponível, seguindo sem ela: {}", e);
            warnings.push(SourceWarning {
                entity,
                message: e.to_string(),
            });
            Vec::new()
        }
    }
}

fn group_by<T, F>(rows: Vec<T>, key: F) -> HashMap<Uuid, Vec<T>>
where
    F: Fn(&T) -> Option<Uuid>,
{
    let mut grouped: HashMap<Uuid, Vec<T>> = HashMap::new();
    for row in rows {
        match key(&row) {
            Some(parent) => grouped.entry(parent).or_default().push(row),
            None => tracing::debug!("Item sem registro pai ignorado"),
        }
    }
    grouped
}

/// Busca todas as fontes em paralelo e monta o snapshot da interação.
pub async fn load_snapshot(source: &dyn FinanceSource) -> (FinanceSnapshot, Vec<SourceWarning>) {
    let (
        sales,
        sale_items,
        expenses,
        closures,
        fixed_costs,
        salary_withdrawals,
        movements,
        stock_orders,
        stock_order_items,
        products,
    ) = tokio::join!(
        source.fetch_sales(),
        source.fetch_sale_items(),
        source.fetch_expenses(),
        source.fetch_cash_closures(),
        source.fetch_fixed_costs(),
        source.fetch_salary_withdrawals(),
        source.fetch_monetary_movements(),
        source.fetch_stock_orders(),
        source.fetch_stock_order_items(),
        source.fetch_products(),
    );

    let mut warnings = Vec::new();

    let mut sales = or_empty(EntityKind::Sales, sales, &mut warnings);
    let sale_items = or_empty(EntityKind::SaleItems, sale_items, &mut warnings);
    let mut stock_orders = or_empty(EntityKind::StockOrders, stock_orders, &mut warnings);
    let stock_order_items = or_empty(EntityKind::StockOrderItems, stock_order_items, &mut warnings);

    // Anexa os itens aos registros pais
    let mut items_by_sale = group_by(sale_items, |item| item.sale_id);
    for sale in &mut sales {
        sale.items = items_by_sale.remove(&sale.id).unwrap_or_default();
    }

    let mut items_by_order = group_by(stock_order_items, |item| item.order_id);
    for order in &mut stock_orders {
        order.items = items_by_order.remove(&order.id).unwrap_or_default();
    }

    let snapshot = FinanceSnapshot {
        sales,
        expenses: or_empty(EntityKind::Expenses, expenses, &mut warnings),
        closures: or_empty(EntityKind::CashClosures, closures, &mut warnings),
        fixed_costs: or_empty(EntityKind::FixedCosts, fixed_costs, &mut warnings),
        salary_withdrawals: or_empty(EntityKind::SalaryWithdrawals, salary_withdrawals, &mut warnings),
        movements: or_empty(EntityKind::MonetaryMovements, movements, &mut warnings),
        stock_orders,
        products: or_empty(EntityKind::Products, products, &mut warnings),
        // Não há tabela de leads/oportunidades; a taxa de conversão sai sempre nula
        opportunity_count: None,
    };

    tracing::debug!(
        sales = snapshot.sales.len(),
        closures = snapshot.closures.len(),
        warnings = warnings.len(),
        "Snapshot financeiro carregado"
    );

    (snapshot, warnings)
}

/// Só os fechamentos (para o seletor de período).
pub async fn load_closures(source: &dyn FinanceSource) -> (Vec<CashClosure>, Vec<SourceWarning>) {
    let mut warnings = Vec::new();
    let closures = or_empty(
        EntityKind::CashClosures,
        source.fetch_cash_closures().await,
        &mut warnings,
    );
    (closures, warnings)
}
