// src/models/dashboard.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::money::round_currency;

// =========================================================================
//  PERÍODO
// =========================================================================

/// Janela semiaberta `(start, end]`. `None` em um dos lados = sem limite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Period {
    pub fn all_time() -> Self {
        Self { start: None, end: None }
    }

    pub fn is_all_time(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Um registro no instante exato de um fechamento pertence ao período que
    /// termina nele. Registros sem data só entram na janela "todo o histórico".
    pub fn contains(&self, at: Option<DateTime<Utc>>) -> bool {
        let Some(at) = at else {
            return self.is_all_time();
        };

        let after_start = self.start.is_none_or(|start| at > start);
        let before_end = self.end.is_none_or(|end| at <= end);
        after_start && before_end
    }
}

// Uma opção do seletor de período (período aberto + cada fechamento)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodOption {
    pub closure_id: Option<Uuid>,
    pub is_current: bool,
    pub period: Period,
    #[schema(value_type = Option<String>, format = Date)]
    pub closure_date: Option<NaiveDate>,
    pub actual_cash: Option<Decimal>,
    pub notes: Option<String>,
}

// =========================================================================
//  FONTES DE DADOS
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sales,
    SaleItems,
    Expenses,
    CashClosures,
    FixedCosts,
    SalaryWithdrawals,
    MonetaryMovements,
    StockOrders,
    StockOrderItems,
    Products,
}

impl EntityKind {
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Sales => "sales",
            EntityKind::SaleItems => "sale_items",
            EntityKind::Expenses => "expenses",
            EntityKind::CashClosures => "cash_closures",
            EntityKind::FixedCosts => "fixed_costs",
            EntityKind::SalaryWithdrawals => "salary_withdrawals",
            EntityKind::MonetaryMovements => "monetary_movements",
            EntityKind::StockOrders => "stock_orders",
            EntityKind::StockOrderItems => "stock_order_items",
            EntityKind::Products => "products",
        }
    }
}

/// Fonte que falhou ao carregar; os números seguem calculados sem ela.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceWarning {
    pub entity: EntityKind,
    pub message: String,
}

// =========================================================================
//  MÉTRICAS
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    #[schema(example = "pix")]
    pub label: String,
    pub count: u64,
    pub total: Decimal,
}

/// Valores sem arredondamento; toda conta derivada parte daqui.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialMetrics {
    pub product_revenue: Decimal,
    pub items_sold: i64,
    pub sale_count: u64,
    pub monetary_income: Decimal,
    pub monetary_withdrawals: Decimal,
    pub net_monetary_movements: Decimal,
    pub fixed_costs_total: Decimal,
    pub salary_withdrawals_total: Decimal,
    pub order_costs: Decimal,
    pub total_costs: Decimal,
    pub total_revenue: Decimal,
    pub profit: Decimal,
    pub total_patrimony: Decimal,
    pub conversion_rate: Option<Decimal>,
    pub available_capital: Decimal,

    pub expenses_total: Decimal,
    pub pending_order_costs: Decimal,
    pub potential_income: Decimal,
    pub potential_profit: Decimal,
    pub sales_by_payment_method: Vec<BreakdownEntry>,
    pub expenses_by_category: Vec<BreakdownEntry>,
}

/// O que o painel mostra: moeda arredondada uma única vez, no fim.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub product_revenue: Decimal,
    pub items_sold: i64,
    pub sale_count: u64,
    pub monetary_income: Decimal,
    pub monetary_withdrawals: Decimal,
    pub net_monetary_movements: Decimal,
    pub fixed_costs_total: Decimal,
    pub salary_withdrawals_total: Decimal,
    pub order_costs: Decimal,
    pub total_costs: Decimal,
    pub total_revenue: Decimal,
    pub profit: Decimal,
    pub total_patrimony: Decimal,
    // Percentual com 2 casas; null enquanto não houver base de oportunidades
    pub conversion_rate: Option<Decimal>,
    pub available_capital: Decimal,

    pub expenses_total: Decimal,
    pub pending_order_costs: Decimal,
    pub potential_income: Decimal,
    pub potential_profit: Decimal,
    pub sales_by_payment_method: Vec<BreakdownEntry>,
    pub expenses_by_category: Vec<BreakdownEntry>,
}

fn round_breakdown(entries: &[BreakdownEntry]) -> Vec<BreakdownEntry> {
    entries
        .iter()
        .map(|e| BreakdownEntry {
            label: e.label.clone(),
            count: e.count,
            total: round_currency(e.total),
        })
        .collect()
}

impl From<&FinancialMetrics> for FinancialSummary {
    fn from(m: &FinancialMetrics) -> Self {
        Self {
            product_revenue: round_currency(m.product_revenue),
            items_sold: m.items_sold,
            sale_count: m.sale_count,
            monetary_income: round_currency(m.monetary_income),
            monetary_withdrawals: round_currency(m.monetary_withdrawals),
            net_monetary_movements: round_currency(m.net_monetary_movements),
            fixed_costs_total: round_currency(m.fixed_costs_total),
            salary_withdrawals_total: round_currency(m.salary_withdrawals_total),
            order_costs: round_currency(m.order_costs),
            total_costs: round_currency(m.total_costs),
            total_revenue: round_currency(m.total_revenue),
            profit: round_currency(m.profit),
            total_patrimony: round_currency(m.total_patrimony),
            conversion_rate: m.conversion_rate.map(|r| r.round_dp(2)),
            available_capital: round_currency(m.available_capital),
            expenses_total: round_currency(m.expenses_total),
            pending_order_costs: round_currency(m.pending_order_costs),
            potential_income: round_currency(m.potential_income),
            potential_profit: round_currency(m.potential_profit),
            sales_by_payment_method: round_breakdown(&m.sales_by_payment_method),
            expenses_by_category: round_breakdown(&m.expenses_by_category),
        }
    }
}

// =========================================================================
//  RESPOSTAS DA API
// =========================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub period: Period,
    pub is_current: bool,
    pub closure_id: Option<Uuid>,
    pub metrics: FinancialSummary,
    pub warnings: Vec<SourceWarning>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodsResponse {
    pub periods: Vec<PeriodOption>,
    pub warnings: Vec<SourceWarning>,
}
