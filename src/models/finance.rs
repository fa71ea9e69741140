// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Enums (colunas TEXT do Supabase) ---
// O banco não garante os valores, então tudo que não reconhecemos vira `Unknown`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOrderStatus {
    Pending,
    Received,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl From<Option<String>> for StockOrderStatus {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some("pending") => Self::Pending,
            Some("received") => Self::Received,
            Some("cancelled") => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Income,     // Aporte / entrada de dinheiro
    Withdrawal, // Retirada
    #[serde(other)]
    Unknown,
}

impl From<Option<String>> for MovementType {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some("income") => Self::Income,
            Some("withdrawal") => Self::Withdrawal,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostFrequency {
    Monthly,
    Yearly,
    #[serde(other)]
    Unknown,
}

impl From<Option<String>> for CostFrequency {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some("monthly") => Self::Monthly,
            Some("yearly") => Self::Yearly,
            _ => Self::Unknown,
        }
    }
}

// --- 1. Vendas ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    // Itens órfãos (sem venda) são ignorados ao anexar
    pub sale_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub total_amount: Option<Decimal>,
    pub payment_method: Option<String>,

    // Vem da tabela filha `sale_items`, anexado pelo repositório
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

// --- 2. Despesas ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub expense_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
}

// --- 3. Fechamentos de Caixa ---
// `created_at` é o instante real do fechamento e manda sobre `closure_date`.

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CashClosure {
    pub id: Uuid,
    pub closure_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub actual_cash: Option<Decimal>,
    pub notes: Option<String>,
}

// --- 4. Custos Fixos ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FixedCost {
    pub id: Uuid,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    #[sqlx(try_from = "Option<String>")]
    pub frequency: CostFrequency,
    pub is_active: Option<bool>,
}

impl FixedCost {
    /// Custo que entra na taxa mensal (ativo e com frequência mensal).
    pub fn is_monthly_rate(&self) -> bool {
        self.is_active.unwrap_or(false) && self.frequency == CostFrequency::Monthly
    }
}

// --- 5. Retiradas de Salário ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalaryWithdrawal {
    pub id: Uuid,
    pub withdrawal_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub person_name: Option<String>,
}

// --- 6. Movimentações Monetárias ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryMovement {
    pub id: Uuid,
    pub movement_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    #[sqlx(try_from = "Option<String>", rename = "type")]
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub description: Option<String>,
}

// --- 7. Pedidos de Estoque ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockOrderItem {
    pub id: Uuid,
    pub order_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub unit_cost: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockOrder {
    pub id: Uuid,
    #[sqlx(try_from = "Option<String>")]
    pub status: StockOrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub total_cost: Option<Decimal>,
    pub total_potential_income: Option<Decimal>,
    pub total_potential_profit: Option<Decimal>,

    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<StockOrderItem>,
}

// --- 8. Produtos (só o necessário para o patrimônio) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: Option<String>,
    pub cost: Option<Decimal>,
    pub stock: Option<i32>,
}

// =========================================================================
//  SNAPSHOT (somente leitura)
// =========================================================================

/// Tudo que foi buscado no banco para uma interação. Nunca é alterado pelos cálculos.
#[derive(Debug, Clone, Default)]
pub struct FinanceSnapshot {
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub closures: Vec<CashClosure>,
    pub fixed_costs: Vec<FixedCost>,
    pub salary_withdrawals: Vec<SalaryWithdrawal>,
    pub movements: Vec<MonetaryMovement>,
    pub stock_orders: Vec<StockOrder>,
    pub products: Vec<Product>,
    // Base da taxa de conversão (leads/pedidos). Ainda não existe fonte para isso.
    pub opportunity_count: Option<u64>,
}

// =========================================================================
//  DATA DE REFERÊNCIA (para o filtro de período)
// =========================================================================

/// Instante usado para decidir a qual período um registro pertence.
pub trait Dated {
    fn occurred_at(&self) -> Option<DateTime<Utc>>;
}

// Datas de calendário contam a partir da meia-noite UTC
fn start_of_day(date: Option<NaiveDate>) -> Option<DateTime<Utc>> {
    date.and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

impl Dated for Sale {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Dated for StockOrder {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Dated for Expense {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        start_of_day(self.expense_date)
    }
}

impl Dated for SalaryWithdrawal {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        start_of_day(self.withdrawal_date)
    }
}

impl Dated for MonetaryMovement {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        start_of_day(self.movement_date)
    }
}
