// src/services/metrics.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::money::{or_zero, sum_or_zero},
    models::{
        dashboard::{BreakdownEntry, FinancialMetrics, Period},
        finance::{Dated, FinanceSnapshot, MovementType, Sale, StockOrderStatus},
    },
};

const UNLABELED: &str = "não informado";

fn within<'a, T: Dated>(rows: &'a [T], period: &'a Period) -> impl Iterator<Item = &'a T> + 'a {
    rows.iter().filter(move |row| period.contains(row.occurred_at()))
}

// Parcelas que entram tanto no período quanto no capital disponível (todo o histórico)
#[derive(Debug, Clone, Copy, PartialEq)]
struct PeriodTotals {
    product_revenue: Decimal,
    monetary_income: Decimal,
    monetary_withdrawals: Decimal,
    fixed_costs_total: Decimal,
    salary_withdrawals_total: Decimal,
    order_costs: Decimal,
}

impl PeriodTotals {
    fn total_revenue(&self) -> Decimal {
        self.product_revenue + self.monetary_income
    }

    fn total_costs(&self) -> Decimal {
        self.fixed_costs_total
            + self.salary_withdrawals_total
            + self.order_costs
            + self.monetary_withdrawals
    }
}

fn movements_of(snapshot: &FinanceSnapshot, period: &Period, kind: MovementType) -> Decimal {
    sum_or_zero(
        within(&snapshot.movements, period)
            .filter(|m| m.movement_type == kind)
            .map(|m| m.amount),
    )
}

fn period_totals(snapshot: &FinanceSnapshot, period: &Period) -> PeriodTotals {
    PeriodTotals {
        product_revenue: sum_or_zero(within(&snapshot.sales, period).map(|s| s.total_amount)),
        monetary_income: movements_of(snapshot, period, MovementType::Income),
        monetary_withdrawals: movements_of(snapshot, period, MovementType::Withdrawal),
        // Taxa mensal vigente: nunca filtrada por período
        fixed_costs_total: sum_or_zero(
            snapshot
                .fixed_costs
                .iter()
                .filter(|c| c.is_monthly_rate())
                .map(|c| c.amount),
        ),
        salary_withdrawals_total: sum_or_zero(
            within(&snapshot.salary_withdrawals, period).map(|w| w.amount),
        ),
        order_costs: sum_or_zero(
            within(&snapshot.stock_orders, period)
                .filter(|o| o.status == StockOrderStatus::Received)
                .map(|o| o.total_cost),
        ),
    }
}

fn units_sold(sale: &Sale) -> i64 {
    if sale.items.is_empty() {
        return 1;
    }
    sale.items
        .iter()
        .map(|item| i64::from(item.quantity.unwrap_or(0)))
        .sum()
}

fn breakdown<'a, I>(rows: I) -> Vec<BreakdownEntry>
where
    I: Iterator<Item = (Option<&'a str>, Option<Decimal>)>,
{
    let mut grouped: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();
    for (label, amount) in rows {
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(UNLABELED);
        let entry = grouped.entry(label.to_string()).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += or_zero(amount);
    }

    grouped
        .into_iter()
        .map(|(label, (count, total))| BreakdownEntry { label, count, total })
        .collect()
}

/// Taxa de conversão = vendas / oportunidades × 100.
/// Sem base de oportunidades não há taxa: vendas sobre vendas daria sempre 100%.
pub fn conversion_rate(sale_count: u64, opportunities: Option<u64>) -> Option<Decimal> {
    match opportunities {
        Some(total) if total > 0 => {
            Some(Decimal::from(sale_count) / Decimal::from(total) * Decimal::ONE_HUNDRED)
        }
        _ => None,
    }
}

/// Calcula todas as métricas do período. Função pura: mesmo snapshot e mesmo
/// período sempre produzem o mesmo resultado.
pub fn compute_metrics(snapshot: &FinanceSnapshot, period: &Period) -> FinancialMetrics {
    let totals = period_totals(snapshot, period);
    let all_time = period_totals(snapshot, &Period::all_time());

    let sale_count = within(&snapshot.sales, period).count() as u64;
    let items_sold: i64 = within(&snapshot.sales, period).map(units_sold).sum();

    let total_revenue = totals.total_revenue();
    let total_costs = totals.total_costs();

    let total_patrimony: Decimal = snapshot
        .products
        .iter()
        .map(|p| or_zero(p.cost) * Decimal::from(p.stock.unwrap_or(0)))
        .sum();

    let received = || {
        within(&snapshot.stock_orders, period).filter(|o| o.status == StockOrderStatus::Received)
    };

    FinancialMetrics {
        product_revenue: totals.product_revenue,
        items_sold,
        sale_count,
        monetary_income: totals.monetary_income,
        monetary_withdrawals: totals.monetary_withdrawals,
        net_monetary_movements: totals.monetary_income - totals.monetary_withdrawals,
        fixed_costs_total: totals.fixed_costs_total,
        salary_withdrawals_total: totals.salary_withdrawals_total,
        order_costs: totals.order_costs,
        total_costs,
        total_revenue,
        profit: total_revenue - total_costs,
        total_patrimony,
        conversion_rate: conversion_rate(sale_count, snapshot.opportunity_count),
        available_capital: all_time.total_revenue() - all_time.total_costs(),

        expenses_total: sum_or_zero(within(&snapshot.expenses, period).map(|e| e.amount)),
        pending_order_costs: sum_or_zero(
            within(&snapshot.stock_orders, period)
                .filter(|o| o.status == StockOrderStatus::Pending)
                .map(|o| o.total_cost),
        ),
        potential_income: sum_or_zero(received().map(|o| o.total_potential_income)),
        potential_profit: sum_or_zero(received().map(|o| o.total_potential_profit)),
        sales_by_payment_method: breakdown(
            within(&snapshot.sales, period).map(|s| (s.payment_method.as_deref(), s.total_amount)),
        ),
        expenses_by_category: breakdown(
            within(&snapshot.expenses, period).map(|e| (e.category.as_deref(), e.amount)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::{SaleItem, StockOrder};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sale(amount: Option<Decimal>, method: Option<&str>, quantities: &[i32]) -> Sale {
        let id = Uuid::new_v4();
        Sale {
            id,
            total_amount: amount,
            payment_method: method.map(str::to_string),
            items: quantities
                .iter()
                .map(|q| SaleItem {
                    id: Uuid::new_v4(),
                    sale_id: Some(id),
                    quantity: Some(*q),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn sales_without_items_count_as_one_unit() {
        let snapshot = FinanceSnapshot {
            sales: vec![sale(Some(dec!(10)), None, &[]), sale(Some(dec!(20)), None, &[2, 3])],
            ..Default::default()
        };
        let metrics = compute_metrics(&snapshot, &Period::all_time());
        assert_eq!(metrics.items_sold, 6);
        assert_eq!(metrics.sale_count, 2);
    }

    #[test]
    fn breakdowns_group_by_label_and_default_missing_ones() {
        let snapshot = FinanceSnapshot {
            sales: vec![
                sale(Some(dec!(10)), Some("pix"), &[]),
                sale(Some(dec!(5)), Some("pix"), &[]),
                sale(None, Some("  "), &[]),
                sale(Some(dec!(7)), Some("cartão"), &[]),
            ],
            ..Default::default()
        };
        let metrics = compute_metrics(&snapshot, &Period::all_time());
        let labels: Vec<_> = metrics.sales_by_payment_method.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["cartão", "não informado", "pix"]);
        assert_eq!(metrics.sales_by_payment_method[2].count, 2);
        assert_eq!(metrics.sales_by_payment_method[2].total, dec!(15));
        assert_eq!(metrics.sales_by_payment_method[1].total, Decimal::ZERO);
    }

    #[test]
    fn conversion_rate_needs_an_opportunity_base() {
        assert_eq!(conversion_rate(3, None), None);
        assert_eq!(conversion_rate(3, Some(0)), None);
        assert_eq!(conversion_rate(2, Some(4)), Some(dec!(50)));
    }

    #[test]
    fn unknown_order_status_is_never_counted() {
        let order = StockOrder {
            id: Uuid::new_v4(),
            status: StockOrderStatus::Unknown,
            created_at: None,
            total_cost: Some(dec!(100)),
            total_potential_income: Some(dec!(250)),
            total_potential_profit: Some(dec!(150)),
            items: Vec::new(),
        };
        let snapshot = FinanceSnapshot { stock_orders: vec![order], ..Default::default() };
        let metrics = compute_metrics(&snapshot, &Period::all_time());
        assert_eq!(metrics.order_costs, Decimal::ZERO);
        assert_eq!(metrics.pending_order_costs, Decimal::ZERO);
        assert_eq!(metrics.potential_income, Decimal::ZERO);
    }
}
