mod common;

use std::sync::Arc;

use common::shop;
use joalheria_admin::common::error::AppError;
use joalheria_admin::db::source::load_snapshot;
use joalheria_admin::models::dashboard::EntityKind;
use joalheria_admin::models::finance::SaleItem;
use joalheria_admin::services::period::PeriodSelection;
use joalheria_admin::services::DashboardService;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
async fn test_snapshot_attaches_items_to_their_sales() {
    let source = shop();
    let (snapshot, warnings) = load_snapshot(&source).await;

    assert!(warnings.is_empty());
    assert!(snapshot.sales[0].items.is_empty());
    assert_eq!(snapshot.sales[1].items.len(), 2);
    // Sem fonte de oportunidades, a base da conversão fica vazia
    assert_eq!(snapshot.opportunity_count, None);
}

#[tokio::test]
async fn test_orphan_items_do_not_drop_the_item_table() {
    let mut source = shop();
    source.sale_items.push(SaleItem { id: Uuid::new_v4(), sale_id: None, quantity: Some(7), ..Default::default() });
    let (snapshot, warnings) = load_snapshot(&source).await;

    assert!(warnings.is_empty());
    assert_eq!(snapshot.sales[1].items.len(), 2);

    let service = DashboardService::new(Arc::new(source));
    let summary = service.get_summary(PeriodSelection::Current).await.unwrap();
    assert_eq!(summary.metrics.items_sold, 4);
}

#[tokio::test]
async fn test_current_summary_only_sees_open_period() {
    let service = DashboardService::new(Arc::new(shop()));
    let summary = service.get_summary(PeriodSelection::Current).await.unwrap();

    assert!(summary.is_current);
    assert_eq!(summary.closure_id, None);
    assert_eq!(summary.metrics.product_revenue, dec!(80));
    assert_eq!(summary.metrics.items_sold, 4);
    assert_eq!(summary.metrics.total_patrimony, dec!(60));
    // Capital disponível olha o histórico inteiro: 120.60 + 80 -> 201
    assert_eq!(summary.metrics.available_capital, dec!(201));
    assert_eq!(summary.metrics.conversion_rate, None);
}

#[tokio::test]
async fn test_closed_summary_uses_the_closure_window() {
    let source = shop();
    let closure_id = source.closures[0].id;
    let service = DashboardService::new(Arc::new(source));

    let summary = service.get_summary(PeriodSelection::Closure(closure_id)).await.unwrap();
    assert!(!summary.is_current);
    assert_eq!(summary.period.start, None);
    assert_eq!(summary.metrics.product_revenue, dec!(121));
    assert_eq!(summary.metrics.sales_by_payment_method.len(), 1);
    assert_eq!(summary.metrics.sales_by_payment_method[0].label, "pix");
}

#[tokio::test]
async fn test_missing_tables_degrade_to_warnings() {
    let mut source = shop();
    source.missing.insert(EntityKind::Products);
    source.missing.insert(EntityKind::SaleItems);
    let service = DashboardService::new(Arc::new(source));

    let summary = service.get_summary(PeriodSelection::Current).await.unwrap();

    let failed: Vec<_> = summary.warnings.iter().map(|w| w.entity).collect();
    assert_eq!(failed, vec![EntityKind::SaleItems, EntityKind::Products]);
    assert_eq!(summary.metrics.total_patrimony, Decimal::ZERO);
    // Sem itens, cada venda conta como uma unidade
    assert_eq!(summary.metrics.items_sold, 1);
    assert_eq!(summary.metrics.product_revenue, dec!(80));
}

#[tokio::test]
async fn test_unknown_closure_is_reported() {
    let service = DashboardService::new(Arc::new(shop()));
    let result = service.get_summary(PeriodSelection::Closure(Uuid::new_v4())).await;

    assert!(matches!(result, Err(AppError::ClosureNotFound(_))));
}

#[tokio::test]
async fn test_periods_survive_missing_closures_table() {
    let mut source = shop();
    source.missing.insert(EntityKind::CashClosures);
    let service = DashboardService::new(Arc::new(source));

    let response = service.get_periods().await.unwrap();
    assert_eq!(response.periods.len(), 1);
    assert!(response.periods[0].is_current);
    assert!(response.periods[0].period.is_all_time());
    assert_eq!(response.warnings.len(), 1);
}

#[tokio::test]
async fn test_periods_list_each_closure() {
    let source = shop();
    let closure_id = source.closures[0].id;
    let service = DashboardService::new(Arc::new(source));

    let response = service.get_periods().await.unwrap();
    assert_eq!(response.periods.len(), 2);
    assert_eq!(response.periods[1].closure_id, Some(closure_id));
    assert_eq!(response.periods[1].actual_cash, Some(dec!(120.60)));
}
