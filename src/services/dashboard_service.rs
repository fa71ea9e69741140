// src/services/dashboard_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::source::{load_closures, load_snapshot, FinanceSource},
    models::dashboard::{FinancialSummary, PeriodsResponse, SummaryResponse},
    services::{
        metrics::compute_metrics,
        period::{list_periods, resolve_period, PeriodSelection},
    },
};

/// Ponto único de cálculo do financeiro: painel e página de finanças usam o mesmo caminho.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn FinanceSource>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn FinanceSource>) -> Self {
        Self { source }
    }

    pub async fn get_summary(&self, selection: PeriodSelection) -> Result<SummaryResponse, AppError> {
        let (snapshot, warnings) = load_snapshot(self.source.as_ref()).await;

        let period = resolve_period(&snapshot.closures, selection)?;
        let metrics = compute_metrics(&snapshot, &period);

        tracing::info!(
            ?selection,
            sales = metrics.sale_count,
            warnings = warnings.len(),
            "📊 Resumo financeiro calculado"
        );

        let closure_id = match selection {
            PeriodSelection::Current => None,
            PeriodSelection::Closure(id) => Some(id),
        };

        Ok(SummaryResponse {
            period,
            is_current: closure_id.is_none(),
            closure_id,
            metrics: FinancialSummary::from(&metrics),
            warnings,
        })
    }

    pub async fn get_periods(&self) -> Result<PeriodsResponse, AppError> {
        let (closures, warnings) = load_closures(self.source.as_ref()).await;

        Ok(PeriodsResponse {
            periods: list_periods(&closures),
            warnings,
        })
    }
}
