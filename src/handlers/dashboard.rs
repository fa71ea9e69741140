// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{PeriodsResponse, SummaryResponse},
    services::period::PeriodSelection,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Fechamento que encerra o período. Sem ele, usa o período aberto.
    pub closure_id: Option<Uuid>,
}

// GET /api/finance/summary
#[utoipa::path(
    get,
    path = "/api/finance/summary",
    tag = "Finance",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Métricas financeiras do período selecionado", body = SummaryResponse),
        (status = 404, description = "Fechamento de caixa não encontrado")
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let selection = PeriodSelection::from(query.closure_id);

    let summary = app_state.dashboard_service.get_summary(selection).await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/finance/periods
#[utoipa::path(
    get,
    path = "/api/finance/periods",
    tag = "Finance",
    responses(
        (status = 200, description = "Período aberto e períodos encerrados por fechamento", body = PeriodsResponse)
    )
)]
pub async fn get_periods(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let periods = app_state.dashboard_service.get_periods().await?;

    Ok((StatusCode::OK, Json(periods)))
}

// GET /api/health
pub async fn health(State(app_state): State<AppState>) -> Result<&'static str, AppError> {
    sqlx::query("SELECT 1").execute(&app_state.db_pool).await?;
    Ok("OK")
}
