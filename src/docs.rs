// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Finance ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_periods,
    ),
    components(
        schemas(
            models::dashboard::SummaryResponse,
            models::dashboard::PeriodsResponse,
            models::dashboard::FinancialSummary,
            models::dashboard::BreakdownEntry,
            models::dashboard::Period,
            models::dashboard::PeriodOption,
            models::dashboard::SourceWarning,
            models::dashboard::EntityKind,
        )
    ),
    tags(
        (name = "Finance", description = "Indicadores financeiros por período de fechamento de caixa")
    )
)]
pub struct ApiDoc;
