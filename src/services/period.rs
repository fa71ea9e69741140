// src/services/period.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{Period, PeriodOption},
        finance::CashClosure,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelection {
    /// Período aberto, depois do último fechamento.
    Current,
    /// Período encerrado pelo fechamento informado.
    Closure(Uuid),
}

impl From<Option<Uuid>> for PeriodSelection {
    fn from(closure_id: Option<Uuid>) -> Self {
        closure_id.map_or(PeriodSelection::Current, PeriodSelection::Closure)
    }
}

// Fechamentos sem `created_at` não servem de fronteira
fn boundaries(closures: &[CashClosure]) -> Vec<(DateTime<Utc>, &CashClosure)> {
    let mut bounded: Vec<_> = closures
        .iter()
        .filter_map(|c| c.created_at.map(|at| (at, c)))
        .collect();
    bounded.sort_by_key(|(at, _)| *at);
    bounded
}

// Anterior = maior instante estritamente antes de `end` (fechamentos no mesmo instante não contam)
fn previous_boundary(bounded: &[(DateTime<Utc>, &CashClosure)], end: DateTime<Utc>) -> Option<DateTime<Utc>> {
    bounded
        .iter()
        .map(|(at, _)| *at)
        .filter(|at| *at < end)
        .max()
}

/// Converte a seleção do usuário em uma janela `(start, end]`.
pub fn resolve_period(
    closures: &[CashClosure],
    selection: PeriodSelection,
) -> Result<Period, AppError> {
    let bounded = boundaries(closures);

    match selection {
        PeriodSelection::Current => Ok(Period {
            start: bounded.last().map(|(at, _)| *at),
            end: None,
        }),

        PeriodSelection::Closure(id) => {
            let selected = closures
                .iter()
                .find(|c| c.id == id)
                .ok_or(AppError::ClosureNotFound(id))?;

            let Some(end) = selected.created_at else {
                tracing::warn!(closure_id = %id, "Fechamento sem data de criação; usando todo o histórico");
                return Ok(Period::all_time());
            };

            Ok(Period {
                start: previous_boundary(&bounded, end),
                end: Some(end),
            })
        }
    }
}

/// Opções do seletor: o período aberto primeiro, depois os fechamentos do mais novo ao mais antigo.
pub fn list_periods(closures: &[CashClosure]) -> Vec<PeriodOption> {
    let bounded = boundaries(closures);

    let mut options = Vec::with_capacity(bounded.len() + 1);
    options.push(PeriodOption {
        closure_id: None,
        is_current: true,
        period: Period {
            start: bounded.last().map(|(at, _)| *at),
            end: None,
        },
        closure_date: None,
        actual_cash: None,
        notes: None,
    });

    for (end, closure) in bounded.iter().rev() {
        options.push(PeriodOption {
            closure_id: Some(closure.id),
            is_current: false,
            period: Period {
                start: previous_boundary(&bounded, *end),
                end: Some(*end),
            },
            closure_date: closure.closure_date,
            actual_cash: closure.actual_cash,
            notes: closure.notes.clone(),
        });
    }

    options
}
