//! The endpoint behind the "Obter Insights" button.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    dashboard::{current_month_key, filter_by_month, parse_month_key},
    insight::{InsightService, panel::insight_panel},
    transaction::TransactionStore,
};

/// The state needed for running an analysis.
#[derive(Clone)]
pub struct InsightState {
    /// The ledger the analyzed month is read from.
    pub transaction_store: Arc<TransactionStore>,
    /// The service that talks to the analysis engine.
    pub insight_service: Arc<InsightService>,
}

impl FromRef<AppState> for InsightState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            insight_service: state.insight_service.clone(),
        }
    }
}

/// The form data for an analysis request.
#[derive(Debug, Deserialize)]
pub struct InsightFormData {
    /// The month key of the dashboard the request came from.
    pub month: String,
}

/// Run the analysis for one month and answer with the re-rendered panel.
///
/// An empty month is never sent to the engine; the panel is re-rendered
/// as-is. A second request while one is in flight is answered with a
/// conflict alert and leaves the running analysis alone.
pub async fn request_insight_endpoint(
    State(state): State<InsightState>,
    Form(form): Form<InsightFormData>,
) -> Response {
    let month_key = match parse_month_key(&form.month) {
        Ok(_) => form.month,
        Err(_) => current_month_key(),
    };

    let transactions = match state.transaction_store.all() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("An unexpected error occurred while reading the ledger: {error}");

            return error.into_alert_response();
        }
    };
    let subset = filter_by_month(&transactions, &month_key);

    if subset.is_empty() {
        let latest = match state.insight_service.latest() {
            Ok(latest) => latest,
            Err(error) => return error.into_alert_response(),
        };

        return insight_panel(&month_key, true, latest.as_ref()).into_response();
    }

    match state.insight_service.analyze(&subset, &month_key).await {
        Ok(insight) => insight_panel(&month_key, false, Some(&insight)).into_response(),
        Err(error) => error.into_alert_response(),
    }
}
