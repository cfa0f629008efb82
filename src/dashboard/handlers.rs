//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the month dashboard
//! - HTML view functions composing the dashboard panels
//! - State and query types used by the handler

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::CategorySet,
    dashboard::{
        aggregation::{MonthSummary, aggregate, filter_by_month, filter_by_search},
        cards::summary_cards_view,
        charts::{
            DashboardChart, budget_status_chart, category_donut_chart, charts_script, charts_view,
        },
        month::{current_month_key, month_label, parse_month_key, shift_month_key},
        tables::{statement_panel, statement_table},
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    insight::{FinancialInsight, InsightService, insight_panel},
    navigation::NavBar,
    transaction::{Transaction, TransactionStore, new_transaction_form},
};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The ledger to display.
    pub transaction_store: Arc<TransactionStore>,
    /// The categories offered by the entry form.
    pub category_set: Arc<CategorySet>,
    /// The analysis service backing the AI panel.
    pub insight_service: Arc<InsightService>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            category_set: state.category_set.clone(),
            insight_service: state.insight_service.clone(),
        }
    }
}

/// The query parameters accepted by the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The month to display as a `YYYY-MM` key. Missing or malformed values
    /// fall back to the current month.
    pub month: Option<String>,
    /// A live-search needle narrowing the statement table.
    pub search: Option<String>,
}

/// Holds all the data needed to render the dashboard.
struct DashboardData<'a> {
    month_key: &'a str,
    month_label: String,
    previous_month: String,
    next_month: String,
    search: &'a str,
    summary: MonthSummary,
    categories: Vec<String>,
    month_transactions: Vec<Transaction>,
    visible: Vec<Transaction>,
    latest_insight: Option<FinancialInsight>,
}

/// Display the dashboard for one month.
///
/// HTMX requests come from the statement live search and get just the table
/// fragment; everything else gets the full page.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_hx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let month_key = query
        .month
        .filter(|month| parse_month_key(month).is_ok())
        .unwrap_or_else(current_month_key);
    let search = query.search.unwrap_or_default();

    let transactions = state
        .transaction_store
        .all()
        .inspect_err(|error| tracing::error!("Could not list transactions: {error}"))?;
    let month_transactions = filter_by_month(&transactions, &month_key);
    let visible = filter_by_search(&month_transactions, &search);

    if is_hx_request {
        let searched = !search.trim().is_empty();

        return Ok(statement_table(&month_key, searched, &visible).into_response());
    }

    let summary = aggregate(&month_transactions);
    let categories = state
        .category_set
        .all()
        .inspect_err(|error| tracing::error!("Could not list categories: {error}"))?;
    let latest_insight = state.insight_service.latest()?;

    let data = DashboardData {
        month_key: &month_key,
        month_label: month_label(&month_key)?,
        previous_month: shift_month_key(&month_key, -1)?,
        next_month: shift_month_key(&month_key, 1)?,
        search: &search,
        summary,
        categories,
        month_transactions,
        visible,
        latest_insight,
    };

    Ok(dashboard_view(&data).into_response())
}

/// Renders the full dashboard page.
fn dashboard_view(data: &DashboardData) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let bars = DashboardChart {
        id: "budget-status-chart",
        options: budget_status_chart(&data.summary).to_string(),
    };
    let donut = (!data.summary.by_category.is_empty()).then(|| DashboardChart {
        id: "category-donut-chart",
        options: category_donut_chart(&data.summary).to_string(),
    });

    let mut script_charts = vec![&bars];
    if let Some(chart) = &donut {
        script_charts.push(chart);
    }

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&script_charts),
    ];

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="space-y-4"
            {
                (month_navigation(&data.previous_month, &data.month_label, &data.next_month))

                (summary_cards_view(&data.summary))

                div class="grid grid-cols-1 lg:grid-cols-3 gap-4 items-start"
                {
                    section class="p-4 bg-white rounded-lg shadow dark:bg-gray-800 space-y-4"
                    {
                        h2 class="text-lg font-semibold" { "Novo Lançamento" }

                        (new_transaction_form(data.month_key, &data.categories))
                    }

                    div class="lg:col-span-2"
                    {
                        (statement_panel(
                            data.month_key,
                            data.search,
                            &data.month_transactions,
                            &data.visible,
                        ))
                    }
                }

                (charts_view(donut.as_ref(), &bars))

                (insight_panel(
                    data.month_key,
                    data.month_transactions.is_empty(),
                    data.latest_insight.as_ref(),
                ))
            }
        }
    );

    base("Painel", &scripts, &content)
}

fn month_navigation(previous: &str, label: &str, next: &str) -> Markup {
    let arrow_style = "px-3 py-1 text-xl font-bold text-gray-500 rounded \
        hover:bg-gray-200 hover:text-gray-900 \
        dark:hover:bg-gray-700 dark:hover:text-white";

    html!(
        nav class="flex items-center justify-center gap-6"
        {
            a
                href={(endpoints::DASHBOARD_VIEW) "?month=" (previous)}
                class=(arrow_style)
            {
                "‹"
            }

            h1 class="text-xl font-bold tracking-wide" { (label) }

            a
                href={(endpoints::DASHBOARD_VIEW) "?month=" (next)}
                class=(arrow_style)
            {
                "›"
            }
        }
    )
}
