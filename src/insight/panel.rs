//! The "Análise IA" panel on the dashboard.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, loading_spinner},
    insight::{FinancialInsight, InsightStatus},
};

/// The container the analysis button swaps.
const PANEL_ID: &str = "insight-panel";

/// Renders the AI analysis panel.
///
/// The button re-posts the viewed month and replaces the whole panel with
/// the re-rendered fragment. Clicking is blocked while a request is in
/// flight and when the month has nothing to analyze. An insight outlives the
/// month it was produced for, so `latest` may describe a different month
/// than `month_key`.
pub fn insight_panel(
    month_key: &str,
    month_is_empty: bool,
    latest: Option<&FinancialInsight>,
) -> Markup {
    html! {
        section id=(PANEL_ID) class="p-4 bg-white rounded-lg shadow dark:bg-gray-800 w-full"
        {
            h2 class="text-lg font-semibold mb-2" { "Análise IA" }

            button
                type="button"
                disabled[month_is_empty]
                class=(BUTTON_PRIMARY_STYLE)
                hx-post=(endpoints::INSIGHT_API)
                hx-vals=(serde_json::json!({ "month": month_key }).to_string())
                hx-target={ "#" (PANEL_ID) }
                hx-swap="outerHTML"
                hx-indicator="#indicator"
                hx-disabled-elt="this"
                hx-target-error="#alert-container"
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Obter Insights"
            }

            @if let Some(insight) = latest {
                (insight_view(insight))
            } @else if month_is_empty {
                (prompt_view("Adicione transações para habilitar a IA"))
            } @else {
                (prompt_view("Analise seus gastos mensais com inteligência preditiva"))
            }
        }
    }
}

fn insight_view(insight: &FinancialInsight) -> Markup {
    html! {
        div class="mt-4 space-y-4"
        {
            div class={ "p-3 rounded border-l-4 bg-gray-50 dark:bg-gray-700 " (status_styles(insight.status)) }
            {
                h3 class="text-xs font-semibold uppercase tracking-wide" { "Diagnóstico" }

                p class="mt-1 text-sm italic text-gray-700 dark:text-gray-300"
                {
                    "\"" (insight.summary) "\""
                }
            }

            div
            {
                h3 class="text-xs font-semibold uppercase tracking-wide text-blue-600 dark:text-blue-400"
                {
                    "Plano de Ação"
                }

                ol class="mt-2 space-y-1 text-sm text-gray-700 dark:text-gray-300 list-decimal list-inside"
                {
                    @for tip in &insight.tips {
                        li { (tip) }
                    }
                }
            }

            div
            {
                h3 class="text-xs font-semibold uppercase tracking-wide text-emerald-600 dark:text-emerald-400"
                {
                    "Predição de Tendência"
                }

                p class="mt-1 text-sm text-gray-700 dark:text-gray-300" { (insight.prediction) }
            }
        }
    }
}

fn prompt_view(message: &str) -> Markup {
    html! {
        p class="py-8 text-center text-sm text-gray-500 dark:text-gray-400" { (message) }
    }
}

/// The border and heading tint for the diagnosis box.
fn status_styles(status: InsightStatus) -> &'static str {
    match status {
        InsightStatus::Good => "border-emerald-500 text-emerald-600 dark:text-emerald-400",
        InsightStatus::Warning => "border-yellow-500 text-yellow-600 dark:text-yellow-400",
        InsightStatus::Critical => "border-red-500 text-red-600 dark:text-red-400",
    }
}
