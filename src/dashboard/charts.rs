//! Chart generation and rendering for the dashboard.
//!
//! This module creates the two ECharts visualizations for the viewed month:
//! - **Category donut**: expense split by category, first-occurrence order
//! - **Budget status**: income and expense totals side by side
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered into an HTML container by a small initialization script.

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisType, Color, Emphasis, ItemStyle, JsFunction, Label, LabelLine, Tooltip,
        Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::MonthSummary,
    html::HeadElement,
};

/// The slice colors for the category donut, applied in legend order.
const DONUT_PALETTE: [&str; 7] = [
    "#6366f1", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4",
];

const INCOME_BAR_COLOR: &str = "#10b981";
const EXPENSE_BAR_COLOR: &str = "#ef4444";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart panels for the dashboard.
///
/// The donut is replaced by a short prompt when the month has no expenses;
/// the budget status bars are always drawn.
pub(super) fn charts_view(donut: Option<&DashboardChart>, bars: &DashboardChart) -> Markup {
    html!(
        section class="grid grid-cols-1 xl:grid-cols-2 gap-4 w-full"
        {
            div class="p-4 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                h2 class="text-lg font-semibold mb-2" { "Divisão por Categoria" }

                @if let Some(chart) = donut {
                    div id=(chart.id) class="min-h-[300px]" {}
                } @else {
                    p class="py-8 text-center text-gray-500 dark:text-gray-400"
                    {
                        "Sem dados de despesa"
                    }
                }
            }

            div class="p-4 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                h2 class="text-lg font-semibold mb-2" { "Status de Orçamento" }

                div id=(bars.id) class="min-h-[300px]" {}
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates a script that initializes ECharts instances once the document has
/// loaded, with responsive resizing.
pub(super) fn charts_script(charts: &[&DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The expense split donut. Slices follow the first-occurrence order of
/// [MonthSummary::by_category], so the legend reads in statement order.
pub(super) fn category_donut_chart(summary: &MonthSummary) -> Chart {
    let data = summary
        .by_category
        .iter()
        .map(|group| (group.total, group.category.as_str()))
        .collect::<Vec<_>>();

    Chart::new()
        .color(DONUT_PALETTE.iter().map(|&color| Color::from(color)).collect())
        .tooltip(Tooltip::new().trigger(Trigger::Item).value_formatter(currency_formatter()))
        .legend(Legend::new().bottom("0%").left("center"))
        .series(
            Pie::new()
                .name("Despesas")
                .radius(vec!["60%", "80%"])
                .avoid_label_overlap(false)
                .label(Label::new().show(false))
                .label_line(LabelLine::new().show(false))
                .emphasis(Emphasis::new().label(Label::new().show(true)))
                .data(data),
        )
}

/// The income-vs-expense bar pair.
pub(super) fn budget_status_chart(summary: &MonthSummary) -> Chart {
    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Item).value_formatter(currency_formatter()))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(vec!["Entr.", "Saíd."]),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new().name("Total").data(vec![
                DataPointItem::new(summary.income)
                    .item_style(ItemStyle::new().color(INCOME_BAR_COLOR)),
                DataPointItem::new(summary.expense)
                    .item_style(ItemStyle::new().color(EXPENSE_BAR_COLOR)),
            ]),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod charts_tests {
    use super::{DashboardChart, budget_status_chart, category_donut_chart, charts_view};
    use crate::dashboard::aggregation::{CategoryExpense, MonthSummary};

    fn sample_summary() -> MonthSummary {
        MonthSummary {
            income: 5300.0,
            expense: 2805.0,
            balance: 2495.0,
            by_category: vec![
                CategoryExpense {
                    category: "Aluguel/Condomínio".to_owned(),
                    total: 1200.0,
                },
                CategoryExpense {
                    category: "Mercado".to_owned(),
                    total: 950.0,
                },
            ],
        }
    }

    #[test]
    fn donut_options_list_categories_in_order() {
        let options = category_donut_chart(&sample_summary()).to_string();

        let rent = options
            .find("Aluguel/Condomínio")
            .expect("Could not find rent category in chart options");
        let groceries = options
            .find("Mercado")
            .expect("Could not find groceries category in chart options");
        assert!(rent < groceries);
    }

    #[test]
    fn budget_status_options_carry_both_totals() {
        let options = budget_status_chart(&sample_summary()).to_string();

        assert!(options.contains("5300"));
        assert!(options.contains("2805"));
        assert!(options.contains("Entr."));
        assert!(options.contains("Saíd."));
    }

    #[test]
    fn charts_view_shows_prompt_without_expenses() {
        let bars = DashboardChart {
            id: "budget-status-chart",
            options: String::new(),
        };

        let html = charts_view(None, &bars).into_string();

        assert!(html.contains("Sem dados de despesa"));
        assert!(html.contains("budget-status-chart"));
    }

    #[test]
    fn charts_view_renders_both_containers() {
        let donut = DashboardChart {
            id: "category-donut-chart",
            options: String::new(),
        };
        let bars = DashboardChart {
            id: "budget-status-chart",
            options: String::new(),
        };

        let html = charts_view(Some(&donut), &bars).into_string();

        assert!(html.contains("category-donut-chart"));
        assert!(html.contains("budget-status-chart"));
        assert!(!html.contains("Sem dados de despesa"));
    }
}
