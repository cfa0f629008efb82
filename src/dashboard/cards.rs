//! Summary cards for the monthly totals.

use maud::{Markup, html};

use crate::{dashboard::aggregation::MonthSummary, html::format_currency};

const CARD_STYLE: &str = "p-4 bg-white rounded-lg shadow dark:bg-gray-800";
const CARD_LABEL_STYLE: &str =
    "text-xs font-semibold tracking-wider text-gray-500 uppercase dark:text-gray-400";
const CARD_VALUE_STYLE: &str = "mt-1 text-2xl font-bold";

/// Renders the three summary cards for the viewed month.
///
/// All amounts are shown without a sign; the direction is carried by the
/// card itself. The balance card turns red when the month ends in the
/// negative.
pub(super) fn summary_cards_view(summary: &MonthSummary) -> Markup {
    let balance_color = if summary.balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-gray-900 dark:text-white"
    };

    html! {
        section class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full"
        {
            div class=(CARD_STYLE)
            {
                p class=(CARD_LABEL_STYLE) { "Saldo Atual" }

                p class={(CARD_VALUE_STYLE) " " (balance_color)}
                {
                    (format_currency(summary.balance.abs()))
                }
            }

            div class=(CARD_STYLE)
            {
                p class=(CARD_LABEL_STYLE) { "Entradas" }

                p class={(CARD_VALUE_STYLE) " text-green-600 dark:text-green-400"}
                {
                    (format_currency(summary.income))
                }
            }

            div class=(CARD_STYLE)
            {
                p class=(CARD_LABEL_STYLE) { "Saídas" }

                p class={(CARD_VALUE_STYLE) " text-red-600 dark:text-red-400"}
                {
                    (format_currency(summary.expense))
                }
            }
        }
    }
}

#[cfg(test)]
mod summary_cards_tests {
    use super::summary_cards_view;
    use crate::dashboard::aggregation::MonthSummary;

    #[test]
    fn renders_formatted_totals() {
        let summary = MonthSummary {
            income: 5300.0,
            expense: 2805.0,
            balance: 2495.0,
            by_category: vec![],
        };

        let html = summary_cards_view(&summary).into_string();

        assert!(html.contains("Saldo Atual"));
        assert!(html.contains("Entradas"));
        assert!(html.contains("Saídas"));
        assert!(html.contains("R$ 2.495,00"));
        assert!(html.contains("R$ 5.300,00"));
        assert!(html.contains("R$ 2.805,00"));
    }

    #[test]
    fn negative_balance_is_red_and_unsigned() {
        let summary = MonthSummary {
            income: 100.0,
            expense: 350.0,
            balance: -250.0,
            by_category: vec![],
        };

        let html = summary_cards_view(&summary).into_string();

        assert!(html.contains("text-red-600"));
        assert!(html.contains("R$ 250,00"));
        assert!(!html.contains("-R$ 250,00"));
    }
}
