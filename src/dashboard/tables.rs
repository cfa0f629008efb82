//! The monthly statement table.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, format_date,
    },
    transaction::{Transaction, TransactionKind},
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";
const COUNT_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-blue-800 bg-blue-100 rounded-full \
    dark:bg-blue-900 dark:text-blue-300";

/// Renders the "Extrato Mensal" panel: heading, count badge, search box and
/// the statement table.
///
/// The count badge reflects the whole month; the search box narrows the
/// table below it without touching the badge. The input stays outside the
/// swapped fragment so it keeps focus while the user types.
pub(super) fn statement_panel(
    month_key: &str,
    search: &str,
    month_transactions: &[Transaction],
    visible: &[Transaction],
) -> Markup {
    let search_params = serde_json::json!({ "month": month_key }).to_string();

    html! {
        section class="w-full p-4 bg-white rounded-lg shadow dark:bg-gray-800 space-y-4"
        {
            header class="flex items-center justify-between"
            {
                h2 class="text-lg font-semibold" { "Extrato Mensal" }

                span class=(COUNT_BADGE_STYLE)
                {
                    (month_transactions.len()) " itens"
                }
            }

            input
                type="search"
                name="search"
                value=(search)
                placeholder="Buscar por descrição ou categoria..."
                hx-get=(endpoints::DASHBOARD_VIEW)
                hx-vals=(search_params)
                hx-trigger="input changed delay:300ms, search"
                hx-target="#statement-table"
                hx-swap="outerHTML"
                class=(FORM_TEXT_INPUT_STYLE);

            (statement_table(month_key, !search.trim().is_empty(), visible))
        }
    }
}

/// Renders the swappable statement table fragment.
///
/// `searched` picks the empty-state message: an empty month reads
/// differently from a search that matched nothing.
pub(super) fn statement_table(month_key: &str, searched: bool, visible: &[Transaction]) -> Markup {
    html! {
        div id="statement-table" class="overflow-x-auto"
        {
            @if visible.is_empty() {
                p class="py-8 text-center text-gray-500 dark:text-gray-400"
                {
                    @if searched {
                        "Nenhuma transação encontrada com esses termos."
                    } @else {
                        "Nenhum registro para este mês."
                    }
                }
            } @else {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Data" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Descrição" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Categoria" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Valor" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "" }
                        }
                    }

                    tbody
                    {
                        @for transaction in visible {
                            (statement_row(month_key, transaction))
                        }
                    }
                }
            }
        }
    }
}

fn statement_row(month_key: &str, transaction: &Transaction) -> Markup {
    let delete_url = format!(
        "{}?month={month_key}",
        endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id)
    );

    let (sign, color) = match transaction.kind {
        TransactionKind::Income => ("+", TABLE_CELL_GREEN_STYLE),
        TransactionKind::Expense => ("-", TABLE_CELL_RED_STYLE),
    };

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"}
            {
                (format_date(&transaction.date))
            }

            td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (transaction.description)
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }

            td class={(TABLE_CELL_STYLE) " whitespace-nowrap font-medium " (color)}
            {
                (sign) (format_currency(transaction.amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target-error="#alert-container"
                {
                    "Excluir"
                }
            }
        }
    }
}
