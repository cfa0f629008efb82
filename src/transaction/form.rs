use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// Render the entry form for recording a transaction in the month `month_key`.
///
/// The form only asks for the fields the user actually thinks about. The
/// transaction date is filled in server side, and the hidden month input keeps
/// the submission tied to the month being viewed.
pub fn new_transaction_form(month_key: &str, categories: &[String]) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            input type="hidden" name="month" value=(month_key);

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Descrição" }

                input
                    id="description"
                    name="description"
                    type="text"
                    placeholder="Ex: Aluguel"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Valor (R$)" }

                // Text rather than number so "49,90" passes browser validation.
                input
                    id="amount"
                    name="amount"
                    type="text"
                    inputmode="decimal"
                    placeholder="0,00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Categoria e Fluxo" }

                div class="grid grid-cols-2 gap-4"
                {
                    select
                        id="category"
                        name="category"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in categories {
                            option value=(category) { (category) }
                        }
                    }

                    select
                        id="kind"
                        name="kind"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="expense" selected { "Saída" }
                        option value="income" { "Entrada" }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Lançar Dados" }
        }
    }
}

#[cfg(test)]
mod new_transaction_form_tests {
    use scraper::{Html, Selector};

    use super::new_transaction_form;
    use crate::endpoints;

    fn render_form(month_key: &str, categories: &[String]) -> Html {
        let markup = new_transaction_form(month_key, categories);
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn form_posts_to_transactions_api() {
        let html = render_form("2024-05", &["Mercado".to_string()]);

        let selector = Selector::parse("form").unwrap();
        let form = html.select(&selector).next().expect("Could not find form");
        assert_eq!(
            form.value().attr("hx-post"),
            Some(endpoints::TRANSACTIONS_API)
        );
    }

    #[test]
    fn form_carries_month_in_hidden_input() {
        let html = render_form("2024-05", &["Mercado".to_string()]);

        let selector = Selector::parse("input[type=hidden][name=month]").unwrap();
        let input = html
            .select(&selector)
            .next()
            .expect("Could not find hidden month input");
        assert_eq!(input.value().attr("value"), Some("2024-05"));
    }

    #[test]
    fn form_lists_categories_in_order() {
        let categories = vec!["Mercado".to_string(), "Transporte".to_string()];
        let html = render_form("2024-05", &categories);

        let selector = Selector::parse("select[name=category] option").unwrap();
        let options = html
            .select(&selector)
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(options, categories);
    }

    #[test]
    fn expense_is_the_default_flow() {
        let html = render_form("2024-05", &["Mercado".to_string()]);

        let selector = Selector::parse("select[name=kind] option[selected]").unwrap();
        let selected = html
            .select(&selector)
            .next()
            .expect("Could not find selected flow option");
        assert_eq!(selected.value().attr("value"), Some("expense"));
    }
}
