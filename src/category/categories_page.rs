//! Categories listing page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    category::CategorySet,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base,
    },
    navigation::NavBar,
};

/// The state needed for the categories page.
#[derive(Clone)]
pub struct CategoriesPageState {
    /// The categories to list.
    pub category_set: Arc<CategorySet>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_set: state.category_set.clone(),
        }
    }
}

/// Render the categories page.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let categories = state
        .category_set
        .all()
        .inspect_err(|error| tracing::error!("Could not list categories: {error}"))?;

    Ok(categories_view(&categories).into_response())
}

fn categories_view(categories: &[String]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-6 max-w-2xl mx-auto"
            {
                h1 class="text-xl font-bold" { "Suas Categorias" }

                div class="flex flex-wrap gap-2"
                {
                    @for category in categories {
                        (category_chip(category))
                    }
                }

                form
                    hx-post=(endpoints::CATEGORIES_API)
                    hx-target-error="#alert-container"
                    class="flex items-center gap-2"
                {
                    div class="flex-1"
                    {
                        input
                            name="name"
                            type="text"
                            placeholder="Nova categoria..."
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div class="w-32"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Adicionar" }
                    }
                }
            }
        }
    );

    base("Categorias", &[], &content)
}

fn category_chip(category: &str) -> Markup {
    // The name rides in hx-vals so slashes and accents survive the round trip.
    let delete_params = serde_json::json!({ "name": category }).to_string();
    let confirm_message = format!("Remover a categoria \"{category}\"?");

    html!(
        span class=(CATEGORY_BADGE_STYLE)
        {
            (category)

            button
                type="button"
                class="ml-1.5 font-bold hover:text-red-600"
                hx-delete=(endpoints::CATEGORIES_API)
                hx-vals=(delete_params)
                hx-confirm=(confirm_message)
                hx-target-error="#alert-container"
            {
                "✕"
            }
        }
    )
}
