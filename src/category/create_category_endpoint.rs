//! Category creation endpoint.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    category::{CategoryName, CategorySet, domain::CategoryFormData},
    endpoints,
};

/// The state needed for creating a category.
#[derive(Clone)]
pub struct CreateCategoryState {
    /// The category set to add the new label to.
    pub category_set: Arc<CategorySet>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_set: state.category_set.clone(),
        }
    }
}

/// Handle category creation form submission.
///
/// Adding a label that already exists is a no-op; either way the client is
/// sent back to the categories page, which shows the current set.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    match state.category_set.add(name) {
        Ok(()) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::Arc;

    use axum::{Form, extract::State, http::StatusCode};

    use crate::{
        category::{
            CategorySet,
            create_category_endpoint::{CreateCategoryState, create_category_endpoint},
            domain::CategoryFormData,
        },
        endpoints,
        storage::StoragePort,
        test_utils::{MemoryStorage, assert_hx_redirect},
    };

    fn get_test_state() -> CreateCategoryState {
        let storage: Arc<dyn StoragePort> = Arc::new(MemoryStorage::new());
        let category_set =
            Arc::new(CategorySet::load(storage).expect("Could not load category set"));

        CreateCategoryState { category_set }
    }

    #[tokio::test]
    async fn creates_category_and_redirects() {
        let state = get_test_state();
        let form = CategoryFormData {
            name: "Educação".to_owned(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
        assert!(
            state
                .category_set
                .contains("Educação")
                .expect("Could not check category")
        );
    }

    #[tokio::test]
    async fn duplicate_category_still_redirects() {
        let state = get_test_state();
        let count_before = state
            .category_set
            .all()
            .expect("Could not list categories")
            .len();
        let form = CategoryFormData {
            name: "Mercado".to_owned(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            state
                .category_set
                .all()
                .expect("Could not list categories")
                .len(),
            count_before
        );
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let state = get_test_state();
        let count_before = state
            .category_set
            .all()
            .expect("Could not list categories")
            .len();
        let form = CategoryFormData {
            name: "   ".to_owned(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            state
                .category_set
                .all()
                .expect("Could not list categories")
                .len(),
            count_before
        );
    }
}
