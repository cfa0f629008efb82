//! Category deletion endpoint.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{AppState, category::CategorySet, endpoints};

/// The state needed for deleting a category.
#[derive(Clone)]
pub struct DeleteCategoryState {
    /// The category set to remove the label from.
    pub category_set: Arc<CategorySet>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_set: state.category_set.clone(),
        }
    }
}

/// The query parameters for deleting a category.
///
/// The label is addressed by name in the query string since labels may
/// contain slashes.
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryQuery {
    /// The label to remove.
    pub name: String,
}

/// Handle category deletion.
///
/// Removing a missing label, or the last remaining one, is a no-op. The
/// client is sent back to the categories page either way.
pub async fn delete_category_endpoint(
    State(state): State<DeleteCategoryState>,
    Query(query): Query<DeleteCategoryQuery>,
) -> Response {
    match state.category_set.remove(&query.name) {
        Ok(()) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category \"{}\": {error}",
                query.name
            );

            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use std::sync::Arc;

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };

    use crate::{
        category::{
            CategoryName, CategorySet,
            delete_category_endpoint::{
                DeleteCategoryQuery, DeleteCategoryState, delete_category_endpoint,
            },
        },
        endpoints,
        storage::StoragePort,
        test_utils::{MemoryStorage, assert_hx_redirect},
    };

    fn get_test_state() -> DeleteCategoryState {
        let storage: Arc<dyn StoragePort> = Arc::new(MemoryStorage::new());
        let category_set =
            Arc::new(CategorySet::load(storage).expect("Could not load category set"));

        DeleteCategoryState { category_set }
    }

    #[tokio::test]
    async fn deletes_category_and_redirects() {
        let state = get_test_state();

        let response = delete_category_endpoint(
            State(state.clone()),
            Query(DeleteCategoryQuery {
                name: "Lazer".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
        assert!(
            !state
                .category_set
                .contains("Lazer")
                .expect("Could not check category")
        );
    }

    #[tokio::test]
    async fn deleting_missing_category_still_redirects() {
        let state = get_test_state();
        let count_before = state
            .category_set
            .all()
            .expect("Could not list categories")
            .len();

        let response = delete_category_endpoint(
            State(state.clone()),
            Query(DeleteCategoryQuery {
                name: "Viagens".to_owned(),
            }),
        )
        .await;

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
    async fn last_category_is_kept() {
        let state = get_test_state();
        let labels = state
            .category_set
            .all()
            .expect("Could not list categories");
        for label in &labels[1..] {
            state
                .category_set
                .remove(label)
                .expect("Could not remove category");
        }

        let response = delete_category_endpoint(
            State(state.clone()),
            Query(DeleteCategoryQuery {
                name: labels[0].clone(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            state
                .category_set
                .all()
                .expect("Could not list categories"),
            vec![labels[0].clone()]
        );
    }

    #[tokio::test]
    async fn added_category_can_be_deleted() {
        let state = get_test_state();
        state
            .category_set
            .add(CategoryName::new_unchecked("Educação"))
            .expect("Could not add category");

        let response = delete_category_endpoint(
            State(state.clone()),
            Query(DeleteCategoryQuery {
                name: "Educação".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(
            !state
                .category_set
                .contains("Educação")
                .expect("Could not check category")
        );
    }
}
