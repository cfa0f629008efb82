//! The endpoint for deleting a transaction from the statement table.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState,
    dashboard::{current_month_key, parse_month_key},
    endpoints,
    transaction::{TransactionId, TransactionStore},
};

/// The state needed for deleting a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The ledger to delete the transaction from.
    pub transaction_store: Arc<TransactionStore>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The query parameters for deleting a transaction.
#[derive(Debug, Deserialize)]
pub struct DeleteTransactionQuery {
    /// The month key of the dashboard the row was deleted from.
    pub month: Option<String>,
}

/// Delete a transaction and send the client back to the dashboard.
///
/// The redirect refreshes the summary cards and charts along with the table.
/// Deleting an ID that is no longer present still redirects, since the
/// refreshed dashboard already shows the row gone.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<DeleteTransactionQuery>,
) -> Response {
    let month_key = query
        .month
        .filter(|month| parse_month_key(month).is_ok())
        .unwrap_or_else(current_month_key);

    match state.transaction_store.remove(transaction_id) {
        Ok(()) => (
            HxRedirect(format!("{}?month={month_key}", endpoints::DASHBOARD_VIEW)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");

            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };

    use crate::{
        storage::StoragePort,
        test_utils::{MemoryStorage, assert_hx_redirect},
        transaction::{
            NewTransaction, TransactionKind, TransactionStore,
            delete_transaction_endpoint::{
                DeleteTransactionQuery, DeleteTransactionState, delete_transaction_endpoint,
            },
        },
    };

    fn get_test_state() -> DeleteTransactionState {
        let storage: Arc<dyn StoragePort> = Arc::new(MemoryStorage::new());
        let transaction_store = Arc::new(
            TransactionStore::load(storage).expect("Could not load transaction store"),
        );

        DeleteTransactionState { transaction_store }
    }

    fn get_draft() -> NewTransaction {
        NewTransaction {
            description: "Compras do Mês".to_owned(),
            amount: 950.0,
            kind: TransactionKind::Expense,
            category: "Mercado".to_owned(),
            date: "2024-05-12".to_owned(),
        }
    }

    #[tokio::test]
    async fn deletes_transaction_and_redirects_to_month() {
        let state = get_test_state();
        let transaction = state
            .transaction_store
            .add(get_draft())
            .expect("Could not record transaction");

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Path(transaction.id),
            Query(DeleteTransactionQuery {
                month: Some("2024-05".to_owned()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/dashboard?month=2024-05");
        assert!(
            state
                .transaction_store
                .all()
                .expect("Could not list transactions")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn deleting_missing_transaction_still_redirects() {
        let state = get_test_state();

        let response = delete_transaction_endpoint(
            State(state),
            Path(42),
            Query(DeleteTransactionQuery {
                month: Some("2024-05".to_owned()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/dashboard?month=2024-05");
    }

    #[tokio::test]
    async fn missing_month_defaults_to_current() {
        let state = get_test_state();

        let response = delete_transaction_endpoint(
            State(state),
            Path(1),
            Query(DeleteTransactionQuery { month: None }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let current = crate::dashboard::current_month_key();
        assert_hx_redirect(&response, &format!("/dashboard?month={current}"));
    }
}
