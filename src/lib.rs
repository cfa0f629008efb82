//! Finanza is a small self-hosted web app for tracking personal income and
//! expenses month by month.
//!
//! The server serves HTML pages directly (axum + maud + HTMX). Transactions
//! and categories live in a key-value store backed by SQLite, and an optional
//! AI engine can be plugged in to produce a natural-language reading of the
//! current month.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod insight;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod storage;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use app_state::AppState;
pub use category::CategorySet;
pub use db::initialize as initialize_db;
pub use insight::{FinancialInsight, InsightGenerator, InsightStatus, OfflineGenerator};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use storage::{SqliteStorage, StoragePort};
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionStore};

use crate::{
    alert::Alert, internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a transaction description.
    #[error("the transaction description cannot be empty")]
    EmptyDescription,

    /// The amount field could not be parsed as a strictly positive number.
    ///
    /// The offending input is carried so callers can log it. The sign of a
    /// transaction is carried by its kind, so negative and zero amounts are
    /// rejected here.
    #[error("\"{0}\" is not a valid positive amount")]
    InvalidAmount(String),

    /// The category used to create a transaction is not in the category set.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A string could not be parsed as a `YYYY-MM` month key.
    #[error("could not parse \"{0}\" as a year-month key")]
    InvalidMonthKey(String),

    /// The external insight engine could not be reached or refused the
    /// request. The caller is expected to fall back to the canned insight.
    #[error("the insight engine request failed: {0}")]
    InsightEngine(String),

    /// The insight engine answered with a payload that does not match the
    /// declared response shape.
    #[error("the insight engine returned a malformed response: {0}")]
    MalformedInsight(String),

    /// An insight request is already in flight; only one may run at a time.
    #[error("an insight analysis is already running")]
    AnalysisInFlight,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created. Internally, this error may occur when a query returns no
    /// rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A stored value could not be parsed back into its collection.
    ///
    /// Carries the storage key and the parse error. Start-up fails on this
    /// rather than silently replacing the stored data.
    #[error("could not parse the stored value for \"{0}\": {1}")]
    CorruptData(String, String),

    /// An error occurred while serializing a collection as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),

    /// Could not acquire the database connection lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// Could not acquire the lock on an in-memory store.
    #[error("could not acquire the store lock")]
    StoreLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error()
            }
        }
    }
}

impl Error {
    /// Render the error as an HTMX alert fragment.
    ///
    /// Intended for endpoints whose triggering elements declare an error
    /// target (see the response-targets extension wiring in the base
    /// layout), so the message lands in the alert container instead of
    /// replacing the triggering element.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyDescription => Alert::error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Dados inválidos",
                "A descrição não pode ficar vazia.",
            ),
            Error::InvalidAmount(_) => Alert::error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Valor inválido",
                "Informe um valor numérico maior que zero.",
            ),
            Error::UnknownCategory(category) => Alert::error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Categoria desconhecida",
                &format!("\"{category}\" não está entre as suas categorias."),
            ),
            Error::EmptyCategoryName => Alert::error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Categoria inválida",
                "O nome da categoria não pode ficar vazio.",
            ),
            Error::AnalysisInFlight => Alert::error(
                StatusCode::CONFLICT,
                "Análise em andamento",
                "Aguarde a análise atual terminar antes de pedir outra.",
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Algo deu errado",
                    "Ocorreu um erro inesperado. Verifique os logs do servidor.",
                )
            }
        }
    }
}
