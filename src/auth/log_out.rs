//! Route handler for logging out.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{auth::middleware::AuthState, endpoints, storage::AUTH_KEY};

/// Clears the logged-in flag and sends the client back to the log-in page.
pub async fn get_log_out(State(state): State<AuthState>) -> Response {
    if let Err(error) = state.storage.remove(AUTH_KEY) {
        tracing::error!("An unexpected error occurred while logging out: {error}");

        return error.into_response();
    }

    Redirect::to(endpoints::LOG_IN_VIEW).into_response()
}
