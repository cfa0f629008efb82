//! Authentication middleware that checks the logged-in flag and handles redirects.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    endpoints,
    storage::{AUTH_KEY, StoragePort},
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The store holding the logged-in flag.
    pub storage: Arc<dyn StoragePort>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
        }
    }
}

/// Whether the logged-in flag is set.
///
/// A flag that cannot be read counts as logged out, so a broken store locks
/// the app rather than opening it.
pub(crate) fn is_logged_in(storage: &dyn StoragePort) -> bool {
    matches!(storage.read(AUTH_KEY), Ok(Some(flag)) if flag == "true")
}

/// Middleware function that checks for the logged-in flag.
/// The request is executed normally if the flag is set, otherwise a redirect
/// to the log-in page is returned using `get_redirect`.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn() -> Response,
) -> Response {
    if !is_logged_in(state.storage.as_ref()) {
        return get_redirect();
    }

    next.run(request).await
}

/// Middleware function that checks for the logged-in flag.
/// The request is executed normally if the flag is set, otherwise a redirect
/// to the log-in page is returned.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, || {
        Redirect::to(endpoints::LOG_IN_VIEW).into_response()
    })
    .await
}

/// Middleware function that checks for the logged-in flag.
/// The request is executed normally if the flag is set, otherwise a HTMX
/// redirect to the log-in page is returned.
///
/// HTMX ignores the `Location` header on AJAX responses, so API routes
/// answer with the `HX-Redirect` header instead.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, || {
        (HxRedirect(endpoints::LOG_IN_VIEW.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
