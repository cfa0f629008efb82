//! Floating alerts for surfacing request errors to the user.
//!
//! Forms declare `hx-target-error="#alert-container"` so that non-2xx
//! responses swap one of these fragments into the alert container at the
//! bottom of the page instead of clobbering the form that sent the request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

/// A dismissible alert fragment rendered into `#alert-container`.
pub struct Alert;

impl Alert {
    /// Render an error alert as an HTML response with `status_code`.
    pub fn error(status_code: StatusCode, title: &str, message: &str) -> Response {
        (status_code, alert_view(title, message)).into_response()
    }
}

fn alert_view(title: &str, message: &str) -> Markup {
    html! {
        div
            class="flex items-start gap-3 p-4 text-sm text-red-800 border border-red-300 rounded-lg bg-red-50 shadow-lg"
            role="alert"
        {
            div class="flex-1" {
                p class="font-semibold" { (title) }
                p { (message) }
            }

            button
                type="button"
                class="font-bold text-red-500 hover:text-red-700"
                onclick="document.getElementById('alert-container').classList.add('hidden')"
            {
                "✕"
            }
        }

        // The container starts out hidden so an empty box never casts a shadow.
        script {
            (PreEscaped("document.getElementById('alert-container').classList.remove('hidden');"))
        }
    }
}
