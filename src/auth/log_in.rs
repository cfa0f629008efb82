//! Displays the log-in page and handles the credential check.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::middleware::is_logged_in,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner,
        log_in_panel,
    },
    storage::{AUTH_KEY, StoragePort},
};

/// The only username the credential check accepts, compared after trimming
/// and lowercasing.
const VALID_USERNAME: &str = "andressa";
/// The only password the credential check accepts, compared verbatim.
const VALID_PASSWORD: &str = "123";

pub const ACCESS_DENIED_ERROR_MSG: &str = "Acesso negado. Utilize Andressa / 123.";

fn log_in_form(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#username, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Usuário" }

                input
                    id="username"
                    name="username"
                    type="text"
                    placeholder="Andressa"
                    value=(username)
                    required
                    autofocus
                    tabindex="0"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="password" class=(FORM_LABEL_STYLE) { "Senha" }

                input
                    id="password"
                    name="password"
                    type="password"
                    placeholder="••••••"
                    required
                    tabindex="0"
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(error_message) = error_message {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Entrar na Plataforma"
            }
        }
    }
}

/// The state needed to perform a log-in.
#[derive(Clone)]
pub struct LoginState {
    /// The store holding the logged-in flag.
    pub storage: Arc<dyn StoragePort>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
        }
    }
}

/// Display the log-in page.
///
/// A client that is already logged in is sent straight to the dashboard.
pub async fn get_log_in_page(State(state): State<LoginState>) -> Response {
    if is_logged_in(state.storage.as_ref()) {
        return Redirect::to(endpoints::DASHBOARD_VIEW).into_response();
    }

    let log_in_form = log_in_form("", None);
    let content = log_in_panel(&log_in_form);
    base("Entrar", &[], &content).into_response()
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the logged-in flag is written and the
/// client is redirected to the dashboard page. Otherwise, the form is
/// returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LoginState>,
    Form(user_data): Form<LogInData>,
) -> Response {
    let username_matches = user_data.username.trim().to_lowercase() == VALID_USERNAME;

    if !username_matches || user_data.password != VALID_PASSWORD {
        return log_in_form(&user_data.username, Some(ACCESS_DENIED_ERROR_MSG)).into_response();
    }

    if let Err(error) = state.storage.write(AUTH_KEY, "true") {
        tracing::error!("An unexpected error occurred while writing the logged-in flag: {error}");

        return log_in_form(
            &user_data.username,
            Some("Ocorreu um erro interno. Tente novamente mais tarde."),
        )
        .into_response();
    }

    (
        StatusCode::SEE_OTHER,
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        (),
    )
        .into_response()
}

/// The raw data entered by the user in the log-in form.
///
/// Both fields are compared against the fixed credential pair, so there is
/// no validation here beyond the comparison itself.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Username entered during log-in. Compared case-insensitively.
    pub username: String,

    /// Password entered during log-in. Compared verbatim.
    pub password: String,
}


#[cfg(test)]
mod log_in_tests {
    use std::sync::Arc;

    use axum::{Form, extract::State, http::StatusCode};

    use crate::{
        storage::{AUTH_KEY, StoragePort},
        test_utils::{
            MemoryStorage, assert_form_error_message, assert_hx_redirect, must_get_form,
            parse_html_fragment,
        },
    };

    use super::{ACCESS_DENIED_ERROR_MSG, LogInData, LoginState, post_log_in};

    fn get_test_state() -> LoginState {
        LoginState {
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    fn get_form(username: &str, password: &str) -> Form<LogInData> {
        Form(LogInData {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    #[tokio::test]
    async fn valid_credentials_set_the_flag_and_redirect_to_dashboard() {
        let state = get_test_state();

        let response = post_log_in(State(state.clone()), get_form("Andressa", "123")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/dashboard");
        assert_eq!(
            state
                .storage
                .read(AUTH_KEY)
                .expect("Could not read the logged-in flag"),
            Some("true".to_owned())
        );
    }

    #[tokio::test]
    async fn the_username_is_accepted_regardless_of_case_and_padding() {
        let state = get_test_state();

        let response = post_log_in(State(state), get_form("  ANDRESSA  ", "123")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn a_wrong_password_re_renders_the_form_with_the_denial_message() {
        let state = get_test_state();

        let response = post_log_in(State(state.clone()), get_form("Andressa", "1234")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            state
                .storage
                .read(AUTH_KEY)
                .expect("Could not read the logged-in flag"),
            None,
            "the flag should not be set for a denied log-in"
        );

        let document = parse_html_fragment(response).await;
        let form = must_get_form(&document);
        assert_form_error_message(&form, ACCESS_DENIED_ERROR_MSG);
    }

    #[tokio::test]
    async fn a_wrong_username_keeps_the_typed_value_in_the_form() {
        let state = get_test_state();

        let response = post_log_in(State(state), get_form("Fulano", "123")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_fragment(response).await;
        let form = must_get_form(&document);
        assert_form_error_message(&form, ACCESS_DENIED_ERROR_MSG);

        let input_selector = scraper::Selector::parse("input[name=username]").unwrap();
        let input = document
            .select(&input_selector)
            .next()
            .expect("Could not find username input");
        assert_eq!(input.value().attr("value"), Some("Fulano"));
    }
}
