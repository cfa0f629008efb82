use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Não Encontrado",
                "404",
                "Página não encontrada.",
                "Confira o endereço ou volte ao início.",
            )
            .into_string(),
        ),
    )
        .into_response()
}
