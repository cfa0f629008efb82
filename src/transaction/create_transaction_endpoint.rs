//! The endpoint for recording a transaction from the dashboard entry form.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    category::CategorySet,
    dashboard::{current_month_key, default_transaction_date, parse_month_key},
    endpoints,
    transaction::{NewTransaction, TransactionKind, TransactionStore},
};

/// The state needed for recording a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The ledger to record the transaction in.
    pub transaction_store: Arc<TransactionStore>,
    /// The categories a transaction may be filed under.
    pub category_set: Arc<CategorySet>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            category_set: state.category_set.clone(),
        }
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionFormData {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount as typed, with either a dot or a comma as the decimal
    /// separator.
    pub amount: String,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// The category label to file the transaction under.
    pub category: String,
    /// The month key of the dashboard the form was submitted from.
    pub month: String,
}

/// Handle the dashboard entry form submission.
///
/// Validates the submission, records the transaction and redirects back to
/// the dashboard for the month the form was submitted from. Validation
/// failures are answered with an alert fragment and leave the ledger alone.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let month_key = match parse_month_key(&form.month) {
        Ok(_) => form.month.clone(),
        Err(_) => current_month_key(),
    };

    let draft = match build_draft(&form, &month_key, &state.category_set) {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    match state.transaction_store.add(draft) {
        Ok(_) => (
            HxRedirect(format!("{}?month={month_key}", endpoints::DASHBOARD_VIEW)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while recording a transaction: {error}");

            error.into_alert_response()
        }
    }
}

fn build_draft(
    form: &TransactionFormData,
    month_key: &str,
    categories: &CategorySet,
) -> Result<NewTransaction, Error> {
    let description = form.description.trim();

    if description.is_empty() {
        return Err(Error::EmptyDescription);
    }

    let amount = parse_amount(&form.amount)?;

    if !categories.contains(&form.category)? {
        return Err(Error::UnknownCategory(form.category.clone()));
    }

    let date = default_transaction_date(month_key, OffsetDateTime::now_utc().date());

    Ok(NewTransaction {
        description: description.to_owned(),
        amount,
        kind: form.kind,
        category: form.category.clone(),
        date,
    })
}

/// Parse a form amount, accepting a comma as the decimal separator.
///
/// The whole string must be a number: amounts with thousands separators such
/// as "1.234,56" are rejected rather than silently truncated.
fn parse_amount(raw: &str) -> Result<f64, Error> {
    let normalized = raw.trim().replacen(',', ".", 1);

    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(raw.to_owned())),
    }
}

#[cfg(test)]
mod parse_amount_tests {
    use super::parse_amount;
    use crate::Error;

    #[test]
    fn accepts_dot_and_comma_decimals() {
        assert_eq!(parse_amount("49.90"), Ok(49.90));
        assert_eq!(parse_amount("49,90"), Ok(49.90));
        assert_eq!(parse_amount(" 1200 "), Ok(1200.0));
    }

    #[test]
    fn rejects_non_positive_and_malformed_amounts() {
        for raw in ["", "abc", "0", "0,00", "-5", "1.234,56", "NaN", "inf"] {
            assert_eq!(
                parse_amount(raw),
                Err(Error::InvalidAmount(raw.to_owned())),
                "want {raw:?} to be rejected"
            );
        }
    }
}

#[cfg(test)]
mod transaction_form_data_tests {
    use super::TransactionFormData;
    use crate::transaction::TransactionKind;

    #[test]
    fn parses_url_encoded_form() {
        let form: TransactionFormData = serde_html_form::from_str(
            "description=Conta+de+Luz&amount=180%2C00&kind=expense&category=%C3%81gua%2FLuz%2FG%C3%A1s&month=2024-05",
        )
        .expect("Could not parse form data");

        assert_eq!(form.description, "Conta de Luz");
        assert_eq!(form.amount, "180,00");
        assert_eq!(form.kind, TransactionKind::Expense);
        assert_eq!(form.category, "Água/Luz/Gás");
        assert_eq!(form.month, "2024-05");
    }
}
