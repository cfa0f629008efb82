//! The insight data model and the engine's prompt/response contract.
//!
//! The engine is asked for a single JSON object per month. The request side
//! embeds a lossy digest of the month's transactions in a fixed Portuguese
//! prompt; the response side is parsed strictly, so a payload missing a
//! field or carrying an unknown status never reaches a view half-built.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{Transaction, TransactionKind},
};

/// The engine's overall reading of the month's financial health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightStatus {
    /// Finances look healthy.
    Good,
    /// Something deserves attention.
    Warning,
    /// Spending is out of balance.
    Critical,
}

/// A natural-language reading of one month's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    /// Diagnosis of the month, a short paragraph.
    pub summary: String,
    /// Practical tips based on the data.
    pub tips: Vec<String>,
    /// Expected tendency for the next month.
    pub prediction: String,
    /// Overall health assessment, drives the panel tint.
    pub status: InsightStatus,
}

impl FinancialInsight {
    /// The canned insight shown whenever the engine cannot be reached or
    /// answers with a malformed payload.
    pub fn fallback() -> Self {
        Self {
            summary: "Não foi possível conectar ao motor de IA no momento. Analise seus dados \
                      manualmente."
                .to_owned(),
            tips: vec![
                "Verifique suas maiores despesas".to_owned(),
                "Tente economizar 10% do salário".to_owned(),
                "Mantenha seus registros atualizados".to_owned(),
            ],
            prediction: "Tendência estável baseada no histórico recente.".to_owned(),
            status: InsightStatus::Warning,
        }
    }
}

/// One transaction as the engine sees it: the ID is dropped and the field
/// names are shortened to keep the prompt small.
#[derive(Serialize)]
struct DigestEntry<'a> {
    desc: &'a str,
    val: f64,
    #[serde(rename = "type")]
    kind: TransactionKind,
    cat: &'a str,
    date: &'a str,
}

/// Serialize the month's transactions into the digest JSON embedded in the
/// prompt.
pub(crate) fn build_digest(transactions: &[Transaction]) -> Result<String, Error> {
    let entries: Vec<DigestEntry> = transactions
        .iter()
        .map(|transaction| DigestEntry {
            desc: &transaction.description,
            val: transaction.amount,
            kind: transaction.kind,
            cat: &transaction.category,
            date: &transaction.date,
        })
        .collect();

    serde_json::to_string(&entries).map_err(|error| Error::JsonSerialization(error.to_string()))
}

/// Build the full prompt for one month's analysis.
pub(crate) fn build_prompt(transactions: &[Transaction], month_key: &str) -> Result<String, Error> {
    let digest = build_digest(transactions)?;

    Ok(format!(
        "Analise as seguintes transações financeiras de Andressa para o mês {month_key}:\n\
         {digest}\n\
         \n\
         Forneça um insight financeiro profissional em Português do Brasil no formato JSON.\n\
         Avalie o equilíbrio entre receitas e despesas.\n\
         Identifique a categoria com maior gasto.\n\
         Dê 3 dicas práticas baseadas nos dados.\n\
         Preveja a tendência para o próximo mês."
    ))
}

/// Parse an engine response against the declared shape.
///
/// # Errors
/// Returns [Error::MalformedInsight] if `raw` is not JSON or does not carry
/// all four fields with the right types.
pub(crate) fn parse_insight(raw: &str) -> Result<FinancialInsight, Error> {
    serde_json::from_str(raw).map_err(|error| Error::MalformedInsight(error.to_string()))
}
