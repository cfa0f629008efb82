//! Pure transaction aggregation for the dashboard.
//!
//! Provides the month filter, the search filter for the statement table and
//! the totals/by-category summary that feeds the cards and charts. All
//! arithmetic stays in `f64` with no rounding; rounding happens only at
//! display formatting.

use crate::transaction::{Transaction, TransactionKind};

/// The expense total for one category label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryExpense {
    /// The category label.
    pub category: String,
    /// Sum of the expense amounts filed under the label.
    pub total: f64,
}

/// The aggregated view of one month's transactions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthSummary {
    /// Sum of income amounts.
    pub income: f64,
    /// Sum of expense amounts.
    pub expense: f64,
    /// `income - expense`. May be negative.
    pub balance: f64,
    /// Expenses grouped per category, in order of first occurrence in the
    /// input. This ordering is user-visible in the chart legend.
    pub by_category: Vec<CategoryExpense>,
}

/// Selects the transactions whose date falls in `month_key`.
///
/// This is a plain string-prefix match on the `YYYY-MM-DD` date against the
/// `YYYY-MM` key, not calendar parsing. Malformed dates that happen to share
/// the prefix still match. Input order is preserved.
pub fn filter_by_month(transactions: &[Transaction], month_key: &str) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.date.starts_with(month_key))
        .cloned()
        .collect()
}

/// Selects the transactions whose description or category contains `query`,
/// case-insensitively.
///
/// An empty query matches everything. Input order is preserved.
pub fn filter_by_search(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let query = query.to_lowercase();

    transactions
        .iter()
        .filter(|transaction| {
            transaction.description.to_lowercase().contains(&query)
                || transaction.category.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Totals `transactions` into income, expense, balance and the per-category
/// expense split.
///
/// Categories are emitted in order of first occurrence, never sorted. An
/// empty input yields all-zero totals and an empty split.
pub fn aggregate(transactions: &[Transaction]) -> MonthSummary {
    let mut summary = MonthSummary::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => summary.income += transaction.amount,
            TransactionKind::Expense => {
                summary.expense += transaction.amount;

                match summary
                    .by_category
                    .iter_mut()
                    .find(|group| group.category == transaction.category)
                {
                    Some(group) => group.total += transaction.amount,
                    None => summary.by_category.push(CategoryExpense {
                        category: transaction.category.clone(),
                        total: transaction.amount,
                    }),
                }
            }
        }
    }

    summary.balance = summary.income - summary.expense;

    summary
}
