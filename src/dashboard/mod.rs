//! Dashboard module
//!
//! Provides the month view: summary cards, the entry form, the statement
//! table with live search, charts and the AI analysis panel.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod month;
mod tables;

pub use aggregation::{MonthSummary, aggregate, filter_by_month};
pub use handlers::get_dashboard_page;
pub use month::{current_month_key, default_transaction_date, parse_month_key};
