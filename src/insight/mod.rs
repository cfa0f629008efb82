//! The AI reading of a month's finances.
//!
//! This module contains everything related to insights:
//! - The `FinancialInsight` model and the engine prompt/response contract
//! - The `InsightGenerator` seam and the offline default engine
//! - The `InsightService` that runs one analysis at a time
//! - The dashboard panel and the endpoint behind its button

mod core;
mod generator;
mod panel;
mod request_insight_endpoint;
mod service;

pub use core::{FinancialInsight, InsightStatus};
pub use generator::{InsightGenerator, OfflineGenerator};
pub use panel::insight_panel;
pub use request_insight_endpoint::{InsightState, request_insight_endpoint};
pub use service::InsightService;
