//! Orchestration of analysis requests.
//!
//! One analysis may run at a time; a busy flag rejects re-triggering while a
//! request is in flight. There is no timeout, no cancellation and no retry,
//! and engine failures never surface to the caller: they are logged and
//! replaced by the fallback insight.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    Error,
    insight::{
        FinancialInsight,
        core::{build_prompt, parse_insight},
        generator::InsightGenerator,
    },
    transaction::Transaction,
};

/// Runs the analysis engine and remembers the most recent result.
///
/// The remembered insight is session state, like the stores, but it is not
/// persisted: a fresh process starts with no insight, which matches the
/// original behaviour.
pub struct InsightService {
    generator: Box<dyn InsightGenerator>,
    busy: AtomicBool,
    latest: Mutex<Option<FinancialInsight>>,
}

impl InsightService {
    /// Create a service around `generator`.
    pub fn new(generator: Box<dyn InsightGenerator>) -> Self {
        Self {
            generator,
            busy: AtomicBool::new(false),
            latest: Mutex::new(None),
        }
    }

    /// Analyze `transactions` for `month_key` and remember the result.
    ///
    /// # Errors
    /// Returns [Error::AnalysisInFlight] if another analysis is already
    /// running. Engine errors do not propagate; they yield the fallback
    /// insight instead.
    pub async fn analyze(
        &self,
        transactions: &[Transaction],
        month_key: &str,
    ) -> Result<FinancialInsight, Error> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::AnalysisInFlight);
        }

        let insight = self.run_engine(transactions, month_key).await;
        self.busy.store(false, Ordering::SeqCst);

        let mut latest = self.latest.lock().map_err(|_| Error::StoreLock)?;
        *latest = Some(insight.clone());

        Ok(insight)
    }

    /// The most recently produced insight, if any.
    pub fn latest(&self) -> Result<Option<FinancialInsight>, Error> {
        let latest = self.latest.lock().map_err(|_| Error::StoreLock)?;

        Ok(latest.clone())
    }

    async fn run_engine(&self, transactions: &[Transaction], month_key: &str) -> FinancialInsight {
        let outcome = match build_prompt(transactions, month_key) {
            Ok(prompt) => match self.generator.request_analysis(&prompt).await {
                Ok(raw) => parse_insight(&raw),
                Err(error) => Err(error),
            },
            Err(error) => Err(error),
        };

        outcome.unwrap_or_else(|error| {
            tracing::warn!("falling back to the canned insight for {month_key}: {error}");
            FinancialInsight::fallback()
        })
    }
}
