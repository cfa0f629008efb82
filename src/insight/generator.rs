//! The pluggable seam for the external analysis engine.

use async_trait::async_trait;

use crate::Error;

/// A text-completion engine that can answer the analysis prompt.
///
/// The transport is injected at startup and is deliberately thin: it takes
/// the finished prompt and hands back raw response text. Building the prompt
/// and validating the response shape both stay on this side of the seam, so
/// every engine is held to the same contract.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Send `prompt` to the engine and return its raw response text.
    ///
    /// # Errors
    /// Returns [Error::InsightEngine] when the engine cannot be reached or
    /// refuses the request. Callers substitute the fallback insight on any
    /// error.
    async fn request_analysis(&self, prompt: &str) -> Result<String, Error>;
}

/// The engine used when no external service is configured.
///
/// Every request fails, which downstream turns into the canned fallback
/// insight. This keeps the analysis feature usable offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl InsightGenerator for OfflineGenerator {
    async fn request_analysis(&self, _prompt: &str) -> Result<String, Error> {
        Err(Error::InsightEngine(
            "no analysis engine is configured".to_owned(),
        ))
    }
}

#[cfg(test)]
mod offline_generator_tests {
    use crate::Error;

    use super::{InsightGenerator, OfflineGenerator};

    #[tokio::test]
    async fn offline_generator_always_fails() {
        let generator = OfflineGenerator;

        let result = generator.request_analysis("any prompt").await;

        assert!(matches!(result, Err(Error::InsightEngine(_))));
    }
}
