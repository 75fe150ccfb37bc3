//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Trait for the text-understanding service behind the automated evaluator
///
/// Implemented by the infrastructure layer (ach-llm). Each call is a single
/// request; callers bound it with their own timeout and never retry.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a text completion
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Generate a completion constrained to JSON matching `schema`
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Minimal round trip to check whether the service is reachable
    fn is_available(&self) -> impl Future<Output = bool> + Send;
}
