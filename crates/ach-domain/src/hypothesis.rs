//! Hypothesis module - the competing explanations under analysis

use crate::id::uuid_id;

uuid_id!(
    /// Unique identifier for a hypothesis
    HypothesisId
);

/// A hypothesis entered by the analyst
///
/// Only the text may change once consistency scores reference the hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    /// Unique identifier
    pub id: HypothesisId,

    /// Statement of the hypothesis
    pub text: String,
}

impl Hypothesis {
    /// Create a hypothesis with a freshly generated identifier
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(HypothesisId::new(), text)
    }

    /// Create a hypothesis with a known identifier
    pub fn with_id(id: HypothesisId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
