//! Evidence items and their source metadata

use crate::credibility::{calculate_evidence_confidence, EvidenceConfidence};
use crate::criteria::CriterionResponse;
use crate::id::uuid_id;

uuid_id!(
    /// Unique identifier for an evidence item
    EvidenceId
);

/// Where an evidence item came from
///
/// All fields are optional; an empty record means the item carries no
/// attribution at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMetadata {
    /// Origin label (e.g. "HUMINT", "press", "court filing")
    pub origin: Option<String>,
    /// Publication or outlet
    pub publication: Option<String>,
    /// Publication or observation date, ISO 8601
    pub date: Option<String>,
    /// Author or speaker
    pub author: Option<String>,
    /// Link to the original
    pub url: Option<String>,
}

impl SourceMetadata {
    /// Whether any attribution field is present
    pub fn has_attribution(&self) -> bool {
        [&self.origin, &self.publication, &self.author, &self.url]
            .iter()
            .any(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// One piece of evidence in an analysis session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    /// Unique identifier
    pub id: EvidenceId,

    /// Evidence text as collected
    pub text: String,

    /// Source attribution
    pub source: SourceMetadata,

    /// SATS evaluation, if one has been made
    pub criteria: Option<CriterionResponse>,
}

impl Evidence {
    /// Create an unevaluated evidence item with a fresh identifier
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(EvidenceId::new(), text)
    }

    /// Create an unevaluated evidence item with a known identifier
    pub fn with_id(id: EvidenceId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            source: SourceMetadata::default(),
            criteria: None,
        }
    }

    /// Attach source metadata
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = source;
        self
    }

    /// Attach a SATS evaluation
    pub fn with_criteria(mut self, criteria: CriterionResponse) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Derived credibility, or `None` if the item was never evaluated
    pub fn credibility(&self) -> Option<EvidenceConfidence> {
        self.criteria.as_ref().map(calculate_evidence_confidence)
    }
}
