//! ACH Domain Layer
//!
//! This crate contains the scoring model behind Analysis of Competing
//! Hypotheses. It depends only on `uuid` and defines the value objects,
//! pure scoring functions and trait interfaces that the other crates build on.
//!
//! ## Key Concepts
//!
//! - **Criterion**: one of eight fixed SATS evidence-quality questions
//! - **Credibility**: a weakest-link aggregate of the selected criterion weights
//! - **Consistency score**: how strongly one evidence item supports or
//!   contradicts one hypothesis
//! - **Hypothesis analysis**: credibility-weighted ranking of all hypotheses
//! - **Improvement plan**: which criteria to strengthen next
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O and no logging
//! - The automated evaluator service sits behind [`traits::LlmProvider`]
//! - Every derived value is recomputed from its inputs, nothing is cached
//!
//! # Examples
//!
//! ```
//! use ach_domain::{calculate_evidence_confidence, ConfidenceLevel, CriterionId, CriterionResponse};
//!
//! let mut response = CriterionResponse::new();
//! response.insert(CriterionId::SourceType, 13).unwrap();
//! response.insert(CriterionId::Corroboration, 8).unwrap();
//!
//! let confidence = calculate_evidence_confidence(&response);
//! assert_eq!(confidence.level, ConfidenceLevel::High);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod id;

pub mod advisor;
pub mod credibility;
pub mod criteria;
pub mod evidence;
pub mod hypothesis;
pub mod scale;
pub mod scoring;
pub mod traits;

// Re-exports for convenience
pub use advisor::{
    suggest_evidence_improvements, EvidenceStrength, Impact, ImprovementPlan, ImprovementPriority,
};
pub use credibility::{
    calculate_evidence_confidence, get_credibility_rating, weakest_link_average, ConfidenceLevel,
    CredibilityRating, EvidenceConfidence, RatingLetter,
};
pub use criteria::{
    catalog, validate_catalog, Criterion, CriterionError, CriterionId, CriterionOption,
    CriterionResponse,
};
pub use evidence::{Evidence, EvidenceId, SourceMetadata};
pub use hypothesis::{Hypothesis, HypothesisId};
pub use scale::{LegacyJudgment, ScaleType};
pub use scoring::{
    analyze_hypotheses, ConfidenceLabel, ConsistencyScore, HypothesisAnalysis, ScoringError,
};
