//! Request and result types for criterion evaluation

use ach_domain::{
    calculate_evidence_confidence, CredibilityRating, CriterionId, CriterionResponse,
    EvidenceConfidence, SourceMetadata,
};

/// Request to evaluate one evidence item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationRequest {
    /// Evidence text
    pub text: String,

    /// Optional source attribution
    pub source: SourceMetadata,
}

impl EvaluationRequest {
    /// Create a request with no source metadata
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: SourceMetadata::default(),
        }
    }

    /// Attach source metadata
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = source;
        self
    }
}

/// Proposed weight for one criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionAssessment {
    /// Criterion scored
    pub criterion: CriterionId,

    /// One of the criterion's option weights
    pub weight: i32,

    /// One-sentence justification
    pub rationale: String,
}

/// Proposed scores for all eight criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionEvaluation {
    /// One assessment per criterion, in catalog order
    pub assessments: Vec<CriterionAssessment>,

    /// Suggested follow-up collection
    pub recommendations: Vec<String>,

    /// Problems the analyst should know about
    pub warnings: Vec<String>,
}

impl CriterionEvaluation {
    /// Look up the assessment for a criterion
    pub fn get(&self, criterion: CriterionId) -> Option<&CriterionAssessment> {
        self.assessments.iter().find(|a| a.criterion == criterion)
    }

    /// Proposed weight for a criterion
    pub fn weight(&self, criterion: CriterionId) -> Option<i32> {
        self.get(criterion).map(|a| a.weight)
    }

    /// Convert the proposed weights into a criterion response
    pub fn to_response(&self) -> CriterionResponse {
        CriterionResponse::from_raw(
            self.assessments
                .iter()
                .map(|a| (a.criterion.as_str(), a.weight)),
        )
    }
}

/// An evaluation together with the credibility it implies
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceAssessment {
    /// Proposed criterion scores
    pub evaluation: CriterionEvaluation,

    /// Aggregated credibility
    pub confidence: EvidenceConfidence,

    /// Letter grade for the credibility
    pub rating: CredibilityRating,
}

impl EvidenceAssessment {
    /// Aggregate an evaluation into credibility and rating
    pub fn from_evaluation(evaluation: CriterionEvaluation) -> Self {
        let confidence = calculate_evidence_confidence(&evaluation.to_response());
        let rating = confidence.rating();
        Self {
            evaluation,
            confidence,
            rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(weight: impl Fn(CriterionId) -> i32) -> CriterionEvaluation {
        CriterionEvaluation {
            assessments: CriterionId::ALL
                .into_iter()
                .map(|criterion| CriterionAssessment {
                    criterion,
                    weight: weight(criterion),
                    rationale: "test".to_string(),
                })
                .collect(),
            recommendations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_to_response_is_complete() {
        let response = evaluation(|_| 5).to_response();
        assert!(response.is_complete());
        assert_eq!(response.get(CriterionId::Expertise), Some(5));
    }

    #[test]
    fn test_assessment_aggregates_credibility() {
        let assessment = EvidenceAssessment::from_evaluation(evaluation(|c| {
            if c == CriterionId::MotivationToDeceive {
                8
            } else {
                13
            }
        }));
        assert_eq!(assessment.confidence.confidence, 11);
        assert_eq!(assessment.rating.letter, ach_domain::RatingLetter::A);
    }

    #[test]
    fn test_lookup_by_criterion() {
        let evaluation = evaluation(|c| if c == CriterionId::Timeliness { 1 } else { 8 });
        assert_eq!(evaluation.weight(CriterionId::Timeliness), Some(1));
        assert_eq!(evaluation.get(CriterionId::SourceType).map(|a| a.weight), Some(8));
    }
}
