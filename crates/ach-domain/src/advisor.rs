//! Improvement advisor
//!
//! Turns a criterion response into a prioritized collection plan: which weak
//! criteria to strengthen first, what to do about each, and whether the
//! evidence base is strong enough to analyse at all.

use crate::criteria::{CriterionId, CriterionResponse};

/// Score each weak criterion should be raised to
pub const TARGET_SCORE: i32 = 8;

/// Criteria scoring at or below this are flagged for improvement
pub const IMPROVEMENT_THRESHOLD: i32 = 5;

/// How much strengthening a criterion moves overall credibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Impact {
    /// Core sourcing criteria
    High,
    /// Source-character criteria
    Medium,
    /// Timeliness
    Low,
}

impl Impact {
    /// Impact of improving the given criterion
    pub fn of(criterion: CriterionId) -> Self {
        match criterion {
            CriterionId::SourceType
            | CriterionId::Corroboration
            | CriterionId::Directness
            | CriterionId::AccessToInformation => Impact::High,
            CriterionId::SourceBias | CriterionId::MotivationToDeceive | CriterionId::Expertise => {
                Impact::Medium
            }
            CriterionId::Timeliness => Impact::Low,
        }
    }

    /// Get the impact name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Impact::High => 0,
            Impact::Medium => 1,
            Impact::Low => 2,
        }
    }
}

/// Overall classification of an evidence base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceStrength {
    /// Mean score below 4
    Weak,
    /// Mean score from 4 up to 7
    Moderate,
    /// Mean score of 7 or more
    Strong,
}

impl EvidenceStrength {
    /// Classify a mean criterion score
    pub fn from_average(average: f64) -> Self {
        if average < 4.0 {
            EvidenceStrength::Weak
        } else if average < 7.0 {
            EvidenceStrength::Moderate
        } else {
            EvidenceStrength::Strong
        }
    }

    /// Get the strength name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceStrength::Weak => "weak",
            EvidenceStrength::Moderate => "moderate",
            EvidenceStrength::Strong => "strong",
        }
    }

    /// One-line collection strategy for this strength
    pub fn strategy(&self) -> &'static str {
        match self {
            EvidenceStrength::Weak => {
                "Evidence base is weak: defer analysis until the high-impact criteria are strengthened."
            }
            EvidenceStrength::Moderate => {
                "Evidence base is moderate: proceed with analysis but state its limitations."
            }
            EvidenceStrength::Strong => {
                "Evidence base is strong: proceed with analysis with high confidence."
            }
        }
    }
}

/// One criterion worth strengthening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImprovementPriority {
    /// Criterion to improve
    pub criterion: CriterionId,
    /// The criterion's question
    pub question: &'static str,
    /// Current weight
    pub current_score: i32,
    /// Weight to aim for
    pub target_score: i32,
    /// Concrete collection actions
    pub actions: &'static [&'static str],
    /// Expected effect on credibility
    pub impact: Impact,
}

/// Prioritized improvement plan for one evidence item
#[derive(Debug, Clone, PartialEq)]
pub struct ImprovementPlan {
    /// Weak criteria, highest impact first, weakest first within an impact
    pub priorities: Vec<ImprovementPriority>,
    /// Mean of the evaluated criterion weights
    pub average_score: f64,
    /// Overall classification
    pub strength: EvidenceStrength,
    /// One-line strategy statement
    pub strategy: &'static str,
}

/// Collection actions that raise each criterion
pub fn improvement_actions(criterion: CriterionId) -> &'static [&'static str] {
    match criterion {
        CriterionId::SourceType => &[
            "Trace the claim back to a primary source or direct participant",
            "Obtain the original document or record rather than a summary",
            "Identify who first reported the information",
        ],
        CriterionId::Corroboration => &[
            "Search for additional independent sources",
            "Check whether apparent confirmations share a common origin",
            "Look for physical or documentary evidence that confirms the account",
        ],
        CriterionId::SourceBias => &[
            "Research the source's affiliations and past positions",
            "Compare with reporting from sources holding opposing views",
        ],
        CriterionId::MotivationToDeceive => &[
            "Assess what the source gains if the information is believed",
            "Review the source's record of accuracy on similar claims",
        ],
        CriterionId::Directness => &[
            "Seek firsthand accounts instead of reports of reports",
            "Locate recordings, imagery or logs of the event itself",
        ],
        CriterionId::Timeliness => &[
            "Establish when the information was produced",
            "Look for more recent reporting on the same subject",
        ],
        CriterionId::Expertise => &[
            "Verify the source's credentials in the relevant field",
            "Consult a subject-matter expert to review the claim",
        ],
        CriterionId::AccessToInformation => &[
            "Establish how the source could have known the information",
            "Confirm the source's position relative to the event",
            "Find a source with direct access to corroborate",
        ],
    }
}

/// Recommend which criteria to strengthen and how
///
/// Only evaluated criteria are considered; an empty response is classified
/// as weak with no priorities.
///
/// # Examples
///
/// ```
/// use ach_domain::{suggest_evidence_improvements, CriterionId, CriterionResponse, EvidenceStrength};
///
/// let mut response = CriterionResponse::new();
/// response.insert(CriterionId::Corroboration, 1).unwrap();
/// response.insert(CriterionId::SourceType, 13).unwrap();
///
/// let plan = suggest_evidence_improvements(&response);
/// assert_eq!(plan.priorities.len(), 1);
/// assert_eq!(plan.priorities[0].criterion, CriterionId::Corroboration);
/// assert_eq!(plan.strength, EvidenceStrength::Strong);
/// ```
pub fn suggest_evidence_improvements(current: &CriterionResponse) -> ImprovementPlan {
    let mut priorities: Vec<ImprovementPriority> = current
        .iter()
        .filter(|(_, score)| *score <= IMPROVEMENT_THRESHOLD)
        .map(|(criterion, score)| ImprovementPriority {
            criterion,
            question: criterion.criterion().question,
            current_score: score,
            target_score: TARGET_SCORE,
            actions: improvement_actions(criterion),
            impact: Impact::of(criterion),
        })
        .collect();

    priorities.sort_by(|a, b| {
        a.impact
            .rank()
            .cmp(&b.impact.rank())
            .then(a.current_score.cmp(&b.current_score))
    });

    let average_score = if current.is_empty() {
        0.0
    } else {
        current.iter().map(|(_, w)| w as f64).sum::<f64>() / current.len() as f64
    };
    let strength = EvidenceStrength::from_average(average_score);

    ImprovementPlan {
        priorities,
        average_score,
        strength,
        strategy: strength.strategy(),
    }
}
