//! Evidence credibility model
//!
//! Collapses a [`CriterionResponse`] into one integer credibility value using
//! a weakest-link weighted average: weights are sorted ascending and the
//! weight at rank `r` gets the factor `0.7^r`. The lowest-scoring criterion
//! therefore dominates, and one poor dimension pulls the aggregate down more
//! than one strong dimension can lift it.

use crate::criteria::CriterionResponse;

/// Top of the criterion weight scale
pub const MAX_CREDIBILITY: i32 = 13;

/// Geometric decay applied per rank in the weakest-link average
pub const DECAY_FACTOR: f64 = 0.7;

/// Qualitative credibility band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLevel {
    /// Aggregate of 11 or more
    VeryHigh,
    /// Aggregate of 7 to 10
    High,
    /// Aggregate of 4 to 6
    Moderate,
    /// Aggregate of 2 or 3
    Low,
    /// Anything below 2, including negative aggregates
    VeryLow,
}

impl ConfidenceLevel {
    /// Band for a rounded credibility value
    pub fn from_confidence(confidence: i32) -> Self {
        match confidence {
            c if c >= 11 => ConfidenceLevel::VeryHigh,
            c if c >= 7 => ConfidenceLevel::High,
            c if c >= 4 => ConfidenceLevel::Moderate,
            c if c >= 2 => ConfidenceLevel::Low,
            _ => ConfidenceLevel::VeryLow,
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "VERY_HIGH",
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::Moderate => "MODERATE",
            ConfidenceLevel::Low => "LOW",
            ConfidenceLevel::VeryLow => "VERY_LOW",
        }
    }
}

/// Aggregated credibility of one evidence item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceConfidence {
    /// Rounded weakest-link aggregate (may be negative)
    pub confidence: i32,
    /// Qualitative band
    pub level: ConfidenceLevel,
    /// `confidence / 13` as a percentage, not clamped below zero
    pub percentage: i32,
}

impl EvidenceConfidence {
    /// Letter rating for this confidence
    pub fn rating(&self) -> CredibilityRating {
        get_credibility_rating(self.confidence)
    }
}

/// Admiralty-style letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingLetter {
    /// Completely reliable
    A,
    /// Usually reliable
    B,
    /// Fairly reliable
    C,
    /// Not usually reliable
    D,
    /// Unreliable
    E,
    /// Reliability cannot be judged
    F,
}

impl RatingLetter {
    /// Get the letter as a char
    pub fn as_char(&self) -> char {
        match self {
            RatingLetter::A => 'A',
            RatingLetter::B => 'B',
            RatingLetter::C => 'C',
            RatingLetter::D => 'D',
            RatingLetter::E => 'E',
            RatingLetter::F => 'F',
        }
    }
}

/// Letter grade plus its fixed description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredibilityRating {
    /// Letter grade
    pub letter: RatingLetter,
    /// Fixed description of the grade
    pub description: &'static str,
}

/// Unrounded weakest-link average of a set of weights
///
/// Returns `None` for an empty set.
pub fn weakest_link_average(weights: &[i32]) -> Option<f64> {
    if weights.is_empty() {
        return None;
    }

    let mut sorted = weights.to_vec();
    sorted.sort_unstable();

    let mut weighted_sum = 0.0;
    let mut factor_sum = 0.0;
    let mut factor = 1.0;
    for weight in sorted {
        weighted_sum += weight as f64 * factor;
        factor_sum += factor;
        factor *= DECAY_FACTOR;
    }

    Some(weighted_sum / factor_sum)
}

/// Compute the credibility of one evidence item
///
/// An empty response yields confidence 1, `VERY_LOW`, 0%: an unevaluated item
/// must never read as moderately credible.
///
/// # Examples
///
/// ```
/// use ach_domain::{calculate_evidence_confidence, ConfidenceLevel, CriterionResponse};
///
/// let confidence = calculate_evidence_confidence(&CriterionResponse::new());
/// assert_eq!(confidence.confidence, 1);
/// assert_eq!(confidence.level, ConfidenceLevel::VeryLow);
/// assert_eq!(confidence.percentage, 0);
/// ```
pub fn calculate_evidence_confidence(response: &CriterionResponse) -> EvidenceConfidence {
    let Some(average) = weakest_link_average(&response.weights()) else {
        return EvidenceConfidence {
            confidence: 1,
            level: ConfidenceLevel::VeryLow,
            percentage: 0,
        };
    };

    let confidence = round_half_up(average) as i32;
    let percentage = round_half_up(confidence as f64 / MAX_CREDIBILITY as f64 * 100.0) as i32;

    EvidenceConfidence {
        confidence,
        level: ConfidenceLevel::from_confidence(confidence),
        percentage,
    }
}

/// Map a credibility value to its letter grade
pub fn get_credibility_rating(confidence: i32) -> CredibilityRating {
    let (letter, description) = match confidence {
        c if c >= 11 => (RatingLetter::A, "Completely reliable"),
        c if c >= 8 => (RatingLetter::B, "Usually reliable"),
        c if c >= 5 => (RatingLetter::C, "Fairly reliable"),
        c if c >= 3 => (RatingLetter::D, "Not usually reliable"),
        c if c >= 1 => (RatingLetter::E, "Unreliable"),
        _ => (RatingLetter::F, "Reliability cannot be judged"),
    };
    CredibilityRating {
        letter,
        description,
    }
}

/// Halves round toward positive infinity, so -2.5 becomes -2
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriterionId;

    fn response(pairs: &[(CriterionId, i32)]) -> CriterionResponse {
        let mut response = CriterionResponse::new();
        for (id, weight) in pairs {
            response.insert(*id, *weight).unwrap();
        }
        response
    }

    #[test]
    fn test_empty_response_is_minimal() {
        let confidence = calculate_evidence_confidence(&CriterionResponse::new());
        assert_eq!(
            confidence,
            EvidenceConfidence {
                confidence: 1,
                level: ConfidenceLevel::VeryLow,
                percentage: 0,
            }
        );
    }

    #[test]
    fn test_single_weight_is_its_own_average() {
        let confidence = calculate_evidence_confidence(&response(&[(CriterionId::SourceType, 8)]));
        assert_eq!(confidence.confidence, 8);
        assert_eq!(confidence.level, ConfidenceLevel::High);
        assert_eq!(confidence.percentage, 62);
    }

    #[test]
    fn test_weakest_link_pulls_down() {
        // sorted [1, 13]: (1*1 + 13*0.7) / 1.7 = 5.94
        let average = weakest_link_average(&[13, 1]).unwrap();
        assert!((average - 5.941).abs() < 0.01);
        // A plain mean would be 7
        assert!(average < 7.0);
    }

    #[test]
    fn test_all_maximum_weights() {
        let all_max: Vec<_> = CriterionId::ALL
            .iter()
            .map(|id| (*id, id.criterion().max_weight()))
            .collect();
        let confidence = calculate_evidence_confidence(&response(&all_max));
        // motivation_to_deceive tops out at 8 and is the weakest link
        assert_eq!(confidence.confidence, 11);
        assert_eq!(confidence.level, ConfidenceLevel::VeryHigh);
        assert_eq!(confidence.rating().letter, RatingLetter::A);
    }

    #[test]
    fn test_negative_aggregate_is_preserved() {
        let confidence = calculate_evidence_confidence(&response(&[
            (CriterionId::Corroboration, -3),
            (CriterionId::MotivationToDeceive, -5),
        ]));
        // sorted [-5, -3]: (-5 + -3*0.7) / 1.7 = -4.18
        assert_eq!(confidence.confidence, -4);
        assert_eq!(confidence.level, ConfidenceLevel::VeryLow);
        assert_eq!(confidence.percentage, -31);
        assert_eq!(confidence.rating().letter, RatingLetter::F);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ConfidenceLevel::from_confidence(13), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_confidence(11), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_confidence(10), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(7), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(6), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_confidence(4), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_confidence(3), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(2), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(1), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::from_confidence(-5), ConfidenceLevel::VeryLow);
    }

    #[test]
    fn test_rating_thresholds() {
        let letters: Vec<_> = [11, 10, 8, 7, 5, 4, 3, 2, 1, 0, -5]
            .iter()
            .map(|c| get_credibility_rating(*c).letter.as_char())
            .collect();
        assert_eq!(
            letters,
            vec!['A', 'B', 'B', 'C', 'C', 'D', 'D', 'E', 'E', 'F', 'F']
        );
        assert_eq!(get_credibility_rating(12).description, "Completely reliable");
        assert_eq!(
            get_credibility_rating(0).description,
            "Reliability cannot be judged"
        );
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }
}
