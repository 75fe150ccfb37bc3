//! Hypothesis scoring engine
//!
//! Combines analyst consistency judgments with evidence credibility into a
//! ranked set of [`HypothesisAnalysis`] values. The engine is stateless:
//! [`analyze_hypotheses`] is a pure function of its inputs and is the only
//! public entry point. The sub-calculations below it are private.
//!
//! Per score, the contribution to a hypothesis's weighted score is
//!
//! ```text
//! value × quality_adjustment × evidence_quality
//! ```
//!
//! where `evidence_quality` is `sats / 13` when the evidence has a SATS
//! credibility and `(credibility × relevance) / 25` otherwise, and
//! `quality_adjustment` dampens strong claims resting on weak evidence.

use crate::credibility::MAX_CREDIBILITY;
use crate::evidence::{Evidence, EvidenceId};
use crate::hypothesis::{Hypothesis, HypothesisId};
use crate::scale::ScaleType;
use std::fmt;

/// Default fallback credibility and relevance when the analyst gave none
pub const DEFAULT_FALLBACK_WEIGHT: u8 = 3;

/// One analyst judgment of one evidence item against one hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyScore {
    /// Hypothesis being judged
    pub hypothesis_id: HypothesisId,

    /// Evidence being judged
    pub evidence_id: EvidenceId,

    /// Signed consistency on the session's scale
    pub value: i32,

    /// Fallback credibility (1-5), used without SATS credibility
    pub credibility: u8,

    /// Fallback relevance (1-5), used without SATS credibility
    pub relevance: u8,

    /// Copy of the evidence's SATS credibility (1-13)
    pub sats_credibility: Option<i32>,
}

impl ConsistencyScore {
    /// Create a score, checking the value against the scale
    pub fn new(
        hypothesis_id: HypothesisId,
        evidence_id: EvidenceId,
        value: i32,
        scale: ScaleType,
    ) -> Result<Self, ScoringError> {
        if !scale.is_valid_value(value) {
            return Err(ScoringError::ValueOutOfScale { value, scale });
        }
        Ok(Self {
            hypothesis_id,
            evidence_id,
            value,
            credibility: DEFAULT_FALLBACK_WEIGHT,
            relevance: DEFAULT_FALLBACK_WEIGHT,
            sats_credibility: None,
        })
    }

    /// Set the fallback credibility/relevance pair
    pub fn with_fallback_weights(mut self, credibility: u8, relevance: u8) -> Result<Self, ScoringError> {
        for (field, value) in [("credibility", credibility), ("relevance", relevance)] {
            if !(1..=5).contains(&value) {
                return Err(ScoringError::FallbackWeightOutOfRange { field, value });
            }
        }
        self.credibility = credibility;
        self.relevance = relevance;
        Ok(self)
    }

    /// Set the SATS credibility, held to 1-13
    ///
    /// Evidence with a zero or net-negative credibility counts as minimally
    /// credible. It keeps the direction of its consistency value and only
    /// loses weight, so unreliable evidence never flips the sign of its
    /// contribution.
    pub fn with_sats_credibility(mut self, sats: i32) -> Self {
        self.sats_credibility = Some(sats.clamp(1, MAX_CREDIBILITY));
        self
    }

    /// Copy the SATS credibility of an evaluated evidence item
    ///
    /// Unevaluated evidence leaves the score on its fallback weights.
    pub fn with_evidence_credibility(self, evidence: &Evidence) -> Self {
        match evidence.credibility() {
            Some(credibility) => self.with_sats_credibility(credibility.confidence),
            None => self,
        }
    }

    fn evidence_quality(&self) -> f64 {
        match self.sats_credibility {
            Some(sats) => sats as f64 / MAX_CREDIBILITY as f64,
            None => (self.credibility as f64 * self.relevance as f64) / 25.0,
        }
    }
}

/// How much trust the evidence base behind a hypothesis deserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLabel {
    /// Plenty of credible evidence
    High,
    /// Some credible evidence
    Medium,
    /// Thin or weak evidence
    Low,
}

impl ConfidenceLabel {
    /// Get the label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::High => "HIGH",
            ConfidenceLabel::Medium => "MEDIUM",
            ConfidenceLabel::Low => "LOW",
        }
    }
}

/// Derived scoring of one hypothesis
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisAnalysis {
    /// Hypothesis analysed
    pub hypothesis_id: HypothesisId,
    /// Unweighted sum of consistency values
    pub total_score: i32,
    /// Credibility-weighted sum of consistency values
    pub weighted_score: f64,
    /// Scores with a positive value
    pub supporting_evidence: usize,
    /// Scores with a negative value
    pub contradicting_evidence: usize,
    /// Scores with a zero value
    pub neutral_evidence: usize,
    /// Population standard deviation of the consistency values
    pub diagnostic_value: f64,
    /// Trust in the evidence base
    pub confidence_level: ConfidenceLabel,
    /// Whether the weighted score fell below the scale's rejection threshold
    pub rejected: bool,
}

/// Errors raised by the scoring engine
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// A score references a hypothesis that was not supplied
    UnknownHypothesis(HypothesisId),

    /// A consistency value is not on the active scale
    ValueOutOfScale {
        /// The rejected value
        value: i32,
        /// Scale in use
        scale: ScaleType,
    },

    /// A fallback weight is outside 1-5
    FallbackWeightOutOfRange {
        /// Which weight was rejected
        field: &'static str,
        /// The rejected value
        value: u8,
    },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::UnknownHypothesis(id) => {
                write!(f, "Consistency score references unknown hypothesis {}", id)
            }
            ScoringError::ValueOutOfScale { value, scale } => {
                write!(f, "Consistency value {} is not on the {} scale", value, scale.as_str())
            }
            ScoringError::FallbackWeightOutOfRange { field, value } => {
                write!(f, "Fallback {} {} is outside 1-5", field, value)
            }
        }
    }
}

impl std::error::Error for ScoringError {}

/// Score and rank every hypothesis
///
/// Returns one analysis per hypothesis, sorted by weighted score descending.
/// Ties keep the order in which hypotheses were supplied. A hypothesis with no
/// scores gets an all-zero analysis.
///
/// # Errors
///
/// Fails with [`ScoringError::UnknownHypothesis`] if any score references a
/// hypothesis not present in `hypotheses`.
///
/// # Examples
///
/// ```
/// use ach_domain::{analyze_hypotheses, ConsistencyScore, EvidenceId, Hypothesis, ScaleType};
///
/// let h1 = Hypothesis::new("Insider leak");
/// let h2 = Hypothesis::new("External breach");
/// let e1 = EvidenceId::new();
///
/// let scores = vec![
///     ConsistencyScore::new(h1.id, e1, 8, ScaleType::Logarithmic).unwrap(),
///     ConsistencyScore::new(h2.id, e1, -8, ScaleType::Logarithmic).unwrap(),
/// ];
///
/// let ranked = analyze_hypotheses(&[h1.clone(), h2], &scores, ScaleType::Logarithmic).unwrap();
/// assert_eq!(ranked[0].hypothesis_id, h1.id);
/// ```
pub fn analyze_hypotheses(
    hypotheses: &[Hypothesis],
    scores: &[ConsistencyScore],
    scale: ScaleType,
) -> Result<Vec<HypothesisAnalysis>, ScoringError> {
    if let Some(orphan) = scores
        .iter()
        .find(|s| !hypotheses.iter().any(|h| h.id == s.hypothesis_id))
    {
        return Err(ScoringError::UnknownHypothesis(orphan.hypothesis_id));
    }

    let mut analyses: Vec<HypothesisAnalysis> = hypotheses
        .iter()
        .map(|hypothesis| {
            let own: Vec<&ConsistencyScore> = scores
                .iter()
                .filter(|s| s.hypothesis_id == hypothesis.id)
                .collect();
            analyze_one(hypothesis.id, &own, scale)
        })
        .collect();

    // Stable sort keeps input order for equal scores
    analyses.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));

    Ok(analyses)
}

fn analyze_one(
    hypothesis_id: HypothesisId,
    scores: &[&ConsistencyScore],
    scale: ScaleType,
) -> HypothesisAnalysis {
    let values: Vec<i32> = scores.iter().map(|s| s.value).collect();
    let weighted_score = calculate_weighted_score(scores, scale);

    let average_weight = if scores.is_empty() {
        0.0
    } else {
        scores
            .iter()
            .map(|s| (s.credibility as f64 + s.relevance as f64) / 2.0)
            .sum::<f64>()
            / scores.len() as f64
    };

    HypothesisAnalysis {
        hypothesis_id,
        total_score: values.iter().sum(),
        weighted_score,
        supporting_evidence: values.iter().filter(|v| **v > 0).count(),
        contradicting_evidence: values.iter().filter(|v| **v < 0).count(),
        neutral_evidence: values.iter().filter(|v| **v == 0).count(),
        diagnostic_value: calculate_diagnostic_value(&values),
        confidence_level: calculate_confidence_level(scores.len(), average_weight, scores),
        rejected: should_reject_hypothesis(weighted_score, scale),
    }
}

fn calculate_weighted_score(scores: &[&ConsistencyScore], scale: ScaleType) -> f64 {
    scores
        .iter()
        .map(|score| {
            let adjustment = match score.sats_credibility {
                Some(sats) => calculate_quality_adjustment(score.value, sats, scale),
                None => 1.0,
            };
            score.value as f64 * adjustment * score.evidence_quality()
        })
        .sum()
}

/// Dampening factor for a claim of the given strength on evidence of the
/// given credibility
fn calculate_quality_adjustment(value: i32, sats_credibility: i32, scale: ScaleType) -> f64 {
    let score_intensity = value.abs() as f64 / scale.max_value() as f64;
    let credibility_ratio = sats_credibility as f64 / MAX_CREDIBILITY as f64;

    if score_intensity > 0.6 && credibility_ratio < 0.4 {
        0.3 + 0.7 * credibility_ratio
    } else if score_intensity > 0.4 && credibility_ratio < 0.6 {
        0.5 + 0.5 * credibility_ratio
    } else {
        0.7 + 0.3 * credibility_ratio
    }
}

fn calculate_diagnostic_value(values: &[i32]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|v| *v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| (*v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}

fn should_reject_hypothesis(weighted_score: f64, scale: ScaleType) -> bool {
    weighted_score < scale.rejection_threshold()
}

fn calculate_confidence_level(
    evidence_count: usize,
    average_weight: f64,
    scores: &[&ConsistencyScore],
) -> ConfidenceLabel {
    let sats: Vec<f64> = scores
        .iter()
        .filter_map(|s| s.sats_credibility)
        .map(|c| c as f64)
        .collect();

    if !sats.is_empty() {
        let mean_credibility = sats.iter().sum::<f64>() / sats.len() as f64;
        let quality_score =
            evidence_count as f64 * (mean_credibility / MAX_CREDIBILITY as f64) * 5.0;

        return if quality_score > 12.0 && mean_credibility >= 8.0 {
            ConfidenceLabel::High
        } else if quality_score > 6.0 && mean_credibility >= 5.0 {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        };
    }

    let quality_score = evidence_count as f64 * average_weight;
    if quality_score > 15.0 {
        ConfidenceLabel::High
    } else if quality_score > 7.0 {
        ConfidenceLabel::Medium
    } else {
        ConfidenceLabel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: ScaleType = ScaleType::Logarithmic;
    const LIN: ScaleType = ScaleType::Linear;

    fn score(h: &Hypothesis, value: i32) -> ConsistencyScore {
        ConsistencyScore::new(h.id, EvidenceId::new(), value, LOG).unwrap()
    }

    #[test]
    fn test_rejection_thresholds() {
        assert!(should_reject_hypothesis(-25.0, LOG));
        assert!(!should_reject_hypothesis(-15.0, LOG));
        assert!(!should_reject_hypothesis(-20.0, LOG));
        assert!(should_reject_hypothesis(-11.0, LIN));
        assert!(!should_reject_hypothesis(-10.0, LIN));
    }

    #[test]
    fn test_quality_adjustment_penalizes_strong_claim_on_weak_evidence() {
        // intensity 1.0, ratio 1/13
        let factor = calculate_quality_adjustment(13, 1, LOG);
        assert!(factor < 0.4, "factor {} should be < 0.4", factor);
    }

    #[test]
    fn test_quality_adjustment_full_trust_at_max_credibility() {
        let factor = calculate_quality_adjustment(13, 13, LOG);
        assert!((factor - 1.0).abs() < 1e-12);
        let factor = calculate_quality_adjustment(-5, 13, LIN);
        assert!((factor - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quality_adjustment_middle_band() {
        // intensity 5/13 = 0.38 is not > 0.4, so the lenient band applies
        let lenient = calculate_quality_adjustment(5, 3, LOG);
        assert!((lenient - (0.7 + 0.3 * 3.0 / 13.0)).abs() < 1e-12);

        // intensity 3/5 = 0.6 is > 0.4 but not > 0.6; ratio 5/13 = 0.38 < 0.6
        let middle = calculate_quality_adjustment(3, 5, LIN);
        assert!((middle - (0.5 + 0.5 * 5.0 / 13.0)).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_score_without_sats_uses_fallback_pair() {
        let h = Hypothesis::new("h");
        let s = score(&h, -3).with_fallback_weights(5, 5).unwrap();
        // no dampening, quality 25/25
        assert!((calculate_weighted_score(&[&s], LOG) - -3.0).abs() < 1e-12);

        let s = score(&h, 8).with_fallback_weights(2, 5).unwrap();
        assert!((calculate_weighted_score(&[&s], LOG) - 8.0 * 10.0 / 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_score_with_sats() {
        let h = Hypothesis::new("h");
        let s = score(&h, 13).with_sats_credibility(13);
        assert!((calculate_weighted_score(&[&s], LOG) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_sats_credibility_is_held_in_range() {
        let h = Hypothesis::new("h");
        assert_eq!(score(&h, 1).with_sats_credibility(-4).sats_credibility, Some(1));
        assert_eq!(score(&h, 1).with_sats_credibility(20).sats_credibility, Some(13));
    }

    #[test]
    fn test_negative_credibility_weighs_like_minimal() {
        let h = Hypothesis::new("h");
        let minimal = score(&h, 8).with_sats_credibility(1);
        for sats in [0, -3, -13] {
            let s = score(&h, 8).with_sats_credibility(sats);
            assert_eq!(s.sats_credibility, Some(1));
            let weighted = calculate_weighted_score(&[&s], LOG);
            assert!(weighted > 0.0, "{} flipped to {}", sats, weighted);
            assert!((weighted - calculate_weighted_score(&[&minimal], LOG)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_diagnostic_value() {
        assert_eq!(calculate_diagnostic_value(&[]), 0.0);
        assert_eq!(calculate_diagnostic_value(&[13]), 0.0);
        assert!((calculate_diagnostic_value(&[13, 8]) - 2.5).abs() < 1e-12);
        assert!((calculate_diagnostic_value(&[-13, -3]) - 5.0).abs() < 1e-12);
        assert_eq!(calculate_diagnostic_value(&[5, 5, 5]), 0.0);
    }

    #[test]
    fn test_confidence_level_credibility_branch() {
        let h = Hypothesis::new("h");
        let strong: Vec<_> = (0..3).map(|_| score(&h, 8).with_sats_credibility(13)).collect();
        let refs: Vec<_> = strong.iter().collect();
        // 3 × 1.0 × 5 = 15 > 12, mean 13
        assert_eq!(calculate_confidence_level(3, 0.0, &refs), ConfidenceLabel::High);

        let medium: Vec<_> = (0..2).map(|_| score(&h, 8).with_sats_credibility(8)).collect();
        let refs: Vec<_> = medium.iter().collect();
        // 2 × 0.615 × 5 = 6.15 > 6, mean 8
        assert_eq!(calculate_confidence_level(2, 0.0, &refs), ConfidenceLabel::Medium);

        let weak = [score(&h, 8).with_sats_credibility(3)];
        let refs: Vec<_> = weak.iter().collect();
        assert_eq!(calculate_confidence_level(1, 5.0, &refs), ConfidenceLabel::Low);
    }

    #[test]
    fn test_confidence_level_fallback_branch() {
        assert_eq!(calculate_confidence_level(4, 4.0, &[]), ConfidenceLabel::High);
        assert_eq!(calculate_confidence_level(3, 3.0, &[]), ConfidenceLabel::Medium);
        assert_eq!(calculate_confidence_level(2, 3.0, &[]), ConfidenceLabel::Low);
    }

    #[test]
    fn test_evidence_counts_by_sign() {
        let h = Hypothesis::new("h");
        let scores = vec![score(&h, 5), score(&h, -1), score(&h, 0), score(&h, 13)];
        let analysis = &analyze_hypotheses(&[h], &scores, LOG).unwrap()[0];
        assert_eq!(analysis.supporting_evidence, 2);
        assert_eq!(analysis.contradicting_evidence, 1);
        assert_eq!(analysis.neutral_evidence, 1);
        assert_eq!(analysis.total_score, 17);
    }

    #[test]
    fn test_hypothesis_without_scores() {
        let h = Hypothesis::new("untouched");
        let analysis = &analyze_hypotheses(&[h.clone()], &[], LOG).unwrap()[0];
        assert_eq!(analysis.hypothesis_id, h.id);
        assert_eq!(analysis.total_score, 0);
        assert_eq!(analysis.weighted_score, 0.0);
        assert_eq!(analysis.confidence_level, ConfidenceLabel::Low);
        assert!(!analysis.rejected);
    }

    #[test]
    fn test_unknown_hypothesis_fails_loudly() {
        let known = Hypothesis::new("known");
        let stranger = HypothesisId::new();
        let scores = vec![
            score(&known, 3),
            ConsistencyScore::new(stranger, EvidenceId::new(), 3, LOG).unwrap(),
        ];
        let err = analyze_hypotheses(&[known], &scores, LOG).unwrap_err();
        assert_eq!(err, ScoringError::UnknownHypothesis(stranger));
    }

    #[test]
    fn test_strongly_contradicted_hypothesis_is_rejected() {
        let h = Hypothesis::new("h");
        let scores: Vec<_> = (0..2).map(|_| score(&h, -13).with_sats_credibility(13)).collect();
        let analysis = &analyze_hypotheses(&[h], &scores, LOG).unwrap()[0];
        assert!((analysis.weighted_score - -26.0).abs() < 1e-9);
        assert!(analysis.rejected);
    }

    #[test]
    fn test_new_rejects_off_scale_value() {
        let err = ConsistencyScore::new(HypothesisId::new(), EvidenceId::new(), 4, LOG).unwrap_err();
        assert_eq!(err, ScoringError::ValueOutOfScale { value: 4, scale: LOG });
        assert!(ConsistencyScore::new(HypothesisId::new(), EvidenceId::new(), 4, LIN).is_ok());
    }

    #[test]
    fn test_fallback_weights_range() {
        let h = Hypothesis::new("h");
        assert!(score(&h, 1).with_fallback_weights(0, 3).is_err());
        assert!(score(&h, 1).with_fallback_weights(3, 6).is_err());
        assert!(score(&h, 1).with_fallback_weights(1, 5).is_ok());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let h1 = Hypothesis::new("first");
        let h2 = Hypothesis::new("second");
        let ranked = analyze_hypotheses(&[h1.clone(), h2.clone()], &[], LOG).unwrap();
        assert_eq!(ranked[0].hypothesis_id, h1.id);
        assert_eq!(ranked[1].hypothesis_id, h2.id);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::scale::LOGARITHMIC_VALUES;
    use proptest::prelude::*;

    fn scenario() -> impl Strategy<Value = (Vec<Hypothesis>, Vec<ConsistencyScore>)> {
        (1usize..=5).prop_flat_map(|n_hypotheses| {
            let hypotheses: Vec<Hypothesis> = (0..n_hypotheses)
                .map(|i| Hypothesis::with_id(HypothesisId::from_value(i as u128 + 1), format!("h{}", i)))
                .collect();
            let score = (
                0..n_hypotheses,
                prop::sample::select(LOGARITHMIC_VALUES.to_vec()),
                1u8..=5,
                1u8..=5,
                prop::option::of(1i32..=13),
            );
            (Just(hypotheses), prop::collection::vec(score, 0..20))
        })
        .prop_map(|(hypotheses, raw)| {
            let scores = raw
                .into_iter()
                .enumerate()
                .map(|(i, (h, value, credibility, relevance, sats))| {
                    let base = ConsistencyScore::new(
                        hypotheses[h].id,
                        EvidenceId::from_value(i as u128 + 100),
                        value,
                        ScaleType::Logarithmic,
                    )
                    .unwrap()
                    .with_fallback_weights(credibility, relevance)
                    .unwrap();
                    match sats {
                        Some(sats) => base.with_sats_credibility(sats),
                        None => base,
                    }
                })
                .collect();
            (hypotheses, scores)
        })
    }

    proptest! {
        /// Property: output is sorted by weighted score, descending
        #[test]
        fn test_analysis_is_sorted((hypotheses, scores) in scenario()) {
            let ranked = analyze_hypotheses(&hypotheses, &scores, ScaleType::Logarithmic).unwrap();
            prop_assert_eq!(ranked.len(), hypotheses.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].weighted_score >= pair[1].weighted_score);
            }
        }

        /// Property: the same inputs give the same output, in any score order
        #[test]
        fn test_analysis_is_pure((hypotheses, scores) in scenario()) {
            let first = analyze_hypotheses(&hypotheses, &scores, ScaleType::Logarithmic).unwrap();
            let second = analyze_hypotheses(&hypotheses, &scores, ScaleType::Logarithmic).unwrap();
            prop_assert_eq!(&first, &second);

            let mut reversed = scores.clone();
            reversed.reverse();
            let third = analyze_hypotheses(&hypotheses, &reversed, ScaleType::Logarithmic).unwrap();
            for a in &first {
                let b = third.iter().find(|b| b.hypothesis_id == a.hypothesis_id).unwrap();
                prop_assert!((a.weighted_score - b.weighted_score).abs() < 1e-9);
                prop_assert_eq!(a.total_score, b.total_score);
                prop_assert_eq!(a.confidence_level, b.confidence_level);
            }
        }

        /// Property: the quality adjustment never amplifies a claim
        #[test]
        fn test_quality_adjustment_bounded(
            value in prop::sample::select(LOGARITHMIC_VALUES.to_vec()),
            sats in 1i32..=13,
        ) {
            let factor = calculate_quality_adjustment(value, sats, ScaleType::Logarithmic);
            prop_assert!(factor > 0.3 && factor <= 1.0 + 1e-12);
        }
    }
}
