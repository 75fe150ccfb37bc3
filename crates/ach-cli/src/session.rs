//! Session files.
//!
//! A session is one JSON document holding the hypotheses, evidence and
//! consistency scores of an analysis. Items are referenced by string labels;
//! a label that is a UUID becomes the item's identifier, any other label gets
//! a freshly generated one.
//!
//! ```json
//! {
//!   "scale": "logarithmic",
//!   "hypotheses": [{ "id": "h1", "text": "The convoy moved" }],
//!   "evidence": [{
//!     "id": "e1",
//!     "text": "Satellite imagery shows an empty depot",
//!     "source": { "origin": "imagery", "date": "2024-06-01" },
//!     "criteria": { "source_type": 8, "timeliness": 13 }
//!   }],
//!   "scores": [{ "hypothesis": "h1", "evidence": "e1", "value": 8 }]
//! }
//! ```

use crate::error::{CliError, Result};
use ach_domain::scoring::DEFAULT_FALLBACK_WEIGHT;
use ach_domain::{
    analyze_hypotheses, ConsistencyScore, CriterionId, CriterionResponse, Evidence, EvidenceId,
    Hypothesis, HypothesisAnalysis, HypothesisId, LegacyJudgment, ScaleType, SourceMetadata,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Session document as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    /// "logarithmic" (default) or "linear"
    #[serde(default = "default_scale")]
    pub scale: String,

    /// Competing hypotheses
    pub hypotheses: Vec<HypothesisEntry>,

    /// Evidence items
    #[serde(default)]
    pub evidence: Vec<EvidenceEntry>,

    /// Consistency judgments
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
}

/// Hypothesis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisEntry {
    /// Label referenced by scores
    pub id: String,
    /// Statement of the hypothesis
    pub text: String,
}

/// Evidence record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceEntry {
    /// Label referenced by scores
    pub id: String,
    /// Evidence text
    pub text: String,
    /// Source attribution
    #[serde(default)]
    pub source: SourceEntry,
    /// Criterion name to selected weight, absent when not yet evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<BTreeMap<String, i32>>,
}

/// Source attribution record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Consistency judgment record.
///
/// Exactly one of `value` and `legacy` must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Hypothesis label
    pub hypothesis: String,
    /// Evidence label
    pub evidence: String,
    /// Consistency value on the session scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    /// Legacy judgment (supports, contradicts, neutral, not_applicable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<String>,
    /// Fallback credibility weight, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credibility: Option<u8>,
    /// Fallback relevance weight, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<u8>,
}

fn default_scale() -> String {
    ScaleType::Logarithmic.as_str().to_string()
}

/// A domain item together with the label it was loaded under.
#[derive(Debug, Clone)]
pub struct Labeled<T> {
    /// Label from the session file
    pub label: String,
    /// Domain item
    pub item: T,
}

/// A loaded, validated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Consistency scale in use
    pub scale: ScaleType,
    /// Hypotheses in file order
    pub hypotheses: Vec<Labeled<Hypothesis>>,
    /// Evidence in file order
    pub evidence: Vec<Labeled<Evidence>>,
    scores: Vec<ScoreEntry>,
}

impl Session {
    /// Load a session from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::InvalidInput(format!("Cannot read session {}: {}", path.display(), e))
        })?;
        let file: SessionFile = serde_json::from_str(&contents)?;
        Self::from_file(file)
    }

    /// Validate a session document and build its domain objects.
    pub fn from_file(file: SessionFile) -> Result<Self> {
        let scale = ScaleType::parse(&file.scale)
            .ok_or_else(|| CliError::InvalidInput(format!("Unknown scale '{}'", file.scale)))?;

        if file.hypotheses.is_empty() {
            return Err(CliError::InvalidInput(
                "Session has no hypotheses".to_string(),
            ));
        }

        ensure_unique("hypothesis", file.hypotheses.iter().map(|h| h.id.as_str()))?;
        ensure_unique("evidence", file.evidence.iter().map(|e| e.id.as_str()))?;

        let hypotheses = file
            .hypotheses
            .into_iter()
            .map(|entry| Labeled {
                item: Hypothesis::with_id(hypothesis_id(&entry.id), entry.text),
                label: entry.id,
            })
            .collect();

        let evidence = file
            .evidence
            .into_iter()
            .map(|entry| {
                let mut item = Evidence::with_id(evidence_id(&entry.id), entry.text)
                    .with_source(entry.source.into());
                if let Some(raw) = &entry.criteria {
                    item = item.with_criteria(criterion_response(&entry.id, raw));
                }
                Labeled {
                    label: entry.id,
                    item,
                }
            })
            .collect();

        Ok(Self {
            scale,
            hypotheses,
            evidence,
            scores: file.scores,
        })
    }

    /// Replace the scale declared in the file.
    pub fn with_scale(mut self, scale: ScaleType) -> Self {
        self.scale = scale;
        self
    }

    /// Find evidence by label.
    pub fn evidence(&self, label: &str) -> Option<&Labeled<Evidence>> {
        self.evidence.iter().find(|e| e.label == label)
    }

    /// Find a hypothesis by identifier.
    pub fn hypothesis(&self, id: HypothesisId) -> Option<&Labeled<Hypothesis>> {
        self.hypotheses.iter().find(|h| h.item.id == id)
    }

    /// Evidence that carries no criterion scores yet.
    pub fn unevaluated_mut(&mut self) -> impl Iterator<Item = &mut Labeled<Evidence>> {
        self.evidence.iter_mut().filter(|e| e.item.criteria.is_none())
    }

    /// Resolve score records into consistency scores.
    ///
    /// Evaluated evidence contributes its SATS credibility; unevaluated
    /// evidence falls back to the record's credibility and relevance weights.
    pub fn consistency_scores(&self) -> Result<Vec<ConsistencyScore>> {
        self.scores
            .iter()
            .map(|entry| self.resolve_score(entry))
            .collect()
    }

    /// Rank the hypotheses, most supported first.
    pub fn analyze(&self) -> Result<Vec<HypothesisAnalysis>> {
        let hypotheses: Vec<Hypothesis> = self.hypotheses.iter().map(|h| h.item.clone()).collect();
        let scores = self.consistency_scores()?;
        debug!(
            hypotheses = hypotheses.len(),
            scores = scores.len(),
            scale = self.scale.as_str(),
            "Analyzing session"
        );
        Ok(analyze_hypotheses(&hypotheses, &scores, self.scale)?)
    }

    fn resolve_score(&self, entry: &ScoreEntry) -> Result<ConsistencyScore> {
        let hypothesis = self
            .hypotheses
            .iter()
            .find(|h| h.label == entry.hypothesis)
            .ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Score references unknown hypothesis '{}'",
                    entry.hypothesis
                ))
            })?;
        let evidence = self.evidence(&entry.evidence).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Score references unknown evidence '{}'",
                entry.evidence
            ))
        })?;

        let value = match (entry.value, entry.legacy.as_deref()) {
            (Some(value), None) => value,
            (None, Some(legacy)) => LegacyJudgment::parse(legacy)
                .ok_or_else(|| {
                    CliError::InvalidInput(format!("Unknown legacy judgment '{}'", legacy))
                })?
                .to_consistency(self.scale),
            _ => {
                return Err(CliError::InvalidInput(format!(
                    "Score for {}/{} needs exactly one of 'value' or 'legacy'",
                    entry.hypothesis, entry.evidence
                )))
            }
        };

        let mut score = ConsistencyScore::new(hypothesis.item.id, evidence.item.id, value, self.scale)?;
        if entry.credibility.is_some() || entry.relevance.is_some() {
            score = score.with_fallback_weights(
                entry.credibility.unwrap_or(DEFAULT_FALLBACK_WEIGHT),
                entry.relevance.unwrap_or(DEFAULT_FALLBACK_WEIGHT),
            )?;
        }
        Ok(score.with_evidence_credibility(&evidence.item))
    }
}

impl From<SourceEntry> for SourceMetadata {
    fn from(entry: SourceEntry) -> Self {
        SourceMetadata {
            origin: entry.origin,
            publication: entry.publication,
            date: entry.date,
            author: entry.author,
            url: entry.url,
        }
    }
}

fn ensure_unique<'a>(kind: &str, labels: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            return Err(CliError::InvalidInput(format!(
                "Duplicate {} label '{}'",
                kind, label
            )));
        }
    }
    Ok(())
}

fn hypothesis_id(label: &str) -> HypothesisId {
    HypothesisId::from_string(label).unwrap_or_default()
}

fn evidence_id(label: &str) -> EvidenceId {
    EvidenceId::from_string(label).unwrap_or_default()
}

fn criterion_response(label: &str, raw: &BTreeMap<String, i32>) -> CriterionResponse {
    let response = CriterionResponse::from_raw(raw.iter().map(|(k, v)| (k.as_str(), *v)));
    for (name, weight) in raw {
        let kept = CriterionId::parse(name).and_then(|id| response.get(id)).is_some();
        if !kept {
            warn!(
                evidence = label,
                criterion = name.as_str(),
                weight = *weight,
                "Dropping unknown criterion or illegal weight"
            );
        }
    }
    response
}
