//! SATS criterion catalog
//!
//! Eight fixed evidence-quality criteria. Each criterion offers an ordered
//! ladder of options whose weights sit on the logarithmic scale
//! `{13, 8, 5, 3, 1, 0, -1, -2, -3, -5}`.
//!
//! Two options are deliberate exceptions to the otherwise non-negative
//! ladders: `corroboration` can be "Contradicted by other sources" and
//! `motivation_to_deceive` can be "Confirmed past deception". These carry
//! negative weights so that actively disconfirming information pulls the
//! credibility aggregate below zero instead of merely failing to raise it.

use std::collections::BTreeMap;
use std::fmt;

/// Every weight a criterion option may carry
pub const WEIGHT_SCALE: [i32; 10] = [13, 8, 5, 3, 1, 0, -1, -2, -3, -5];

/// Identifier of one of the eight SATS criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CriterionId {
    /// What kind of source provided the information
    SourceType,
    /// Whether independent sources confirm it
    Corroboration,
    /// How free the source is from bias
    SourceBias,
    /// Whether the source has reason to deceive
    MotivationToDeceive,
    /// How directly the evidence bears on the event
    Directness,
    /// How recent the information is
    Timeliness,
    /// Whether the source has relevant expertise
    Expertise,
    /// Whether the source could know what it reports
    AccessToInformation,
}

impl CriterionId {
    /// All criteria in catalog order
    pub const ALL: [CriterionId; 8] = [
        CriterionId::SourceType,
        CriterionId::Corroboration,
        CriterionId::SourceBias,
        CriterionId::MotivationToDeceive,
        CriterionId::Directness,
        CriterionId::Timeliness,
        CriterionId::Expertise,
        CriterionId::AccessToInformation,
    ];

    /// Get the wire name of the criterion
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionId::SourceType => "source_type",
            CriterionId::Corroboration => "corroboration",
            CriterionId::SourceBias => "source_bias",
            CriterionId::MotivationToDeceive => "motivation_to_deceive",
            CriterionId::Directness => "directness",
            CriterionId::Timeliness => "timeliness",
            CriterionId::Expertise => "expertise",
            CriterionId::AccessToInformation => "access_to_information",
        }
    }

    /// Parse a criterion from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Look up the catalog entry for this criterion
    pub fn criterion(&self) -> &'static Criterion {
        &CATALOG[self.index()]
    }

    fn index(&self) -> usize {
        match self {
            CriterionId::SourceType => 0,
            CriterionId::Corroboration => 1,
            CriterionId::SourceBias => 2,
            CriterionId::MotivationToDeceive => 3,
            CriterionId::Directness => 4,
            CriterionId::Timeliness => 5,
            CriterionId::Expertise => 6,
            CriterionId::AccessToInformation => 7,
        }
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CriterionId {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CriterionError::UnknownCriterion(s.to_string()))
    }
}

/// One selectable answer to a criterion question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionOption {
    /// Human-readable label
    pub label: &'static str,
    /// Weight on the logarithmic scale
    pub weight: i32,
}

/// A fixed catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criterion {
    /// Criterion identifier
    pub id: CriterionId,
    /// Grouping label shown to analysts
    pub category: &'static str,
    /// Question the analyst answers
    pub question: &'static str,
    /// Options ordered from strongest to weakest
    pub options: &'static [CriterionOption],
}

impl Criterion {
    /// Check whether a weight is one of this criterion's options
    pub fn is_legal_weight(&self, weight: i32) -> bool {
        self.options.iter().any(|o| o.weight == weight)
    }

    /// Find the option carrying the given weight
    pub fn option_for(&self, weight: i32) -> Option<&'static CriterionOption> {
        self.options.iter().find(|o| o.weight == weight)
    }

    /// Highest weight this criterion can award
    pub fn max_weight(&self) -> i32 {
        self.options.iter().map(|o| o.weight).max().unwrap_or(0)
    }

    /// Lowest weight this criterion can award
    pub fn min_weight(&self) -> i32 {
        self.options.iter().map(|o| o.weight).min().unwrap_or(0)
    }
}

const fn opt(label: &'static str, weight: i32) -> CriterionOption {
    CriterionOption { label, weight }
}

static CATALOG: [Criterion; 8] = [
    Criterion {
        id: CriterionId::SourceType,
        category: "Source",
        question: "What type of source provided this information?",
        options: &[
            opt("Direct participant or eyewitness", 13),
            opt("Official record or primary document", 8),
            opt("Established news outlet or recognized expert", 5),
            opt("Secondary or aggregated reporting", 3),
            opt("Anonymous or unverified source", 1),
            opt("Source unknown", 0),
        ],
    },
    Criterion {
        id: CriterionId::Corroboration,
        category: "Corroboration",
        question: "Is the information confirmed by independent sources?",
        options: &[
            opt("Confirmed by multiple independent sources", 13),
            opt("Confirmed by one independent source", 8),
            opt("Partially corroborated", 5),
            opt("Single uncorroborated source", 1),
            opt("Contradicted by other sources", -3),
        ],
    },
    Criterion {
        id: CriterionId::SourceBias,
        category: "Source",
        question: "How free is the source from bias on this topic?",
        options: &[
            opt("Statement against the source's own interest", 13),
            opt("No apparent bias", 8),
            opt("Some bias, unlikely to distort the report", 5),
            opt("Significant bias", 3),
            opt("Strongly partisan or hedged reporting", 1),
        ],
    },
    Criterion {
        id: CriterionId::MotivationToDeceive,
        category: "Source",
        question: "Does the source have a reason to deceive?",
        options: &[
            opt("No apparent motivation", 8),
            opt("Weak or indirect motivation", 5),
            opt("Plausible motivation", 3),
            opt("Strong motivation", 1),
            opt("Confirmed past deception", -5),
        ],
    },
    Criterion {
        id: CriterionId::Directness,
        category: "Information",
        question: "How directly does the evidence bear on the event?",
        options: &[
            opt("Direct observation of the event", 13),
            opt("Documentary or recorded evidence", 8),
            opt("Closely linked circumstantial evidence", 5),
            opt("Indirect inference", 3),
            opt("Hearsay or rumor", 1),
        ],
    },
    Criterion {
        id: CriterionId::Timeliness,
        category: "Information",
        question: "How recent is the information?",
        options: &[
            opt("Within the past week", 13),
            opt("Within the past month", 8),
            opt("Within the past year", 5),
            opt("Older than a year", 3),
            opt("Date unknown", 1),
        ],
    },
    Criterion {
        id: CriterionId::Expertise,
        category: "Source",
        question: "Does the source have relevant expertise?",
        options: &[
            opt("Recognized subject-matter expert", 13),
            opt("Professional experience in the field", 8),
            opt("Some relevant knowledge", 5),
            opt("Layperson", 3),
            opt("No relevant expertise or unknown", 1),
        ],
    },
    Criterion {
        id: CriterionId::AccessToInformation,
        category: "Access",
        question: "Did the source have access to the information it reports?",
        options: &[
            opt("Direct access", 13),
            opt("Privileged indirect access", 8),
            opt("Plausible access", 5),
            opt("Limited access", 3),
            opt("Access unclear", 1),
            opt("No plausible access", 0),
        ],
    },
];

/// The full criterion catalog in canonical order
pub fn catalog() -> &'static [Criterion] {
    &CATALOG
}

/// Check the catalog's structural invariants
///
/// Every option weight must be on [`WEIGHT_SCALE`], ladders must be strictly
/// descending, and only `corroboration` and `motivation_to_deceive` may offer
/// a negative weight.
pub fn validate_catalog() -> Result<(), CriterionError> {
    for (idx, criterion) in CATALOG.iter().enumerate() {
        if criterion.id.index() != idx {
            return Err(CriterionError::InvalidCatalog(format!(
                "{} is out of position",
                criterion.id
            )));
        }
        if criterion.options.is_empty() {
            return Err(CriterionError::InvalidCatalog(format!(
                "{} has no options",
                criterion.id
            )));
        }
        for option in criterion.options {
            if !WEIGHT_SCALE.contains(&option.weight) {
                return Err(CriterionError::InvalidCatalog(format!(
                    "{} option '{}' has off-scale weight {}",
                    criterion.id, option.label, option.weight
                )));
            }
        }
        if criterion.options.windows(2).any(|w| w[0].weight <= w[1].weight) {
            return Err(CriterionError::InvalidCatalog(format!(
                "{} options are not strictly descending",
                criterion.id
            )));
        }
        let negative_allowed = matches!(
            criterion.id,
            CriterionId::Corroboration | CriterionId::MotivationToDeceive
        );
        if !negative_allowed && criterion.min_weight() < 0 {
            return Err(CriterionError::InvalidCatalog(format!(
                "{} must not offer a negative weight",
                criterion.id
            )));
        }
    }
    Ok(())
}

/// Errors raised while building criterion responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionError {
    /// The criterion name is not in the catalog
    UnknownCriterion(String),

    /// The weight is not one of the criterion's options
    IllegalWeight {
        /// Criterion the weight was offered for
        criterion: CriterionId,
        /// The rejected weight
        weight: i32,
    },

    /// The static catalog violates its own invariants
    InvalidCatalog(String),
}

impl fmt::Display for CriterionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionError::UnknownCriterion(name) => write!(f, "Unknown criterion: {}", name),
            CriterionError::IllegalWeight { criterion, weight } => {
                write!(f, "Weight {} is not a legal option for {}", weight, criterion)
            }
            CriterionError::InvalidCatalog(msg) => write!(f, "Invalid criterion catalog: {}", msg),
        }
    }
}

impl std::error::Error for CriterionError {}

/// Selected option weight per criterion for one evidence item
///
/// Criteria that were not evaluated are absent rather than zero. Every stored
/// weight is guaranteed to be a legal option of its criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriterionResponse {
    weights: BTreeMap<CriterionId, i32>,
}

impl CriterionResponse {
    /// Create an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a response from raw name/weight pairs
    ///
    /// Unknown names and illegal weights are dropped, so those criteria are
    /// simply absent from the result.
    pub fn from_raw<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut response = Self::new();
        for (name, weight) in pairs {
            if let Some(id) = CriterionId::parse(name) {
                let _ = response.insert(id, weight);
            }
        }
        response
    }

    /// Record a weight for a criterion, returning the previous weight
    pub fn insert(&mut self, id: CriterionId, weight: i32) -> Result<Option<i32>, CriterionError> {
        if !id.criterion().is_legal_weight(weight) {
            return Err(CriterionError::IllegalWeight {
                criterion: id,
                weight,
            });
        }
        Ok(self.weights.insert(id, weight))
    }

    /// Remove a criterion's weight
    pub fn remove(&mut self, id: CriterionId) -> Option<i32> {
        self.weights.remove(&id)
    }

    /// Get the weight recorded for a criterion
    pub fn get(&self, id: CriterionId) -> Option<i32> {
        self.weights.get(&id).copied()
    }

    /// Number of evaluated criteria
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no criterion has been evaluated
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Whether all eight criteria have been evaluated
    pub fn is_complete(&self) -> bool {
        self.weights.len() == CriterionId::ALL.len()
    }

    /// Iterate over evaluated criteria in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (CriterionId, i32)> + '_ {
        self.weights.iter().map(|(id, w)| (*id, *w))
    }

    /// The recorded weights in catalog order
    pub fn weights(&self) -> Vec<i32> {
        self.weights.values().copied().collect()
    }
}
