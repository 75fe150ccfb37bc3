//! Deterministic keyword fallback
//!
//! Scores every criterion from simple textual signals and the supplied
//! source metadata. It needs no external service and always produces a
//! complete, legal evaluation. When a signal is ambiguous the lower option
//! wins.

use crate::types::{CriterionAssessment, CriterionEvaluation, EvaluationRequest};
use ach_domain::{CriterionId, SourceMetadata};
use chrono::{DateTime, NaiveDate, Utc};

// Phrases are matched on whole words of the normalized text
const WITNESS: &[&str] = &[
    "i witnessed",
    "i personally",
    "i saw",
    "i was there",
    "i was present",
    "i observed",
    "i attended",
    "i participated",
    "eyewitness",
    "eye witness",
    "firsthand",
    "first hand",
];
const DOCUMENT: &[&str] = &[
    "document",
    "documents",
    "official record",
    "court filing",
    "court records",
    "transcript",
    "registry",
    "manifest",
    "ledger",
    "footage",
    "recording",
];
const ANONYMOUS: &[&str] = &[
    "anonymous",
    "unnamed",
    "unidentified source",
    "sources say",
    "sources said",
];
const HEDGING: &[&str] = &[
    "allegedly",
    "alleged",
    "reportedly",
    "rumored",
    "rumoured",
    "supposedly",
    "purportedly",
    "it is said",
    "it is believed",
    "unconfirmed",
    "unverified",
];
const HEARSAY: &[&str] = &[
    "heard that",
    "told me",
    "according to",
    "word is",
    "secondhand",
    "second hand",
    "rumor",
    "rumour",
];
const CONTRADICTION: &[&str] = &[
    "contradicted",
    "contradicts",
    "contradictory",
    "disputed",
    "denied",
    "refuted",
    "debunked",
    "conflicting",
    "inconsistent with",
];
const CONFIRMATION: &[&str] = &["confirmed", "corroborated", "verified", "substantiated"];
const PARTIAL: &[&str] = &[
    "partially confirmed",
    "partially corroborated",
    "partly confirmed",
    "partly corroborated",
];
const INDEPENDENT: &[&str] = &["independent", "independently"];
const MULTIPLE: &[&str] = &[
    "two", "three", "four", "five", "several", "multiple", "many", "numerous", "various", "both",
];
const DECEPTION: &[&str] = &[
    "lied",
    "liar",
    "caught lying",
    "fabricated",
    "falsified",
    "forged",
    "disinformation",
    "propaganda",
    "history of deception",
    "deceived",
];
const INTEREST: &[&str] = &[
    "paid",
    "stands to gain",
    "competitor",
    "rival",
    "lawsuit",
    "lobbyist",
];
const BIAS: &[&str] = &[
    "partisan",
    "biased",
    "advocacy",
    "activist",
    "opinion",
    "editorial",
    "spokesperson",
    "campaign",
];
const EXPERT: &[&str] = &[
    "expert",
    "professor",
    "dr",
    "scientist",
    "researcher",
    "specialist",
    "physician",
    "engineer",
    "forensic",
];
const INSIDER: &[&str] = &["insider", "official", "employee", "staff member", "officer"];

/// Date formats accepted for the source date, besides RFC 3339
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y", "%B %d %Y"];

/// Textual and metadata signals found in one request
#[derive(Debug)]
struct Signals {
    witness: bool,
    document: bool,
    anonymous: bool,
    hedged: bool,
    hearsay: bool,
    contradicted: bool,
    confirmed: bool,
    partially_confirmed: bool,
    independent_multiple: bool,
    deception: bool,
    interest: bool,
    bias: bool,
    expert: bool,
    insider: bool,
    attributed: bool,
    publication: bool,
}

impl Signals {
    fn detect(text: &str, source: &SourceMetadata) -> Self {
        let normalized = normalize(text);
        let has = |phrases: &[&str]| phrases.iter().any(|p| normalized.contains(&format!(" {} ", p)));

        let witness = has(WITNESS);
        let document = has(DOCUMENT);
        let independent = has(INDEPENDENT);

        Self {
            witness,
            document,
            anonymous: has(ANONYMOUS),
            hedged: has(HEDGING),
            hearsay: has(HEARSAY),
            contradicted: has(CONTRADICTION),
            confirmed: has(CONFIRMATION),
            partially_confirmed: has(PARTIAL),
            independent_multiple: independent && has(MULTIPLE),
            deception: has(DECEPTION),
            interest: has(INTEREST),
            bias: has(BIAS),
            expert: has(EXPERT),
            insider: has(INSIDER),
            attributed: source.has_attribution() || witness || document,
            publication: source
                .publication
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty()),
        }
    }
}

/// Lowercase, replace punctuation with spaces, pad so every word is space-delimited
fn normalize(text: &str) -> String {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}

#[derive(Default)]
struct Notes {
    recommendations: Vec<String>,
    warnings: Vec<String>,
}

impl Notes {
    fn recommend(&mut self, text: &str) {
        self.recommendations.push(text.to_string());
    }

    fn warn(&mut self, text: &str) {
        self.warnings.push(text.to_string());
    }
}

/// Score every criterion without the evaluation service
///
/// `now` is the evaluation time used for the timeliness rule.
pub fn evaluate_heuristically(request: &EvaluationRequest, now: DateTime<Utc>) -> CriterionEvaluation {
    let signals = Signals::detect(&request.text, &request.source);
    let mut notes = Notes::default();

    if !signals.attributed {
        notes.warn("No source attribution was provided; credibility cannot be properly assessed.");
    }

    let assessments = CriterionId::ALL
        .into_iter()
        .map(|criterion| {
            let (weight, rationale) = match criterion {
                CriterionId::SourceType => source_type(&signals, &mut notes),
                CriterionId::Corroboration => corroboration(&signals, &mut notes),
                CriterionId::SourceBias => source_bias(&signals, &mut notes),
                CriterionId::MotivationToDeceive => motivation_to_deceive(&signals, &mut notes),
                CriterionId::Directness => directness(&signals, &mut notes),
                CriterionId::Timeliness => timeliness(request.source.date.as_deref(), now, &mut notes),
                CriterionId::Expertise => expertise(&signals),
                CriterionId::AccessToInformation => access_to_information(&signals),
            };
            CriterionAssessment {
                criterion,
                weight,
                rationale,
            }
        })
        .collect();

    CriterionEvaluation {
        assessments,
        recommendations: notes.recommendations,
        warnings: notes.warnings,
    }
}

fn source_type(s: &Signals, notes: &mut Notes) -> (i32, String) {
    if s.witness {
        (13, "The text describes a direct eyewitness or participant account.".into())
    } else if s.document {
        (8, "The text refers to an official record or primary document.".into())
    } else if s.anonymous || s.hedged {
        notes.recommend("Identify who originally reported this information.");
        (1, "The source is anonymous or the claim is hedged.".into())
    } else if !s.attributed {
        notes.recommend("Identify who originally reported this information.");
        (0, "No source is identified.".into())
    } else if s.publication {
        (5, "The information is attributed to a named publication.".into())
    } else {
        (3, "The information appears to be secondary reporting.".into())
    }
}

fn corroboration(s: &Signals, notes: &mut Notes) -> (i32, String) {
    if s.contradicted {
        notes.warn("The text indicates the information is contradicted by other sources.");
        (-3, "The text reports contradicting accounts.".into())
    } else if s.independent_multiple {
        (13, "The text cites confirmation by multiple independent sources.".into())
    } else if s.partially_confirmed {
        (5, "The text reports only partial corroboration.".into())
    } else if s.confirmed {
        (8, "The text cites confirmation by another source.".into())
    } else {
        notes.recommend("Search for independent sources that confirm this information.");
        (1, "No corroboration is mentioned.".into())
    }
}

fn source_bias(s: &Signals, notes: &mut Notes) -> (i32, String) {
    if s.hedged {
        notes.warn("Hedging language such as 'allegedly' or 'reportedly' suggests the claim is unverified.");
        (1, "The claim is presented with hedging language.".into())
    } else if s.bias {
        (3, "The text suggests a partisan or interested source.".into())
    } else {
        (5, "No clear bias is indicated, but none can be ruled out.".into())
    }
}

fn motivation_to_deceive(s: &Signals, notes: &mut Notes) -> (i32, String) {
    if s.deception {
        notes.warn("The text indicates the source has been deceptive before.");
        (-5, "The text refers to past deception.".into())
    } else if s.interest {
        (3, "The source may gain from the information being believed.".into())
    } else {
        (5, "No motivation to deceive is apparent from the text alone.".into())
    }
}

fn directness(s: &Signals, notes: &mut Notes) -> (i32, String) {
    if s.witness {
        (13, "The account is a direct observation.".into())
    } else if s.document {
        (8, "The account rests on documentary evidence.".into())
    } else if s.hearsay || s.hedged {
        notes.recommend("Seek a firsthand account of the event.");
        (1, "The account is hearsay or rumor.".into())
    } else {
        (3, "The link to the event appears indirect.".into())
    }
}

fn timeliness(date: Option<&str>, now: DateTime<Utc>, notes: &mut Notes) -> (i32, String) {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        notes.recommend("Determine the date of this information to assess its timeliness.");
        return (1, "No date was provided.".into());
    };

    let Some(date) = parse_date(raw) else {
        notes.warn(&format!("Could not interpret the source date '{}'.", raw));
        notes.recommend("Determine the date of this information to assess its timeliness.");
        return (1, format!("The date '{}' could not be interpreted.", raw));
    };

    let age = (now.date_naive() - date).num_days();
    if age < 0 {
        notes.warn(&format!("The source date {} lies in the future.", date));
        notes.recommend("Determine the date of this information to assess its timeliness.");
        return (1, format!("The date {} is later than the evaluation date.", date));
    }

    let weight = match age {
        d if d <= 7 => 13,
        d if d <= 30 => 8,
        d if d <= 365 => 5,
        _ => 3,
    };
    (weight, format!("The information is dated {} ({} days old).", date, age))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn expertise(s: &Signals) -> (i32, String) {
    if s.expert {
        (8, "The source is described as having professional expertise.".into())
    } else if s.witness {
        (3, "The source is an eyewitness with no stated expertise.".into())
    } else {
        (1, "The source's expertise is unknown.".into())
    }
}

fn access_to_information(s: &Signals) -> (i32, String) {
    if s.witness {
        (13, "The source was present and had direct access.".into())
    } else if s.insider {
        (8, "The source appears to hold an inside position.".into())
    } else if s.document {
        (5, "Access is plausible through the cited records.".into())
    } else if s.hedged || s.anonymous || !s.attributed {
        (1, "How the source obtained the information is unclear.".into())
    } else {
        (3, "The source's access appears limited.".into())
    }
}
