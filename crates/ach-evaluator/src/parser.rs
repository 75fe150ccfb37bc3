//! Parse service output into a criterion evaluation
//!
//! Parsing is strict: the response must be one JSON object with exactly the
//! eight criterion keys plus `recommendations` and `warnings`, and every
//! score must be a legal option of its criterion. Anything else is an error,
//! which the evaluator answers with its heuristic fallback.

use crate::error::EvaluatorError;
use crate::types::{CriterionAssessment, CriterionEvaluation};
use ach_domain::CriterionId;
use serde_json::{Map, Value};

const LIST_KEYS: [&str; 2] = ["recommendations", "warnings"];

/// Parse a service response into an evaluation
pub fn parse_evaluation_response(response: &str) -> Result<CriterionEvaluation, EvaluatorError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| EvaluatorError::InvalidFormat("Expected JSON object".to_string()))?;

    if let Some(unexpected) = obj
        .keys()
        .find(|k| CriterionId::parse(k).is_none() && !LIST_KEYS.contains(&k.as_str()))
    {
        return Err(EvaluatorError::InvalidFormat(format!(
            "Unexpected key '{}'",
            unexpected
        )));
    }

    let assessments = CriterionId::ALL
        .into_iter()
        .map(|criterion| parse_assessment(obj, criterion))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CriterionEvaluation {
        assessments,
        recommendations: parse_string_list(obj, "recommendations")?,
        warnings: parse_string_list(obj, "warnings")?,
    })
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, EvaluatorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(EvaluatorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence line and a closing fence if present
        let end = if lines[lines.len() - 1].trim() == "```" {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_assessment(
    obj: &Map<String, Value>,
    criterion: CriterionId,
) -> Result<CriterionAssessment, EvaluatorError> {
    let entry = obj
        .get(criterion.as_str())
        .ok_or(EvaluatorError::MissingCriterion(criterion))?
        .as_object()
        .ok_or_else(|| {
            EvaluatorError::InvalidFormat(format!("'{}' is not an object", criterion))
        })?;

    let score = entry
        .get("score")
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            EvaluatorError::InvalidFormat(format!("Missing or invalid score for '{}'", criterion))
        })?;

    let weight = i32::try_from(score)
        .ok()
        .filter(|w| criterion.criterion().is_legal_weight(*w))
        .ok_or(EvaluatorError::IllegalWeight {
            criterion,
            weight: score,
        })?;

    let rationale = entry
        .get("rationale")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            EvaluatorError::InvalidFormat(format!("Missing rationale for '{}'", criterion))
        })?
        .to_string();

    Ok(CriterionAssessment {
        criterion,
        weight,
        rationale,
    })
}

fn parse_string_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, EvaluatorError> {
    let items = obj
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| EvaluatorError::InvalidFormat(format!("Missing or invalid '{}'", key)))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                EvaluatorError::InvalidFormat(format!("Non-string entry in '{}'", key))
            })
        })
        .collect()
}
