//! LLM prompt engineering for criterion evaluation

use ach_domain::{catalog, CriterionId, SourceMetadata};
use serde_json::{json, Map, Value};

/// Builds prompts asking the service to score every criterion
pub struct PromptBuilder<'a> {
    text: &'a str,
    source: &'a SourceMetadata,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str, source: &'a SourceMetadata) -> Self {
        Self { text, source }
    }

    /// Build the complete evaluation prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EVALUATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Criteria (use only the listed scores):\n");
        for criterion in catalog() {
            prompt.push_str(&format!(
                "\n{} [{}]: {}\n",
                criterion.id.as_str(),
                criterion.category,
                criterion.question
            ));
            for option in criterion.options {
                prompt.push_str(&format!("  {:>3} = {}\n", option.weight, option.label));
            }
        }
        prompt.push('\n');

        prompt.push_str("Source information:\n");
        prompt.push_str(&self.source_block());
        prompt.push('\n');

        prompt.push_str("Evidence to evaluate:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    fn source_block(&self) -> String {
        let fields = [
            ("Origin", &self.source.origin),
            ("Publication", &self.source.publication),
            ("Date", &self.source.date),
            ("Author", &self.source.author),
            ("URL", &self.source.url),
        ];

        let lines: Vec<String> = fields
            .iter()
            .filter_map(|(label, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("- {}: {}\n", label, v))
            })
            .collect();

        if lines.is_empty() {
            "- None provided\n".to_string()
        } else {
            lines.concat()
        }
    }
}

/// JSON schema for the structured response
pub fn response_schema() -> Value {
    let assessment = json!({
        "type": "object",
        "properties": {
            "score": { "type": "integer" },
            "rationale": { "type": "string" }
        },
        "required": ["score", "rationale"]
    });
    let string_list = json!({ "type": "array", "items": { "type": "string" } });

    let mut properties = Map::new();
    let mut required = Vec::new();
    for id in CriterionId::ALL {
        properties.insert(id.as_str().to_string(), assessment.clone());
        required.push(Value::String(id.as_str().to_string()));
    }
    for key in ["recommendations", "warnings"] {
        properties.insert(key.to_string(), string_list.clone());
        required.push(Value::String(key.to_string()));
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

const EVALUATION_INSTRUCTIONS: &str = r#"You are assessing the credibility of a single piece of evidence for an intelligence analyst.
Score the evidence against each of the eight criteria below, choosing exactly one of the listed scores per criterion.

Rules:
- Judge only what the text and source information actually state
- Be conservative: when the evidence is ambiguous between two options, choose the lower score
- A negative score is only for explicit contradiction or known deception
- If the date of the information is not given, score timeliness as unknown
- If no source is identified, score source_type and access_to_information low and say so in warnings
- Give a one-sentence rationale for every score
- Put concrete follow-up collection steps in recommendations
- Put credibility concerns (hedged language, bias, missing attribution) in warnings"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a single JSON object, no additional text):
{
  "source_type": { "score": 0, "rationale": "..." },
  "corroboration": { "score": 0, "rationale": "..." },
  "source_bias": { "score": 0, "rationale": "..." },
  "motivation_to_deceive": { "score": 0, "rationale": "..." },
  "directness": { "score": 0, "rationale": "..." },
  "timeliness": { "score": 0, "rationale": "..." },
  "expertise": { "score": 0, "rationale": "..." },
  "access_to_information": { "score": 0, "rationale": "..." },
  "recommendations": ["..."],
  "warnings": ["..."]
}

Remember: Return ONLY valid JSON with exactly these keys, no markdown code blocks, no explanations."#;
