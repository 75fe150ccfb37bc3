//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::session::Labeled;
use ach_domain::{
    catalog, CriterionId, Hypothesis, HypothesisAnalysis, ImprovementPlan, LegacyJudgment,
    ScaleType,
};
use ach_evaluator::EvidenceAssessment;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an evidence assessment.
    pub fn format_assessment(&self, assessment: &EvidenceAssessment) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&assessment_json(assessment))?),
            OutputFormat::Table => Ok(self.format_assessment_table(assessment)),
            OutputFormat::Quiet => Ok(format!(
                "{} {}",
                assessment.confidence.confidence,
                assessment.rating.letter.as_char()
            )),
        }
    }

    fn format_assessment_table(&self, assessment: &EvidenceAssessment) -> String {
        let evaluation = &assessment.evaluation;

        let mut builder = Builder::default();
        builder.push_record(["Criterion", "Score", "Option", "Rationale"]);
        for a in &evaluation.assessments {
            let option = a
                .criterion
                .criterion()
                .option_for(a.weight)
                .map(|o| o.label)
                .unwrap_or("-");
            builder.push_record([
                a.criterion.as_str().to_string(),
                a.weight.to_string(),
                option.to_string(),
                a.rationale.clone(),
            ]);
        }

        let mut lines = vec![rounded(builder)];

        let confidence = &assessment.confidence;
        let summary = format!(
            "Credibility {} ({}, {}%) rated {}: {}",
            confidence.confidence,
            confidence.level.as_str(),
            confidence.percentage,
            assessment.rating.letter.as_char(),
            assessment.rating.description
        );
        lines.push(self.colorize(&summary, rating_color(confidence.confidence)));

        for warning in &evaluation.warnings {
            lines.push(self.warning(warning));
        }
        for recommendation in &evaluation.recommendations {
            lines.push(self.info(recommendation));
        }

        lines.join("\n")
    }

    /// Format ranked hypotheses.
    pub fn format_analysis(
        &self,
        hypotheses: &[Labeled<Hypothesis>],
        analyses: &[HypothesisAnalysis],
    ) -> Result<String> {
        let lookup = |a: &HypothesisAnalysis| hypotheses.iter().find(|h| h.item.id == a.hypothesis_id);

        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = analyses
                    .iter()
                    .enumerate()
                    .map(|(rank, a)| {
                        let hypothesis = lookup(a);
                        serde_json::json!({
                            "rank": rank + 1,
                            "id": a.hypothesis_id.to_string(),
                            "label": hypothesis.map(|h| h.label.as_str()),
                            "text": hypothesis.map(|h| h.item.text.as_str()),
                            "total_score": a.total_score,
                            "weighted_score": a.weighted_score,
                            "supporting_evidence": a.supporting_evidence,
                            "contradicting_evidence": a.contradicting_evidence,
                            "neutral_evidence": a.neutral_evidence,
                            "diagnostic_value": a.diagnostic_value,
                            "confidence_level": a.confidence_level.as_str(),
                            "rejected": a.rejected,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(analyses
                .iter()
                .map(|a| {
                    lookup(a)
                        .map(|h| h.label.clone())
                        .unwrap_or_else(|| a.hypothesis_id.to_string())
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if analyses.is_empty() {
                    return Ok(self.colorize("No hypotheses to rank.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "#", "Hypothesis", "Weighted", "Total", "+/-/0", "Diagnostic", "Confidence",
                    "Status",
                ]);
                for (rank, a) in analyses.iter().enumerate() {
                    let name = lookup(a)
                        .map(|h| format!("{}: {}", h.label, h.item.text))
                        .unwrap_or_else(|| a.hypothesis_id.to_string());
                    let status = if a.rejected {
                        self.colorize("REJECTED", "red")
                    } else {
                        self.colorize("open", "green")
                    };
                    builder.push_record([
                        (rank + 1).to_string(),
                        name,
                        format!("{:.2}", a.weighted_score),
                        a.total_score.to_string(),
                        format!(
                            "{}/{}/{}",
                            a.supporting_evidence, a.contradicting_evidence, a.neutral_evidence
                        ),
                        format!("{:.2}", a.diagnostic_value),
                        a.confidence_level.as_str().to_string(),
                        status,
                    ]);
                }
                Ok(rounded(builder))
            }
        }
    }

    /// Format an improvement plan.
    pub fn format_plan(&self, plan: &ImprovementPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let priorities: Vec<serde_json::Value> = plan
                    .priorities
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "criterion": p.criterion.as_str(),
                            "question": p.question,
                            "current_score": p.current_score,
                            "target_score": p.target_score,
                            "impact": p.impact.as_str(),
                            "actions": p.actions,
                        })
                    })
                    .collect();
                let json = serde_json::json!({
                    "average_score": plan.average_score,
                    "strength": plan.strength.as_str(),
                    "strategy": plan.strategy,
                    "priorities": priorities,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(plan
                .priorities
                .iter()
                .map(|p| p.criterion.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut lines = vec![format!(
                    "Evidence strength: {} (average {:.2})",
                    plan.strength.as_str(),
                    plan.average_score
                )];
                lines.push(self.info(plan.strategy));

                if plan.priorities.is_empty() {
                    lines.push(self.success("No criterion needs strengthening."));
                    return Ok(lines.join("\n"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Criterion", "Impact", "Current", "Target", "Actions"]);
                for p in &plan.priorities {
                    builder.push_record([
                        p.criterion.as_str().to_string(),
                        p.impact.as_str().to_string(),
                        p.current_score.to_string(),
                        p.target_score.to_string(),
                        p.actions.join("\n"),
                    ]);
                }
                lines.push(rounded(builder));
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the criterion catalog.
    pub fn format_criteria(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = catalog()
                    .iter()
                    .map(|c| {
                        let options: Vec<serde_json::Value> = c
                            .options
                            .iter()
                            .map(|o| serde_json::json!({ "label": o.label, "weight": o.weight }))
                            .collect();
                        serde_json::json!({
                            "id": c.id.as_str(),
                            "category": c.category,
                            "question": c.question,
                            "options": options,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(CriterionId::ALL
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Criterion", "Category", "Question", "Options"]);
                for c in catalog() {
                    let options = c
                        .options
                        .iter()
                        .map(|o| format!("{:>3}  {}", o.weight, o.label))
                        .collect::<Vec<_>>()
                        .join("\n");
                    builder.push_record([
                        c.id.as_str().to_string(),
                        c.category.to_string(),
                        c.question.to_string(),
                        options,
                    ]);
                }
                Ok(rounded(builder))
            }
        }
    }

    /// Format a legacy judgment conversion.
    pub fn format_conversion(
        &self,
        judgment: LegacyJudgment,
        scale: ScaleType,
        value: i32,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "judgment": judgment.as_str(),
                "scale": scale.as_str(),
                "value": value,
            }))?),
            OutputFormat::Quiet => Ok(value.to_string()),
            OutputFormat::Table => Ok(format!(
                "'{}' on the {} scale is {}",
                judgment.as_str(),
                scale.as_str(),
                value
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn rounded(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn rating_color(confidence: i32) -> &'static str {
    match confidence {
        c if c >= 7 => "green",
        c if c >= 4 => "cyan",
        c if c >= 2 => "yellow",
        _ => "red",
    }
}

fn assessment_json(assessment: &EvidenceAssessment) -> serde_json::Value {
    let evaluation = &assessment.evaluation;
    let criteria: Vec<serde_json::Value> = evaluation
        .assessments
        .iter()
        .map(|a| {
            serde_json::json!({
                "criterion": a.criterion.as_str(),
                "score": a.weight,
                "option": a.criterion.criterion().option_for(a.weight).map(|o| o.label),
                "rationale": a.rationale,
            })
        })
        .collect();

    serde_json::json!({
        "confidence": assessment.confidence.confidence,
        "level": assessment.confidence.level.as_str(),
        "percentage": assessment.confidence.percentage,
        "rating": {
            "letter": assessment.rating.letter.as_char().to_string(),
            "description": assessment.rating.description,
        },
        "criteria": criteria,
        "recommendations": evaluation.recommendations,
        "warnings": evaluation.warnings,
    })
}
