//! CLI command definitions and argument parsing.

use ach_domain::{CriterionId, ScaleType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ACH CLI - Score evidence credibility and rank competing hypotheses.
#[derive(Debug, Parser)]
#[command(name = "ach")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "ACH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (scores only)
    Quiet,
}

/// Consistency scale options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScaleArg {
    /// -13..13 Fibonacci-like scale
    Logarithmic,
    /// -5..5 integer scale
    Linear,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Propose criterion scores and a credibility rating for evidence text
    Evaluate(EvaluateArgs),

    /// Rank the hypotheses of a session file
    Analyze(AnalyzeArgs),

    /// Suggest which criteria to strengthen
    Advise(AdviseArgs),

    /// List the credibility criteria and their options
    Criteria,

    /// Check whether the evaluation service is reachable
    Status,

    /// Convert a legacy judgment to a consistency value
    Convert(ConvertArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Evidence text
    pub text: Option<String>,

    /// Read evidence text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Read evidence text from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub stdin: bool,

    /// Origin label (e.g. "press", "court filing")
    #[arg(long)]
    pub origin: Option<String>,

    /// Publication or outlet
    #[arg(long)]
    pub publication: Option<String>,

    /// Publication or observation date
    #[arg(long)]
    pub date: Option<String>,

    /// Author or speaker
    #[arg(long)]
    pub author: Option<String>,

    /// Link to the original
    #[arg(long)]
    pub url: Option<String>,

    /// Skip the evaluation service and use the keyword heuristic
    #[arg(long)]
    pub offline: bool,

    /// Also print an improvement plan
    #[arg(long)]
    pub advise: bool,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Session file (JSON)
    pub session: PathBuf,

    /// Evaluate evidence that carries no criterion scores before ranking
    #[arg(long)]
    pub evaluate: bool,

    /// Skip the evaluation service when evaluating
    #[arg(long, requires = "evaluate")]
    pub offline: bool,

    /// Override the scale declared in the session file
    #[arg(long, value_enum)]
    pub scale: Option<ScaleArg>,
}

/// Arguments for the advise command.
#[derive(Debug, Parser)]
pub struct AdviseArgs {
    /// Criterion score as name=weight (repeatable)
    #[arg(short = 'c', long = "criterion", value_parser = parse_criterion_weight)]
    pub criteria: Vec<(CriterionId, i32)>,

    /// Session file to read criterion scores from
    #[arg(long, conflicts_with = "criteria", requires = "evidence")]
    pub session: Option<PathBuf>,

    /// Evidence label within the session file
    #[arg(long, requires = "session")]
    pub evidence: Option<String>,
}

/// Arguments for the convert command.
#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Legacy judgment (supports, contradicts, neutral, not_applicable)
    pub judgment: String,

    /// Target scale
    #[arg(long, value_enum, default_value = "logarithmic")]
    pub scale: ScaleArg,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Evaluation service model name
        #[arg(long)]
        model: Option<String>,

        /// Evaluation service endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_criterion_weight(s: &str) -> Result<(CriterionId, i32), String> {
    let (name, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=weight, got '{}'", s))?;
    let criterion = CriterionId::parse(name.trim())
        .ok_or_else(|| format!("unknown criterion '{}'", name.trim()))?;
    let weight = weight
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("weight for {} must be an integer", criterion))?;
    Ok((criterion, weight))
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ScaleArg> for ScaleType {
    fn from(scale: ScaleArg) -> Self {
        match scale {
            ScaleArg::Logarithmic => ScaleType::Logarithmic,
            ScaleArg::Linear => ScaleType::Linear,
        }
    }
}
