//! Consistency scales
//!
//! A session uses one scale for every consistency judgment. Mixing scales
//! within one hypothesis's score set is not supported.

/// Legal values on the logarithmic consistency ladder
pub const LOGARITHMIC_VALUES: [i32; 11] = [-13, -8, -5, -3, -1, 0, 1, 3, 5, 8, 13];

/// Scale on which consistency judgments are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleType {
    /// Fibonacci-like ladder from -13 to 13
    #[default]
    Logarithmic,
    /// Integers from -5 to 5
    Linear,
}

impl ScaleType {
    /// Get the scale name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleType::Logarithmic => "logarithmic",
            ScaleType::Linear => "linear",
        }
    }

    /// Parse a scale from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "logarithmic" => Some(ScaleType::Logarithmic),
            "linear" => Some(ScaleType::Linear),
            _ => None,
        }
    }

    /// Largest magnitude a consistency value can take
    pub fn max_value(&self) -> i32 {
        match self {
            ScaleType::Logarithmic => 13,
            ScaleType::Linear => 5,
        }
    }

    /// Weighted score below which a hypothesis is rejected
    pub fn rejection_threshold(&self) -> f64 {
        match self {
            ScaleType::Logarithmic => -20.0,
            ScaleType::Linear => -10.0,
        }
    }

    /// Whether a consistency value is legal on this scale
    pub fn is_valid_value(&self, value: i32) -> bool {
        match self {
            ScaleType::Logarithmic => LOGARITHMIC_VALUES.contains(&value),
            ScaleType::Linear => (-5..=5).contains(&value),
        }
    }
}

impl std::str::FromStr for ScaleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid scale: {}", s))
    }
}

/// Four-valued judgment used by records that predate numeric scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyJudgment {
    /// Evidence supports the hypothesis
    Supports,
    /// Evidence contradicts the hypothesis
    Contradicts,
    /// Evidence neither supports nor contradicts
    Neutral,
    /// Evidence does not bear on the hypothesis
    NotApplicable,
}

impl LegacyJudgment {
    /// Parse a legacy judgment string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "supports" => Some(LegacyJudgment::Supports),
            "contradicts" => Some(LegacyJudgment::Contradicts),
            "neutral" => Some(LegacyJudgment::Neutral),
            "not_applicable" => Some(LegacyJudgment::NotApplicable),
            _ => None,
        }
    }

    /// Get the judgment as its stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyJudgment::Supports => "supports",
            LegacyJudgment::Contradicts => "contradicts",
            LegacyJudgment::Neutral => "neutral",
            LegacyJudgment::NotApplicable => "not_applicable",
        }
    }

    /// Numeric consistency value for this judgment on the given scale
    ///
    /// Support and contradiction map to the middle of the scale rather than
    /// its extremes since a legacy record carries no intensity.
    pub fn to_consistency(&self, scale: ScaleType) -> i32 {
        let magnitude = match scale {
            ScaleType::Logarithmic => 5,
            ScaleType::Linear => 3,
        };
        match self {
            LegacyJudgment::Supports => magnitude,
            LegacyJudgment::Contradicts => -magnitude,
            LegacyJudgment::Neutral | LegacyJudgment::NotApplicable => 0,
        }
    }
}

impl std::str::FromStr for LegacyJudgment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid legacy judgment: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_parse() {
        assert_eq!(ScaleType::parse("logarithmic"), Some(ScaleType::Logarithmic));
        assert_eq!(ScaleType::parse("LINEAR"), Some(ScaleType::Linear));
        assert_eq!(ScaleType::parse("log"), None);
        assert_eq!(ScaleType::default(), ScaleType::Logarithmic);
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(ScaleType::Logarithmic.max_value(), 13);
        assert_eq!(ScaleType::Linear.max_value(), 5);
        assert_eq!(ScaleType::Logarithmic.rejection_threshold(), -20.0);
        assert_eq!(ScaleType::Linear.rejection_threshold(), -10.0);
    }

    #[test]
    fn test_valid_values() {
        assert!(ScaleType::Logarithmic.is_valid_value(-13));
        assert!(ScaleType::Logarithmic.is_valid_value(8));
        assert!(!ScaleType::Logarithmic.is_valid_value(4));
        assert!(!ScaleType::Logarithmic.is_valid_value(21));

        assert!(ScaleType::Linear.is_valid_value(-5));
        assert!(ScaleType::Linear.is_valid_value(4));
        assert!(!ScaleType::Linear.is_valid_value(8));
    }

    #[test]
    fn test_legacy_conversion() {
        let log = ScaleType::Logarithmic;
        let lin = ScaleType::Linear;
        assert_eq!(LegacyJudgment::Supports.to_consistency(log), 5);
        assert_eq!(LegacyJudgment::Contradicts.to_consistency(log), -5);
        assert_eq!(LegacyJudgment::Supports.to_consistency(lin), 3);
        assert_eq!(LegacyJudgment::Contradicts.to_consistency(lin), -3);
        assert_eq!(LegacyJudgment::Neutral.to_consistency(log), 0);
        assert_eq!(LegacyJudgment::NotApplicable.to_consistency(lin), 0);
    }

    #[test]
    fn test_legacy_conversion_stays_on_scale() {
        for judgment in [
            LegacyJudgment::Supports,
            LegacyJudgment::Contradicts,
            LegacyJudgment::Neutral,
            LegacyJudgment::NotApplicable,
        ] {
            for scale in [ScaleType::Logarithmic, ScaleType::Linear] {
                assert!(scale.is_valid_value(judgment.to_consistency(scale)));
            }
        }
    }

    #[test]
    fn test_legacy_parse() {
        assert_eq!(LegacyJudgment::parse("not_applicable"), Some(LegacyJudgment::NotApplicable));
        assert!("maybe".parse::<LegacyJudgment>().is_err());
    }
}
