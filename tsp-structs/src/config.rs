use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Instances that historically use the ATT pseudo-Euclidean distance.
pub const PSEUDO_EUCLIDEAN_INSTANCES: &[&str] = &["att48.tsp"];

pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// How a Euclidean distance is turned into an integer edge weight.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// `trunc(sqrt(dx² + dy²))`
    Euclidean,
    /// `ceil(sqrt((dx² + dy²) / 10))`
    PseudoEuclidean,
}

impl RoundingRule {
    pub fn to_string(self) -> String {
        match self {
            RoundingRule::Euclidean => "euclidean".to_string(),
            RoundingRule::PseudoEuclidean => "pseudo_euclidean".to_string(),
        }
    }

    pub fn from_string(s: String) -> Result<Self, String> {
        match s.as_str() {
            "euclidean" => Ok(RoundingRule::Euclidean),
            "pseudo_euclidean" => Ok(RoundingRule::PseudoEuclidean),
            _ => Err(format!("Invalid RoundingRule '{}'", s)),
        }
    }
}

impl Default for RoundingRule {
    fn default() -> Self {
        RoundingRule::Euclidean
    }
}

/// Layout of a solution log.
///
/// `Legacy` records are three lines (name, claimed length, tour). `Strict`
/// records carry one more reserved line that is skipped.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Legacy,
    Strict,
}

impl LogFormat {
    pub fn lines_per_record(self) -> usize {
        match self {
            LogFormat::Legacy => 3,
            LogFormat::Strict => 4,
        }
    }

    pub fn to_string(self) -> String {
        match self {
            LogFormat::Legacy => "legacy".to_string(),
            LogFormat::Strict => "strict".to_string(),
        }
    }

    pub fn from_string(s: String) -> Result<Self, String> {
        match s.as_str() {
            "legacy" => Ok(LogFormat::Legacy),
            "strict" => Ok(LogFormat::Strict),
            _ => Err(format!("Invalid LogFormat '{}'", s)),
        }
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Strict
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_rounding_overrides() -> BTreeMap<String, RoundingRule> {
    PSEUDO_EUCLIDEAN_INSTANCES
        .iter()
        .map(|name| (name.to_string(), RoundingRule::PseudoEuclidean))
        .collect()
}

serializable_struct_with_getters! {
    VerifierConfig {
        #[serde(default = "default_tolerance")]
        tolerance: f64,
        #[serde(default)]
        log_format: LogFormat,
        #[serde(default)]
        default_rounding: RoundingRule,
        #[serde(default = "default_rounding_overrides")]
        rounding_overrides: BTreeMap<String, RoundingRule>,
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            log_format: LogFormat::default(),
            default_rounding: RoundingRule::default(),
            rounding_overrides: default_rounding_overrides(),
        }
    }
}

impl VerifierConfig {
    /// Rounding rule for an instance, matched on the full name first and then
    /// on the name without its extension.
    pub fn rounding_for(&self, instance_name: &str) -> RoundingRule {
        if let Some(rule) = self.rounding_overrides.get(instance_name) {
            return *rule;
        }
        let stem = Path::new(instance_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        stem.and_then(|stem| {
            self.rounding_overrides
                .iter()
                .find(|(name, _)| {
                    name.as_str() == stem
                        || Path::new(name.as_str())
                            .file_stem()
                            .map_or(false, |s| s.to_string_lossy() == stem)
                })
                .map(|(_, rule)| *rule)
        })
        .unwrap_or(self.default_rounding)
    }

    pub fn with_override(mut self, instance_name: &str, rule: RoundingRule) -> Self {
        self.rounding_overrides
            .insert(instance_name.to_string(), rule);
        self
    }
}
