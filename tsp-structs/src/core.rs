use crate::{config::RoundingRule, serializable_struct_with_getters};
use serde::{Deserialize, Serialize};

/// Position of one node. Fractional input is truncated toward zero.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Computed in `f64` from a widened difference, so no pair of positions overflows.
    pub fn squared_distance(&self, other: &Coordinate) -> f64 {
        let dx = (self.x as i128 - other.x as i128) as f64;
        let dy = (self.y as i128 - other.y as i128) as f64;
        dx * dx + dy * dy
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

serializable_struct_with_getters! {
    SolutionRecord {
        name: String,
        claimed_length: f64,
        tour: Vec<usize>,
    }
}

/// Outcome of comparing a claimed tour length to the recomputed one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LengthCheck {
    Matches {
        claimed: f64,
        recomputed: u64,
        difference: f64,
    },
    Mismatch {
        claimed: f64,
        recomputed: u64,
        difference: f64,
    },
    /// The tour references nodes outside the matrix, or is empty.
    NotApplicable { claimed: f64 },
}

impl LengthCheck {
    pub fn claimed(&self) -> f64 {
        match self {
            LengthCheck::Matches { claimed, .. }
            | LengthCheck::Mismatch { claimed, .. }
            | LengthCheck::NotApplicable { claimed } => *claimed,
        }
    }
}

serializable_struct_with_getters! {
    VerificationResult {
        is_hamiltonian: bool,
        length: LengthCheck,
    }
}

impl VerificationResult {
    pub fn length_matches(&self) -> bool {
        matches!(self.length, LengthCheck::Matches { .. })
    }

    pub fn recomputed_length(&self) -> Option<u64> {
        match self.length {
            LengthCheck::Matches { recomputed, .. } | LengthCheck::Mismatch { recomputed, .. } => {
                Some(recomputed)
            }
            LengthCheck::NotApplicable { .. } => None,
        }
    }

    pub fn difference(&self) -> Option<f64> {
        match self.length {
            LengthCheck::Matches { difference, .. } | LengthCheck::Mismatch { difference, .. } => {
                Some(difference)
            }
            LengthCheck::NotApplicable { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_hamiltonian && self.length_matches()
    }
}

serializable_struct_with_getters! {
    RecordReport {
        name: String,
        // Set when a tour of the wrong length ends the record's checks early.
        short_circuited: bool,
        result: Option<VerificationResult>,
        error: Option<String>,
    }
}

impl RecordReport {
    pub fn verified(name: String, result: VerificationResult, short_circuited: bool) -> Self {
        Self {
            name,
            short_circuited,
            result: Some(result),
            error: None,
        }
    }

    pub fn malformed(name: String, error: String) -> Self {
        Self {
            name,
            short_circuited: false,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result.as_ref().map_or(false, |r| r.is_valid())
    }
}

serializable_struct_with_getters! {
    InstanceReport {
        name: String,
        rounding: RoundingRule,
        num_nodes: usize,
        records: Vec<RecordReport>,
    }
}

impl InstanceReport {
    pub fn num_valid(&self) -> usize {
        self.records.iter().filter(|r| r.is_valid()).count()
    }

    pub fn all_valid(&self) -> bool {
        self.records.iter().all(|r| r.is_valid())
    }
}
