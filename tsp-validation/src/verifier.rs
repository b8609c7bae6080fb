use crate::{
    distance::{build_distance_matrix, DistanceMatrix},
    error::ValidationResult,
    instance::Instance,
    solution_log::parse_solution_log,
};
use logging_timer::time;
use tsp_structs::{
    config::{LogFormat, VerifierConfig},
    core::{InstanceReport, LengthCheck, RecordReport, SolutionRecord, VerificationResult},
};

/// True when `tour` visits each of the `size` nodes exactly once.
pub fn is_hamiltonian(tour: &[usize], size: usize) -> bool {
    if tour.len() != size {
        return false;
    }
    let mut seen = vec![false; size];
    for &node in tour {
        if node >= size || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}

/// Length of `tour` as a closed cycle, including the edge back to the start.
///
/// `None` if the tour is empty or references a node outside the matrix.
/// The sum saturates at `u64::MAX`.
pub fn tour_length(tour: &[usize], matrix: &DistanceMatrix) -> Option<u64> {
    let first = *tour.first()?;
    let last = *tour.last()?;
    let mut total = matrix.try_get(last, first)?;
    for w in tour.windows(2) {
        total = total.saturating_add(matrix.try_get(w[0], w[1])?);
    }
    Some(total)
}

/// Runs both checks on a tour. Neither check suppresses the other.
///
/// The length matches when `|recomputed - claimed| < tolerance`, evaluated on
/// the `f64` difference. A claim of `14.1` against `14` therefore differs by
/// `0.0999..` and matches under a tolerance of `0.1`.
pub fn verify(
    tour: &[usize],
    claimed_length: f64,
    matrix: &DistanceMatrix,
    tolerance: f64,
) -> VerificationResult {
    let length = match tour_length(tour, matrix) {
        Some(recomputed) => {
            let difference = (recomputed as f64 - claimed_length).abs();
            if difference < tolerance {
                LengthCheck::Matches {
                    claimed: claimed_length,
                    recomputed,
                    difference,
                }
            } else {
                LengthCheck::Mismatch {
                    claimed: claimed_length,
                    recomputed,
                    difference,
                }
            }
        }
        None => LengthCheck::NotApplicable {
            claimed: claimed_length,
        },
    };
    VerificationResult {
        is_hamiltonian: is_hamiltonian(tour, matrix.size()),
        length,
    }
}

/// An instance with its distance matrix, ready to check any number of records.
pub struct InstanceVerifier<'a> {
    config: &'a VerifierConfig,
    instance: Instance,
    matrix: DistanceMatrix,
}

impl<'a> InstanceVerifier<'a> {
    pub fn new(instance: Instance, config: &'a VerifierConfig) -> Self {
        let matrix = build_distance_matrix(instance.name(), instance.coordinates(), config);
        Self {
            config,
            instance,
            matrix,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn verify_record(&self, record: &SolutionRecord) -> RecordReport {
        let result = verify(
            &record.tour,
            record.claimed_length,
            &self.matrix,
            self.config.tolerance,
        );
        let short_circuited = self.config.log_format == LogFormat::Legacy
            && record.tour.len() < self.matrix.size();
        log::debug!(
            "{} / {}: hamiltonian={} length_matches={}",
            self.instance.name(),
            record.name,
            result.is_hamiltonian,
            result.length_matches()
        );
        RecordReport::verified(record.name.clone(), result, short_circuited)
    }

    pub fn verify_log(&self, log_text: &str) -> InstanceReport {
        let records = parse_solution_log(log_text, self.config.log_format)
            .into_iter()
            .map(|entry| match entry.record {
                Ok(record) => self.verify_record(&record),
                Err(e) => RecordReport::malformed(entry.name, e.to_string()),
            })
            .collect();
        InstanceReport {
            name: self.instance.name().to_string(),
            rounding: self.matrix.rule(),
            num_nodes: self.matrix.size(),
            records,
        }
    }
}

/// Parses an instance, builds its matrix once and checks every record of its log.
#[time]
pub fn verify_instance(
    name: &str,
    instance_text: &str,
    log_text: &str,
    config: &VerifierConfig,
) -> ValidationResult<InstanceReport> {
    let instance = Instance::parse(name, instance_text)?;
    let report = InstanceVerifier::new(instance, config).verify_log(log_text);
    log::info!(
        "{}: {}/{} records valid",
        report.name,
        report.num_valid(),
        report.records.len()
    );
    Ok(report)
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSource {
    pub name: String,
    pub instance_text: String,
    pub log_text: String,
}

/// Verifies independent instances in name order. A malformed instance only
/// fails its own entry.
pub fn verify_batch(
    mut sources: Vec<InstanceSource>,
    config: &VerifierConfig,
) -> Vec<(String, ValidationResult<InstanceReport>)> {
    sources.sort_by(|a, b| a.name.cmp(&b.name));
    sources
        .into_iter()
        .map(|source| {
            let report = verify_instance(
                &source.name,
                &source.instance_text,
                &source.log_text,
                config,
            );
            if let Err(e) = &report {
                log::warn!("{}: {}", source.name, e);
            }
            (source.name, report)
        })
        .collect()
}
