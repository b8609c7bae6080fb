use logging_timer::time;
use serde::{Deserialize, Serialize};
use tsp_structs::{
    config::{RoundingRule, VerifierConfig},
    core::Coordinate,
};

/// Integer edge weight between two nodes under `rule`.
pub fn rounded_distance(rule: RoundingRule, a: &Coordinate, b: &Coordinate) -> u64 {
    let squared = a.squared_distance(b);
    match rule {
        RoundingRule::Euclidean => squared.sqrt().trunc() as u64,
        RoundingRule::PseudoEuclidean => (squared / 10.0).sqrt().ceil() as u64,
    }
}

/// Dense, symmetric n×n matrix of integer edge weights in row-major order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rule: RoundingRule,
    size: usize,
    data: Vec<u64>,
}

/// Builds the matrix for a named instance, taking the rounding rule from `config`.
pub fn build_distance_matrix(
    instance_name: &str,
    coordinates: &[Coordinate],
    config: &VerifierConfig,
) -> DistanceMatrix {
    let rule = config.rounding_for(instance_name);
    log::debug!("{}: using {} distances", instance_name, rule.to_string());
    DistanceMatrix::from_coordinates(coordinates, rule)
}

impl DistanceMatrix {
    #[time]
    pub fn from_coordinates(coordinates: &[Coordinate], rule: RoundingRule) -> Self {
        let size = coordinates.len();
        let mut data = vec![0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = rounded_distance(rule, &coordinates[i], &coordinates[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { rule, size, data }
    }

    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.size + to]
    }

    /// Like [`DistanceMatrix::get`], but `None` for nodes outside the matrix.
    pub fn try_get(&self, from: usize, to: usize) -> Option<u64> {
        if from < self.size && to < self.size {
            Some(self.get(from, to))
        } else {
            None
        }
    }

    pub fn row(&self, from: usize) -> &[u64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rule(&self) -> RoundingRule {
        self.rule
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// All nodes ordered by distance from `from`, nearest first, ties broken by id.
    pub fn neighbors_by_distance(&self, from: usize) -> Vec<usize> {
        let row = self.row(from);
        let mut neighbors: Vec<usize> = (0..self.size).collect();
        neighbors.sort_by_key(|&to| (row[to], to));
        neighbors
    }

    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }
}
