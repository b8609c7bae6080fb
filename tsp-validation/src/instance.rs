use crate::error::{ValidationError, ValidationResult};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tsp_structs::core::Coordinate;

/// Lines before the first coordinate, whatever they contain.
pub const HEADER_LINES: usize = 6;
pub const TERMINATOR: &str = "EOF";

const DIMENSION_KEY: &str = "DIMENSION";
const EDGE_WEIGHT_TYPE_KEY: &str = "EDGE_WEIGHT_TYPE";
const GENERATED_EXTENT: i64 = 1000;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Instance {
    name: String,
    header: Vec<(String, String)>,
    coordinates: Vec<Coordinate>,
}

impl Instance {
    pub fn new(name: &str, coordinates: Vec<Coordinate>) -> Self {
        Self {
            name: name.to_string(),
            header: Vec::new(),
            coordinates,
        }
    }

    /// Parses a TSPLIB style `NODE_COORD_SECTION` instance.
    ///
    /// The first [`HEADER_LINES`] lines are skipped; any `KEY : VALUE` pairs among
    /// them are kept as metadata. Each following line is `<id> <x> <y>` until a
    /// line starting with `EOF`. Node ids are assigned by position, the id column
    /// only has to be an integer.
    pub fn parse(name: &str, text: &str) -> ValidationResult<Self> {
        let mut lines = text.lines().enumerate();

        let mut header = Vec::new();
        for found in 0..HEADER_LINES {
            let (_, line) = lines.next().ok_or(ValidationError::TruncatedHeader {
                expected: HEADER_LINES,
                found,
            })?;
            if let Some((key, value)) = line.split_once(':') {
                header.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        let mut coordinates = Vec::new();
        let mut terminated = false;
        for (idx, line) in lines {
            if line.split_whitespace().next() == Some(TERMINATOR) {
                terminated = true;
                break;
            }
            let coordinate =
                parse_coordinate_line(line).ok_or_else(|| ValidationError::MalformedCoordinate {
                    line: idx + 1,
                    content: line.trim().to_string(),
                })?;
            coordinates.push(coordinate);
        }
        if !terminated {
            return Err(ValidationError::MissingTerminator);
        }

        let instance = Self {
            name: name.to_string(),
            header,
            coordinates,
        };
        if let Some(declared) = instance.dimension() {
            if declared != instance.len() {
                return Err(ValidationError::DimensionMismatch {
                    declared,
                    found: instance.len(),
                });
            }
        }
        log::debug!(
            "parsed instance {} with {} nodes",
            instance.name,
            instance.len()
        );
        Ok(instance)
    }

    /// Reproducible random instance with distinct integer coordinates.
    pub fn generate(name: &str, seed: u64, size: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        // Grow the square when it could not hold `size` distinct points.
        let extent = GENERATED_EXTENT.max((size as f64).sqrt().ceil() as i64);

        let mut coordinates: Vec<Coordinate> = Vec::with_capacity(size);
        let mut seen: HashSet<Coordinate> = HashSet::with_capacity(size);
        while coordinates.len() < size {
            let pos = Coordinate::new(rng.gen_range(0..=extent), rng.gen_range(0..=extent));
            if seen.insert(pos) {
                coordinates.push(pos);
            }
        }

        Self {
            name: name.to_string(),
            header: vec![
                ("NAME".to_string(), stem(name).to_string()),
                ("TYPE".to_string(), "TSP".to_string()),
                ("COMMENT".to_string(), format!("generated with seed {}", seed)),
                (DIMENSION_KEY.to_string(), size.to_string()),
                (EDGE_WEIGHT_TYPE_KEY.to_string(), "EUC_2D".to_string()),
            ],
            coordinates,
        }
    }

    /// Renders the instance in the same text format [`Instance::parse`] reads.
    pub fn to_tsplib(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "NAME : {}\n",
            self.header_value("NAME").unwrap_or(stem(&self.name))
        ));
        out.push_str(&format!(
            "TYPE : {}\n",
            self.header_value("TYPE").unwrap_or("TSP")
        ));
        out.push_str(&format!(
            "COMMENT : {}\n",
            self.header_value("COMMENT").unwrap_or("")
        ));
        out.push_str(&format!("{} : {}\n", DIMENSION_KEY, self.len()));
        out.push_str(&format!(
            "{} : {}\n",
            EDGE_WEIGHT_TYPE_KEY,
            self.header_value(EDGE_WEIGHT_TYPE_KEY).unwrap_or("EUC_2D")
        ));
        out.push_str("NODE_COORD_SECTION\n");
        for (i, c) in self.coordinates.iter().enumerate() {
            out.push_str(&format!("{} {} {}\n", i + 1, c.x, c.y));
        }
        out.push_str(TERMINATOR);
        out.push('\n');
        out
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Node count declared in the header, if there is a readable one.
    pub fn dimension(&self) -> Option<usize> {
        self.header_value(DIMENSION_KEY)
            .and_then(|v| v.parse::<usize>().ok())
    }
}

fn parse_coordinate_line(line: &str) -> Option<Coordinate> {
    let mut tokens = line.split_whitespace();
    tokens.next()?.parse::<u64>().ok()?;
    let x = parse_truncated(tokens.next()?)?;
    let y = parse_truncated(tokens.next()?)?;
    if tokens.next().is_some() {
        return None;
    }
    Some(Coordinate::new(x, y))
}

fn parse_truncated(token: &str) -> Option<i64> {
    let value = token.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

fn stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_line() {
        assert_eq!(
            parse_coordinate_line("3 12.9 -4.7"),
            Some(Coordinate::new(12, -4))
        );
        assert_eq!(
            parse_coordinate_line("  1   5.0e2 7 "),
            Some(Coordinate::new(500, 7))
        );
        assert_eq!(parse_coordinate_line("1 2"), None);
        assert_eq!(parse_coordinate_line("1 2 3 4"), None);
        assert_eq!(parse_coordinate_line("a 2 3"), None);
        assert_eq!(parse_coordinate_line("1 nan 3"), None);
        assert_eq!(parse_coordinate_line(""), None);
    }

    #[test]
    fn test_stem() {
        assert_eq!(stem("att48.tsp"), "att48");
        assert_eq!(stem("att48"), "att48");
    }
}
