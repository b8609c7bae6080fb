use crate::error::{ValidationError, ValidationResult};
use tsp_structs::{config::LogFormat, core::SolutionRecord};

/// One record of a solution log. The name is always known, the rest may be
/// malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub name: String,
    pub record: ValidationResult<SolutionRecord>,
}

/// Splits a solution log into records.
///
/// Every record starts with a non-empty name line; an empty line or the end of
/// the text ends the log. Records have a fixed number of lines for `format`,
/// so a malformed record is reported and parsing resumes at the next one.
pub fn parse_solution_log(text: &str, format: LogFormat) -> Vec<LogEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(name) = lines.get(pos).map(|l| l.trim()) {
        if name.is_empty() {
            break;
        }
        let index = entries.len() + 1;
        let record = parse_claimed_length(&lines, pos + 1, index).and_then(|claimed_length| {
            Ok(SolutionRecord {
                name: name.to_string(),
                claimed_length,
                tour: parse_tour(&lines, pos + 2, index)?,
            })
        });
        match &record {
            Ok(r) => log::trace!("record {} '{}': {} nodes", index, name, r.tour.len()),
            Err(e) => log::warn!("{}", e),
        }
        entries.push(LogEntry {
            name: name.to_string(),
            record,
        });
        pos += format.lines_per_record();
    }
    entries
}

fn parse_claimed_length(lines: &[&str], pos: usize, record: usize) -> ValidationResult<f64> {
    let line = required_line(lines, pos, record, "claimed length")?;
    match line.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::MalformedSolutionRecord {
            record,
            line: pos + 1,
            reason: format!("claimed length '{}' is not a number", line.trim()),
        }),
    }
}

fn parse_tour(lines: &[&str], pos: usize, record: usize) -> ValidationResult<Vec<usize>> {
    let line = required_line(lines, pos, record, "tour")?;
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| ValidationError::MalformedSolutionRecord {
                    record,
                    line: pos + 1,
                    reason: format!("tour entry '{}' is not a node id", token),
                })
        })
        .collect()
}

fn required_line<'a>(
    lines: &[&'a str],
    pos: usize,
    record: usize,
    what: &str,
) -> ValidationResult<&'a str> {
    lines
        .get(pos)
        .copied()
        .ok_or_else(|| ValidationError::MalformedSolutionRecord {
            record,
            line: pos + 1,
            reason: format!("missing {} line", what),
        })
}
