use tsp_structs::core::{InstanceReport, LengthCheck, RecordReport};

pub fn render_instance(report: &InstanceReport) -> String {
    let mut out = format!(
        "=======> Testing {} ({} nodes, {})\n",
        report.name,
        report.num_nodes,
        report.rounding.to_string()
    );
    for record in report.records.iter() {
        out.push_str(&render_record(record));
    }
    out.push_str(&format!(
        "{}/{} records valid\n",
        report.num_valid(),
        report.records.len()
    ));
    out
}

pub fn render_record(record: &RecordReport) -> String {
    let mut out = format!("{}\n", record.name);
    if let Some(error) = record.error() {
        out.push_str(&format!("Malformed record: {}\n", error));
        return out;
    }
    let result = match record.result() {
        Some(result) => result,
        None => return out,
    };
    if record.short_circuited {
        out.push_str("Not Hamiltonian\n");
        return out;
    }
    out.push_str(if result.is_hamiltonian {
        "Hamiltonian: OK\n"
    } else {
        "Hamiltonian: Fail\n"
    });
    match &result.length {
        LengthCheck::Matches { .. } => out.push_str("Path length: OK\n"),
        LengthCheck::Mismatch {
            claimed,
            recomputed,
            difference,
        } => out.push_str(&format!(
            "Path length: Fail (claimed {:.6}, recomputed {}, diff {:.6})\n",
            claimed, recomputed, difference
        )),
        LengthCheck::NotApplicable { claimed } => out.push_str(&format!(
            "Path length: Fail (claimed {:.6}, tour references nodes outside the instance)\n",
            claimed
        )),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_structs::{config::RoundingRule, core::VerificationResult};

    fn verified(name: &str, is_hamiltonian: bool, length: LengthCheck) -> RecordReport {
        RecordReport::verified(
            name.to_string(),
            VerificationResult {
                is_hamiltonian,
                length,
            },
            false,
        )
    }

    #[test]
    fn test_render_record() {
        let ok = verified(
            "-> 2-opt",
            true,
            LengthCheck::Matches {
                claimed: 14.0,
                recomputed: 14,
                difference: 0.0,
            },
        );
        assert_eq!(
            render_record(&ok),
            "-> 2-opt\nHamiltonian: OK\nPath length: OK\n"
        );

        let mismatch = verified(
            "-> greedy",
            false,
            LengthCheck::Mismatch {
                claimed: 14.5,
                recomputed: 14,
                difference: 0.5,
            },
        );
        assert_eq!(
            render_record(&mismatch),
            "-> greedy\nHamiltonian: Fail\n\
             Path length: Fail (claimed 14.500000, recomputed 14, diff 0.500000)\n"
        );

        let malformed = RecordReport::malformed("-> bad".to_string(), "oops".to_string());
        assert_eq!(render_record(&malformed), "-> bad\nMalformed record: oops\n");
    }

    #[test]
    fn test_render_short_circuited_record() {
        let mut short = verified(
            "-> short",
            false,
            LengthCheck::Mismatch {
                claimed: 7.0,
                recomputed: 6,
                difference: 1.0,
            },
        );
        short.short_circuited = true;
        assert_eq!(render_record(&short), "-> short\nNot Hamiltonian\n");
    }

    #[test]
    fn test_render_instance() {
        let report = InstanceReport {
            name: "att48.tsp".to_string(),
            rounding: RoundingRule::PseudoEuclidean,
            num_nodes: 48,
            records: vec![],
        };
        assert_eq!(
            render_instance(&report),
            "=======> Testing att48.tsp (48 nodes, pseudo_euclidean)\n0/0 records valid\n"
        );
    }
}
