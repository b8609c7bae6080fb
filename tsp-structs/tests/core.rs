use serde_json::json;
use tsp_structs::{
    config::RoundingRule,
    core::{Coordinate, InstanceReport, LengthCheck, RecordReport, VerificationResult},
};

#[test]
fn test_squared_distance() {
    let a = Coordinate::new(0, 0);
    let b = Coordinate::from((3, -4));
    assert_eq!(a.squared_distance(&b), 25.0);
    assert_eq!(b.squared_distance(&a), 25.0);
    assert_eq!(b.squared_distance(&b), 0.0);
}

#[test]
fn test_verification_result_accessors() {
    let ok = VerificationResult {
        is_hamiltonian: true,
        length: LengthCheck::Matches {
            claimed: 14.0,
            recomputed: 14,
            difference: 0.0,
        },
    };
    assert!(ok.is_valid());
    assert_eq!(ok.recomputed_length(), Some(14));
    assert_eq!(ok.difference(), Some(0.0));

    let not_applicable = VerificationResult {
        is_hamiltonian: false,
        length: LengthCheck::NotApplicable { claimed: 3.0 },
    };
    assert!(!not_applicable.length_matches());
    assert_eq!(not_applicable.recomputed_length(), None);
    assert_eq!(not_applicable.length.claimed(), 3.0);
}

#[test]
fn test_length_check_serialization() {
    let check = LengthCheck::Mismatch {
        claimed: 14.5,
        recomputed: 14,
        difference: 0.5,
    };
    assert_eq!(
        serde_json::to_value(&check).unwrap(),
        json!({"outcome": "mismatch", "claimed": 14.5, "recomputed": 14, "difference": 0.5})
    );
}

#[test]
fn test_instance_report_counts() {
    let valid = VerificationResult {
        is_hamiltonian: true,
        length: LengthCheck::Matches {
            claimed: 3.0,
            recomputed: 3,
            difference: 0.0,
        },
    };
    let report = InstanceReport {
        name: "tri.tsp".to_string(),
        rounding: RoundingRule::Euclidean,
        num_nodes: 3,
        records: vec![
            RecordReport::verified("-> first".to_string(), valid, false),
            RecordReport::malformed("-> second".to_string(), "bad".to_string()),
        ],
    };
    assert_eq!(report.num_valid(), 1);
    assert!(!report.all_valid());
    assert_eq!(report.records[1].error(), Some(&"bad".to_string()));
    assert!(report.records[1].result().is_none());

    let value = serde_json::to_value(&report.records[1]).unwrap();
    assert!(value.get("result").is_none());
}
