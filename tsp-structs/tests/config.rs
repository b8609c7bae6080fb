use tsp_structs::config::{LogFormat, RoundingRule, VerifierConfig};
use tsp_utils::{dejsonify, jsonify};

#[test]
fn test_default_config() {
    let config = VerifierConfig::default();
    assert_eq!(config.tolerance, 0.1);
    assert_eq!(config.log_format, LogFormat::Strict);
    assert_eq!(config.default_rounding, RoundingRule::Euclidean);
    assert_eq!(
        config.rounding_overrides.get("att48.tsp"),
        Some(&RoundingRule::PseudoEuclidean)
    );
}

#[test]
fn test_rounding_lookup() {
    let config = VerifierConfig::default();
    assert_eq!(config.rounding_for("att48.tsp"), RoundingRule::PseudoEuclidean);
    assert_eq!(config.rounding_for("att48"), RoundingRule::PseudoEuclidean);
    assert_eq!(config.rounding_for("berlin52.tsp"), RoundingRule::Euclidean);
    assert_eq!(config.rounding_for("att532.tsp"), RoundingRule::Euclidean);

    let config = config.with_override("att532", RoundingRule::PseudoEuclidean);
    assert_eq!(config.rounding_for("att532.tsp"), RoundingRule::PseudoEuclidean);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: VerifierConfig = dejsonify(r#"{"log_format": "legacy"}"#).unwrap();
    assert_eq!(config.log_format, LogFormat::Legacy);
    assert_eq!(config.tolerance, 0.1);
    assert_eq!(config.rounding_for("att48.tsp"), RoundingRule::PseudoEuclidean);

    let config: VerifierConfig = dejsonify(
        r#"{"tolerance": 0.5, "default_rounding": "pseudo_euclidean", "rounding_overrides": {}}"#,
    )
    .unwrap();
    assert_eq!(config.tolerance, 0.5);
    assert_eq!(config.rounding_for("eil51.tsp"), RoundingRule::PseudoEuclidean);
}

#[test]
fn test_config_json_roundtrip() {
    let config = VerifierConfig::default();
    let json = jsonify(&config);
    assert_eq!(
        json,
        r#"{"default_rounding":"euclidean","log_format":"strict","rounding_overrides":{"att48.tsp":"pseudo_euclidean"},"tolerance":0.1}"#
    );
    assert_eq!(dejsonify::<VerifierConfig>(&json).unwrap(), config);
}

#[test]
fn test_enum_strings() {
    assert_eq!(
        RoundingRule::from_string("pseudo_euclidean".to_string()),
        Ok(RoundingRule::PseudoEuclidean)
    );
    assert!(RoundingRule::from_string("geo".to_string()).is_err());
    assert_eq!(RoundingRule::Euclidean.to_string(), "euclidean");
    assert_eq!(
        LogFormat::from_string("legacy".to_string()),
        Ok(LogFormat::Legacy)
    );
    assert_eq!(LogFormat::Legacy.lines_per_record(), 3);
    assert_eq!(LogFormat::Strict.lines_per_record(), 4);
}
