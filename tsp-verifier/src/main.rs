mod report;

use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use report::{render_instance, render_record};
use serde_json::json;
use std::path::{Path, PathBuf};
use tsp_structs::{
    config::{LogFormat, RoundingRule, VerifierConfig},
    core::{InstanceReport, RecordReport},
};
use tsp_utils::{dejsonify, jsonify, read_inline_or_file, read_text_file, source_name};
use tsp_validation::{
    verify, verify_batch, verify_instance, Instance, InstanceSource, InstanceVerifier,
};

fn config_args(command: Command) -> Command {
    command
        .arg(
            arg!(--config [CONFIG] "Config json string or path to json file")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--format [FORMAT] "Solution log format: legacy or strict")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--rounding [ROUNDING] "Force a rounding rule: euclidean or pseudo_euclidean")
                .value_parser(clap::value_parser!(String)),
        )
}

fn json_arg(command: Command) -> Command {
    command.arg(arg!(--json "Print the report as json").action(ArgAction::SetTrue))
}

fn cli() -> Command {
    Command::new("tsp-verifier")
        .about("Verifies TSP tours against their instances")
        .arg_required_else_help(true)
        .subcommand(json_arg(config_args(
            Command::new("verify_solution")
                .about("Verifies every record of a solution log")
                .arg(
                    arg!(<INSTANCE> "Path to a TSPLIB instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION_LOG> "Path to the solution log for the instance")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )))
        .subcommand(json_arg(config_args(
            Command::new("verify_batch")
                .about("Verifies several instances, each against the log of the same file name")
                .arg(
                    arg!(<INSTANCES> "Paths to TSPLIB instance files")
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"log-dir" <LOG_DIR> "Directory holding one solution log per instance")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )))
        .subcommand(json_arg(config_args(
            Command::new("verify_tour")
                .about("Verifies a single tour")
                .arg(
                    arg!(<INSTANCE> "Path to a TSPLIB instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<CLAIMED_LENGTH> "Tour length reported by the solver")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(<TOUR> "Node ids separated by spaces or commas, path to a .tour file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )))
        .subcommand(config_args(
            Command::new("distance_matrix")
                .about("Prints the distance matrix of an instance as json")
                .arg(
                    arg!(<INSTANCE> "Path to a TSPLIB instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--neighbors [NODE] "Only print the nodes ordered by distance from NODE")
                        .value_parser(clap::value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("generate_instance")
                .about("Prints a reproducible random instance")
                .arg(arg!(<NAME> "Instance name").value_parser(clap::value_parser!(String)))
                .arg(arg!(<SIZE> "Number of nodes").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(--seed [SEED] "Random seed")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("verify_solution", sub_m)) => load_config(sub_m).and_then(|config| {
            verify_solution(
                sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
                sub_m.get_one::<PathBuf>("SOLUTION_LOG").unwrap().clone(),
                &config,
                sub_m.get_flag("json"),
            )
        }),
        Some(("verify_batch", sub_m)) => load_config(sub_m).and_then(|config| {
            verify_many(
                sub_m
                    .get_many::<PathBuf>("INSTANCES")
                    .unwrap()
                    .cloned()
                    .collect(),
                sub_m.get_one::<PathBuf>("log-dir").unwrap().clone(),
                &config,
                sub_m.get_flag("json"),
            )
        }),
        Some(("verify_tour", sub_m)) => load_config(sub_m).and_then(|config| {
            verify_tour(
                sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
                *sub_m.get_one::<f64>("CLAIMED_LENGTH").unwrap(),
                sub_m.get_one::<String>("TOUR").unwrap().clone(),
                &config,
                sub_m.get_flag("json"),
            )
        }),
        Some(("distance_matrix", sub_m)) => load_config(sub_m).and_then(|config| {
            distance_matrix(
                sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
                sub_m.get_one::<usize>("neighbors").cloned(),
                &config,
            )
        }),
        Some(("generate_instance", sub_m)) => generate_instance(
            sub_m.get_one::<String>("NAME").unwrap().clone(),
            *sub_m.get_one::<usize>("SIZE").unwrap(),
            *sub_m.get_one::<u64>("seed").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn verify_solution(
    instance_path: PathBuf,
    log_path: PathBuf,
    config: &VerifierConfig,
    as_json: bool,
) -> Result<()> {
    let name = source_name(&instance_path);
    let instance_text = read_text_file(&instance_path)?;
    let log_text = read_text_file(&log_path)?;
    let report = verify_instance(&name, &instance_text, &log_text, config)
        .map_err(|e| anyhow!("Invalid instance {}: {}", name, e))?;

    if as_json {
        println!("{}", jsonify(&report));
    } else {
        print!("{}", render_instance(&report));
    }
    Ok(())
}

pub fn verify_many(
    instance_paths: Vec<PathBuf>,
    log_dir: PathBuf,
    config: &VerifierConfig,
    as_json: bool,
) -> Result<()> {
    let results = run_batch(&instance_paths, &log_dir, config);
    if as_json {
        let entries: Vec<serde_json::Value> = results
            .iter()
            .map(|(name, result)| match result {
                Ok(report) => json!({ "name": name, "report": report }),
                Err(e) => json!({ "name": name, "error": e }),
            })
            .collect();
        println!("{}", jsonify(&entries));
    } else {
        for (name, result) in results.iter() {
            match result {
                Ok(report) => print!("{}", render_instance(report)),
                Err(e) => println!("=======> Testing {}\nInvalid instance: {}", name, e),
            }
            println!();
        }
    }
    Ok(())
}

/// Reads and verifies every instance against `log_dir/<file name>`. An
/// unreadable file becomes an error entry for that instance only.
fn run_batch(
    instance_paths: &[PathBuf],
    log_dir: &Path,
    config: &VerifierConfig,
) -> Vec<(String, std::result::Result<InstanceReport, String>)> {
    let mut sources = Vec::with_capacity(instance_paths.len());
    let mut results = Vec::new();
    for path in instance_paths.iter() {
        let name = source_name(path);
        let texts = read_text_file(path)
            .and_then(|instance_text| Ok((instance_text, read_text_file(log_dir.join(&name))?)));
        match texts {
            Ok((instance_text, log_text)) => sources.push(InstanceSource {
                name,
                instance_text,
                log_text,
            }),
            Err(e) => {
                log::warn!("{}: {}", name, e);
                results.push((name, Err(e.to_string())));
            }
        }
    }

    results.extend(
        verify_batch(sources, config)
            .into_iter()
            .map(|(name, result)| (name, result.map_err(|e| e.to_string()))),
    );
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

pub fn verify_tour(
    instance_path: PathBuf,
    claimed_length: f64,
    tour: String,
    config: &VerifierConfig,
    as_json: bool,
) -> Result<()> {
    let instance = load_instance(&instance_path)?;
    let tour = parse_tour(&read_inline_or_file(&tour, ".tour")?)?;
    let verifier = InstanceVerifier::new(instance, config);
    let result = verify(&tour, claimed_length, verifier.matrix(), config.tolerance);

    if as_json {
        println!("{}", jsonify(&result));
    } else {
        let record = RecordReport::verified(
            verifier.instance().name().to_string(),
            result,
            false,
        );
        print!("{}", render_record(&record));
    }
    Ok(())
}

pub fn distance_matrix(
    instance_path: PathBuf,
    neighbors_of: Option<usize>,
    config: &VerifierConfig,
) -> Result<()> {
    let instance = load_instance(&instance_path)?;
    let verifier = InstanceVerifier::new(instance, config);
    let matrix = verifier.matrix();

    match neighbors_of {
        Some(node) if node >= matrix.size() => Err(anyhow!(
            "Node {} is out of range for an instance with {} nodes",
            node,
            matrix.size()
        )),
        Some(node) => {
            println!("{}", jsonify(&matrix.neighbors_by_distance(node)));
            Ok(())
        }
        None => {
            println!(
                "{}",
                jsonify(&json!({
                    "name": verifier.instance().name(),
                    "rounding": matrix.rule(),
                    "matrix": matrix.to_rows(),
                }))
            );
            Ok(())
        }
    }
}

pub fn generate_instance(name: String, size: usize, seed: u64) -> Result<()> {
    if size == 0 {
        return Err(anyhow!("Size must be at least 1"));
    }
    print!("{}", Instance::generate(&name, seed, size).to_tsplib());
    Ok(())
}

fn load_instance(path: &Path) -> Result<Instance> {
    let name = source_name(path);
    Instance::parse(&name, &read_text_file(path)?)
        .map_err(|e| anyhow!("Invalid instance {}: {}", name, e))
}

fn load_config(sub_m: &ArgMatches) -> Result<VerifierConfig> {
    let mut config = match sub_m.get_one::<String>("config") {
        Some(config) => dejsonify::<VerifierConfig>(&read_inline_or_file(config, ".json")?)
            .map_err(|e| anyhow!("Failed to parse config: {}", e))?,
        None => VerifierConfig::default(),
    };
    if let Some(format) = sub_m.get_one::<String>("format") {
        config.log_format = LogFormat::from_string(format.clone()).map_err(|e| anyhow!(e))?;
    }
    if let Some(rounding) = sub_m.get_one::<String>("rounding") {
        config.default_rounding =
            RoundingRule::from_string(rounding.clone()).map_err(|e| anyhow!(e))?;
        config.rounding_overrides.clear();
    }
    log::debug!("config: {}", jsonify(&config));
    Ok(config)
}

fn parse_tour(text: &str) -> Result<Vec<usize>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| anyhow!("Tour entry '{}' is not a node id", token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tour() {
        assert_eq!(parse_tour("0 1 2 3").unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(parse_tour("3,2, 1\n0 ").unwrap(), vec![3, 2, 1, 0]);
        assert!(parse_tour("0 -1").is_err());
        assert!(parse_tour("").unwrap().is_empty());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let matches = cli()
            .try_get_matches_from([
                "tsp-verifier",
                "verify_batch",
                "a.tsp",
                "b.tsp",
                "--log-dir",
                "OUT",
                "--format",
                "legacy",
                "--json",
            ])
            .unwrap();
        let (name, sub_m) = matches.subcommand().unwrap();
        assert_eq!(name, "verify_batch");
        assert_eq!(sub_m.get_many::<PathBuf>("INSTANCES").unwrap().count(), 2);
        assert!(sub_m.get_flag("json"));
        let config = load_config(sub_m).unwrap();
        assert_eq!(config.log_format, LogFormat::Legacy);
        assert_eq!(config.rounding_for("att48.tsp"), RoundingRule::PseudoEuclidean);
    }

    #[test]
    fn test_rounding_flag_overrides_table() {
        let matches = cli()
            .try_get_matches_from([
                "tsp-verifier",
                "distance_matrix",
                "att48.tsp",
                "--rounding",
                "euclidean",
                "--config",
                r#"{"tolerance": 0.5}"#,
            ])
            .unwrap();
        let (_, sub_m) = matches.subcommand().unwrap();
        let config = load_config(sub_m).unwrap();
        assert_eq!(config.tolerance, 0.5);
        assert_eq!(config.rounding_for("att48.tsp"), RoundingRule::Euclidean);
    }

    #[test]
    fn test_batch_continues_past_missing_log() {
        let dir = std::env::temp_dir().join(format!("tsp-verifier-batch-{}", std::process::id()));
        let instances = dir.join("instances");
        let logs = dir.join("logs");
        std::fs::create_dir_all(&instances).unwrap();
        std::fs::create_dir_all(&logs).unwrap();
        let square = "NAME : square\nCOMMENT : c\nTYPE : TSP\nDIMENSION : 4\n\
                      EDGE_WEIGHT_TYPE : EUC_2D\nNODE_COORD_SECTION\n\
                      1 0 0\n2 0 3\n3 4 3\n4 4 0\nEOF\n";
        std::fs::write(instances.join("a.tsp"), square).unwrap();
        std::fs::write(instances.join("b.tsp"), square).unwrap();
        std::fs::write(logs.join("b.tsp"), "-> tour\n14\n0 1 2 3\nreserved\n").unwrap();

        let results = run_batch(
            &[instances.join("b.tsp"), instances.join("a.tsp")],
            &logs,
            &VerifierConfig::default(),
        );
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "a.tsp");
        assert!(results[0].1.is_err());
        assert_eq!(results[1].0, "b.tsp");
        assert!(results[1].1.as_ref().unwrap().all_valid());
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let matches = cli()
            .try_get_matches_from([
                "tsp-verifier",
                "verify_tour",
                "a.tsp",
                "14",
                "0 1 2 3",
                "--format",
                "fancy",
            ])
            .unwrap();
        let (_, sub_m) = matches.subcommand().unwrap();
        assert!(load_config(sub_m).is_err());
    }
}
