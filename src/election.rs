use log::{debug, info, warn};

use ranked_pairs::builder::Builder;
use ranked_pairs::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::election::config_reader::*;
use crate::election::io_common::{infer_candidates, simplify_file_name};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;
pub mod render;

#[derive(Debug, Snafu)]
pub enum TidemanError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Could not read the number in field {field}"))]
    ParsingJsonNumber { field: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("CSV line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Error writing file {path}"))]
    Writing {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Missing parent directory for {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Voting error: {source}"))]
    Voting { source: VotingErrors },
    #[snafu(display("The summary differs from the reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TResult<T> = Result<T, TidemanError>;

/// A ballot, as parsed by the readers.
/// This is before matching the names against the registered candidates.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: Option<String>,
    pub choices: Vec<String>,
}

impl ParsedBallot {
    /// A ballot with a blank rank has not been fully filled in.
    pub fn is_complete(&self) -> bool {
        !self.choices.is_empty() && self.choices.iter().all(|c| !c.trim().is_empty())
    }
}

/// Everything needed to run an election, after merging the configuration file
/// and the command line.
#[derive(Debug, Clone)]
struct ElectionInput {
    output_config: OutputConfig,
    candidates: Option<Vec<String>>,
    // Paths are already resolved against the configuration directory.
    sources: Vec<(String, FileSource)>,
    rules: ElectionRules,
}

/// The outcome of a tabulation, with the names needed to display it.
#[derive(Debug, Clone)]
pub struct Tabulation {
    pub candidates: Vec<String>,
    pub result: ElectionResult,
    pub summary: JSValue,
}

fn parse_tiebreak(mode: &str, seed: Option<u32>) -> TResult<TieBreakMode> {
    match (mode, seed) {
        ("constructionOrder", _) => Ok(TieBreakMode::ConstructionOrder),
        ("random", Some(s)) => Ok(TieBreakMode::Random(s)),
        ("random", None) => whatever!("The random tiebreak mode requires a seed"),
        (x, _) => whatever!("Unknown tiebreak mode {:?}", x),
    }
}

fn validate_rules(rules: &Option<RulesConfig>) -> TResult<ElectionRules> {
    let tiebreak_mode = match rules {
        Some(RulesConfig {
            tiebreak_mode: Some(mode),
            random_seed,
        }) => {
            let seed = match random_seed {
                Some(js) => Some(read_js_u32(js, "randomSeed")?),
                None => None,
            };
            parse_tiebreak(mode.as_str(), seed)?
        }
        _ => TieBreakMode::ConstructionOrder,
    };
    Ok(ElectionRules { tiebreak_mode })
}

fn build_input(args: &Args) -> TResult<ElectionInput> {
    let mut input = match args.config.clone() {
        Some(config_path) => {
            let config = read_config(&config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {
                    path: config_path.clone(),
                })?;
            let sources = config
                .cvr_file_sources
                .iter()
                .map(|cfs| {
                    let p: PathBuf = root_p.join(cfs.file_path.as_str());
                    (p.as_path().display().to_string(), cfs.clone())
                })
                .collect();
            let candidates = if config.candidates.is_empty() {
                None
            } else {
                Some(config.candidates.iter().map(|c| c.name.clone()).collect())
            };
            ElectionInput {
                output_config: config.output_settings.output_config(),
                candidates,
                sources,
                rules: validate_rules(&config.rules)?,
            }
        }
        None => {
            let input_path = match args.input.clone() {
                Some(p) => p,
                None => whatever!("Either an election configuration or an input file is required"),
            };
            ElectionInput {
                output_config: OutputConfig::named(simplify_file_name(input_path.as_str())),
                candidates: None,
                sources: Vec::new(),
                rules: ElectionRules::DEFAULT_RULES,
            }
        }
    };

    // The command line takes precedence over the configuration file.
    if let Some(input_path) = args.input.clone() {
        let provider = args.input_type.clone().unwrap_or_else(|| "csv".to_string());
        input.sources = vec![(input_path.clone(), FileSource::new(provider, input_path))];
    }
    if let Some(cands) = args.candidates.clone() {
        input.candidates = Some(cands.iter().map(|c| c.trim().to_string()).collect());
    }
    if let Some(mode) = args.tiebreak.clone() {
        input.rules.tiebreak_mode = parse_tiebreak(mode.as_str(), args.seed)?;
    } else if let Some(seed) = args.seed {
        input.rules.tiebreak_mode = TieBreakMode::Random(seed);
    }

    if input.sources.is_empty() {
        whatever!("No ballot source was provided");
    }
    Ok(input)
}

fn read_ranking_data(path: &str, cfs: &FileSource) -> TResult<Vec<ParsedBallot>> {
    info!("Attempting to read rank file {:?}", path);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_ranking(path, cfs),
        "json" => io_json::read_json_ranking(path, cfs),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

fn tabulate(input: &ElectionInput) -> TResult<Tabulation> {
    let mut parsed: Vec<ParsedBallot> = Vec::new();
    for (path, cfs) in input.sources.iter() {
        let mut file_data = read_ranking_data(path.as_str(), cfs)?;
        parsed.append(&mut file_data);
    }
    debug!("tabulate: read {} ballots", parsed.len());

    // Ballots with unranked candidates are left out, the same way an
    // unfinished ballot form is never submitted.
    let filled: Vec<ParsedBallot> = parsed
        .into_iter()
        .filter(|pb| {
            if !pb.is_complete() {
                warn!("Skipping incomplete ballot {:?}: {:?}", pb.id, pb.choices);
            }
            pb.is_complete()
        })
        .collect();

    let candidates: Vec<String> = match input.candidates.clone() {
        Some(cands) => cands,
        None if filled.is_empty() => {
            return Err(VotingErrors::EmptyBallotSet).context(VotingSnafu {});
        }
        None => infer_candidates(&filled),
    };
    info!("Candidates: {:?}", candidates);

    // A short row leaves the last ranks blank, like a trailing empty cell.
    let complete: Vec<ParsedBallot> = filled
        .into_iter()
        .filter(|pb| {
            let short = pb.choices.len() < candidates.len();
            if short {
                warn!("Skipping incomplete ballot {:?}: {:?}", pb.id, pb.choices);
            }
            !short
        })
        .collect();

    let mut builder = Builder::new(&input.rules)
        .and_then(|b| b.candidates(&candidates))
        .context(VotingSnafu {})?;
    for pb in complete.iter() {
        let choices: Vec<String> = pb.choices.iter().map(|c| c.trim().to_string()).collect();
        if let Err(e) = builder.add_ballot(&choices) {
            warn!("Rejecting all the ballots: ballot {:?} is invalid", pb.id);
            return Err(e).context(VotingSnafu {});
        }
    }

    let result = builder.run().context(VotingSnafu {})?;
    info!("result: {:?}", result);

    let summary = build_summary_js(&input.output_config, &candidates, &result);
    Ok(Tabulation {
        candidates,
        result,
        summary,
    })
}

fn result_to_json(candidates: &[String], result: &ElectionResult) -> JSValue {
    let name = |cid: usize| candidates[cid].clone();
    let pairs: Vec<JSValue> = result
        .lock_steps
        .iter()
        .map(|step| {
            json!({
                "winner": name(step.pair.winner),
                "loser": name(step.pair.loser),
                "strength": step.pair.strength,
                "locked": step.locked
            })
        })
        .collect();
    let locked: Vec<JSValue> = result
        .locked
        .edges()
        .iter()
        .map(|(from, to)| json!([name(*from), name(*to)]))
        .collect();
    json!({
        "candidates": candidates,
        "preferences": result.preferences.rows(),
        "pairs": pairs,
        "locked": locked,
        "winner": result.winner.map(name)
    })
}

fn build_summary_js(config: &OutputConfig, candidates: &[String], result: &ElectionResult) -> JSValue {
    json!({
        "config": config,
        "results": result_to_json(candidates, result)
    })
}

fn write_output(out: &Option<String>, tab: &Tabulation, pretty_js: &str) -> TResult<()> {
    match out.as_deref() {
        None => {
            print!("{}", render::text_report(&tab.candidates, &tab.result));
        }
        Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> TResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    Ok(())
}

pub fn run_election(args: &Args) -> TResult<()> {
    let input = build_input(args)?;
    let tab = tabulate(&input)?;

    let pretty_js_stats =
        serde_json::to_string_pretty(&tab.summary).context(ParsingJsonSnafu {})?;
    write_output(&args.out, &tab, pretty_js_stats.as_str())?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.as_deref() {
        check_reference(reference_path, pretty_js_stats.as_str())?;
    }
    Ok(())
}
