use std::path::Path;

use crate::election::ParsedBallot;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// The candidates named in the ballots, in order of first appearance.
pub fn infer_candidates(ballots: &[ParsedBallot]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for pb in ballots.iter() {
        for choice in pb.choices.iter() {
            let name = choice.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
