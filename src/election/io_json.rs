// Ballots written as a JSON array of name lists.

use crate::election::{io_common::make_default_id, *};

pub fn read_json_ranking(path: &str, _cfs: &FileSource) -> TResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let rankings: Vec<Vec<String>> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_json_ranking: {} ballots in {:?}", rankings.len(), path);
    Ok(rankings
        .into_iter()
        .enumerate()
        .map(|(idx, choices)| ParsedBallot {
            id: Some(default_id(idx + 1)),
            choices,
        })
        .collect())
}
