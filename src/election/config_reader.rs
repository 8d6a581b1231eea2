use crate::election::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

impl OutputSettings {
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            contest: self.contest_name.clone(),
            date: self.contest_date.clone(),
            jurisdiction: self.contest_jurisdiction.clone(),
            office: self.contest_office.clone(),
        }
    }
}

/// The description of the contest, as written in the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
}

impl OutputConfig {
    pub fn named(contest: String) -> OutputConfig {
        OutputConfig {
            contest,
            date: None,
            jurisdiction: None,
            office: None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    _first_vote_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    _first_vote_row_index: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    pub id_column_index: Option<JSValue>,
}

impl FileSource {
    pub fn new(provider: String, file_path: String) -> FileSource {
        FileSource {
            provider,
            file_path,
            _first_vote_column_index: None,
            _first_vote_row_index: None,
            id_column_index: None,
        }
    }

    /// The 0-based column of the first rank. Defaults to the first column.
    pub fn first_vote_column_index(&self) -> TResult<usize> {
        match &self._first_vote_column_index {
            Some(js) => read_js_index(js, "firstVoteColumnIndex"),
            None => Ok(0),
        }
    }

    /// The 0-based row of the first ballot. Defaults to the first row.
    pub fn first_vote_row_index(&self) -> TResult<usize> {
        match &self._first_vote_row_index {
            Some(js) => read_js_index(js, "firstVoteRowIndex"),
            None => Ok(0),
        }
    }

    pub fn id_column_index_int(&self) -> TResult<Option<usize>> {
        match &self.id_column_index {
            Some(js) => read_js_index(js, "idColumnIndex").map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<JSValue>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "cvrFileSources", default)]
    pub cvr_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub candidates: Vec<CandidateConfig>,
    pub rules: Option<RulesConfig>,
}

pub fn read_config(path: &str) -> TResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> TResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Reads a 1-based spreadsheet position (a number, a numeric string, or a
/// column name such as "B" or "AA") and returns it 0-based.
fn read_js_index(x: &JSValue, field: &str) -> TResult<usize> {
    let position: Option<usize> = match x {
        JSValue::Number(n) => n.as_u64().map(|x| x as usize),
        JSValue::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            s.to_ascii_lowercase().chars().try_fold(0usize, |acc, c| {
                acc.checked_mul(26)?
                    .checked_add(c as usize - 'a' as usize + 1)
            })
        }
        JSValue::String(s) => s.parse::<usize>().ok(),
        _ => None,
    };
    position
        .and_then(|p| p.checked_sub(1))
        .context(ParsingJsonNumberSnafu { field })
}

pub fn read_js_u32(x: &JSValue, field: &str) -> TResult<u32> {
    let res = match x {
        JSValue::Number(n) => n.as_u64().and_then(|x| u32::try_from(x).ok()),
        JSValue::String(s) => s.parse::<u32>().ok(),
        _ => None,
    };
    res.context(ParsingJsonNumberSnafu { field })
}
