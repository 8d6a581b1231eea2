use clap::Parser;

/// This is a ranked pairs (Tideman) tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the election description in JSON format.
    /// For more information about the file format, read the manual of the ranked_pairs crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the summary of an election in JSON format. If provided, tideman will
    /// check that the tabulated summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Otherwise, a text report is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The file containing the ballots. Setting this option overrides the sources that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of comma-separated names or not specified) The candidates, in registration order. If not specified,
    /// the candidates of the configuration are used, or else the candidates are read from the ballots in
    /// order of first appearance.
    #[clap(long, value_parser, use_value_delimiter = true, value_delimiter = ',')]
    pub candidates: Option<Vec<String>>,

    /// (constructionOrder or random) How to order the pairs of equal strength.
    #[clap(long, value_parser)]
    pub tiebreak: Option<String>,

    /// The seed of the random tiebreak mode.
    #[clap(long, value_parser)]
    pub seed: Option<u32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
