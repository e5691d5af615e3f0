use clap::Parser;

/// This program computes an order for the state primaries, from the results of a previous election.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the input and the options of the ranking.
    /// The options passed on the command line take precedence over this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default election2016.csv) The table of states, with the columns State, Dem, Rep and EC.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv, or xlsx for files ending in .xlsx) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (delta or delta_ec, default delta) The scoring methodology. 'delta' only looks at how close
    /// the previous race was, 'delta_ec' also adds the share of the state in the electoral college.
    #[clap(short, long, value_parser)]
    pub method: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a summary of the ranking will be written in JSON format
    /// to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected text report. If provided, the printed
    /// report is checked against it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
