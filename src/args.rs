use clap::Parser;

/// This is a reporting program for the work-at-war benefits survey.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the report configuration, in JSON.
    /// For more information about the file format, read the manual of the benefits_survey crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing a summary in JSON format. If provided, warbenefits will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the report will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The file containing the survey responses. Setting this option overrides
    /// the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv) The type of the input. If not specified, it is guessed from the extension of the input file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first worksheet is used otherwise.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default all) The view to display: overview, company, leaderboard, quotes or all.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    /// The company to look up in the company view.
    #[clap(long, value_parser)]
    pub company: Option<String>,

    /// (optional) A second company, to compare with the one passed with --company.
    #[clap(long, value_parser)]
    pub compare: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
