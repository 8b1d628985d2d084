use log::{debug, info, warn};

use benefits_survey::builder::Builder;
use benefits_survey::quotes::{Quote, NEGATIVE_QUOTES, POSITIVE_QUOTES};
use benefits_survey::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod render;

/// The number of companies in each list of the leaderboard.
const LEADERBOARD_SIZE: usize = 5;

const PRESENT_MARK: &str = "✅";
const ABSENT_MARK: &str = "❌";

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The spreadsheet does not contain any data"))]
    EmptyExcel {},
    #[snafu(display("Cannot find worksheet {name}"))]
    MissingWorksheet { name: String },
    #[snafu(display("Line {lineno}: expected 5 columns but found {found}"))]
    WrongColumnCount { lineno: u64, found: usize },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of the CSV file"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No input file: use --input or a configuration file"))]
    MissingInput {},
    #[snafu(display("Error rendering the report"))]
    Rendering { source: std::fmt::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

/// The views of the report.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum View {
    Overview,
    Company,
    Leaderboard,
    Quotes,
    All,
}

impl View {
    fn parse(s: &str) -> ReportResult<View> {
        match s {
            "overview" => Ok(View::Overview),
            "company" => Ok(View::Company),
            "leaderboard" => Ok(View::Leaderboard),
            "quotes" => Ok(View::Quotes),
            "all" => Ok(View::All),
            x => {
                whatever!(
                    "Unknown view {:?}: expected overview, company, leaderboard, quotes or all",
                    x
                )
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Company => "company",
            View::Leaderboard => "leaderboard",
            View::Quotes => "quotes",
            View::All => "all",
        }
    }

    fn shows(&self, other: View) -> bool {
        *self == View::All || *self == other
    }
}

/// The companies selected by the user for the company view.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Selection {
    pub company: Option<String>,
    pub compare: Option<String>,
}

impl Selection {
    /// The second company, only when it differs from the first one.
    fn comparison(&self) -> Option<(&str, &str)> {
        match (self.company.as_deref(), self.compare.as_deref()) {
            (Some(c1), Some(c2)) if c1 != c2 => Some((c1, c2)),
            (Some(c1), Some(_)) => {
                warn!("Not comparing company {:?} with itself", c1);
                None
            }
            _ => None,
        }
    }
}

fn overview_to_json(table: &SurveyTable) -> JSValue {
    let range = benefit_count_range(table);
    let frequencies: Vec<JSValue> = benefit_frequencies(table, FilterPolicy::KeepAll)
        .iter()
        .map(|f| json!({"benefit": f.name, "count": f.count, "percentage": f.percentage}))
        .collect();
    json!({
        "respondents": table.len(),
        "minBenefits": range.map(|r| r.0),
        "maxBenefits": range.map(|r| r.1),
        "frequencies": frequencies,
    })
}

fn company_benefits_to_json(name: &str, benefits: &[String]) -> JSValue {
    json!({"name": name, "benefits": benefits, "count": benefits.len()})
}

fn comparison_to_json(comparison: &Comparison) -> JSValue {
    let mark = |present: bool| if present { PRESENT_MARK } else { ABSENT_MARK };
    let rows: Vec<JSValue> = comparison
        .rows
        .iter()
        .map(|row| {
            let mut m: JSMap<String, JSValue> = JSMap::new();
            m.insert("benefit".to_string(), json!(row.benefit));
            m.insert(comparison.first.clone(), json!(mark(row.in_first)));
            m.insert(comparison.second.clone(), json!(mark(row.in_second)));
            JSValue::Object(m)
        })
        .collect();
    json!({"companies": [comparison.first, comparison.second], "rows": rows})
}

fn company_to_json(table: &SurveyTable, selection: &Selection) -> JSValue {
    let selected: Vec<JSValue> = selection
        .company
        .iter()
        .chain(selection.compare.iter())
        .map(|c| {
            company_benefits_to_json(
                c,
                &company_benefits(table, c, FilterPolicy::ExcludeSentinels),
            )
        })
        .collect();
    let comparison = selection
        .comparison()
        .map(|(c1, c2)| comparison_to_json(&compare_companies(table, c1, c2)));
    json!({
        "companies": companies(table),
        "selected": selected,
        "comparison": comparison,
    })
}

fn leaderboard_to_json(lb: &Leaderboard) -> JSValue {
    let entries = |l: &[LeaderboardEntry]| -> Vec<JSValue> {
        l.iter()
            .map(|e| json!({"company": e.company, "maxBenefits": e.max_benefits, "benefits": e.benefits}))
            .collect()
    };
    json!({"most": entries(&lb.most), "fewest": entries(&lb.fewest)})
}

fn quotes_to_json() -> JSValue {
    let quotes = |l: &[Quote]| -> Vec<JSValue> {
        l.iter()
            .map(|q| json!({"company": q.company, "quote": q.text}))
            .collect()
    };
    json!({"positive": quotes(POSITIVE_QUOTES), "negative": quotes(NEGATIVE_QUOTES)})
}

fn build_summary_js(
    title: &str,
    table: &SurveyTable,
    view: View,
    selection: &Selection,
) -> JSValue {
    let mut js = json!({
        "config": {"title": title, "view": view.name()},
    });
    if view.shows(View::Overview) {
        js["overview"] = overview_to_json(table);
    }
    if view.shows(View::Company) {
        js["company"] = company_to_json(table, selection);
    }
    if view.shows(View::Leaderboard) {
        js["leaderboard"] = leaderboard_to_json(&leaderboard(table, LEADERBOARD_SIZE));
    }
    if view.shows(View::Quotes) {
        js["quotes"] = quotes_to_json();
    }
    js
}

fn render_views(
    title: &str,
    table: &SurveyTable,
    view: View,
    selection: &Selection,
) -> ReportResult<String> {
    let mut sections: Vec<render::Rendered> = vec![render::render_header(title, table)];
    if view.shows(View::Overview) {
        sections.push(render::render_overview(table));
    }
    if view.shows(View::Company) {
        sections.push(render::render_company(table, selection));
    }
    if view.shows(View::Leaderboard) {
        sections.push(render::render_leaderboard(&leaderboard(
            table,
            LEADERBOARD_SIZE,
        )));
    }
    if view.shows(View::Quotes) {
        sections.push(render::render_quotes());
    }
    let sections: Vec<String> = sections
        .into_iter()
        .collect::<Result<_, _>>()
        .context(RenderingSnafu {})?;
    Ok(sections.join("\n"))
}

fn read_survey_data(source: &DataSource) -> ReportResult<Vec<RawRecord>> {
    info!("Attempting to read survey file {:?}", source.file_path);
    let provider = source.provider()?;
    match provider {
        Provider::Xlsx => {
            io_excel::read_excel_file(&source.file_path, source.excel_worksheet_name.as_deref())
        }
        Provider::Csv => io_csv::read_csv_file(&source.file_path),
    }
}

fn build_table(raws: &[RawRecord], rules: &SurveyRules) -> SurveyTable {
    let mut builder = Builder::new(rules);
    let kept = builder.add_rows(raws);
    info!(
        "Kept {} respondents out of {} rows ({} dropped by company)",
        kept,
        raws.len(),
        raws.len() - kept
    );
    builder.build()
}

/// Gathers the settings from the configuration file (if any) and the command line.
/// The command line takes precedence.
fn resolve_config(args: &Args) -> ReportResult<ReportConfig> {
    let mut config = if let Some(config_path) = args.config.as_deref() {
        let config_p = Path::new(config_path);
        let mut config = read_config(config_path)?;
        // Relative paths are relative to the configuration file.
        let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
        let p: PathBuf = [root_p, Path::new(&config.data_source.file_path)]
            .iter()
            .collect();
        config.data_source.file_path = p.as_path().display().to_string();
        config
    } else {
        let input = args.input.clone().context(MissingInputSnafu {})?;
        ReportConfig::from_input(input)
    };

    if let Some(input) = args.input.clone() {
        if config.data_source.file_path != input {
            // The provider of the configuration file describes another file.
            config.data_source.provider = None;
            config.data_source.excel_worksheet_name = None;
        }
        config.data_source.file_path = input;
    }
    if let Some(input_type) = args.input_type.clone() {
        config.data_source.provider = Some(input_type);
    }
    if let Some(name) = args.excel_worksheet_name.clone() {
        config.data_source.excel_worksheet_name = Some(name);
    }
    if let Some(out) = args.out.clone() {
        config.output_settings.output_path = Some(out);
    }
    debug!("resolve_config: {:?}", config);
    Ok(config)
}

fn write_summary(out: &str, pretty_js: &str) -> ReportResult<()> {
    match out {
        "" => {}
        "stdout" => {
            println!("{}", pretty_js);
        }
        path => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(summary_path: &str, pretty_js_stats: &str) -> ReportResult<()> {
    let summary_ref = read_summary(summary_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

/// Loads the survey and produces the report requested on the command line.
///
/// Returns the JSON summary of the report.
pub fn run_report(args: &Args) -> ReportResult<JSValue> {
    let config = resolve_config(args)?;
    info!("config: {:?}", config);

    let rules = validate_rules(&config.rules);
    let view = View::parse(args.view.as_deref().unwrap_or("all"))?;
    let selection = Selection {
        company: args.company.clone(),
        compare: args.compare.clone(),
    };

    let raws = read_survey_data(&config.data_source)?;
    let table = build_table(&raws, &rules);
    if table.is_empty() {
        warn!("No respondent left after loading {:?}", config.data_source.file_path);
    }

    let title = config.output_settings.title();
    println!("{}", render_views(&title, &table, view, &selection)?);

    let summary_js = build_summary_js(&title, &table, view, &selection);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    if let Some(out) = config.output_settings.output_path.as_deref() {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.as_deref() {
        check_reference(summary_p, &pretty_js_stats)?;
    }

    Ok(summary_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_path(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn args() -> Args {
        Args {
            config: None,
            reference: None,
            out: None,
            input: None,
            input_type: None,
            excel_worksheet_name: None,
            view: None,
            company: None,
            compare: None,
            verbose: false,
        }
    }

    fn sample_args() -> Args {
        Args {
            config: Some(data_path("work_at_war_config.json")),
            reference: Some(data_path("work_at_war_expected_summary.json")),
            company: Some("Acme".to_string()),
            compare: Some("Gamma".to_string()),
            ..args()
        }
    }

    #[test]
    fn sample_csv() {
        let res = run_report(&sample_args());
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn sample_xlsx() {
        let a = Args {
            input: Some(data_path("work_at_war_sample.xlsx")),
            ..sample_args()
        };
        let res = run_report(&a);
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn sample_xlsx_named_worksheet() {
        let a = Args {
            input: Some(data_path("work_at_war_sample.xlsx")),
            excel_worksheet_name: Some("Responses".to_string()),
            ..sample_args()
        };
        assert!(run_report(&a).is_ok());
        let missing = Args {
            input: Some(data_path("work_at_war_sample.xlsx")),
            excel_worksheet_name: Some("Nope".to_string()),
            ..sample_args()
        };
        assert!(matches!(
            run_report(&missing),
            Err(ReportError::MissingWorksheet { .. })
        ));
    }

    #[test]
    fn reference_mismatch() {
        let a = Args {
            compare: Some("Beta".to_string()),
            ..sample_args()
        };
        assert!(matches!(
            run_report(&a),
            Err(ReportError::Whatever { .. })
        ));
    }

    #[test]
    fn company_view_summary() {
        let a = Args {
            input: Some(data_path("work_at_war_sample.csv")),
            view: Some("company".to_string()),
            company: Some("Acme".to_string()),
            ..args()
        };
        let js = run_report(&a).unwrap();
        let keys: Vec<&String> = js.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["company", "config"]);
        assert_eq!(js["config"]["view"], json!("company"));
        let company = &js["company"];
        assert!(company["companies"]
            .as_array()
            .unwrap()
            .contains(&json!("Gamma")));
        let selected = company["selected"].as_array().unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0]["name"], json!("Acme"));
        assert_eq!(
            selected[0]["count"],
            json!(selected[0]["benefits"].as_array().unwrap().len())
        );
        assert!(company["comparison"].is_null());
    }

    #[test]
    fn single_view() {
        let a = Args {
            input: Some(data_path("work_at_war_sample.csv")),
            view: Some("leaderboard".to_string()),
            ..args()
        };
        let js = run_report(&a).unwrap();
        assert!(js.get("overview").is_none());
        assert!(js.get("quotes").is_none());
        let most = js["leaderboard"]["most"].as_array().unwrap();
        assert_eq!(most.len(), 5);
        assert_eq!(most[0]["company"], json!("Gamma"));
        assert_eq!(most[0]["maxBenefits"], json!(3));
    }

    #[test]
    fn company_compared_with_itself() {
        let a = Args {
            input: Some(data_path("work_at_war_sample.csv")),
            view: Some("company".to_string()),
            company: Some("Acme".to_string()),
            compare: Some("Acme".to_string()),
            ..args()
        };
        let js = run_report(&a).unwrap();
        assert_eq!(js["company"]["comparison"], JSValue::Null);
        assert_eq!(js["company"]["selected"][0]["count"], json!(2));
    }

    #[test]
    fn unknown_view() {
        let a = Args {
            input: Some(data_path("work_at_war_sample.csv")),
            view: Some("charts".to_string()),
            ..args()
        };
        assert!(run_report(&a).is_err());
    }

    #[test]
    fn missing_input() {
        assert!(matches!(
            run_report(&args()),
            Err(ReportError::MissingInput {})
        ));
        let a = Args {
            input: Some(data_path("does_not_exist.xlsx")),
            ..args()
        };
        assert!(matches!(
            run_report(&a),
            Err(ReportError::OpeningExcel { .. })
        ));
    }

    #[test]
    fn wrong_column_count() {
        let a = Args {
            input: Some(data_path("four_columns.csv")),
            ..args()
        };
        assert!(matches!(
            run_report(&a),
            Err(ReportError::WrongColumnCount { lineno: 1, found: 4 })
        ));
    }

    #[test]
    fn empty_survey() {
        let a = Args {
            input: Some(data_path("header_only.csv")),
            view: Some("overview".to_string()),
            ..args()
        };
        let js = run_report(&a).unwrap();
        assert_eq!(js["overview"]["respondents"], json!(0));
        assert_eq!(js["overview"]["minBenefits"], JSValue::Null);
        assert_eq!(js["overview"]["frequencies"], json!([]));
    }
}
