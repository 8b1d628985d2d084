use crate::report::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TITLE: &str = "הטבות בעבודה בזמן מלחמה";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "title")]
    pub _title: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

impl OutputSettings {
    pub fn title(&self) -> String {
        self._title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }
}

/// The supported formats for the survey file.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Xlsx,
    Csv,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl DataSource {
    /// The format of the file. When it is not provided, it is guessed from the extension.
    pub fn provider(&self) -> ReportResult<Provider> {
        match self.provider.as_deref() {
            Some("xlsx") | Some("excel") => Ok(Provider::Xlsx),
            Some("csv") => Ok(Provider::Csv),
            Some(x) => {
                whatever!("Provider not implemented {:?}", x)
            }
            None => {
                let extension = Path::new(&self.file_path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase());
                match extension.as_deref() {
                    Some("csv") => Ok(Provider::Csv),
                    _ => Ok(Provider::Xlsx),
                }
            }
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    #[serde(rename = "nothingLabel")]
    pub nothing_label: Option<String>,
    #[serde(rename = "laidOffLabel")]
    pub laid_off_label: Option<String>,
    #[serde(rename = "excludedCompanies")]
    pub excluded_companies: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataSource")]
    pub data_source: DataSource,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl ReportConfig {
    /// The configuration when only an input file is given.
    pub fn from_input(path: String) -> ReportConfig {
        ReportConfig {
            output_settings: OutputSettings::default(),
            data_source: DataSource {
                provider: None,
                file_path: path,
                excel_worksheet_name: None,
            },
            rules: RulesConfig::default(),
        }
    }
}

pub fn read_config(path: &str) -> ReportResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Fills the rules that were not specified with the defaults of the survey.
pub fn validate_rules(rules: &RulesConfig) -> SurveyRules {
    let defaults = SurveyRules::default();
    let res = SurveyRules {
        nothing_label: rules
            .nothing_label
            .clone()
            .unwrap_or(defaults.nothing_label),
        laid_off_label: rules
            .laid_off_label
            .clone()
            .unwrap_or(defaults.laid_off_label),
        excluded_companies: rules
            .excluded_companies
            .clone()
            .unwrap_or(defaults.excluded_companies),
    };
    if res.nothing_label == res.laid_off_label {
        warn!(
            "validate_rules: the same label {:?} is used for nothing and laid off",
            res.nothing_label
        );
    }
    res
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: {} bytes", contents.len());
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
