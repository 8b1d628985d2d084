// ********* Input data structures ***********

/// The label used by respondents to say that they received no benefit at all.
pub const NOTHING_LABEL: &str = "כלום";

/// The label used by respondents who were laid off. It is not a benefit.
pub const LAID_OFF_LABEL: &str = "פיטורים";

/// Company names that identify rows which must not enter the report.
///
/// The survey export spells the placeholder both ways.
pub const UNKNOWN_COMPANIES: [&str; 2] = ["Unknown", "Uknown"];

/// One row of the survey, as read from the input file.
///
/// The fields follow the positional order of the five columns of the export.
/// `benefit_count` is the value found in the file: it is never trusted and only
/// kept for diagnostics.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawRecord {
    pub company: Option<String>,
    pub benefits_raw: Option<String>,
    pub additional_comment: Option<String>,
    pub got_nothing: bool,
    pub benefit_count: Option<u32>,
}

/// The benefits of a respondent after removing the sentinel labels.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum CleanedBenefits {
    /// The respondent left the field blank.
    NotSupplied,
    /// The respondent only wrote sentinel labels ("nothing", "laid off").
    NothingReceived,
    /// The remaining benefits, in the order they were written.
    /// Guaranteed to never be empty at construction.
    Listed(Vec<String>),
}

impl CleanedBenefits {
    /// The cleaned tokens, or None when the cleaned value is absent.
    pub fn tokens(&self) -> Option<&[String]> {
        match self {
            CleanedBenefits::Listed(tokens) => Some(tokens.as_slice()),
            _ => None,
        }
    }

    pub fn count(&self) -> u32 {
        self.tokens().map(|t| t.len() as u32).unwrap_or(0)
    }

    /// The textual form of the cleaned value, as it would be written back in a
    /// spreadsheet cell.
    pub fn to_text(&self) -> Option<String> {
        self.tokens().map(|t| t.join(", "))
    }
}

/// A respondent, after cleaning.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RespondentRecord {
    pub company: Option<String>,
    pub benefits: CleanedBenefits,
    pub additional_comment: Option<String>,
    pub got_nothing: bool,
    /// Recomputed from `benefits`.
    pub benefit_count: u32,
}

// ******** Output data structures *********

/// How often a benefit is reported.
#[derive(PartialEq, Debug, Clone)]
pub struct BenefitFrequency {
    pub name: String,
    /// Number of respondents reporting this benefit.
    pub count: u32,
    /// Share of all the respondents of the table, in percent, rounded to one decimal.
    /// Halves round to the even digit: 1 respondent out of 80 gives 1.2, not 1.3.
    pub percentage: f64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ComparisonRow {
    pub benefit: String,
    pub in_first: bool,
    pub in_second: bool,
}

/// Side-by-side view of the benefits of two companies.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Comparison {
    pub first: String,
    pub second: String,
    /// Sorted by benefit name.
    pub rows: Vec<ComparisonRow>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LeaderboardEntry {
    pub company: String,
    /// The largest number of benefits reported by a single respondent of this company.
    pub max_benefits: u32,
    /// The distinct benefits reported for this company, sorted.
    pub benefits: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Leaderboard {
    pub most: Vec<LeaderboardEntry>,
    pub fewest: Vec<LeaderboardEntry>,
}

// ********* Configuration **********

/// Which tokens are dropped when the cleaned benefits are tokenized again by a query.
///
/// The overview chart keeps everything, while the company detail and the leaderboard
/// drop the sentinel labels a second time.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FilterPolicy {
    KeepAll,
    ExcludeSentinels,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyRules {
    pub nothing_label: String,
    pub laid_off_label: String,
    pub excluded_companies: Vec<String>,
}

impl SurveyRules {
    pub fn is_sentinel(&self, token: &str) -> bool {
        token == self.nothing_label || token == self.laid_off_label
    }

    pub fn is_excluded_company(&self, company: &str) -> bool {
        self.excluded_companies.iter().any(|c| c == company)
    }
}

impl Default for SurveyRules {
    fn default() -> Self {
        SurveyRules {
            nothing_label: NOTHING_LABEL.to_string(),
            laid_off_label: LAID_OFF_LABEL.to_string(),
            excluded_companies: UNKNOWN_COMPANIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
