use std::path::Path;

use crate::report::*;

/// The number of columns of the survey export.
pub const NUM_COLUMNS: usize = 5;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn check_column_count(lineno: u64, found: usize) -> ReportResult<()> {
    ensure!(found == NUM_COLUMNS, WrongColumnCountSnafu { lineno, found });
    Ok(())
}

/// A text cell. Blank cells are treated as missing.
pub fn text_field(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Reads the "got nothing" column, which may be filled with a mark, a number or a word.
pub fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "x" | "v" | "כן"
    )
}

pub fn parse_count(s: &str) -> Option<u32> {
    let t = s.trim();
    t.parse::<u32>()
        .ok()
        .or_else(|| t.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u32))
}

/// Puts together the five columns of a row.
pub fn assemble_record(
    company: Option<String>,
    benefits_raw: Option<String>,
    additional_comment: Option<String>,
    got_nothing: bool,
    benefit_count: Option<u32>,
) -> RawRecord {
    RawRecord {
        company: company.map(|s| s.trim().to_string()),
        benefits_raw,
        additional_comment,
        got_nothing,
        benefit_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("כן"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("לא"));
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count(" 2.0"), Some(2));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn columns() {
        assert!(check_column_count(1, 5).is_ok());
        assert!(matches!(
            check_column_count(3, 6),
            Err(ReportError::WrongColumnCount { lineno: 3, found: 6 })
        ));
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/data/survey.xlsx"), "survey.xlsx");
        assert_eq!(text_field("  "), None);
        assert_eq!(text_field("Acme"), Some("Acme".to_string()));
    }
}
