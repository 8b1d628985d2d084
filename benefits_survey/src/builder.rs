use log::debug;

pub use crate::config::*;
use crate::{clean_benefits, SurveyTable};

/// A builder for assembling the survey table.
///
/// Rows are cleaned as they are added. Once built, the table cannot be changed.
///
/// ```
/// pub use benefits_survey::builder::Builder;
/// pub use benefits_survey::SurveyRules;
///
/// let mut builder = Builder::new(&SurveyRules::default());
///
/// builder.add_row_simple("Acme", "חופשה, כלום");
/// builder.add_row_simple("Uknown", "מענק");
///
/// let table = builder.build();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.records()[0].benefit_count, 1);
/// ```
pub struct Builder {
    pub(crate) _rules: SurveyRules,
    pub(crate) _records: Vec<RespondentRecord>,
}

impl Builder {
    pub fn new(rules: &SurveyRules) -> Builder {
        Builder {
            _rules: rules.clone(),
            _records: Vec::new(),
        }
    }

    /// Adds a row made only of a company and the benefits written by the respondent.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_row_simple(&mut self, company: &str, benefits: &str) -> bool {
        self.add_row(&RawRecord {
            company: Some(company.to_string()),
            benefits_raw: Some(benefits.to_string()),
            ..RawRecord::default()
        })
    }

    /// Adds a row as read from the survey.
    ///
    /// Returns false if the row was dropped because its company is one of the
    /// excluded placeholders.
    pub fn add_row(&mut self, raw: &RawRecord) -> bool {
        if let Some(company) = raw.company.as_deref() {
            if self._rules.is_excluded_company(company) {
                debug!("add_row: dropping row for excluded company {:?}", company);
                return false;
            }
        }
        let benefits = clean_benefits(raw.benefits_raw.as_deref(), &self._rules);
        let benefit_count = benefits.count();
        if raw.benefit_count.is_some() && raw.benefit_count != Some(benefit_count) {
            debug!(
                "add_row: company {:?}: replacing benefit count {:?} by {}",
                raw.company, raw.benefit_count, benefit_count
            );
        }
        self._records.push(RespondentRecord {
            company: raw.company.clone(),
            benefits,
            additional_comment: raw.additional_comment.clone(),
            got_nothing: raw.got_nothing,
            benefit_count,
        });
        true
    }

    /// Adds all the rows, and returns how many were kept.
    pub fn add_rows(&mut self, raws: &[RawRecord]) -> usize {
        raws.iter().filter(|raw| self.add_row(raw)).count()
    }

    pub fn build(self) -> SurveyTable {
        SurveyTable {
            rules: self._rules,
            records: self._records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(company: Option<&str>, benefits: Option<&str>, count: Option<u32>) -> RawRecord {
        RawRecord {
            company: company.map(|s| s.to_string()),
            benefits_raw: benefits.map(|s| s.to_string()),
            additional_comment: None,
            got_nothing: false,
            benefit_count: count,
        }
    }

    #[test]
    fn drops_excluded_companies() {
        let mut builder = Builder::new(&SurveyRules::default());
        let kept = builder.add_rows(&[
            raw(Some("Acme"), Some("חופשה"), Some(1)),
            raw(Some("Unknown"), Some("חופשה"), Some(1)),
            raw(Some("Uknown"), Some("מענק"), Some(1)),
            raw(None, Some("מענק"), Some(1)),
        ]);
        assert_eq!(kept, 2);
        let table = builder.build();
        assert_eq!(table.len(), 2);
        assert!(table
            .records()
            .iter()
            .all(|r| r.company.as_deref() != Some("Unknown")));
    }

    #[test]
    fn recomputes_count() {
        let mut builder = Builder::new(&SurveyRules::default());
        builder.add_row(&raw(Some("Acme"), Some("חופשה, מענק, פיטורים"), Some(7)));
        builder.add_row(&raw(Some("Acme"), None, Some(3)));
        let table = builder.build();
        assert_eq!(table.records()[0].benefit_count, 2);
        assert_eq!(table.records()[1].benefit_count, 0);
        assert_eq!(table.records()[1].benefits, CleanedBenefits::NotSupplied);
    }

    #[test]
    fn custom_rules() {
        let rules = SurveyRules {
            nothing_label: "nothing".to_string(),
            laid_off_label: "laid off".to_string(),
            excluded_companies: vec!["N/A".to_string()],
        };
        let mut builder = Builder::new(&rules);
        assert!(!builder.add_row_simple("N/A", "bonus"));
        assert!(builder.add_row_simple("Uknown", "bonus, nothing"));
        let table = builder.build();
        assert_eq!(
            table.records()[0].benefits,
            CleanedBenefits::Listed(vec!["bonus".to_string()])
        );
    }
}
