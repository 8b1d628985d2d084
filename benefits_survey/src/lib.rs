mod config;
use log::{debug, info};

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub use crate::config::*;

pub mod builder;
pub mod manual;
pub mod quotes;

/// The survey, after cleaning.
///
/// It is built once with the [builder::Builder] and only read afterwards. All the
/// queries of this crate borrow it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyTable {
    pub(crate) rules: SurveyRules,
    pub(crate) records: Vec<RespondentRecord>,
}

impl SurveyTable {
    /// The respondents, in the order of the input file.
    pub fn records(&self) -> &[RespondentRecord] {
        &self.records
    }

    pub fn rules(&self) -> &SurveyRules {
        &self.rules
    }

    /// The number of respondents. This is the denominator of all the percentages.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn company_records<'a>(
        &'a self,
        company: &'a str,
    ) -> impl Iterator<Item = &'a RespondentRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.company.as_deref() == Some(company))
    }
}

fn tokenize(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(|t| t.trim()).filter(|t| !t.is_empty())
}

/// Cleans the benefits written by a respondent.
///
/// The text is split on commas, every token is trimmed and the sentinel labels are
/// removed. Blank tokens are dropped as well.
pub fn clean_benefits(raw: Option<&str>, rules: &SurveyRules) -> CleanedBenefits {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return CleanedBenefits::NotSupplied,
    };
    let tokens: Vec<String> = tokenize(raw)
        .filter(|t| !rules.is_sentinel(t))
        .map(|t| t.to_string())
        .collect();
    if tokens.is_empty() {
        if tokenize(raw).next().is_some() {
            CleanedBenefits::NothingReceived
        } else {
            CleanedBenefits::NotSupplied
        }
    } else {
        CleanedBenefits::Listed(tokens)
    }
}

/// The tokens of a respondent after applying the given filtering policy.
fn filtered_tokens<'a>(
    record: &'a RespondentRecord,
    rules: &'a SurveyRules,
    policy: FilterPolicy,
) -> impl Iterator<Item = &'a str> + 'a {
    record
        .benefits
        .tokens()
        .unwrap_or(&[])
        .iter()
        .flat_map(|t| tokenize(t.as_str()))
        .filter(move |t| match policy {
            FilterPolicy::KeepAll => true,
            FilterPolicy::ExcludeSentinels => !rules.is_sentinel(t),
        })
}

/// The smallest and largest number of benefits reported by a single respondent.
///
/// Returns None if the table is empty.
pub fn benefit_count_range(table: &SurveyTable) -> Option<(u32, u32)> {
    let counts = table.records.iter().map(|r| r.benefit_count);
    let min = counts.clone().min()?;
    let max = counts.max()?;
    Some((min, max))
}

/// Rounds to one decimal, with halves going to the even digit (12.5 -> 12, 37.5 -> 38).
fn round_one_decimal(value: f64) -> f64 {
    let scaled = value * 10.0;
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    rounded / 10.0
}

/// Counts how many respondents report each benefit.
///
/// The percentages are computed against all the respondents of the table, including the
/// ones who did not report anything. The result is sorted by decreasing count. Benefits
/// with the same count keep the order in which they first appear in the table.
pub fn benefit_frequencies(table: &SurveyTable, policy: FilterPolicy) -> Vec<BenefitFrequency> {
    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for r in table.records.iter() {
        let mut seen: HashSet<&str> = HashSet::new();
        for t in filtered_tokens(r, &table.rules, policy) {
            // A benefit written twice by the same respondent is only counted once.
            if !seen.insert(t) {
                continue;
            }
            match order.get(t) {
                Some(idx) => counts[*idx].1 += 1,
                None => {
                    order.insert(t, counts.len());
                    counts.push((t, 1));
                }
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = table.len() as f64;
    let res: Vec<BenefitFrequency> = counts
        .into_iter()
        .map(|(name, count)| BenefitFrequency {
            name: name.to_string(),
            count,
            percentage: round_one_decimal(count as f64 / total * 100.0),
        })
        .collect();
    info!(
        "benefit_frequencies: {} distinct benefits over {} respondents",
        res.len(),
        table.len()
    );
    res
}

/// The sorted list of all the companies present in the table.
pub fn companies(table: &SurveyTable) -> Vec<String> {
    let names: BTreeSet<&str> = table
        .records
        .iter()
        .filter_map(|r| r.company.as_deref())
        .collect();
    names.into_iter().map(|s| s.to_string()).collect()
}

fn company_benefit_set<'a>(
    table: &'a SurveyTable,
    company: &'a str,
    policy: FilterPolicy,
) -> BTreeSet<&'a str> {
    table
        .company_records(company)
        .flat_map(|r| filtered_tokens(r, &table.rules, policy))
        .collect()
}

/// The distinct benefits reported for a company, sorted by name.
///
/// A company that only ever reported the "nothing" label has no benefits. An unknown
/// company has no benefits either.
pub fn company_benefits(table: &SurveyTable, company: &str, policy: FilterPolicy) -> Vec<String> {
    let benefits = company_benefit_set(table, company, policy);
    debug!("company_benefits: {:?}: {:?}", company, benefits);
    if benefits.len() == 1 && benefits.contains(table.rules.nothing_label.as_str()) {
        return Vec::new();
    }
    benefits.into_iter().map(|s| s.to_string()).collect()
}

/// Puts the benefits of two companies side by side.
pub fn compare_companies(table: &SurveyTable, first: &str, second: &str) -> Comparison {
    let first_benefits = company_benefits(table, first, FilterPolicy::ExcludeSentinels);
    let second_benefits = company_benefits(table, second, FilterPolicy::ExcludeSentinels);
    let all_benefits: BTreeSet<&String> =
        first_benefits.iter().chain(second_benefits.iter()).collect();
    let rows = all_benefits
        .into_iter()
        .map(|b| ComparisonRow {
            benefit: b.clone(),
            in_first: first_benefits.contains(b),
            in_second: second_benefits.contains(b),
        })
        .collect();
    Comparison {
        first: first.to_string(),
        second: second.to_string(),
        rows,
    }
}

/// Ranks the companies by the largest number of benefits reported by one of their
/// respondents.
///
/// Both lists hold at most `size` companies. Companies with the same maximum are
/// listed in alphabetical order. Respondents without a company are not ranked.
pub fn leaderboard(table: &SurveyTable, size: usize) -> Leaderboard {
    let mut max_by_company: BTreeMap<&str, u32> = BTreeMap::new();
    for r in table.records.iter() {
        if let Some(company) = r.company.as_deref() {
            let e = max_by_company.entry(company).or_insert(0);
            *e = (*e).max(r.benefit_count);
        }
    }
    let grouped: Vec<(&str, u32)> = max_by_company.into_iter().collect();
    debug!("leaderboard: max benefits per company: {:?}", grouped);

    let make_entry = |(company, max_benefits): &(&str, u32)| LeaderboardEntry {
        company: company.to_string(),
        max_benefits: *max_benefits,
        benefits: company_benefit_set(table, company, FilterPolicy::ExcludeSentinels)
            .into_iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let mut most = grouped.clone();
    most.sort_by(|a, b| b.1.cmp(&a.1));
    most.truncate(size);

    let mut fewest = grouped;
    fewest.sort_by_key(|p| p.1);
    fewest.truncate(size);

    Leaderboard {
        most: most.iter().map(make_entry).collect(),
        fewest: fewest.iter().map(make_entry).collect(),
    }
}
