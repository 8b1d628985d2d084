// Text rendering of the views, for the terminal.

use std::fmt::{self, Write};

use crate::report::*;

/// Width of the longest bar in the frequency chart.
const BAR_WIDTH: f64 = 40.0;

const NO_BENEFITS: &str = "No benefits reported";

pub type Rendered = Result<String, fmt::Error>;

pub fn render_header(title: &str, table: &SurveyTable) -> Rendered {
    let mut s = String::new();
    writeln!(s, "{}", title)?;
    writeln!(s, "{}", "=".repeat(title.chars().count()))?;
    writeln!(
        s,
        "Based on {} reports filled in by employees. There may be gaps with the actual situation.",
        table.len()
    )?;
    Ok(s)
}

pub fn render_overview(table: &SurveyTable) -> Rendered {
    let mut s = String::new();
    writeln!(s, "## Overview")?;
    match benefit_count_range(table) {
        Some((min, max)) => {
            writeln!(s, "Minimum reported benefits: {}", min)?;
            writeln!(s, "Maximum reported benefits: {}", max)?;
        }
        None => {
            writeln!(s, "No reports.")?;
        }
    }
    let frequencies = benefit_frequencies(table, FilterPolicy::KeepAll);
    if frequencies.is_empty() {
        return Ok(s);
    }
    writeln!(s)?;
    writeln!(s, "Benefit frequency (% of respondents)")?;
    let name_width = frequencies
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0);
    for f in frequencies.iter() {
        let bar_len = (f.percentage / 100.0 * BAR_WIDTH).round() as usize;
        writeln!(
            s,
            "{:>width$} | {} {:.1}% ({})",
            f.name,
            "█".repeat(bar_len),
            f.percentage,
            f.count,
            width = name_width
        )?;
    }
    Ok(s)
}

fn render_list(s: &mut String, company: &str, benefits: &[String]) -> fmt::Result {
    writeln!(s, "Benefits reported at {}:", company)?;
    if benefits.is_empty() {
        writeln!(s, "  {}", NO_BENEFITS)?;
    } else {
        for (i, b) in benefits.iter().enumerate() {
            writeln!(s, "  {}. {}", i + 1, b)?;
        }
    }
    writeln!(s, "Number of reported benefits: {}", benefits.len())
}

pub fn render_comparison(comparison: &Comparison) -> Rendered {
    let mut s = String::new();
    let name_width = comparison
        .rows
        .iter()
        .map(|r| r.benefit.chars().count())
        .max()
        .unwrap_or(0)
        .max("Benefit".len());
    writeln!(
        s,
        "{:<width$} | {} | {}",
        "Benefit",
        comparison.first,
        comparison.second,
        width = name_width
    )?;
    let mark = |present: bool| if present { PRESENT_MARK } else { ABSENT_MARK };
    for row in comparison.rows.iter() {
        writeln!(
            s,
            "{:<width$} | {:^w1$} | {:^w2$}",
            row.benefit,
            mark(row.in_first),
            mark(row.in_second),
            width = name_width,
            w1 = comparison.first.chars().count(),
            w2 = comparison.second.chars().count()
        )?;
    }
    Ok(s)
}

pub fn render_company(table: &SurveyTable, selection: &Selection) -> Rendered {
    let mut s = String::new();
    writeln!(s, "## What did my company give its employees?")?;
    let company = match selection.company.as_deref() {
        Some(c) => c,
        None => {
            writeln!(s, "Select a company with --company. Available companies:")?;
            for c in companies(table) {
                writeln!(s, "  {}", c)?;
            }
            return Ok(s);
        }
    };
    render_list(
        &mut s,
        company,
        &company_benefits(table, company, FilterPolicy::ExcludeSentinels),
    )?;
    if let Some(c2) = selection.compare.as_deref().filter(|c2| *c2 != company) {
        writeln!(s)?;
        render_list(
            &mut s,
            c2,
            &company_benefits(table, c2, FilterPolicy::ExcludeSentinels),
        )?;
    }
    if let Some((c1, c2)) = selection.comparison() {
        writeln!(s)?;
        writeln!(s, "### Comparison")?;
        s.push_str(&render_comparison(&compare_companies(table, c1, c2))?);
    }
    Ok(s)
}

// Only the "fewest" list spells out the companies without any benefit.
fn render_entries(s: &mut String, entries: &[LeaderboardEntry], note_empty: bool) -> fmt::Result {
    for e in entries.iter() {
        writeln!(s, "{} - {} benefits", e.company, e.max_benefits)?;
        if note_empty && e.max_benefits == 0 {
            writeln!(s, "  {} at all.", NO_BENEFITS)?;
        }
        for (i, b) in e.benefits.iter().enumerate() {
            writeln!(s, "  {}. {}", i + 1, b)?;
        }
    }
    Ok(())
}

pub fn render_leaderboard(lb: &Leaderboard) -> Rendered {
    let mut s = String::new();
    writeln!(s, "## Notable companies")?;
    writeln!(s, "### Most benefits")?;
    render_entries(&mut s, &lb.most, false)?;
    writeln!(s)?;
    writeln!(s, "### Fewest benefits")?;
    render_entries(&mut s, &lb.fewest, true)?;
    Ok(s)
}

fn render_quote_list(s: &mut String, quotes: &[Quote]) -> fmt::Result {
    for q in quotes.iter() {
        writeln!(s, "  \"{}\"", q.text)?;
        writeln!(s, "      - {}", q.company)?;
    }
    Ok(())
}

pub fn render_quotes() -> Rendered {
    let mut s = String::new();
    writeln!(s, "## What do the employees say?")?;
    writeln!(s, "### Positive feedback")?;
    render_quote_list(&mut s, POSITIVE_QUOTES)?;
    writeln!(s)?;
    writeln!(s, "### Negative feedback")?;
    render_quote_list(&mut s, NEGATIVE_QUOTES)?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SurveyTable {
        let mut builder = Builder::new(&SurveyRules::default());
        builder.add_row_simple("A", "X");
        builder.add_row_simple("B", "Y");
        builder.add_row_simple("C", "כלום");
        builder.build()
    }

    #[test]
    fn comparison_table() {
        let t = table();
        let s = render_comparison(&compare_companies(&t, "A", "B")).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("X "));
        assert!(lines[1].find(PRESENT_MARK) < lines[1].find(ABSENT_MARK));
        assert!(lines[2].find(ABSENT_MARK) < lines[2].find(PRESENT_MARK));
    }

    #[test]
    fn company_without_benefits() {
        let t = table();
        let selection = Selection {
            company: Some("C".to_string()),
            compare: None,
        };
        let s = render_company(&t, &selection).unwrap();
        assert!(s.contains(NO_BENEFITS));
        assert!(s.contains("Number of reported benefits: 0"));
    }

    #[test]
    fn company_list_without_selection() {
        let s = render_company(&table(), &Selection::default()).unwrap();
        assert!(s.contains("  A\n  B\n  C\n"));
    }

    #[test]
    fn overview_chart() {
        let s = render_overview(&table()).unwrap();
        assert!(s.contains("Minimum reported benefits: 0"));
        assert!(s.contains("Maximum reported benefits: 1"));
        assert!(s.contains("33.3% (1)"));
    }

    #[test]
    fn leaderboard_lists() {
        let s = render_leaderboard(&leaderboard(&table(), 5)).unwrap();
        let (most, fewest) = s.split_once("### Fewest benefits").unwrap();
        assert!(most.contains("C - 0 benefits\n"));
        assert!(!most.contains(NO_BENEFITS));
        assert!(fewest.contains("C - 0 benefits\n  No benefits reported at all."));
        assert!(most.contains("A - 1 benefits\n  1. X"));
    }

    #[test]
    fn quotes() {
        let s = render_quotes().unwrap();
        assert!(s.contains("- Apple"));
        assert!(s.contains("- Cato Networks"));
    }
}
