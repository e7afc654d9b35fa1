//! Plain-text overview of a report run

use std::fmt::Write;

use crate::models::aggregate::YearlyAggregate;
use crate::models::survey::EducationTier;

use super::SurveyReport;

fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn dollars(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("${v:.2}"))
}

fn year_block(summary: &mut String, row: &YearlyAggregate) {
    let _ = writeln!(summary, "  {}:", row.year);
    let _ = writeln!(
        summary,
        "    LFP: all {}, men {}, women {}",
        pct(row.lfp_all),
        pct(row.lfp_m),
        pct(row.lfp_f)
    );
    let _ = writeln!(
        summary,
        "    Unemployment: {}  Skilled share: {}",
        pct(row.unemp),
        pct(row.skilled_share)
    );
    let _ = writeln!(
        summary,
        "    Real wage: all {}, men {}, women {}",
        dollars(row.real_wage_all),
        dollars(row.real_wage_m),
        dollars(row.real_wage_f)
    );
}

fn skill_premium(report: &SurveyReport, year: i32) -> Option<f64> {
    let wage_of = |tier| {
        report
            .skill
            .iter()
            .find(|r| r.year == year && r.tier == tier)
            .and_then(|r| r.real_wage)
    };
    let skilled = wage_of(EducationTier::Skilled)?;
    let unskilled = wage_of(EducationTier::Unskilled)?;
    (unskilled > 0.0).then(|| skilled / unskilled)
}

/// Render a short overview: input counts, first and last year, skill premium
#[must_use]
pub fn render_summary(report: &SurveyReport) -> String {
    let mut summary = String::new();
    summary.push_str("Labor Market Trends Summary:\n");

    let recode = &report.recode;
    let _ = writeln!(summary, "  Input Rows: {}", recode.input_rows);
    let _ = writeln!(summary, "  Eligible Records: {}", recode.retained);
    let _ = writeln!(summary, "  Excluded (age): {}", recode.excluded_underage);
    if recode.malformed() > 0 {
        let _ = writeln!(
            summary,
            "  Excluded (malformed): {} ({} unparsable age)",
            recode.malformed(),
            recode.malformed_age
        );
    }
    let _ = writeln!(summary, "  Deflator Table: {}", report.deflator_version);

    let Some((first, last)) = report.year_range() else {
        summary.push_str("\nNo survey years in the input.\n");
        return summary;
    };

    summary.push_str("\nYearly Figures:\n");
    for year in [first, last] {
        if let Some(row) = report.year(year) {
            year_block(&mut summary, row);
        }
        if first == last {
            break;
        }
    }

    let premiums: Vec<String> = [first, last]
        .iter()
        .filter_map(|year| skill_premium(report, *year).map(|p| format!("{year}: {p:.2}x")))
        .collect();
    if !premiums.is_empty() {
        summary.push_str("\nSkilled/Unskilled Wage Ratio (restricted population):\n");
        let _ = writeln!(summary, "  {}", premiums.join(", "));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::lookup::deflator::DeflatorTable;
    use crate::utils::test_utils::RawRecordBuilder;

    #[test]
    fn test_summary_mentions_first_and_last_year() {
        let raw = vec![
            RawRecordBuilder::new(1980).wage(5.0).educ(Some("111")).build(),
            RawRecordBuilder::new(1980).wage(4.0).educ(Some("040")).build(),
            RawRecordBuilder::new(2010).wage(25.0).build(),
        ];
        let report =
            SurveyReport::build(&raw, &ReportConfig::default(), &DeflatorTable::cpi99()).unwrap();
        let text = render_summary(&report);

        assert!(text.contains("Input Rows: 3"));
        assert!(text.contains("  1980:"));
        assert!(text.contains("  2010:"));
        assert!(text.contains("1980: 1.25x"));
        assert!(!text.contains("malformed"));
    }

    #[test]
    fn test_summary_of_empty_report() {
        let report =
            SurveyReport::build(&[], &ReportConfig::default(), &DeflatorTable::cpi99()).unwrap();
        assert!(render_summary(&report).contains("No survey years"));
    }
}
