//! Disclosure report serialiser: transforms engine outputs into a
//! multi-sheet tabular workbook.
//!
//! The workbook is a typed grid model (sheets of header + cell rows); the
//! xlsx byte encoding is the consuming adapter's concern. Monetary values
//! are rounded to whole units here and only here; everything upstream
//! stays in full double precision.
//!
//! Sheet census: overview, governance, strategy, risk_management,
//! metrics_and_targets, gap_analysis, regulatory_schedule, raw_data.

use chrono::NaiveDate;

use crate::core::{CancelToken, Facility, Framework, PricingRegime, RiskError, Scenario};
use crate::esg::{assess_framework, disclosure_data, Category};
use crate::physical::assess as assess_physical;
use crate::transition::{analyse, summary, AnalysisOptions};

/// One report cell.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Cell {
    Text(String),
    /// Monetary or count value, rounded to whole units.
    Number(f64),
    /// Dimensionless ratio kept at full precision.
    Fraction(f64),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    fn money(value: f64) -> Self {
        Cell::Number(value.round())
    }

    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

/// A named grid of rows under a fixed header.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str, header: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }
}

/// The multi-sheet disclosure artefact.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Workbook {
    pub title: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Canonical sheet names in order.
pub const SHEET_NAMES: [&str; 8] = [
    "overview",
    "governance",
    "strategy",
    "risk_management",
    "metrics_and_targets",
    "gap_analysis",
    "regulatory_schedule",
    "raw_data",
];

/// Assembles the disclosure workbook for a portfolio under the selected
/// framework, scenario, regime, and assessment year.
pub fn disclosure_workbook(
    framework: Framework,
    scenario: Scenario,
    regime: PricingRegime,
    year: i32,
    facilities: &[Facility],
    token: &CancelToken,
) -> Result<Workbook, RiskError> {
    let esg = assess_framework(framework, facilities);
    let disclosure = disclosure_data(framework, facilities, token)?;
    let transition = analyse(facilities, scenario, regime, &AnalysisOptions::default(), token)?;
    let portfolio = summary(facilities, scenario, regime, &AnalysisOptions::default(), token)?;
    let physical = assess_physical(facilities, scenario, year, None, token)?;

    let mut sheets = Vec::with_capacity(SHEET_NAMES.len());

    // overview
    let mut overview = Sheet::new("overview", &["item", "value"]);
    overview.push_row(vec![Cell::text("framework"), Cell::text(&esg.framework_name)]);
    overview.push_row(vec![Cell::text("scenario"), Cell::text(scenario.tag())]);
    overview.push_row(vec![Cell::text("pricing_regime"), Cell::text(regime.tag())]);
    overview.push_row(vec![
        Cell::text("assessment_year"),
        Cell::Number(f64::from(year)),
    ]);
    overview.push_row(vec![
        Cell::text("overall_score"),
        Cell::Fraction(esg.overall_score),
    ]);
    overview.push_row(vec![
        Cell::text("compliance_level"),
        Cell::text(&esg.compliance_level),
    ]);
    overview.push_row(vec![
        Cell::text("maturity_level"),
        Cell::text(format!(
            "Level {} - {}",
            esg.maturity_level.level, esg.maturity_level.name
        )),
    ]);
    overview.push_row(vec![
        Cell::text("total_facilities"),
        Cell::Number(facilities.len() as f64),
    ]);
    overview.push_row(vec![
        Cell::text("transition_delta_npv"),
        Cell::money(transition.total_npv),
    ]);
    overview.push_row(vec![
        Cell::text("transition_high_risk_facilities"),
        Cell::Number(portfolio.high_risk_count as f64),
    ]);
    overview.push_row(vec![
        Cell::text("end_year_carbon_cost"),
        Cell::money(portfolio.cost_breakdown.carbon_cost),
    ]);
    overview.push_row(vec![
        Cell::text("physical_high_risk_facilities"),
        Cell::Number(physical.high_risk_count as f64),
    ]);
    sheets.push(overview);

    // One pillar sheet per TCFD-style category.
    for (sheet_name, category) in [
        ("governance", Category::Governance),
        ("strategy", Category::Strategy),
        ("risk_management", Category::RiskManagement),
        ("metrics_and_targets", Category::MetricsAndTargets),
    ] {
        let mut sheet = Sheet::new(sheet_name, &["item", "status", "recommendation"]);
        for item in esg.checklist.iter().filter(|i| i.category == category) {
            sheet.push_row(vec![
                Cell::text(&item.item),
                Cell::text(format!("{:?}", item.status)),
                item.recommendation
                    .as_ref()
                    .map(Cell::text)
                    .unwrap_or(Cell::Empty),
            ]);
        }
        match category {
            Category::Strategy => {
                sheet.push_row(vec![
                    Cell::text("narrative"),
                    Cell::text(&disclosure.narrative.strategy),
                    Cell::Empty,
                ]);
            }
            Category::MetricsAndTargets => {
                sheet.push_row(vec![
                    Cell::text("scope1_tco2e"),
                    Cell::money(disclosure.emissions.scope1_tco2e),
                    Cell::Empty,
                ]);
                sheet.push_row(vec![
                    Cell::text("scope2_tco2e"),
                    Cell::money(disclosure.emissions.scope2_tco2e),
                    Cell::Empty,
                ]);
                sheet.push_row(vec![
                    Cell::text("scope3_tco2e"),
                    Cell::money(disclosure.emissions.scope3_tco2e),
                    Cell::Empty,
                ]);
                sheet.push_row(vec![
                    Cell::text("intensity_tco2e_per_million_revenue"),
                    Cell::Fraction(disclosure.emissions.intensity_tco2e_per_million_revenue),
                    Cell::Empty,
                ]);
            }
            _ => {}
        }
        sheets.push(sheet);
    }

    // gap_analysis
    let mut gaps = Sheet::new(
        "gap_analysis",
        &[
            "category",
            "current_score",
            "gap",
            "impact",
            "effort",
            "priority_score",
            "first_action",
        ],
    );
    for gap in &esg.gap_analysis {
        gaps.push_row(vec![
            Cell::text(format!("{:?}", gap.category)),
            Cell::Fraction(gap.current_score),
            Cell::Fraction(gap.gap),
            Cell::Fraction(gap.impact),
            Cell::text(format!("{:?}", gap.effort)),
            Cell::Fraction(gap.priority_score),
            gap.recommended_actions
                .first()
                .map(Cell::text)
                .unwrap_or(Cell::Empty),
        ]);
    }
    sheets.push(gaps);

    // regulatory_schedule
    let mut schedule = Sheet::new("regulatory_schedule", &["name", "date", "description"]);
    for deadline in &esg.regulatory_deadlines {
        schedule.push_row(vec![
            Cell::text(&deadline.name),
            Cell::Date(deadline.date),
            Cell::text(&deadline.description),
        ]);
    }
    sheets.push(schedule);

    // raw_data: one row per facility joining both engines.
    let mut raw = Sheet::new(
        "raw_data",
        &[
            "facility_id",
            "name",
            "sector",
            "scope1_tco2e",
            "scope2_tco2e",
            "scope3_tco2e",
            "annual_revenue",
            "assets_value",
            "transition_delta_npv",
            "transition_risk_level",
            "physical_eal",
            "physical_risk_level",
        ],
    );
    for (index, facility) in facilities.iter().enumerate() {
        let transition_row = &transition.facilities[index];
        let physical_row = &physical.facilities[index];
        raw.push_row(vec![
            Cell::text(&facility.facility_id),
            Cell::text(&facility.name),
            Cell::text(facility.sector.tag()),
            Cell::money(facility.scope1_emissions),
            Cell::money(facility.scope2_emissions),
            Cell::money(facility.scope3_emissions),
            Cell::money(facility.annual_revenue),
            Cell::money(facility.assets_value),
            Cell::money(transition_row.delta_npv),
            Cell::text(transition_row.risk_level.to_string()),
            Cell::money(physical_row.total_expected_annual_loss),
            Cell::text(physical_row.overall_risk_level.to_string()),
        ]);
    }
    sheets.push(raw);

    Ok(Workbook {
        title: format!(
            "Climate disclosure report - {} / {} / {}",
            esg.framework_name,
            scenario.tag(),
            regime.tag()
        ),
        sheets,
    })
}

#[cfg(test)]
mod tests {
    use crate::config::seed_facilities;

    use super::*;

    fn build() -> Workbook {
        disclosure_workbook(
            Framework::Kssb,
            Scenario::NetZero2050,
            PricingRegime::Global,
            2030,
            &seed_facilities(),
            &CancelToken::none(),
        )
        .unwrap()
    }

    #[test]
    fn workbook_has_the_full_sheet_census_in_order() {
        let workbook = build();
        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, SHEET_NAMES);
    }

    #[test]
    fn raw_data_has_one_row_per_facility() {
        let workbook = build();
        let raw = workbook.sheet("raw_data").unwrap();
        assert_eq!(raw.rows.len(), 17);
        assert_eq!(raw.header.len(), raw.rows[0].len());
    }

    #[test]
    fn monetary_cells_are_whole_units() {
        let workbook = build();
        for sheet in &workbook.sheets {
            for row in &sheet.rows {
                for cell in row {
                    if let Cell::Number(value) = cell {
                        assert_eq!(value.fract(), 0.0, "unrounded number in {}", sheet.name);
                    }
                }
            }
        }
    }

    #[test]
    fn gap_sheet_rows_match_gap_analysis() {
        let workbook = build();
        let esg = assess_framework(Framework::Kssb, &seed_facilities());
        assert_eq!(
            workbook.sheet("gap_analysis").unwrap().rows.len(),
            esg.gap_analysis.len()
        );
    }
}
