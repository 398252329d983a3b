//! Reference scenario for the ESG engine: a portfolio with complete
//! Scope 1/2 inventories and no Scope 3 reporting.

use climrisk::core::{Facility, Framework, Sector};
use climrisk::esg::{assess_framework, Category, CheckStatus, Effort};

fn scope12_only_portfolio() -> Vec<Facility> {
    let mut facilities = Vec::new();
    let sectors = [
        Sector::Steel,
        Sector::Utilities,
        Sector::Cement,
        Sector::Electronics,
        Sector::Automotive,
        Sector::OilGas,
    ];
    for (index, sector) in sectors.into_iter().enumerate() {
        facilities.push(Facility {
            facility_id: format!("KR-ESG-{index:03}"),
            name: format!("Reporting Site {index}"),
            company: "Reference Corp".to_string(),
            sector,
            location: "Korea".to_string(),
            latitude: 36.0 + index as f64 * 0.1,
            longitude: 127.0 + index as f64 * 0.2,
            scope1_emissions: 2.0e6,
            scope2_emissions: 5.0e5,
            // Scope 3 not yet inventoried anywhere.
            scope3_emissions: 0.0,
            annual_revenue: 5.0e9,
            ebitda: 7.5e8,
            assets_value: 4.0e9,
            coastal: None,
        });
    }
    facilities
}

#[test]
fn tcfd_score_lands_between_seventy_and_ninety() {
    let assessment = assess_framework(Framework::Tcfd, &scope12_only_portfolio());
    assert!(
        (70.0..=90.0).contains(&assessment.overall_score),
        "overall score {:.1}",
        assessment.overall_score
    );
}

#[test]
fn top_gap_is_scope3_with_medium_or_high_effort() {
    let assessment = assess_framework(Framework::Tcfd, &scope12_only_portfolio());
    let top = assessment
        .gap_analysis
        .first()
        .expect("a scope-3 gap must exist");

    assert_eq!(top.category, Category::MetricsAndTargets);
    assert!(
        top.recommended_actions
            .iter()
            .any(|a| a.contains("Scope 3")),
        "top actions: {:?}",
        top.recommended_actions
    );
    assert!(matches!(top.effort, Effort::Medium | Effort::High));
}

#[test]
fn scope3_checklist_item_is_non_compliant_for_this_portfolio() {
    let assessment = assess_framework(Framework::Tcfd, &scope12_only_portfolio());
    let scope3 = assessment
        .checklist
        .iter()
        .find(|i| i.item.contains("Scope 3"))
        .unwrap();
    assert_eq!(scope3.status, CheckStatus::NonCompliant);
    assert!(scope3.recommendation.is_some());

    let scope1 = assessment
        .checklist
        .iter()
        .find(|i| i.item.contains("Scope 1 emissions"))
        .unwrap();
    assert_eq!(scope1.status, CheckStatus::Compliant);
}

#[test]
fn maturity_and_compliance_derive_from_the_same_score() {
    let assessment = assess_framework(Framework::Tcfd, &scope12_only_portfolio());
    // 70-90 band means at least level 3 maturity and at least 양호.
    assert!(assessment.maturity_level.level >= 3);
    assert!(["양호", "우수", "선도"].contains(&assessment.compliance_level.as_str()));
}

#[test]
fn kssb_adds_the_industry_pillar() {
    let assessment = assess_framework(Framework::Kssb, &scope12_only_portfolio());
    assert!(
        assessment
            .categories
            .iter()
            .any(|c| c.category == Category::IndustryDisclosure)
    );
    let tcfd = assess_framework(Framework::Tcfd, &scope12_only_portfolio());
    assert!(
        !tcfd
            .categories
            .iter()
            .any(|c| c.category == Category::IndustryDisclosure)
    );
}

#[test]
fn fully_reported_portfolio_scores_higher() {
    let partial = assess_framework(Framework::Tcfd, &scope12_only_portfolio());
    let mut complete = scope12_only_portfolio();
    for facility in &mut complete {
        facility.scope3_emissions = 1.0e6;
    }
    let full = assess_framework(Framework::Tcfd, &complete);
    assert!(full.overall_score > partial.overall_score);
}
