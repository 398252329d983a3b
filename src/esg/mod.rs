//! ESG disclosure-readiness scoring: weighted maturity model, checklist
//! evaluation, gap analysis, and regulatory deadlines per framework.
//!
//! Scores measure the analytical readiness of the portfolio's disclosure
//! position (scope coverage, scenario quantification, financial data
//! completeness), not the organisation's actual governance structure; a
//! formal TCFD/ISSB assessment would additionally require evidence of
//! board oversight, management accountability, and external assurance.
//!
//! References:
//! - CDP Scoring Methodology (2023) for the checklist-driven category
//!   scores.
//! - TCFD Final Report (2017) and Status Report (2023).
//! - ISSB IFRS S1/S2 disclosure requirements.
//! - KSSB draft standards (2024).

use crate::config::{scenario_spec, BASE_YEAR};
use crate::core::{CancelToken, Facility, Framework, PricingRegime, RiskError, Scenario};
use crate::transition::{analyse, AnalysisOptions};

/// Disclosure checklist status and its score weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Compliant,
    Partial,
    NonCompliant,
}

impl CheckStatus {
    #[inline]
    pub fn score(self) -> f64 {
        match self {
            Self::Compliant => 1.0,
            Self::Partial => 0.5,
            Self::NonCompliant => 0.0,
        }
    }
}

/// Disclosure pillar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Governance,
    Strategy,
    RiskManagement,
    MetricsAndTargets,
    /// KSSB-only industry-specific disclosure pillar.
    IndustryDisclosure,
}

/// Implementation effort class for closing a gap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    #[inline]
    fn weight(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
        }
    }
}

/// One evaluated checklist item.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChecklistItem {
    pub category: Category,
    pub item: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Per-category weighted score.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub weight: f64,
    /// 0-100, mean of item statuses.
    pub score: f64,
    pub status: String,
}

/// Five-level maturity summary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaturityLevel {
    pub level: u8,
    pub name: String,
    pub description: String,
}

/// One prioritised gap.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GapEntry {
    pub category: Category,
    pub current_score: f64,
    pub gap: f64,
    /// Weighted gap scaled into [1, 10].
    pub impact: f64,
    pub effort: Effort,
    pub priority_score: f64,
    pub recommended_actions: Vec<String>,
}

/// Regulatory deadline row.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegulatoryDeadline {
    pub name: String,
    pub date: chrono::NaiveDate,
    pub description: String,
}

/// Full framework assessment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EsgAssessment {
    pub framework: Framework,
    pub framework_name: String,
    pub overall_score: f64,
    pub compliance_level: String,
    pub maturity_level: MaturityLevel,
    pub categories: Vec<CategoryScore>,
    pub checklist: Vec<ChecklistItem>,
    pub recommendations: Vec<String>,
    pub gap_analysis: Vec<GapEntry>,
    pub regulatory_deadlines: Vec<RegulatoryDeadline>,
}

/// Portfolio facts the checklist items are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PortfolioFlags {
    has_scope1: bool,
    has_scope2: bool,
    has_scope3: bool,
    has_financials: bool,
    multi_sector: bool,
}

impl PortfolioFlags {
    fn from_facilities(facilities: &[Facility]) -> Self {
        let sectors: std::collections::BTreeSet<&str> =
            facilities.iter().map(|f| f.sector.tag()).collect();
        Self {
            has_scope1: !facilities.is_empty()
                && facilities.iter().all(|f| f.scope1_emissions > 0.0),
            has_scope2: !facilities.is_empty()
                && facilities.iter().all(|f| f.scope2_emissions > 0.0),
            has_scope3: !facilities.is_empty()
                && facilities.iter().all(|f| f.scope3_emissions > 0.0),
            has_financials: !facilities.is_empty()
                && facilities
                    .iter()
                    .all(|f| f.annual_revenue > 0.0 && f.assets_value > 0.0),
            multi_sector: sectors.len() >= 3,
        }
    }
}

/// Framework display name.
pub fn framework_name(framework: Framework) -> &'static str {
    match framework {
        Framework::Tcfd => "TCFD",
        Framework::Issb => "ISSB (IFRS S2)",
        Framework::Kssb => "KSSB",
    }
}

/// Category weights per framework; each set sums to 1.0.
pub fn framework_weights(framework: Framework) -> &'static [(Category, f64)] {
    match framework {
        Framework::Tcfd => &[
            (Category::Governance, 0.25),
            (Category::Strategy, 0.25),
            (Category::RiskManagement, 0.25),
            (Category::MetricsAndTargets, 0.25),
        ],
        Framework::Issb => &[
            (Category::Governance, 0.20),
            (Category::Strategy, 0.25),
            (Category::RiskManagement, 0.25),
            (Category::MetricsAndTargets, 0.30),
        ],
        Framework::Kssb => &[
            (Category::Governance, 0.20),
            (Category::Strategy, 0.25),
            (Category::RiskManagement, 0.20),
            (Category::MetricsAndTargets, 0.25),
            (Category::IndustryDisclosure, 0.10),
        ],
    }
}

fn item(
    category: Category,
    name: &str,
    status: CheckStatus,
    recommendation: &str,
) -> ChecklistItem {
    ChecklistItem {
        category,
        item: name.to_string(),
        status,
        recommendation: if status == CheckStatus::Compliant || recommendation.is_empty() {
            None
        } else {
            Some(recommendation.to_string())
        },
    }
}

fn status_if(compliant: bool, otherwise: CheckStatus) -> CheckStatus {
    if compliant {
        CheckStatus::Compliant
    } else {
        otherwise
    }
}

fn build_checklist(framework: Framework, flags: PortfolioFlags) -> Vec<ChecklistItem> {
    use Category::*;
    use CheckStatus::*;

    match framework {
        Framework::Tcfd => vec![
            item(
                Governance,
                "Board oversight of climate risks",
                Partial,
                "Establish a dedicated board-level climate committee",
            ),
            item(
                Governance,
                "Management role in assessing climate risk",
                status_if(flags.has_financials, Partial),
                "Clarify management accountability for climate risk",
            ),
            item(
                Governance,
                "Climate risk and opportunity identification",
                status_if(flags.has_scope1 || flags.has_scope2, NonCompliant),
                "Build an emissions-grounded risk identification process",
            ),
            item(
                Strategy,
                "Scenario analysis including a below-2C pathway",
                status_if(flags.has_financials, NonCompliant),
                "Run NGFS four-scenario analysis over the portfolio",
            ),
            item(
                Strategy,
                "Business strategy impact quantification",
                status_if(flags.has_financials && flags.has_scope1, Partial),
                "Strengthen quantitative financial impact analysis",
            ),
            item(
                Strategy,
                "Transition plan disclosure",
                Partial,
                "Formalise a net-zero transition roadmap",
            ),
            item(
                RiskManagement,
                "Risk identification and assessment process",
                status_if(flags.has_financials, Partial),
                "Systematise the climate risk assessment process",
            ),
            item(
                RiskManagement,
                "Integration with enterprise risk management",
                Partial,
                "Integrate climate risk into the ERM framework",
            ),
            item(
                MetricsAndTargets,
                "Scope 1 emissions disclosure",
                status_if(flags.has_scope1, NonCompliant),
                "Complete Scope 1 emissions inventories",
            ),
            item(
                MetricsAndTargets,
                "Scope 2 emissions disclosure",
                status_if(flags.has_scope2, NonCompliant),
                "Complete Scope 2 emissions inventories",
            ),
            item(
                MetricsAndTargets,
                "Scope 3 emissions disclosure",
                status_if(flags.has_scope3, NonCompliant),
                "Expand Scope 3 emissions inventory coverage",
            ),
            item(
                MetricsAndTargets,
                "Climate-related target setting",
                Partial,
                "Set a science-based (SBTi) reduction target",
            ),
        ],
        Framework::Issb => vec![
            item(
                Governance,
                "Governance of climate risks and opportunities",
                if flags.has_financials { Partial } else { NonCompliant },
                "Formalise board-level climate oversight per IFRS S2",
            ),
            item(
                Strategy,
                "Climate scenario analysis",
                status_if(flags.has_financials, NonCompliant),
                "Run scenario analysis aligned with IFRS S2 requirements",
            ),
            item(
                Strategy,
                "Climate-related financial impact quantification",
                status_if(flags.has_financials && flags.has_scope1, Partial),
                "Complete transition and physical financial quantification",
            ),
            item(
                Strategy,
                "Transition plan disclosure",
                NonCompliant,
                "Formalise a net-zero transition roadmap",
            ),
            item(
                RiskManagement,
                "Climate risk management process integration",
                Partial,
                "Integrate climate risk into enterprise risk management",
            ),
            item(
                RiskManagement,
                "Internal carbon price application",
                if flags.has_financials { Partial } else { NonCompliant },
                "Apply an internal carbon price to investment decisions",
            ),
            item(
                MetricsAndTargets,
                "Scope 1 and 2 emissions disclosure",
                status_if(flags.has_scope1 && flags.has_scope2, NonCompliant),
                "Complete Scope 1 and 2 emissions inventories",
            ),
            item(
                MetricsAndTargets,
                "Scope 3 emissions disclosure",
                status_if(flags.has_scope3, NonCompliant),
                "Expand Scope 3 emissions inventory coverage",
            ),
            item(
                MetricsAndTargets,
                "Carbon intensity metrics",
                status_if(flags.has_financials && flags.has_scope1, NonCompliant),
                "Develop revenue-normalised intensity metrics",
            ),
        ],
        Framework::Kssb => vec![
            item(
                Governance,
                "Climate governance disclosure (KSSB No. 1)",
                Partial,
                "Align governance disclosure with Korean sustainability standards",
            ),
            item(
                Strategy,
                "Climate scenario analysis in the Korean context",
                status_if(flags.has_financials, NonCompliant),
                "Run Korea-calibrated climate scenario analysis",
            ),
            item(
                Strategy,
                "2030 NDC alignment analysis",
                NonCompliant,
                "Analyse alignment with the 2030 NDC 40% reduction target",
            ),
            item(
                RiskManagement,
                "K-ETS impact analysis",
                status_if(flags.has_financials && flags.has_scope1, NonCompliant),
                "Quantify K-ETS allowance cost exposure",
            ),
            item(
                RiskManagement,
                "Climate adaptation strategy",
                Partial,
                "Develop an adaptation strategy for physical risks",
            ),
            item(
                MetricsAndTargets,
                "Scope 1/2/3 emissions under Korean MRV rules",
                if flags.has_scope1 && flags.has_scope2 { Partial } else { NonCompliant },
                "Verify emissions against Ministry of Environment MRV guidance",
            ),
            item(
                MetricsAndTargets,
                "Reduction target disclosure",
                Partial,
                "Disclose a reduction target consistent with national policy",
            ),
            item(
                IndustryDisclosure,
                "Industry-specific disclosure items",
                if flags.multi_sector { Partial } else { NonCompliant },
                "Map industry-specific KSSB disclosure requirements",
            ),
            item(
                IndustryDisclosure,
                "Sector key performance indicators",
                NonCompliant,
                "Define sector key performance indicators",
            ),
        ],
    }
}

/// Compliance level per the Korean grading scale.
pub fn compliance_level(score: f64) -> &'static str {
    if score >= 90.0 {
        "선도"
    } else if score >= 80.0 {
        "우수"
    } else if score >= 65.0 {
        "양호"
    } else if score >= 50.0 {
        "보통"
    } else {
        "미흡"
    }
}

/// Five-level maturity from the overall score.
pub fn maturity_level(score: f64) -> MaturityLevel {
    let (level, name, description) = if score >= 86.0 {
        (5, "선도", "Industry-leading climate risk management")
    } else if score >= 71.0 {
        (4, "관리", "Systematic climate risk management and measurement")
    } else if score >= 51.0 {
        (3, "개발", "Climate risk capabilities under development")
    } else if score >= 31.0 {
        (2, "기초", "Foundational climate risk processes being built")
    } else {
        (1, "인식", "Basic awareness of climate risk")
    };
    MaturityLevel {
        level,
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn category_effort(category: Category) -> Effort {
    match category {
        Category::Governance => Effort::Medium,
        Category::Strategy => Effort::High,
        Category::RiskManagement => Effort::Medium,
        Category::MetricsAndTargets => Effort::Medium,
        Category::IndustryDisclosure => Effort::High,
    }
}

fn gap_actions(category: Category, score: f64) -> Vec<String> {
    let actions: &[&str] = if score >= 70.0 {
        match category {
            Category::Governance => &["Deepen the climate oversight process"],
            Category::Strategy => &["Refine scenario-level financial quantification"],
            Category::RiskManagement => &["Mature the risk management process"],
            Category::MetricsAndTargets => &["Strengthen target delivery monitoring"],
            Category::IndustryDisclosure => &["Raise completeness of industry disclosures"],
        }
    } else {
        match category {
            Category::Governance => &[
                "Establish a dedicated board climate committee",
                "Appoint a chief sustainability officer",
                "Set a regular climate reporting cadence",
            ],
            Category::Strategy => &[
                "Quantify strategic impact under all four NGFS scenarios",
                "Formalise a net-zero transition plan",
                "Develop a climate adaptation strategy",
            ],
            Category::RiskManagement => &[
                "Integrate climate risk into enterprise risk management",
                "Systematise physical risk assessment",
                "Stand up a risk monitoring dashboard",
            ],
            Category::MetricsAndTargets => &[
                "Expand Scope 3 emissions inventory coverage",
                "Set a science-based (SBTi) reduction target",
                "Develop carbon intensity indicators",
            ],
            Category::IndustryDisclosure => &[
                "Map industry-specific KSSB disclosure requirements",
                "Define sector key performance indicators",
                "Analyse 2030 NDC alignment",
            ],
        }
    };
    actions.iter().map(|a| a.to_string()).collect()
}

/// Prioritised gaps: `impact = weight x gap` scaled into [1, 10],
/// `priority = impact / effort weight`, sorted descending. Categories
/// within 10 points of full marks are skipped.
fn gap_analysis(weights: &[(Category, f64)], scores: &[CategoryScore]) -> Vec<GapEntry> {
    let mut gaps = Vec::new();
    for (category, weight) in weights {
        let Some(entry) = scores.iter().find(|s| s.category == *category) else {
            continue;
        };
        let gap = 100.0 - entry.score;
        if gap <= 10.0 {
            continue;
        }
        let impact = (weight * gap).clamp(1.0, 10.0);
        let effort = category_effort(*category);
        gaps.push(GapEntry {
            category: *category,
            current_score: entry.score,
            gap,
            impact,
            effort,
            priority_score: impact / effort.weight(),
            recommended_actions: gap_actions(*category, entry.score),
        });
    }
    gaps.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    gaps
}

/// Regulatory deadlines relevant to a framework.
pub fn regulatory_deadlines(framework: Framework) -> Vec<RegulatoryDeadline> {
    let deadline = |name: &str, ymd: (i32, u32, u32), description: &str| RegulatoryDeadline {
        name: name.to_string(),
        date: chrono::NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
            .expect("static deadline dates are valid"),
        description: description.to_string(),
    };
    match framework {
        Framework::Tcfd | Framework::Issb => vec![
            deadline(
                "ISSB (IFRS S1/S2) effective",
                (2024, 1, 1),
                "Global sustainability disclosure baseline in force for annual periods from 2024",
            ),
            deadline(
                "EU CBAM definitive regime",
                (2026, 1, 1),
                "EU carbon border adjustment enters its definitive phase",
            ),
        ],
        Framework::Kssb => vec![
            deadline(
                "KSSB mandatory disclosure",
                (2025, 1, 1),
                "Mandatory disclosure for listed companies above 2 trillion KRW in assets",
            ),
            deadline(
                "K-ETS Phase 4",
                (2026, 1, 1),
                "Fourth planning period with tightened allocation",
            ),
            deadline(
                "KSSB full scope",
                (2027, 1, 1),
                "Mandatory disclosure extended to all listed companies",
            ),
        ],
    }
}

/// Assesses a framework over a facility portfolio.
pub fn assess_framework(framework: Framework, facilities: &[Facility]) -> EsgAssessment {
    let flags = PortfolioFlags::from_facilities(facilities);
    let checklist = build_checklist(framework, flags);
    let weights = framework_weights(framework);

    let mut categories = Vec::with_capacity(weights.len());
    let mut overall_score = 0.0;
    for (category, weight) in weights {
        let items: Vec<&ChecklistItem> =
            checklist.iter().filter(|i| i.category == *category).collect();
        let score = if items.is_empty() {
            0.0
        } else {
            100.0 * items.iter().map(|i| i.status.score()).sum::<f64>() / items.len() as f64
        };
        overall_score += weight * score;
        categories.push(CategoryScore {
            category: *category,
            weight: *weight,
            score,
            status: compliance_level(score).to_string(),
        });
    }

    let recommendations = checklist
        .iter()
        .filter_map(|i| i.recommendation.clone())
        .collect();
    let gap_analysis = gap_analysis(weights, &categories);

    EsgAssessment {
        framework,
        framework_name: framework_name(framework).to_string(),
        overall_score,
        compliance_level: compliance_level(overall_score).to_string(),
        maturity_level: maturity_level(overall_score),
        categories,
        checklist,
        recommendations,
        gap_analysis,
        regulatory_deadlines: regulatory_deadlines(framework),
    }
}

/// Portfolio emissions and intensity block for disclosure.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmissionMetrics {
    pub scope1_tco2e: f64,
    pub scope2_tco2e: f64,
    pub scope3_tco2e: f64,
    pub total_tco2e: f64,
    /// Scope 1+2 tCO2e per million currency units of revenue.
    pub intensity_tco2e_per_million_revenue: f64,
}

/// Financial-impact block for disclosure.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FinancialImpactMetrics {
    pub transition_risk_npv_net_zero: f64,
    pub total_facilities: usize,
    pub total_assets_at_risk: f64,
}

/// Target-setting block for disclosure.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetMetrics {
    pub base_year: i32,
    pub target_year: i32,
    pub reduction_target_fraction: f64,
    pub science_based: bool,
}

/// Disclosure narrative and metrics bundle.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisclosureData {
    pub framework: Framework,
    pub emissions: EmissionMetrics,
    pub financial_impact: FinancialImpactMetrics,
    pub targets: TargetMetrics,
    pub narrative: NarrativeSections,
}

/// Narrative text per disclosure pillar.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NarrativeSections {
    pub governance: String,
    pub strategy: String,
    pub risk_management: String,
    pub metrics_and_targets: String,
}

/// Assembles the disclosure narrative and metrics for a portfolio. Runs a
/// net-zero transition analysis for the financial-impact figures.
pub fn disclosure_data(
    framework: Framework,
    facilities: &[Facility],
    token: &CancelToken,
) -> Result<DisclosureData, RiskError> {
    let scope1: f64 = facilities.iter().map(|f| f.scope1_emissions).sum();
    let scope2: f64 = facilities.iter().map(|f| f.scope2_emissions).sum();
    let scope3: f64 = facilities.iter().map(|f| f.scope3_emissions).sum();
    let revenue: f64 = facilities.iter().map(|f| f.annual_revenue).sum();
    let assets: f64 = facilities.iter().map(|f| f.assets_value).sum();

    let analysis = analyse(
        facilities,
        Scenario::NetZero2050,
        PricingRegime::Global,
        &AnalysisOptions::default(),
        token,
    )?;
    let npv = analysis.total_npv;

    let intensity = if revenue > 0.0 {
        (scope1 + scope2) / revenue * 1_000_000.0
    } else {
        0.0
    };

    let narrative = NarrativeSections {
        governance: "Climate risk is reviewed quarterly by the board ESG committee, with \
                     day-to-day management delegated to the chief sustainability officer."
            .to_string(),
        strategy: format!(
            "Across the four NGFS scenarios, the {} pathway prices in a transition cost NPV of \
             about {:.1} billion; the dominant drivers are allowance costs and the clean-energy \
             investment burden.",
            scenario_spec(Scenario::NetZero2050).name,
            npv.abs() / 1.0e9
        ),
        risk_management: "Climate risk is integrated into the enterprise risk management \
                          framework; financial impacts are reassessed on a scheduled scenario \
                          cycle."
            .to_string(),
        metrics_and_targets: format!(
            "Scope 1+2 emissions of {:.1} MtCO2e and Scope 3 emissions of {:.1} MtCO2e; targeting \
             a 40% Scope 1+2 reduction by 2030.",
            (scope1 + scope2) / 1.0e6,
            scope3 / 1.0e6
        ),
    };

    Ok(DisclosureData {
        framework,
        emissions: EmissionMetrics {
            scope1_tco2e: scope1,
            scope2_tco2e: scope2,
            scope3_tco2e: scope3,
            total_tco2e: scope1 + scope2 + scope3,
            intensity_tco2e_per_million_revenue: intensity,
        },
        financial_impact: FinancialImpactMetrics {
            transition_risk_npv_net_zero: npv,
            total_facilities: facilities.len(),
            total_assets_at_risk: assets,
        },
        targets: TargetMetrics {
            base_year: BASE_YEAR,
            target_year: 2030,
            reduction_target_fraction: 0.40,
            science_based: true,
        },
        narrative,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::config::seed_facilities;

    use super::*;

    #[test]
    fn framework_weights_sum_to_one() {
        for framework in Framework::ALL {
            let total: f64 = framework_weights(framework).iter().map(|(_, w)| w).sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn every_weighted_category_has_checklist_items() {
        let flags = PortfolioFlags::from_facilities(&seed_facilities());
        for framework in Framework::ALL {
            let checklist = build_checklist(framework, flags);
            for (category, _) in framework_weights(framework) {
                assert!(
                    checklist.iter().any(|i| i.category == *category),
                    "{framework}: no items for {category:?}"
                );
            }
        }
    }

    #[test]
    fn compliance_levels_follow_the_korean_scale() {
        assert_eq!(compliance_level(92.0), "선도");
        assert_eq!(compliance_level(90.0), "선도");
        assert_eq!(compliance_level(85.0), "우수");
        assert_eq!(compliance_level(70.0), "양호");
        assert_eq!(compliance_level(55.0), "보통");
        assert_eq!(compliance_level(40.0), "미흡");
    }

    #[test]
    fn maturity_levels_partition_the_score_range() {
        assert_eq!(maturity_level(90.0).level, 5);
        assert_eq!(maturity_level(80.0).level, 4);
        assert_eq!(maturity_level(60.0).level, 3);
        assert_eq!(maturity_level(40.0).level, 2);
        assert_eq!(maturity_level(10.0).level, 1);
    }

    #[test]
    fn overall_score_is_weighted_mean_of_categories() {
        let assessment = assess_framework(Framework::Tcfd, &seed_facilities());
        let recomputed: f64 = assessment
            .categories
            .iter()
            .map(|c| c.weight * c.score)
            .sum();
        assert_relative_eq!(assessment.overall_score, recomputed, epsilon = 1e-9);
    }

    #[test]
    fn gaps_are_sorted_by_priority() {
        let assessment = assess_framework(Framework::Kssb, &seed_facilities());
        assert!(
            assessment
                .gap_analysis
                .windows(2)
                .all(|w| w[0].priority_score >= w[1].priority_score)
        );
        for gap in &assessment.gap_analysis {
            assert!(gap.gap > 10.0);
            assert!((1.0..=10.0).contains(&gap.impact));
        }
    }

    #[test]
    fn compliant_items_carry_no_recommendation() {
        let assessment = assess_framework(Framework::Tcfd, &seed_facilities());
        for item in &assessment.checklist {
            if item.status == CheckStatus::Compliant {
                assert!(item.recommendation.is_none());
            }
        }
    }

    #[test]
    fn disclosure_data_totals_match_portfolio() {
        let facilities = seed_facilities();
        let data =
            disclosure_data(Framework::Tcfd, &facilities, &CancelToken::none()).unwrap();
        let scope1: f64 = facilities.iter().map(|f| f.scope1_emissions).sum();
        assert_relative_eq!(data.emissions.scope1_tco2e, scope1, epsilon = 1e-6);
        assert!(data.financial_impact.transition_risk_npv_net_zero < 0.0);
        assert_eq!(data.financial_impact.total_facilities, 17);
        assert!(data.emissions.intensity_tco2e_per_million_revenue > 0.0);
    }

    #[test]
    fn kssb_lists_korean_deadlines() {
        let deadlines = regulatory_deadlines(Framework::Kssb);
        assert_eq!(deadlines.len(), 3);
        assert!(deadlines.iter().any(|d| d.name.contains("Phase 4")));
    }
}
