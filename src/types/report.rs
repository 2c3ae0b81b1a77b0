//! Derived analysis records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Signal, TagTotals};
use crate::{BAND_MODERATE, BAND_STRONG, BAND_WEAK};

/// Qualitative band of a package score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStrength {
    /// ≥ 75
    Strong,
    /// ≥ 50
    Moderate,
    /// ≥ 25
    Weak,
    Absent,
}

impl PackageStrength {
    pub fn from_score(score: f64) -> Self {
        if score >= BAND_STRONG {
            PackageStrength::Strong
        } else if score >= BAND_MODERATE {
            PackageStrength::Moderate
        } else if score >= BAND_WEAK {
            PackageStrength::Weak
        } else {
            PackageStrength::Absent
        }
    }

    /// Note attached to the package result
    pub fn note(&self) -> &'static str {
        match self {
            PackageStrength::Strong => "Strong package - core strategy is well-supported",
            PackageStrength::Moderate => "Moderate package - strategy is present but could be deeper",
            PackageStrength::Weak => "Weak package - strategy is hinted at but underdeveloped",
            PackageStrength::Absent => "Package not present in meaningful amounts",
        }
    }
}

impl std::fmt::Display for PackageStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PackageStrength::Strong => "STRONG",
            PackageStrength::Moderate => "MODERATE",
            PackageStrength::Weak => "WEAK",
            PackageStrength::Absent => "ABSENT",
        };
        write!(f, "{}", name)
    }
}

/// Coverage of one component for one deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCoverage {
    pub name: String,
    pub display_name: String,
    /// Aggregated strength of the component's tags
    pub count: f64,
    pub min_required: f64,
    pub weight: f64,
    /// count / min_required, capped at 1.0
    pub coverage_ratio: f64,
    pub score_contribution: f64,
}

impl ComponentCoverage {
    pub fn is_covered(&self) -> bool {
        self.coverage_ratio >= crate::MISSING_COVERAGE_RATIO
    }
}

/// Score and breakdown for one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResult {
    pub name: String,
    pub display_name: String,
    /// 0-100
    pub score: f64,
    pub strength: PackageStrength,
    /// Sum of tag totals over every tag relevant to the package
    pub total_signals: f64,
    pub components: Vec<ComponentCoverage>,
    /// Display names of under-covered components
    pub missing: Vec<String>,
    /// (card name, contribution), filled for primary packages
    pub top_cards: Vec<(String, f64)>,
    pub notes: Vec<String>,
}

/// Per-card signals and package contributions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardSynergyResult {
    pub card_name: String,
    pub signals: Vec<Signal>,
    /// Package name → this card's contribution, independent of copy count
    pub package_scores: BTreeMap<String, f64>,
    pub notes: Vec<String>,
}

/// Complete synergy analysis for one deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyReport {
    /// 0-100, mean of the top two primary scores
    pub overall_score: f64,
    /// Best 0-3 packages, highest first
    pub primary_packages: Vec<PackageResult>,
    /// Every catalog package, in catalog order
    pub all_packages: Vec<PackageResult>,
    pub per_card: BTreeMap<String, CardSynergyResult>,
    pub warnings: Vec<String>,
    pub tag_totals: TagTotals,
}

impl SynergyReport {
    pub fn package(&self, name: &str) -> Option<&PackageResult> {
        self.all_packages.iter().find(|p| p.name == name)
    }

    pub fn is_primary(&self, name: &str) -> bool {
        self.primary_packages.iter().any(|p| p.name == name)
    }
}
