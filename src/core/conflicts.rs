//! Conflict / Imbalance Detector
//!
//! Advisory only: every check yields plain warning strings.

use tracing::debug;

use crate::types::{tag_total, PackageCatalog, PackageResult, TagTotals};
use crate::ORPHAN_MIN_PAYOFFS;

/// (payoff tag, enabler tag, payoff label, enabler label)
pub const ORPHAN_PAIRS: &[(&str, &str, &str, &str)] = &[
    ("artifact_payoff", "artifact_count", "artifact payoff", "artifacts"),
    ("token_payoff", "token_producer", "token payoff", "token producers"),
    ("spell_payoff", "cheap_spell", "spell payoff", "cheap spells"),
    ("death_payoff", "sac_outlet", "death payoff", "sacrifice outlets"),
    ("counter_payoff", "counter_source", "counter payoff", "counter sources"),
];

/// A weakness that only matters when its package is primary
#[derive(Debug, Clone, Copy)]
pub struct Hazard {
    pub package: &'static str,
    pub tag: &'static str,
    /// Warn when the tag total is strictly above this
    pub above: f64,
    pub message: &'static str,
}

pub const HAZARDS: &[Hazard] = &[
    Hazard {
        package: "spellslinger",
        tag: "expensive_spell",
        above: 10.0,
        message: "Spellslinger deck has many expensive spells, may struggle to chain casts",
    },
    Hazard {
        package: "tokens",
        tag: "boardwipe",
        above: 3.0,
        message: "Token strategy vulnerable: deck runs multiple boardwipes without token protection",
    },
];

/// Conflict tags of primary packages present at or above `threshold`
pub fn detect_conflicts(
    primaries: &[PackageResult],
    totals: &TagTotals,
    catalog: &PackageCatalog,
    threshold: f64,
) -> Vec<String> {
    let mut warnings = Vec::new();

    for result in primaries {
        let Some(definition) = catalog.get(&result.name) else {
            continue;
        };

        for tag in &definition.conflict_tags {
            let total = tag_total(totals, tag);
            if total >= threshold {
                debug!(package = %definition.name, %tag, total, "conflict tag present");
                warnings.push(format!(
                    "{} package conflicts with '{}' cards in deck",
                    definition.display_name, tag
                ));
            }
        }
    }

    warnings
}

/// Package-specific weaknesses from the hazard table
pub fn detect_hazards(primaries: &[PackageResult], totals: &TagTotals) -> Vec<String> {
    HAZARDS
        .iter()
        .filter(|h| primaries.iter().any(|p| p.name == h.package))
        .filter(|h| tag_total(totals, h.tag) > h.above)
        .map(|h| h.message.to_string())
        .collect()
}

/// Payoffs without enablers, or enablers without payoffs
pub fn detect_orphans(totals: &TagTotals, threshold: f64) -> Vec<String> {
    let mut warnings = Vec::new();

    for (payoff_tag, enabler_tag, payoff_label, enabler_label) in ORPHAN_PAIRS {
        let payoffs = tag_total(totals, payoff_tag);
        let enablers = tag_total(totals, enabler_tag);

        if payoffs >= threshold && enablers < threshold {
            warnings.push(format!(
                "High {} count ({:.0}) but low {} ({:.0}): payoffs present without enough enablers",
                payoff_label, payoffs, enabler_label, enablers
            ));
        } else if enablers >= threshold * 2.0 && payoffs < ORPHAN_MIN_PAYOFFS {
            warnings.push(format!(
                "Many {} ({:.0}) but few ways to capitalize: enablers present without enough payoffs",
                enabler_label, enablers
            ));
        }
    }

    warnings
}

// =============================================================================
// TESTS
// =============================================================================
