//! Per-Card Attributor
//!
//! A card's contribution to a package is the sum of its own signal
//! strengths on the package's tags. It is NOT multiplied by copy count:
//! it answers "how good is this card for the plan", while tag totals
//! answer "how deep is the deck's support".

use std::collections::BTreeMap;

use crate::core::index::DeckSignalIndex;
use crate::types::{CardSynergyResult, PackageCatalog};

/// Contribution of every card to every package it touches
pub fn attribute_cards(
    catalog: &PackageCatalog,
    index: &DeckSignalIndex,
) -> BTreeMap<String, CardSynergyResult> {
    let relevant: Vec<_> = catalog
        .packages()
        .iter()
        .map(|pkg| (pkg.name.as_str(), pkg.relevant_tags()))
        .collect();

    index
        .iter()
        .map(|(name, signals)| {
            let mut package_scores = BTreeMap::new();

            for (pkg_name, tags) in &relevant {
                let contribution: f64 = signals
                    .iter()
                    .filter(|s| tags.contains(s.tag.as_str()))
                    .map(|s| s.strength)
                    .sum();

                if contribution > 0.0 {
                    package_scores.insert(pkg_name.to_string(), contribution);
                }
            }

            let result = CardSynergyResult {
                card_name: name.clone(),
                signals: signals.clone(),
                package_scores,
                notes: index.diagnostics(name).to_vec(),
            };
            (name.clone(), result)
        })
        .collect()
}

/// Best contributors to one package, highest first, ties by name
pub fn rank_top_cards(
    package_name: &str,
    per_card: &BTreeMap<String, CardSynergyResult>,
    limit: usize,
) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = per_card
        .values()
        .filter_map(|card| {
            card.package_scores
                .get(package_name)
                .filter(|score| **score > 0.0)
                .map(|score| (card.card_name.clone(), *score))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// TESTS
// =============================================================================
