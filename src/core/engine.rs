//! Report Assembler
//!
//! signals → totals → package scores → primaries → attribution →
//! warnings → overall score. Every step is a pure function of the deck,
//! the catalog and the config, so one engine can serve many decks at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::attribution::{attribute_cards, rank_top_cards};
use crate::core::conflicts::{detect_conflicts, detect_hazards, detect_orphans};
use crate::core::index::{aggregate_tag_totals, DeckSignalIndex};
use crate::core::scorer::{score_package, select_primary};
use crate::types::{quantity_of, Card, PackageCatalog, PackageResult, QuantityMap, SynergyReport};

/// Immutable catalog plus policy, shareable across threads
#[derive(Debug, Clone)]
pub struct SynergyEngine {
    catalog: Arc<PackageCatalog>,
    config: EngineConfig,
}

impl SynergyEngine {
    pub fn new(catalog: impl Into<Arc<PackageCatalog>>, config: EngineConfig) -> Self {
        Self {
            catalog: catalog.into(),
            config,
        }
    }

    /// Built-in catalog with default policy
    pub fn builtin() -> Self {
        Self::new(PackageCatalog::builtin(), EngineConfig::default())
    }

    pub fn catalog(&self) -> &PackageCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full analysis of a deck
    pub fn analyze(&self, cards: &[Card], quantities: &QuantityMap) -> SynergyReport {
        let index = DeckSignalIndex::build(cards);
        self.analyze_index(&index, quantities)
    }

    /// Full analysis from already extracted signals
    pub fn analyze_index(&self, index: &DeckSignalIndex, quantities: &QuantityMap) -> SynergyReport {
        let tag_totals = aggregate_tag_totals(index, quantities);

        let mut all_packages: Vec<PackageResult> = self
            .catalog
            .packages()
            .iter()
            .map(|pkg| score_package(pkg, &tag_totals))
            .collect();

        let mut primary_packages = select_primary(
            &all_packages,
            self.config.top_n,
            self.config.min_primary_score,
        );
        debug!(
            packages = all_packages.len(),
            primaries = primary_packages.len(),
            "scored packages"
        );

        let per_card = attribute_cards(&self.catalog, index);

        for primary in &mut primary_packages {
            primary.top_cards = rank_top_cards(&primary.name, &per_card, self.config.top_cards_limit);
            if let Some(entry) = all_packages.iter_mut().find(|p| p.name == primary.name) {
                entry.top_cards = primary.top_cards.clone();
            }
        }

        let mut warnings = detect_conflicts(
            &primary_packages,
            &tag_totals,
            &self.catalog,
            self.config.conflict_threshold,
        );
        warnings.extend(detect_hazards(&primary_packages, &tag_totals));
        warnings.extend(detect_orphans(&tag_totals, self.config.orphan_threshold));

        let overall_score = overall_score(&primary_packages);

        info!(
            cards = index.len(),
            overall_score,
            primaries = ?primary_packages.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            warnings = warnings.len(),
            "synergy analysis complete"
        );

        SynergyReport {
            overall_score,
            primary_packages,
            all_packages,
            per_card,
            warnings,
            tag_totals,
        }
    }
}

impl Default for SynergyEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Mean of the two best primaries, the lone primary, or 0
fn overall_score(primaries: &[PackageResult]) -> f64 {
    let score = match primaries {
        [] => 0.0,
        [only] => only.score,
        [first, second, ..] => (first.score + second.score) / 2.0,
    };
    score.clamp(0.0, 100.0)
}

/// Analyse a deck against `catalog`, or the built-in catalog when `None`
pub fn evaluate_synergy(
    cards: &[Card],
    quantities: &QuantityMap,
    catalog: Option<&PackageCatalog>,
) -> SynergyReport {
    let catalog = match catalog {
        Some(custom) => custom.clone(),
        None => PackageCatalog::builtin(),
    };
    SynergyEngine::new(catalog, EngineConfig::default()).analyze(cards, quantities)
}

/// SHA-256 hex of the sorted `name\tquantity` lines of a deck
pub fn deck_digest(cards: &[Card], quantities: &QuantityMap) -> String {
    let mut lines: Vec<String> = cards
        .iter()
        .map(|card| format!("{}\t{}", card.name, quantity_of(quantities, &card.name)))
        .collect();
    lines.sort();
    lines.dedup();

    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Report plus the metadata the CLI and API attach to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub deck_digest: String,
    pub analyzed_at: DateTime<Utc>,
    pub report: SynergyReport,
}

impl AnalysisEnvelope {
    pub fn new(cards: &[Card], quantities: &QuantityMap, report: SynergyReport) -> Self {
        Self {
            deck_digest: deck_digest(cards, quantities),
            analyzed_at: Utc::now(),
            report,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
