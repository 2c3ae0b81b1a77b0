//! Deck Signal Index and Tag Aggregator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::core::extractor::extract_card_signals;
use crate::types::{quantity_of, Card, QuantityMap, Signal, TagTotals};

/// Card name → extracted signals, built once per analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckSignalIndex {
    signals: BTreeMap<String, Vec<Signal>>,
    /// Non-fatal notes for cards that could not be analysed
    diagnostics: BTreeMap<String, Vec<String>>,
}

impl DeckSignalIndex {
    /// Extract signals once per distinct card name.
    ///
    /// The first record for a name wins. A defective card is kept with no
    /// signals and a diagnostic note so the rest of the deck still runs.
    pub fn build(cards: &[Card]) -> Self {
        let mut index = Self::default();

        for card in cards {
            if index.signals.contains_key(&card.name) {
                debug!(card = %card.name, "duplicate card record ignored");
                continue;
            }

            if let Some(defect) = card.defect() {
                warn!(card = %card.name, %defect, "skipping signal extraction");
                index
                    .diagnostics
                    .entry(card.name.clone())
                    .or_default()
                    .push(format!("Signal extraction skipped: {}", defect));
                index.signals.insert(card.name.clone(), Vec::new());
                continue;
            }

            index.signals.insert(card.name.clone(), extract_card_signals(card));
        }

        debug!(cards = index.len(), "built deck signal index");
        index
    }

    /// Add or replace one card's signals
    pub fn insert(&mut self, name: impl Into<String>, signals: Vec<Signal>) {
        self.signals.insert(name.into(), signals);
    }

    pub fn get(&self, name: &str) -> Option<&[Signal]> {
        self.signals.get(name).map(Vec::as_slice)
    }

    pub fn diagnostics(&self, name: &str) -> &[String] {
        self.diagnostics.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Signal>)> {
        self.signals.iter()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Roll per-card signals into deck-wide totals, weighting by copy count
pub fn aggregate_tag_totals(index: &DeckSignalIndex, quantities: &QuantityMap) -> TagTotals {
    let mut totals = TagTotals::new();

    for (name, signals) in index.iter() {
        let qty = f64::from(quantity_of(quantities, name));
        for signal in signals {
            *totals.entry(signal.tag.clone()).or_insert(0.0) += signal.strength * qty;
        }
    }

    debug!(tags = totals.len(), "aggregated tag totals");
    totals
}

// =============================================================================
// TESTS
// =============================================================================
