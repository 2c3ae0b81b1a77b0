//! Signal records produced by the extractor

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a signal was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    TypeLine,
    Cmc,
    Oracle,
    Keywords,
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignalSource::TypeLine => "type_line",
            SignalSource::Cmc => "cmc",
            SignalSource::Oracle => "oracle",
            SignalSource::Keywords => "keywords",
        };
        write!(f, "{}", name)
    }
}

/// One piece of evidence that a card supports a strategic tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Tag from the closed vocabulary (e.g. `sac_outlet`)
    pub tag: String,
    /// 1.0 = baseline
    pub strength: f64,
    /// Short human-readable justification
    pub evidence: String,
    pub source: SignalSource,
}

impl Signal {
    pub fn new(
        tag: impl Into<String>,
        strength: f64,
        evidence: impl Into<String>,
        source: SignalSource,
    ) -> Self {
        Self {
            tag: tag.into(),
            strength,
            evidence: evidence.into(),
            source,
        }
    }
}

/// Deck-wide tag → quantity-weighted strength. Absent tags count as 0.0.
pub type TagTotals = BTreeMap<String, f64>;

/// Total for a tag, 0.0 when absent
pub fn tag_total(totals: &TagTotals, tag: &str) -> f64 {
    totals.get(tag).copied().unwrap_or(0.0)
}
