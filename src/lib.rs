//! decksynergy: strategy synergy engine for trading-card collections
//!
//! Pipeline: card → signals → tag totals → package scores → primaries →
//! per-card attribution → conflict/imbalance warnings → report.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// PACKAGE SCORING
// =============================================================================

/// Raw points a component is worth at full coverage (before weight)
pub const COMPONENT_POINTS: f64 = 25.0;

/// Components below this coverage ratio are reported as missing
pub const MISSING_COVERAGE_RATIO: f64 = 0.8;

/// Score band floors for package notes
pub const BAND_STRONG: f64 = 75.0;
pub const BAND_MODERATE: f64 = 50.0;
pub const BAND_WEAK: f64 = 25.0;

// =============================================================================
// PRIMARY SELECTION
// =============================================================================

/// How many packages may be primary
pub const PRIMARY_TOP_N: usize = 3;

/// Minimum score for a primary package (inclusive)
pub const PRIMARY_MIN_SCORE: f64 = 30.0;

/// Cards listed per primary package
pub const TOP_CARDS_LIMIT: usize = 10;

// =============================================================================
// WARNINGS
// =============================================================================

/// Deck-wide total at which a conflict tag is reported
pub const CONFLICT_TAG_THRESHOLD: f64 = 2.0;

/// Base threshold for payoff/enabler imbalance checks
pub const ORPHAN_THRESHOLD: f64 = 4.0;

/// Payoff total below which an enabler-heavy deck is flagged
pub const ORPHAN_MIN_PAYOFFS: f64 = 2.0;

// =============================================================================
// EXTRACTION
// =============================================================================

/// Matched oracle text kept as evidence (characters)
pub const EVIDENCE_MAX_CHARS: usize = 50;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
