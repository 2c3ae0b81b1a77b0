//! Core modules for decksynergy

pub mod api;
pub mod attribution;
pub mod catalog;
pub mod conflicts;
pub mod engine;
pub mod extractor;
pub mod index;
pub mod patterns;
pub mod scorer;
pub mod summary;

pub use api::{create_router, run_server};
pub use attribution::{attribute_cards, rank_top_cards};
pub use catalog::builtin_packages;
pub use conflicts::{detect_conflicts, detect_hazards, detect_orphans};
pub use engine::{deck_digest, evaluate_synergy, AnalysisEnvelope, SynergyEngine};
pub use extractor::{extract_card_signals, extract_signals};
pub use index::{aggregate_tag_totals, DeckSignalIndex};
pub use scorer::{score_package, select_primary};
pub use summary::{render_summary, SummaryOptions};
