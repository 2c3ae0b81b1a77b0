//! Core types for decksynergy

mod card;
mod package;
mod report;
mod signal;

pub use card::{quantity_of, Card, CardFace, DeckInput, QuantityMap};
pub use package::{ComponentRule, PackageCatalog, PackageDefinition};
pub use report::{
    CardSynergyResult, ComponentCoverage, PackageResult, PackageStrength, SynergyReport,
};
pub use signal::{tag_total, Signal, SignalSource, TagTotals};
