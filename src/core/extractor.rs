//! Signal Extractor: turns one card into typed strategy signals
//!
//! Three layers, evaluated in order:
//! 1. structural rules (type line and mana value)
//! 2. oracle-text pattern catalog (first match per tag)
//! 3. keyword rules

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

use crate::core::patterns::{KEYWORD_RULES, TEXT_RULES};
use crate::types::{Card, Signal, SignalSource};
use crate::EVIDENCE_MAX_CHARS;

lazy_static! {
    /// "When(ever) ... enters" clause, legacy or modern wording
    static ref RE_ETB: Regex = Regex::new(r"when(?:ever)? [^.]*\benters\b").unwrap();
}

/// Card attributes shared by the structural rules
struct CardView<'a> {
    type_line: &'a str,
    text: &'a str,
    cmc: f64,
}

impl CardView<'_> {
    fn is(&self, card_type: &str) -> bool {
        self.type_line.contains(card_type)
    }

    fn is_spell(&self) -> bool {
        self.is("Instant") || self.is("Sorcery")
    }
}

type StructuralRule = fn(&CardView) -> Vec<Signal>;

/// Type-line and cost rules, in evaluation order
const STRUCTURAL_RULES: &[StructuralRule] = &[
    artifact_rule,
    enchantment_rule,
    cheap_spell_rule,
    expensive_spell_rule,
    big_creature_rule,
    cheap_creature_rule,
    recursive_creature_rule,
];

fn artifact_rule(card: &CardView) -> Vec<Signal> {
    if !card.is("Artifact") {
        return Vec::new();
    }

    if card.is("Creature") {
        return vec![
            Signal::new("artifact_creature", 1.0, "Artifact Creature", SignalSource::TypeLine),
            Signal::new(
                "artifact_count",
                0.5,
                "Artifact Creature (counts for density)",
                SignalSource::TypeLine,
            ),
        ];
    }

    let mut signals = vec![Signal::new(
        "artifact_count",
        1.0,
        "Artifact permanent",
        SignalSource::TypeLine,
    )];
    if card.is("Equipment") {
        signals.push(Signal::new("equipment", 1.5, "Equipment type", SignalSource::TypeLine));
    }
    signals
}

fn enchantment_rule(card: &CardView) -> Vec<Signal> {
    if !card.is("Enchantment") {
        return Vec::new();
    }

    let mut signals = vec![Signal::new(
        "enchantment_count",
        1.0,
        "Enchantment permanent",
        SignalSource::TypeLine,
    )];
    if card.is("Aura")
        && (card.text.contains("enchanted creature gets") || card.text.contains("gets +"))
    {
        signals.push(Signal::new(
            "aura_buff",
            1.0,
            "Aura that buffs creature",
            SignalSource::TypeLine,
        ));
    }
    signals
}

fn cheap_spell_rule(card: &CardView) -> Vec<Signal> {
    if !card.is_spell() || card.cmc > 2.0 {
        return Vec::new();
    }

    let strength = if card.cmc <= 1.0 { 1.5 } else { 1.0 };
    vec![Signal::new(
        "cheap_spell",
        strength,
        format!("Cheap instant/sorcery (CMC {})", card.cmc),
        SignalSource::Cmc,
    )]
}

fn expensive_spell_rule(card: &CardView) -> Vec<Signal> {
    if !card.is_spell() || card.cmc < 5.0 {
        return Vec::new();
    }

    vec![Signal::new(
        "expensive_spell",
        1.0,
        format!("Expensive instant/sorcery (CMC {})", card.cmc),
        SignalSource::Cmc,
    )]
}

fn big_creature_rule(card: &CardView) -> Vec<Signal> {
    if !card.is("Creature") || card.cmc < 6.0 {
        return Vec::new();
    }

    let mut signals = vec![Signal::new(
        "reanimate_target",
        card.cmc / 6.0,
        format!("High CMC creature (CMC {})", card.cmc),
        SignalSource::Cmc,
    )];
    if RE_ETB.is_match(card.text) {
        signals.push(Signal::new(
            "etb_bomb",
            1.5,
            "High CMC creature with ETB",
            SignalSource::Oracle,
        ));
    }
    signals
}

fn cheap_creature_rule(card: &CardView) -> Vec<Signal> {
    if !card.is("Creature") || card.cmc > 3.0 {
        return Vec::new();
    }

    vec![Signal::new(
        "cheap_creature",
        1.0,
        format!("Cheap creature (CMC {})", card.cmc),
        SignalSource::Cmc,
    )]
}

fn recursive_creature_rule(card: &CardView) -> Vec<Signal> {
    const HINTS: [&str; 4] = ["return", "from your graveyard", "unearth", "persist"];

    if !card.is("Creature") || !HINTS.iter().any(|h| card.text.contains(h)) {
        return Vec::new();
    }

    vec![Signal::new(
        "recursive_creature",
        1.5,
        "Self-recursing creature",
        SignalSource::Oracle,
    )]
}

/// Extract every signal for one card.
///
/// Pure and total: empty text simply yields no text signals. The same tag
/// may appear more than once from different layers; merging happens at
/// aggregation.
pub fn extract_signals(
    _name: &str,
    type_line: &str,
    oracle_text: &str,
    keywords: &BTreeSet<String>,
    cmc: f64,
    _colors: &BTreeSet<String>,
) -> Vec<Signal> {
    let text = oracle_text.to_lowercase();
    let view = CardView {
        type_line,
        text: &text,
        cmc,
    };

    let mut signals: Vec<Signal> = STRUCTURAL_RULES.iter().flat_map(|rule| rule(&view)).collect();
    signals.extend(text_signals(&text));
    signals.extend(keyword_signals(keywords));
    signals
}

/// Extract signals from a card record, joining face texts where needed
pub fn extract_card_signals(card: &Card) -> Vec<Signal> {
    extract_signals(
        &card.name,
        &card.full_type_line(),
        &card.full_oracle_text(),
        &card.keywords,
        card.cmc,
        &card.colors,
    )
}

/// Run the text catalog over lower-cased oracle text
fn text_signals(text: &str) -> Vec<Signal> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut satisfied: HashSet<&str> = HashSet::new();
    let mut signals = Vec::new();

    for rule in TEXT_RULES.iter() {
        if satisfied.contains(rule.tag) {
            continue;
        }
        if let Some(matched) = rule.find(text) {
            satisfied.insert(rule.tag);
            signals.push(Signal::new(
                rule.tag,
                rule.strength,
                format!("Oracle: '{}...'", truncate_chars(matched, EVIDENCE_MAX_CHARS)),
                SignalSource::Oracle,
            ));
        }
    }

    signals
}

fn keyword_signals(keywords: &BTreeSet<String>) -> Vec<Signal> {
    keywords
        .iter()
        .filter_map(|keyword| {
            let lower = keyword.to_lowercase();
            KEYWORD_RULES
                .iter()
                .find(|(kw, _, _)| *kw == lower)
                .map(|(_, tag, strength)| {
                    Signal::new(*tag, *strength, format!("Has {}", keyword), SignalSource::Keywords)
                })
        })
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// =============================================================================
// TESTS
// =============================================================================
