//! Oracle-text and keyword rule tables
//!
//! Text is lower-cased before matching. Rules are evaluated in table order
//! and the first rule that matches claims its tag for the card; later rules
//! with the same tag are skipped.

use lazy_static::lazy_static;
use regex::Regex;

/// Uncompiled text rule
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub tag: &'static str,
    pub pattern: &'static str,
    pub strength: f64,
    /// Rejects the match when found in the rest of the matched line
    pub unless: Option<&'static str>,
}

const fn p(tag: &'static str, pattern: &'static str, strength: f64) -> PatternSpec {
    PatternSpec { tag, pattern, strength, unless: None }
}

const fn p_unless(
    tag: &'static str,
    pattern: &'static str,
    strength: f64,
    unless: &'static str,
) -> PatternSpec {
    PatternSpec { tag, pattern, strength, unless: Some(unless) }
}

/// Ordered text pattern catalog
pub const TEXT_PATTERNS: &[PatternSpec] = &[
    // ---- sacrifice ----
    p("sac_outlet", r"sacrifice (?:a|an|any|another) (?:creature|permanent)", 1.0),
    p("sac_outlet", r"sacrifice .*:", 1.0),
    p_unless("sac_outlet_free", r"sacrifice (?:a|another) creature:", 1.5, r"pay|\{"),
    p("death_payoff", r"whenever (?:a|another) creature (?:you control )?dies", 1.5),
    p("death_payoff", r"when .* dies", 1.0),
    p("dies_trigger", r"when .* dies", 1.0),
    p("dies_trigger", r"dies trigger", 1.0),
    p("blood_artist_effect", r"whenever .* dies,.* each opponent", 2.0),
    p("blood_artist_effect", r"whenever .* dies,.* target (?:player|opponent)", 1.5),
    p("prevent_death_triggers", r"creatures dying (?:don't|do not) cause abilities to trigger", 2.0),
    p("prevent_death_triggers", r"if a (?:nontoken )?creature would die, exile it instead", 2.0),
    // ---- tokens ----
    p("token_producer", r"create (?:a|an|one|two|three|four|five|\d+|x) .*token", 1.0),
    p("token_producer", r"put .* tokens? onto the battlefield", 1.0),
    p("token_doubler", r"if an effect would create .* tokens?.* instead", 2.5),
    p("token_doubler", r"(?:double|twice) .*tokens", 2.5),
    p("token_payoff", r"tokens you control", 1.5),
    p("token_payoff", r"for each token", 1.5),
    p("wide_payoff", r"creatures you control get \+", 1.5),
    p("wide_payoff", r"each creature you control", 1.3),
    p("wide_payoff", r"for each creature you control", 1.5),
    p("etb_payoff", r"whenever (?:a|another) (?:nontoken )?creature (?:you control )?enters", 1.5),
    p("anthem", r"creatures you control get \+\d+/\+\d+", 1.5),
    p("anthem", r"other .* you control get \+", 1.3),
    p("pump_team", r"creatures you control get \+\d+/\+\d+ until end of turn", 1.3),
    // ---- spells ----
    p("cantrip", r"draw a card", 1.0),
    p("spellslinger_trigger", r"whenever you cast (?:an )?instant or sorcery", 2.0),
    p("spellslinger_trigger", r"whenever you cast .* spell", 1.5),
    p("prowess", r"prowess", 1.5),
    p("magecraft", r"magecraft", 2.0),
    p("spell_payoff", r"for each instant and sorcery", 1.5),
    p("spell_payoff", r"for each spell", 1.3),
    p("storm_payoff", r"\bstorm\b", 3.0),
    p("storm_payoff", r"for each spell cast", 2.0),
    p("spell_tax_all", r"spells cost \{\d+\} more", 1.5),
    p("spell_tax_all", r"each spell costs \{\d+\} more", 1.5),
    p("rule_of_law", r"each player can't cast more than one spell", 3.0),
    // ---- artifacts ----
    p("artifact_payoff", r"artifacts you control", 1.5),
    p("artifact_payoff", r"for each artifact", 1.5),
    p("metalcraft", r"metalcraft", 2.0),
    p("metalcraft", r"if you control three or more artifacts", 1.5),
    p("artifact_engine", r"whenever .* artifact (?:enters|you control)", 1.5),
    p("artifact_recursion", r"return .* artifact .* from your graveyard", 1.5),
    p("destroy_artifacts", r"destroy all artifacts", 1.5),
    p("destroy_artifacts", r"destroy target artifact", 1.0),
    p("artifact_hate", r"activated abilities of artifacts can't be activated", 2.0),
    p("artifact_hate", r"artifacts don't untap", 2.0),
    // ---- enchantments ----
    p("enchantress_draw", r"whenever you cast an enchantment.* draw", 3.0),
    p("enchantress_draw", r"whenever an enchantment (?:you control )?enters.* draw", 3.0),
    p("enchantment_payoff", r"enchantments you control", 1.5),
    p("enchantment_payoff", r"for each enchantment", 1.5),
    // ---- graveyard ----
    p("yard_filler", r"\bmill", 1.0),
    p("yard_filler", r"put .* cards? .*into your graveyard", 1.0),
    p("self_mill", r"mill (?:a card|\w+ cards|the top)", 1.0),
    p("self_mill", r"put the top .* into your graveyard", 1.0),
    p("discard_outlet", r"discard a card", 1.0),
    p("reanimate_spell", r"return target creature card from .* graveyard to the battlefield", 2.0),
    p("reanimate_spell", r"put .* creature card from a graveyard onto the battlefield", 2.0),
    p("recursion", r"return [^.]* from your graveyard to the battlefield", 1.5),
    p("recursion", r"return target [^.]*card from your graveyard to your hand", 1.0),
    p("exile_graveyard", r"exile all cards from all graveyards", 2.0),
    p("exile_graveyard", r"exile all graveyards", 2.0),
    p("exile_graveyard", r"exile target player's graveyard", 1.5),
    p("graveyard_hate", r"would be put into (?:a|an opponent's) graveyard from anywhere, exile it instead", 2.0),
    p("graveyard_hate", r"cards in graveyards can't", 1.5),
    // ---- +1/+1 counters ----
    p("counter_source", r"put (?:a|an|one|two|three|\d+|x) \+1/\+1 counters?", 1.0),
    p("counter_when_etb", r"enters(?: the battlefield)? with .*\+1/\+1 counter", 1.5),
    p("counter_payoff", r"for each \+1/\+1 counter", 1.5),
    p("counter_payoff", r"with .*\+1/\+1 counters? on", 1.3),
    p("counter_matters", r"whenever .*\+1/\+1 counter", 1.5),
    p("proliferate", r"proliferate", 2.0),
    p("counter_doubler", r"(?:double|twice) .*counters", 2.5),
    p("counter_doubler", r"if .* would .* counters?.* instead", 2.0),
    // ---- voltron ----
    p("pump_single", r"target creature (?:you control )?gets \+", 1.0),
    p("evasion", r"can't be blocked", 1.5),
    p("evasion", r"unblockable", 1.5),
    p("evasion", r"flying", 1.0),
    p("double_strike", r"double strike", 2.0),
    p("protection", r"protection from", 1.3),
    p("protection", r"phases? out", 1.0),
    p("hexproof", r"\bhexproof\b", 1.5),
    p("hexproof", r"\bshroud\b", 1.5),
    p("indestructible", r"\bindestructible\b", 1.5),
    p("sacrifice_creature", r"each (?:player|opponent) sacrifices (?:a|an|one|two|\w+) creatures?", 1.0),
    // ---- lands ----
    p("landfall", r"landfall", 2.0),
    p("land_etb_trigger", r"whenever a land (?:you control )?enters", 2.0),
    p("land_ramp", r"search your library for (?:a|up to) .* land", 1.0),
    p("land_ramp", r"put a land card from your hand onto the battlefield", 1.0),
    p("fetch_land", r"search your library for a land", 1.5),
    p("fetch_land", r"pay 1 life, sacrifice [^:]*: search your library for", 1.5),
    p("land_recursion", r"return .* land .* from your graveyard", 1.5),
    p("land_recursion", r"play lands from your graveyard", 1.5),
    p("landfall_payoff", r"for each land you control", 1.5),
    p("land_count_matters", r"equal to the number of lands you control", 1.5),
    // ---- group slug ----
    p("group_slug", r"each (?:player|opponent)", 1.5),
    p("group_slug", r"deals? damage to each opponent", 1.5),
    p("damage_all", r"each player loses", 1.5),
    p("damage_all", r"deals? \d+ damage to each (?:creature and )?player", 1.5),
    p("drain", r"each opponent loses .* you gain", 2.0),
    p("lifegain", r"(?:you )?gain .* life", 1.0),
    p("damage_prevention", r"prevent all (?:combat )?damage", 1.0),
    p("damage_prevention", r"prevent the next \d+ damage", 1.0),
    // ---- storm / combo ----
    p("ritual", r"add \{[rgwub]\}\{[rgwub]\}\{[rgwub]\}", 1.5),
    p("ritual", r"adds? three mana", 1.5),
    p("cost_reducer", r"(?:spells|cards) (?:you cast )?cost.* less", 1.5),
    p("free_spell", r"without paying (?:its|their) mana costs?", 2.0),
    p("wheel", r"each player discards (?:their|his or her) hand.*draws?", 2.5),
    p("draw_engine", r"whenever .* draw", 2.0),
    p("combo_piece", r"infinite", 3.0),
    p("combo_piece", r"untap all", 1.5),
    p("wincon", r"you win the game", 3.0),
    p("wincon", r"target player loses the game", 2.5),
    // ---- board wipes ----
    p("boardwipe", r"destroy all creatures", 1.0),
    p("boardwipe", r"exile all creatures", 1.0),
    p("boardwipe", r"destroy all nonland permanents", 1.0),
    p("boardwipe_nontoken", r"destroy all nontoken", 1.0),
    p("massacre", r"(?:all|each) creatures? gets? -\d+/-\d+", 1.5),
];

/// Compiled text rule
#[derive(Debug)]
pub struct TextRule {
    pub tag: &'static str,
    pub pattern: Regex,
    pub strength: f64,
    pub unless: Option<Regex>,
}

impl TextRule {
    /// Matched substring, unless the guard rejects it
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        let m = self.pattern.find(text)?;

        if let Some(guard) = &self.unless {
            let rest = &text[m.end()..];
            let line_rest = rest.split('\n').next().unwrap_or("");
            if guard.is_match(line_rest) {
                return None;
            }
        }

        Some(m.as_str())
    }
}

lazy_static! {
    pub static ref TEXT_RULES: Vec<TextRule> = TEXT_PATTERNS
        .iter()
        .map(|entry| TextRule {
            tag: entry.tag,
            pattern: Regex::new(entry.pattern).unwrap(),
            strength: entry.strength,
            unless: entry.unless.map(|u| Regex::new(u).unwrap()),
        })
        .collect();
}

/// Keyword (lower-cased) → (tag, strength)
pub const KEYWORD_RULES: &[(&str, &str, f64)] = &[
    ("flying", "evasion", 1.0),
    ("double strike", "double_strike", 2.0),
    ("hexproof", "hexproof", 1.5),
    ("shroud", "hexproof", 1.5),
    ("indestructible", "indestructible", 1.5),
];

// =============================================================================
// TESTS
// =============================================================================
