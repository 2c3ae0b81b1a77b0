//! Built-in package catalog and catalog loading

use tracing::{info, warn};

use crate::error::{read_json_file, SynergyResult};
use crate::types::{ComponentRule as C, PackageCatalog, PackageDefinition as P};

/// The standard strategy packages, in tie-break order
pub fn builtin_packages() -> Vec<P> {
    vec![
        P::new("aristocrats", "Aristocrats", "Sacrifice creatures for value")
            .component(C::new("outlets", "Sacrifice Outlets", &["sac_outlet", "sac_outlet_free"], 5.0, 1.5))
            .component(C::new("payoffs", "Death Payoffs", &["death_payoff", "dies_trigger", "blood_artist_effect"], 6.0, 1.3))
            .component(C::new("fodder", "Sacrifice Fodder", &["token_producer", "cheap_creature", "recursive_creature"], 10.0, 1.0))
            .synergy_pair("sac_outlet_free", "death_payoff")
            .conflicts(&["exile_graveyard", "prevent_death_triggers"]),
        P::new("tokens", "Token Swarm", "Generate and profit from creature tokens")
            .component(C::new("producers", "Token Producers", &["token_producer", "token_doubler"], 10.0, 1.3))
            .component(C::new("payoffs", "Token Payoffs", &["token_payoff", "wide_payoff", "etb_payoff"], 6.0, 1.5))
            .component(C::new("support", "Team Buffs", &["anthem", "pump_team"], 4.0, 1.0))
            .synergy_pair("token_doubler", "token_producer")
            .conflicts(&["boardwipe_nontoken", "massacre"]),
        P::new("spellslinger", "Spellslinger", "Cast lots of instants and sorceries for value")
            .component(C::new("spells", "Cheap Spells", &["cheap_spell", "cantrip", "ritual"], 15.0, 1.0))
            .component(C::new("triggers", "Spell Triggers", &["spellslinger_trigger", "prowess", "magecraft"], 6.0, 1.5))
            .component(C::new("payoffs", "Spell Payoffs", &["spell_payoff", "storm_payoff"], 4.0, 1.3))
            .conflicts(&["spell_tax_all", "rule_of_law"]),
        P::new("artifacts", "Artifacts Matter", "Artifact synergies and engines")
            .component(C::new("artifacts", "Artifact Density", &["artifact_count", "artifact_creature"], 15.0, 1.0))
            .component(C::new("payoffs", "Artifact Payoffs", &["artifact_payoff", "metalcraft"], 6.0, 1.5))
            .component(C::new("engines", "Artifact Engines", &["artifact_engine", "artifact_recursion"], 4.0, 1.2))
            .conflicts(&["destroy_artifacts", "artifact_hate"]),
        P::new("enchantress", "Enchantress", "Enchantment density with draw engines")
            .component(C::new("enchantments", "Enchantment Density", &["enchantment_count"], 15.0, 1.0))
            .component(C::new("draw", "Enchantress Effects", &["enchantress_draw"], 4.0, 2.0))
            .component(C::new("payoffs", "Enchantment Payoffs", &["enchantment_payoff"], 4.0, 1.3)),
        P::new("reanimator", "Reanimator", "Fill graveyard and reanimate threats")
            .component(C::new("fillers", "Graveyard Fillers", &["yard_filler", "self_mill", "discard_outlet"], 6.0, 1.2))
            .component(C::new("reanimation", "Reanimation Spells", &["reanimate_spell", "recursion"], 6.0, 1.5))
            .component(C::new("targets", "Reanimation Targets", &["reanimate_target", "etb_bomb"], 6.0, 1.2))
            .conflicts(&["exile_graveyard", "graveyard_hate"]),
        P::new("counters", "+1/+1 Counters", "Place and proliferate +1/+1 counters")
            .component(C::new("sources", "Counter Sources", &["counter_source", "counter_when_etb"], 10.0, 1.2))
            .component(C::new("payoffs", "Counter Payoffs", &["counter_payoff", "counter_matters"], 6.0, 1.5))
            .component(C::new("support", "Counter Support", &["proliferate", "counter_doubler"], 3.0, 1.3)),
        P::new("voltron", "Voltron", "Power up one creature for commander damage")
            .component(C::new("buffs", "Buffs & Equipment", &["equipment", "aura_buff", "pump_single"], 10.0, 1.5))
            .component(C::new("protection", "Protection", &["protection", "hexproof", "indestructible"], 6.0, 1.3))
            .component(C::new("support", "Evasion & Keywords", &["evasion", "double_strike"], 4.0, 1.0))
            .conflicts(&["boardwipe", "sacrifice_creature"]),
        P::new("landfall", "Landfall", "Trigger landfall for value")
            .component(C::new("triggers", "Landfall Triggers", &["landfall", "land_etb_trigger"], 8.0, 1.5))
            .component(C::new("ramp", "Land Ramp", &["land_ramp", "fetch_land", "land_recursion"], 12.0, 1.2))
            .component(C::new("payoffs", "Landfall Payoffs", &["landfall_payoff", "land_count_matters"], 4.0, 1.3)),
        P::new("group_slug", "Group Slug", "Damage all opponents symmetrically")
            .component(C::new("damage", "Group Damage", &["group_slug", "damage_all", "drain"], 10.0, 1.5))
            .component(C::new("protection", "Life Protection", &["lifegain", "damage_prevention"], 6.0, 1.2)),
        P::new("storm", "Storm/Combo", "Chain spells or infinite combos")
            .component(C::new("enablers", "Enablers", &["ritual", "cost_reducer", "free_spell"], 10.0, 1.5))
            .component(C::new("draw", "Card Draw", &["cantrip", "wheel", "draw_engine"], 12.0, 1.3))
            .component(C::new("payoffs", "Win Conditions", &["storm_payoff", "combo_piece", "wincon"], 4.0, 1.5)),
    ]
}

impl PackageCatalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        Self::from_trusted(builtin_packages())
    }

    /// Load and validate a custom catalog (a JSON array of packages)
    pub fn from_json_file(path: &str) -> SynergyResult<Self> {
        match read_json_file::<Self>(path) {
            Ok(catalog) => {
                info!(path, packages = catalog.len(), "loaded custom package catalog");
                Ok(catalog)
            }
            Err(e) => {
                warn!(path, error = %e, "custom package catalog rejected");
                Err(e)
            }
        }
    }
}

impl Default for PackageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// TESTS
// =============================================================================
