//! Package Scorer and Primary Selector
//!
//! score = 100 * Σ(min(1, count/min_required) * weight * 25) / Σ(weight * 25)
//!
//! Each component ratio is capped before it is weighted, so one
//! overrepresented tag cannot carry the whole package.

use crate::types::{
    tag_total, ComponentCoverage, PackageDefinition, PackageResult, PackageStrength, TagTotals,
};
use crate::{COMPONENT_POINTS, MISSING_COVERAGE_RATIO};

/// Score one package against deck-wide tag totals
pub fn score_package(definition: &PackageDefinition, totals: &TagTotals) -> PackageResult {
    let mut components = Vec::with_capacity(definition.components.len());
    let mut missing = Vec::new();
    let mut earned = 0.0;
    let mut possible = 0.0;

    for rule in &definition.components {
        let count: f64 = rule.tags.iter().map(|t| tag_total(totals, t)).sum();

        let coverage_ratio = if rule.min_required > 0.0 {
            (count / rule.min_required).min(1.0)
        } else {
            1.0
        };
        let score_contribution = coverage_ratio * rule.weight * COMPONENT_POINTS;

        earned += score_contribution;
        possible += rule.weight * COMPONENT_POINTS;

        if coverage_ratio < MISSING_COVERAGE_RATIO {
            missing.push(rule.display_name.clone());
        }

        components.push(ComponentCoverage {
            name: rule.name.clone(),
            display_name: rule.display_name.clone(),
            count,
            min_required: rule.min_required,
            weight: rule.weight,
            coverage_ratio,
            score_contribution,
        });
    }

    let score = if possible > 0.0 {
        (earned / possible * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let total_signals = definition
        .relevant_tags()
        .into_iter()
        .map(|t| tag_total(totals, t))
        .sum();

    let strength = PackageStrength::from_score(score);

    PackageResult {
        name: definition.name.clone(),
        display_name: definition.display_name.clone(),
        score,
        strength,
        total_signals,
        components,
        missing,
        top_cards: Vec::new(),
        notes: vec![strength.note().to_string()],
    }
}

/// Top `top_n` packages by score with score ≥ `min_score`.
///
/// Stable: equal scores keep catalog order.
pub fn select_primary(
    all_results: &[PackageResult],
    top_n: usize,
    min_score: f64,
) -> Vec<PackageResult> {
    let mut ranked: Vec<&PackageResult> = all_results.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    ranked
        .into_iter()
        .take(top_n)
        .filter(|p| p.score >= min_score)
        .cloned()
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentRule;

    fn tokens_package() -> PackageDefinition {
        PackageDefinition::new("tokens", "Token Swarm", "Go wide")
            .component(ComponentRule::new("producers", "Token Producers", &["token_producer", "token_doubler"], 10.0, 1.3))
            .component(ComponentRule::new("payoffs", "Token Payoffs", &["token_payoff"], 6.0, 1.5))
            .component(ComponentRule::new("support", "Team Buffs", &["anthem"], 4.0, 1.0))
    }

    fn totals(pairs: &[(&str, f64)]) -> TagTotals {
        pairs.iter().map(|(t, v)| (t.to_string(), *v)).collect()
    }

    fn result(name: &str, score: f64) -> PackageResult {
        PackageResult {
            name: name.to_string(),
            display_name: name.to_string(),
            score,
            strength: PackageStrength::from_score(score),
            total_signals: 0.0,
            components: Vec::new(),
            missing: Vec::new(),
            top_cards: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_empty_totals_score_zero() {
        let r = score_package(&tokens_package(), &TagTotals::new());
        assert_eq!(r.score, 0.0);
        assert_eq!(r.missing.len(), 3);
        assert_eq!(r.strength, PackageStrength::Absent);
        assert_eq!(r.notes, vec!["Package not present in meaningful amounts".to_string()]);
    }

    #[test]
    fn test_full_coverage() {
        let r = score_package(
            &tokens_package(),
            &totals(&[("token_producer", 12.0), ("token_payoff", 8.0), ("anthem", 4.0)]),
        );
        assert!((r.score - 100.0).abs() < 1e-9);
        assert!(r.missing.is_empty());
        assert_eq!(r.total_signals, 24.0);
        for c in &r.components {
            assert_eq!(c.coverage_ratio, 1.0);
        }
    }

    #[test]
    fn test_cap_before_weight() {
        // producers alone at 100x requirement earn only their own share
        let r = score_package(&tokens_package(), &totals(&[("token_producer", 1000.0)]));
        let expected = 100.0 * (1.3 * 25.0) / ((1.3 + 1.5 + 1.0) * 25.0);
        assert!((r.score - expected).abs() < 1e-9);
        assert_eq!(r.components[0].coverage_ratio, 1.0);
        assert_eq!(r.components[0].count, 1000.0);
    }

    #[test]
    fn test_partial_coverage_and_missing() {
        let r = score_package(
            &tokens_package(),
            &totals(&[("token_producer", 8.0), ("token_payoff", 4.0), ("anthem", 4.0)]),
        );
        // producers 0.8 → covered, payoffs 0.666 → missing
        assert_eq!(r.missing, vec!["Token Payoffs".to_string()]);
        assert!((r.components[1].coverage_ratio - 4.0 / 6.0).abs() < 1e-9);
        assert_eq!(r.components[1].score_contribution, r.components[1].coverage_ratio * 1.5 * 25.0);
    }

    #[test]
    fn test_zero_min_required_counts_as_covered() {
        let pkg = PackageDefinition::new("p", "P", "")
            .component(ComponentRule::new("free", "Free", &["nothing"], 0.0, 1.0));
        let r = score_package(&pkg, &TagTotals::new());
        assert_eq!(r.score, 100.0);
    }

    #[test]
    fn test_select_primary_boundary() {
        let all = vec![result("below", 29.999), result("at", 30.0)];
        let primary = select_primary(&all, 3, 30.0);
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].name, "at");
    }

    #[test]
    fn test_select_primary_top_n_and_ties() {
        let all = vec![
            result("a", 50.0),
            result("b", 80.0),
            result("c", 50.0),
            result("d", 90.0),
        ];
        let primary = select_primary(&all, 3, 30.0);
        let names: Vec<_> = primary.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["d", "b", "a"]);
    }

    #[test]
    fn test_select_primary_none() {
        let all = vec![result("a", 10.0), result("b", 0.0)];
        assert!(select_primary(&all, 3, 30.0).is_empty());
        assert!(select_primary(&[], 3, 30.0).is_empty());
    }
}
