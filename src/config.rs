//! Engine configuration and tracing setup

use serde::{Deserialize, Serialize};
use std::env;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{SynergyError, SynergyResult};
use crate::{
    CONFLICT_TAG_THRESHOLD, ORPHAN_THRESHOLD, PRIMARY_MIN_SCORE, PRIMARY_TOP_N, TOP_CARDS_LIMIT,
};

/// Tunable policy knobs for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of primary packages
    pub top_n: usize,
    /// Minimum score (inclusive) for a primary package
    pub min_primary_score: f64,
    /// Deck-wide total at which a conflict tag is reported
    pub conflict_threshold: f64,
    /// Base threshold for payoff/enabler imbalance checks
    pub orphan_threshold: f64,
    /// Cards ranked per primary package
    pub top_cards_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: PRIMARY_TOP_N,
            min_primary_score: PRIMARY_MIN_SCORE,
            conflict_threshold: CONFLICT_TAG_THRESHOLD,
            orphan_threshold: ORPHAN_THRESHOLD,
            top_cards_limit: TOP_CARDS_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `DECKSYNERGY_*` environment variables
    pub fn from_env() -> SynergyResult<Self> {
        let defaults = Self::default();

        let config = Self {
            top_n: parse_var("DECKSYNERGY_TOP_N", defaults.top_n)?,
            min_primary_score: parse_var("DECKSYNERGY_MIN_SCORE", defaults.min_primary_score)?,
            conflict_threshold: parse_var(
                "DECKSYNERGY_CONFLICT_THRESHOLD",
                defaults.conflict_threshold,
            )?,
            orphan_threshold: parse_var("DECKSYNERGY_ORPHAN_THRESHOLD", defaults.orphan_threshold)?,
            top_cards_limit: parse_var("DECKSYNERGY_TOP_CARDS", defaults.top_cards_limit)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot use
    pub fn validate(&self) -> SynergyResult<()> {
        if self.top_n == 0 {
            return Err(SynergyError::Config("top_n must be at least 1".to_string()));
        }
        if !(0.0..=100.0).contains(&self.min_primary_score) {
            return Err(SynergyError::Config(format!(
                "min_primary_score {} must be between 0 and 100",
                self.min_primary_score
            )));
        }
        for (name, value) in [
            ("conflict_threshold", self.conflict_threshold),
            ("orphan_threshold", self.orphan_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SynergyError::Config(format!(
                    "{name} {value} must be a finite, non-negative number"
                )));
            }
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, default: T) -> SynergyResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SynergyError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Install the global fmt subscriber.
///
/// Filter comes from `RUST_LOG`, then `DECKSYNERGY_LOG`, then `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("DECKSYNERGY_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // a subscriber installed earlier (e.g. by a test harness) stays in place
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_match_constants() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.min_primary_score, 30.0);
        assert_eq!(cfg.conflict_threshold, 2.0);
        assert_eq!(cfg.orphan_threshold, 4.0);
        assert_eq!(cfg.top_cards_limit, 10);
    }

    #[test]
    fn test_from_env_overrides() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DECKSYNERGY_TOP_N", "2");
        env::set_var("DECKSYNERGY_MIN_SCORE", "45.5");
        let cfg = EngineConfig::from_env().expect("should parse config");
        env::remove_var("DECKSYNERGY_TOP_N");
        env::remove_var("DECKSYNERGY_MIN_SCORE");

        assert_eq!(cfg.top_n, 2);
        assert_eq!(cfg.min_primary_score, 45.5);
        assert_eq!(cfg.orphan_threshold, 4.0);
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DECKSYNERGY_TOP_CARDS", "lots");
        let result = EngineConfig::from_env();
        env::remove_var("DECKSYNERGY_TOP_CARDS");

        assert!(matches!(result, Err(SynergyError::Config(_))));
    }

    #[test]
    fn test_from_env_rejects_nan_score() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DECKSYNERGY_MIN_SCORE", "NaN");
        let result = EngineConfig::from_env();
        env::remove_var("DECKSYNERGY_MIN_SCORE");

        assert!(matches!(result, Err(SynergyError::Config(_))));
    }

    #[test]
    fn test_validate() {
        assert!(EngineConfig::default().validate().is_ok());

        let edge = EngineConfig {
            min_primary_score: 100.0,
            conflict_threshold: 0.0,
            ..EngineConfig::default()
        };
        assert!(edge.validate().is_ok());

        let bad = [
            EngineConfig { top_n: 0, ..EngineConfig::default() },
            EngineConfig { min_primary_score: 100.5, ..EngineConfig::default() },
            EngineConfig { min_primary_score: -1.0, ..EngineConfig::default() },
            EngineConfig { conflict_threshold: f64::INFINITY, ..EngineConfig::default() },
            EngineConfig { orphan_threshold: -0.5, ..EngineConfig::default() },
            EngineConfig { orphan_threshold: f64::NAN, ..EngineConfig::default() },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(SynergyError::Config(_))),
                "accepted {:?}",
                cfg
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"top_n": 1}"#).unwrap();
        assert_eq!(cfg.top_n, 1);
        assert_eq!(cfg.top_cards_limit, 10);
    }
}
