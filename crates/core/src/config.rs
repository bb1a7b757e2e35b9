//! Session configuration.

use crate::types::{InteractionMode, ScramblePolicy};

/// Construction-time options of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: InteractionMode,
    /// Whether placements are still accepted once every item is correct.
    pub allow_edits_after_complete: bool,
    pub scramble: ScramblePolicy,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: InteractionMode::default(),
            allow_edits_after_complete: true,
            scramble: ScramblePolicy::default(),
            seed: 1,
        }
    }
}

impl SessionConfig {
    pub fn new(mode: InteractionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_scramble(mut self, scramble: ScramblePolicy) -> Self {
        self.scramble = scramble;
        self
    }

    pub fn with_edits_after_complete(mut self, allow: bool) -> Self {
        self.allow_edits_after_complete = allow;
        self
    }

    /// Create from environment variables.
    ///
    /// - `VOWEL_GRID_MODE`: `swap` | `swap1` | `reorder`
    /// - `VOWEL_GRID_SEED`: scramble seed
    /// - `VOWEL_GRID_LOCK_ON_COMPLETE`: `1`/`true` disables edits once solved
    /// - `VOWEL_GRID_SCRAMBLE`: `uniform` | `displace`
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mode = lookup("VOWEL_GRID_MODE")
            .and_then(|s| InteractionMode::from_str(&s))
            .unwrap_or(defaults.mode);

        let seed = lookup("VOWEL_GRID_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let lock = lookup("VOWEL_GRID_LOCK_ON_COMPLETE")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let scramble = lookup("VOWEL_GRID_SCRAMBLE")
            .and_then(|s| ScramblePolicy::from_str(&s))
            .unwrap_or(defaults.scramble);

        Self {
            mode,
            allow_edits_after_complete: !lock,
            scramble,
            seed,
        }
    }

    /// Whether `VOWEL_GRID_SEED` pins the seed (otherwise hosts may pick one).
    pub fn seed_is_pinned() -> bool {
        std::env::var("VOWEL_GRID_SEED")
            .map(|s| s.trim().parse::<u32>().is_ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(SessionConfig::from_lookup(|_| None), SessionConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("VOWEL_GRID_MODE", "reorder"),
            ("VOWEL_GRID_SEED", " 4242 "),
            ("VOWEL_GRID_LOCK_ON_COMPLETE", "TRUE"),
            ("VOWEL_GRID_SCRAMBLE", "uniform"),
        ]));
        assert_eq!(config.mode, InteractionMode::Reorder);
        assert_eq!(config.seed, 4242);
        assert!(!config.allow_edits_after_complete);
        assert_eq!(config.scramble, ScramblePolicy::Uniform);
    }

    #[test]
    fn garbage_values_fall_back() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("VOWEL_GRID_MODE", "diagonal"),
            ("VOWEL_GRID_SEED", "-3"),
            ("VOWEL_GRID_LOCK_ON_COMPLETE", "maybe"),
        ]));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn builder_methods() {
        let config = SessionConfig::new(InteractionMode::Reorder)
            .with_seed(9)
            .with_scramble(ScramblePolicy::Uniform)
            .with_edits_after_complete(false);
        assert_eq!(config.seed, 9);
        assert!(!config.allow_edits_after_complete);
    }
}
