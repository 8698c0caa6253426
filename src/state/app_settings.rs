use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// `MMPREDICT_STATS_JSON`. Falls back to the bundled 2025 table.
    pub stats_path: Option<PathBuf>,
    pub seed_bonus: bool,
    pub randomness: bool,
    pub rng_seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            stats_path: None,
            seed_bonus: false,
            randomness: false,
            rng_seed: None,
            log_level: LevelFilter::Warn,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            stats_path: var("MMPREDICT_STATS_JSON").filter(|p| !p.trim().is_empty()).map(PathBuf::from),
            seed_bonus: var("MMPREDICT_SEED_BONUS").is_some_and(|v| is_truthy(&v)),
            randomness: var("MMPREDICT_RANDOMNESS").is_some_and(|v| is_truthy(&v)),
            rng_seed: var("MMPREDICT_RNG_SEED").and_then(|v| v.trim().parse().ok()),
            log_level: var("MMPREDICT_LOG")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
