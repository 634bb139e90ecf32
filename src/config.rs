//! Run configuration, loaded from `~/.lickgram/config.yaml` when present.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::event::{Beat, DEFAULT_BEATS_PER_MEASURE};

/// Settings shared by the encode and decode commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seed for the decoder's random choices.
    #[serde(default = "Config::default_seed")]
    pub seed: u64,
    /// Quarter notes per measure when splitting flat pieces.
    #[serde(default = "Config::default_beats_per_measure")]
    pub beats_per_measure: u32,
    /// Rewrite approach and other tokens after the first as chord tones
    /// before decoding.
    #[serde(default)]
    pub chord_tones_only: bool,
}

impl Config {
    fn default_seed() -> u64 {
        42
    }

    fn default_beats_per_measure() -> u32 {
        DEFAULT_BEATS_PER_MEASURE
    }

    pub fn measure_length(&self) -> Beat {
        Beat::from_measures(1, self.beats_per_measure)
    }

    /// A fresh random source seeded from `seed`.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            beats_per_measure: Self::default_beats_per_measure(),
            chord_tones_only: false,
        }
    }
}

/// The standard config path, `~/.lickgram/config.yaml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lickgram").join("config.yaml"))
}

/// Load configuration from `path`, or from the standard path when `None`.
///
/// A missing or unreadable file falls back to the defaults; a file that
/// exists but does not parse is logged and also falls back.
pub fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        return Config::default();
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };
    match serde_yaml::from_str::<Config>(&content) {
        Ok(config) if config.beats_per_measure > 0 => config,
        Ok(_) => {
            log::warn!(
                "{}: beats_per_measure must be positive, using defaults",
                path.display()
            );
            Config::default()
        }
        Err(err) => {
            log::warn!("{}: {err}, using defaults", path.display());
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.beats_per_measure, 4);
        assert!(!config.chord_tones_only);
        assert_eq!(config.measure_length(), Beat::from_beats(4));
    }

    #[test]
    fn partial_yaml_config() {
        let config: Config = serde_yaml::from_str("chord_tones_only: true\n").unwrap();
        assert!(config.chord_tones_only);
        assert_eq!(config.seed, 42);
        assert_eq!(config.beats_per_measure, 4);
    }

    #[test]
    fn load_from_explicit_path() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "seed: 7\nbeats_per_measure: 3\n").unwrap();

        let config = load_config(Some(file.path()));
        assert_eq!(config.seed, 7);
        assert_eq!(config.measure_length(), Beat::from_beats(3));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("none.yaml")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn broken_or_zero_length_config_gives_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "seed: [not, a, number]\n").unwrap();
        assert_eq!(load_config(Some(file.path())), Config::default());

        std::fs::write(file.path(), "beats_per_measure: 0\n").unwrap();
        assert_eq!(load_config(Some(file.path())), Config::default());
    }

    #[test]
    fn standard_path_loads_without_panicking() {
        // Whatever the runner's home holds, loading must not fail.
        let _ = load_config(None);
    }

    #[test]
    fn seeded_rng_repeats() {
        let config = Config {
            seed: 9,
            ..Config::default()
        };
        let a: Vec<u32> = config.rng().sample_iter(rand::distributions::Standard).take(4).collect();
        let b: Vec<u32> = config.rng().sample_iter(rand::distributions::Standard).take(4).collect();
        assert_eq!(a, b);
    }
}
