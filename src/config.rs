use std::path::Path as FsPath;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    generators::{Generator, registry},
    maze::MazeSize,
    post_process::PostProcess,
    solvers::PathRequest,
};

/// Whether the path is searched on the post-processed maze or on the bare
/// spanning tree.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostProcessOrder {
    /// Loops and rooms first, so the path may take their shortcuts.
    #[default]
    BeforePath,
    /// Path first; loops and rooms are carved around it afterwards.
    AfterPath,
}

/// Everything needed to build one maze.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub algorithm: Generator,
    pub seed: i32,
    pub size: MazeSize,
    pub post_process: PostProcess,
    pub post_process_order: PostProcessOrder,
    /// Endpoints to solve between; no path is computed when unset.
    pub path: Option<PathRequest>,
}

impl MazeConfig {
    /// Smallest and largest side [`MazeConfig::randomize`] picks.
    pub const RANDOM_SIZE_RANGE: std::ops::RangeInclusive<u32> = 3..=101;

    /// Checks the parameters the types do not already guarantee.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.post_process.validate()
    }

    /// Parses a JSON configuration; omitted fields take their defaults.
    ///
    /// An unknown `algorithm` id is reported as
    /// [`ConfigError::UnknownAlgorithm`]; other malformed input as
    /// [`ConfigError::ConfigFile`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ConfigError::ConfigFile(e.to_string()))?;
        if let Some(id) = value.get("algorithm").and_then(serde_json::Value::as_str) {
            registry::lookup(id)?;
        }
        let config: MazeConfig =
            serde_json::from_value(value).map_err(|e| ConfigError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &FsPath) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ConfigFile(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> String {
        // Serializing plain data with string keys cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Picks an arbitrary maze: odd sides, any algorithm, any seed, and a path
    /// between the top-left and bottom-right corners. Post-processing settings
    /// are kept.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let width = rng.random_range(Self::RANDOM_SIZE_RANGE) | 1;
        let height = rng.random_range(Self::RANDOM_SIZE_RANGE) | 1;
        // Odd values within the range are always valid sizes
        self.size = MazeSize::new(width, height).unwrap_or_default();
        if let Some(&algorithm) = Generator::ALL.choose(rng) {
            self.algorithm = algorithm;
        }
        self.seed = rng.random();
        self.path = Some(PathRequest::corner_to_corner(self.size));
        tracing::info!(
            "[config] randomized to {} {} with seed {}",
            self.algorithm,
            self.size,
            self.seed
        );
    }
}
