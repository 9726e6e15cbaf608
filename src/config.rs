//! Board sizes and generation parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, ConfigError, GenerationError};
use crate::group::MAX_GROUP_SIZE;

/// Default cap on whole-pipeline restarts in [`GameConfig`].
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 1000;

/// The two board presets offered to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Small,
    Standard,
}

impl BoardSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardSize::Small => "small",
            BoardSize::Standard => "standard",
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(BoardSize::Small),
            "standard" => Ok(BoardSize::Standard),
            other => Err(ConfigError::UnknownBoardSize(other.to_string())),
        }
    }
}

/// Everything that shapes a generation run, besides the RNG stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Failed attempts a backtracking level absorbs before it is dropped.
    pub step_max_tries: usize,
    /// Growth attempts on one seeded board before reseeding.
    pub grow_groups_max_tries: usize,
    pub min_groups: usize,
    pub max_groups: usize,
    pub min_hints: usize,
    pub max_hints: usize,
    /// Whole-pipeline restarts before giving up.
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,
}

fn default_max_generation_attempts() -> u32 {
    DEFAULT_MAX_GENERATION_ATTEMPTS
}

impl GameConfig {
    /// The preset for a board size.
    pub fn for_size(size: BoardSize) -> Self {
        match size {
            BoardSize::Small => Self {
                board_width: 5,
                board_height: 5,
                step_max_tries: 25,
                grow_groups_max_tries: 5,
                min_groups: 6,
                max_groups: 8,
                min_hints: 3,
                max_hints: 7,
                max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            },
            BoardSize::Standard => Self {
                board_width: 9,
                board_height: 5,
                step_max_tries: 25,
                grow_groups_max_tries: 5,
                min_groups: 10,
                max_groups: 14,
                min_hints: 5,
                max_hints: 12,
                max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            },
        }
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        let config: GameConfig = serde_json::from_str(json).map_err(BoardError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn cell_count(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Reject settings the generator could never satisfy.
    ///
    /// Seeds are at least two cells apart, so any seeding places between
    /// `⌈w/3⌉·⌈h/3⌉` and `⌈w/2⌉·⌈h/2⌉` groups; the group bounds must overlap
    /// that range, and enough groups must exist to cover the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.board_width, self.board_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if self.step_max_tries == 0 {
            return Err(ConfigError::ZeroTries {
                field: "step_max_tries",
            });
        }
        if self.grow_groups_max_tries == 0 {
            return Err(ConfigError::ZeroTries {
                field: "grow_groups_max_tries",
            });
        }
        if self.max_generation_attempts == 0 {
            return Err(ConfigError::ZeroTries {
                field: "max_generation_attempts",
            });
        }
        if self.min_groups > self.max_groups {
            return Err(ConfigError::InvertedGroupBounds {
                min: self.min_groups,
                max: self.max_groups,
            });
        }
        if self.min_hints > self.max_hints {
            return Err(ConfigError::InvertedHintBounds {
                min: self.min_hints,
                max: self.max_hints,
            });
        }

        let fewest = width.div_ceil(3) * height.div_ceil(3);
        let most = width.div_ceil(2) * height.div_ceil(2);
        if self.max_groups < fewest || self.min_groups > most {
            return Err(ConfigError::UnreachableGroupCount {
                min: self.min_groups,
                max: self.max_groups,
                fewest,
                most,
            });
        }
        if self.max_groups * MAX_GROUP_SIZE < self.cell_count() {
            return Err(ConfigError::TooFewGroups {
                max: self.max_groups,
                cells: self.cell_count(),
            });
        }
        Ok(())
    }
}
