//! Board generation: seeding, group growth, crop planting and backtracking.
//!
//! The pipeline is:
//! 1. `seed_ones` scatters single-cell groups carrying crop 1, at least two
//!    cells apart, until the group count lands within the configured bounds.
//! 2. A growth strategy extends every group one orthogonal cell at a time,
//!    never letting a group touch another group of its own terrain.
//! 3. Crops 2 through 5 are planted one numeral at a time under a
//!    [`StateStack`], which backtracks when a numeral cannot be placed.
//!
//! Every dead end is recovered internally by retrying a broader phase; only
//! the outer attempt cap is reported to the caller.

use log::{debug, warn};

use crate::board::GameBoard;
use crate::cell::{CellPatch, Crop, Terrain};
use crate::config::{BoardSize, GameConfig};
use crate::coord::CoordSet;
use crate::error::GenerationError;
use crate::group::MAX_GROUP_SIZE;
use crate::hints;
use crate::rng::BoardRng;
use crate::serial::SerializedBoard;
use crate::stack::StateStack;
use crate::state::GenerationState;

/// How groups are grown from their seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthStrategy {
    /// Grow one group to completion before starting the next.
    DepthFirst,
    /// Round-robin: every growable group tries one cell per round.
    BreadthFirst,
}

impl GrowthStrategy {
    pub const ALL: [GrowthStrategy; 2] = [GrowthStrategy::DepthFirst, GrowthStrategy::BreadthFirst];
}

pub struct GameGenerator {
    config: GameConfig,
    rng: BoardRng,
}

impl GameGenerator {
    /// Create a generator seeded from system entropy.
    pub fn new(config: GameConfig) -> Result<Self, GenerationError> {
        Self::with_rng(config, BoardRng::new())
    }

    /// Create a generator with a fixed seed, for reproducible boards.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GenerationError> {
        Self::with_rng(config, BoardRng::from_seed(seed))
    }

    fn with_rng(config: GameConfig, rng: BoardRng) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn width(&self) -> usize {
        self.config.board_width
    }

    fn height(&self) -> usize {
        self.config.board_height
    }

    // ─── Seeding ────────────────────────────────────────────────────────────

    /// Scatter crop-1 seeds, one per group, each with a random terrain.
    ///
    /// Seeds are at least two cells apart so no two groups start adjacent.
    /// Retries until the group count is within bounds; the configuration is
    /// validated to make that reachable.
    pub fn seed_ones(&mut self) -> GenerationState {
        let mut rejected = 0usize;
        loop {
            let mut state = GenerationState::empty(self.width(), self.height());
            let mut candidates = state.grid().board_coordinates().copy_shuffled(&mut self.rng);

            while let Some(coord) = candidates.first() {
                let group_id = state.group_count() as u32;
                let terrain = Terrain::random(&mut self.rng);
                state = state.copy_with_cell(
                    state.cell(coord.x, coord.y).copy_with(
                        CellPatch::new()
                            .crop(Some(Crop::One))
                            .group_id(Some(group_id))
                            .terrain(Some(terrain)),
                    ),
                );

                let blocked: CoordSet = coord
                    .neighbors(self.width(), self.height())
                    .into_iter()
                    .chain([coord])
                    .collect();
                candidates = candidates.difference(&blocked);
            }

            let count = state.group_count();
            if (self.config.min_groups..=self.config.max_groups).contains(&count) {
                if rejected > 0 {
                    debug!("Seeded {count} groups after {rejected} rejected seedings");
                }
                return state;
            }
            rejected += 1;
        }
    }

    // ─── Growth ─────────────────────────────────────────────────────────────

    /// Grow the groups of `state` with `strategy`.
    ///
    /// The result may still contain cells outside any group.
    pub fn grow(&mut self, strategy: GrowthStrategy, state: GenerationState) -> GenerationState {
        match strategy {
            GrowthStrategy::DepthFirst => self.depth_first_growth(state),
            GrowthStrategy::BreadthFirst => self.breadth_first_growth(state),
        }
    }

    fn depth_first_growth(&mut self, mut state: GenerationState) -> GenerationState {
        for group_id in state.group_ids() {
            let mut border = self.frontier(&state, group_id);
            while can_group_grow(&state, group_id, &border) {
                (state, border) = self.grow_group_once(state, group_id, border);
            }
        }
        state
    }

    fn breadth_first_growth(&mut self, mut state: GenerationState) -> GenerationState {
        let mut growing: Vec<(u32, CoordSet)> = state
            .group_ids()
            .into_iter()
            .map(|group_id| (group_id, self.frontier(&state, group_id)))
            .collect();

        while !growing.is_empty() {
            let mut next_round = Vec::with_capacity(growing.len());
            for (group_id, border) in growing {
                if can_group_grow(&state, group_id, &border) {
                    let (grown, border) = self.grow_group_once(state, group_id, border);
                    state = grown;
                    next_round.push((group_id, border));
                }
            }
            growing = next_round;
        }
        state
    }

    fn frontier(&self, state: &GenerationState, group_id: u32) -> CoordSet {
        state
            .group(group_id)
            .map(|group| group.orthogonal_neighbors(self.width(), self.height()))
            .unwrap_or_default()
    }

    /// Try to annex one random frontier cell into the group.
    ///
    /// Candidates already owned by a group, or touching (8-way) a foreign cell
    /// of the group's terrain, are dropped from the frontier and another one
    /// is drawn. Returns the new state and frontier; the state is unchanged
    /// when the frontier runs out.
    fn grow_group_once(
        &mut self,
        state: GenerationState,
        group_id: u32,
        mut border: CoordSet,
    ) -> (GenerationState, CoordSet) {
        let Some(group) = state.group(group_id).cloned() else {
            return (state, CoordSet::new());
        };

        while !border.is_empty() {
            let candidates = border.to_vec();
            let Some(&candidate) = self.rng.pick(&candidates) else {
                break;
            };
            border = border.without_coord(&candidate);

            if state.cell(candidate.x, candidate.y).group_id.is_some() {
                continue;
            }
            let touches_same_terrain = candidate
                .neighbors(self.width(), self.height())
                .iter()
                .filter(|coord| !group.has(coord))
                .any(|coord| state.cell(coord.x, coord.y).terrain == Some(group.terrain()));
            if touches_same_terrain {
                continue;
            }

            let grown = state.copy_with_cell(state.cell(candidate.x, candidate.y).copy_with(
                CellPatch::new()
                    .group_id(Some(group_id))
                    .terrain(Some(group.terrain())),
            ));
            let new_cells: CoordSet = candidate
                .orthogonal_neighbors(self.width(), self.height())
                .into_iter()
                .filter(|coord| !group.has(coord))
                .collect();
            return (grown, border.union(&new_cells));
        }

        (state, border)
    }

    /// Seed and grow until every cell belongs to a group.
    ///
    /// Each seeding gets one randomly chosen strategy and
    /// `grow_groups_max_tries` growth attempts before it is discarded.
    /// Panics if `strategies` is empty.
    pub fn generate_first_step(&mut self, strategies: &[GrowthStrategy]) -> GenerationState {
        assert!(!strategies.is_empty(), "no growth strategy was provided");
        loop {
            let strategy = strategies[self.rng.gen_range(strategies.len())];
            let seeded = self.seed_ones();

            for _ in 0..self.config.grow_groups_max_tries {
                let grown = self.grow(strategy, seeded.clone());
                if grown.grid().is_fully_partitioned() {
                    return grown;
                }
            }
            debug!(
                "{strategy:?} growth left holes {} times, reseeding",
                self.config.grow_groups_max_tries
            );
        }
    }

    // ─── Crop planting ──────────────────────────────────────────────────────

    /// Plant `crop` once in each of `groups_to_plant`.
    ///
    /// Each group gets a random cell without a crop whose 8 neighbors do not
    /// already hold `crop`. Returns `None`, with nothing committed, as soon as
    /// one group has no such cell.
    pub fn plant_crop(
        &mut self,
        crop: Crop,
        state: &GenerationState,
        groups_to_plant: &[u32],
    ) -> Option<GenerationState> {
        let mut planted = state.clone();
        for &group_id in groups_to_plant {
            let group = planted.group(group_id)?;
            let free = group
                .coords()
                .filter(|coord| planted.cell(coord.x, coord.y).crop.is_none());
            let candidates = free.copy_shuffled(&mut self.rng);

            let spot = candidates.iter().copied().find(|coord| {
                coord
                    .neighbors(self.width(), self.height())
                    .iter()
                    .all(|n| planted.cell(n.x, n.y).crop != Some(crop))
            })?;
            planted = planted.copy_with_cell(
                planted
                    .cell(spot.x, spot.y)
                    .copy_with(CellPatch::new().crop(Some(crop))),
            );
        }
        Some(planted)
    }

    // ─── Driver ─────────────────────────────────────────────────────────────

    /// Generate a complete board state: every cell grouped, with terrain and
    /// crop.
    ///
    /// # Errors
    ///
    /// [`GenerationError::AttemptsExhausted`] once the pipeline has been
    /// restarted `max_generation_attempts` times.
    pub fn generate_board(&mut self) -> Result<GenerationState, GenerationError> {
        let attempts = self.config.max_generation_attempts;
        for attempt in 1..=attempts {
            let mut stack = StateStack::new(self.config.step_max_tries);
            let first = self.generate_first_step(&GrowthStrategy::ALL);

            // smallest groups first: they are the hardest to plant
            let mut groups_to_plant: Vec<(u32, usize)> =
                first.groups().map(|group| (group.id(), group.len())).collect();
            groups_to_plant.sort_by_key(|&(_, size)| size);
            stack.push_valid(first);

            while let Some(last) = stack.last_state() {
                let Some(crop) = stack.next_crop() else {
                    break;
                };
                let eligible: Vec<u32> = groups_to_plant
                    .iter()
                    .filter(|&&(_, size)| size >= crop.value() as usize)
                    .map(|&(id, _)| id)
                    .collect();

                let candidate = self.plant_crop(crop, last, &eligible);
                stack.offer(candidate);
            }

            if stack.is_full() {
                if let Some(complete) = stack.into_last_state() {
                    debug!("Board generated on attempt {attempt}");
                    return Ok(complete);
                }
            }
            debug!("Backtracking exhausted on attempt {attempt}, restarting from seeding");
        }

        warn!("No board found after {attempts} attempts");
        Err(GenerationError::AttemptsExhausted { attempts })
    }

    /// Pick the coordinates revealed at the start of the game.
    pub fn generate_hints(&mut self) -> CoordSet {
        hints::select_hints(
            self.width(),
            self.height(),
            self.config.min_hints,
            self.config.max_hints,
            &mut self.rng,
        )
    }

    /// Generate a complete board with its hints revealed.
    pub fn generate_game_board(&mut self) -> Result<GameBoard, GenerationError> {
        let state = self.generate_board()?;
        let hints = self.generate_hints();
        Ok(GameBoard::from_complete_state(&state, &hints)?)
    }
}

fn can_group_grow(state: &GenerationState, group_id: u32, border: &CoordSet) -> bool {
    !border.is_empty() && state.group(group_id).is_some_and(|g| g.len() < MAX_GROUP_SIZE)
}

/// Generate a serialized board of the given size.
pub fn generate_board(size: BoardSize) -> Result<SerializedBoard, GenerationError> {
    let mut generator = GameGenerator::new(GameConfig::for_size(size))?;
    Ok(generator.generate_game_board()?.serialize())
}

/// Like [`generate_board`], but reproducible from `seed`.
pub fn generate_board_with_seed(
    size: BoardSize,
    seed: u64,
) -> Result<SerializedBoard, GenerationError> {
    let mut generator = GameGenerator::with_seed(GameConfig::for_size(size), seed)?;
    Ok(generator.generate_game_board()?.serialize())
}
