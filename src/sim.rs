//! Generation stepping for the terrain-extended Game of Life.
//!
//! The rules generalize Conway's: `Alive` and `Empty` cells follow the usual
//! survival/birth dynamics against the count of alive-class neighbors, while
//! `Desert` and `Water` terrain never changes. With the drowning rule
//! enabled, a living cell whose 8 neighbors all count as alive turns into
//! `Water` instead of dying of overpopulation.

use std::time::Duration;

use log::{debug, trace};
use rand::Rng;

use crate::cell::CellState;
use crate::grid::Grid;

/// Period between automatic generation steps while auto-run is active.
///
/// The host's event loop is the timer: it steps the simulation once per
/// elapsed interval while [`Simulation::running`] is set.
pub const AUTO_STEP_INTERVAL: Duration = Duration::from_millis(1000);

/// Share of cells seeded `Alive` by [`Simulation::randomize`].
const ALIVE_DENSITY: f64 = 0.3;
/// Share of cells seeded as `Desert` terrain by [`Simulation::randomize`].
const DESERT_DENSITY: f64 = 0.05;
/// Share of cells seeded as `Water` terrain by [`Simulation::randomize`].
const WATER_DENSITY: f64 = 0.05;

/// Transition-rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// When `true`, a living cell with all 8 neighbors counting as alive
    /// becomes `Water`; when `false`, it dies of overpopulation as in the
    /// classic rules.
    pub drowning: bool,
}

impl Default for Rules {
    fn default() -> Rules {
        Rules { drowning: true }
    }
}

impl Rules {
    /// Computes the state a cell takes on in the next generation.
    ///
    /// # Arguments
    ///
    /// * `current` - The cell's state in the present generation
    /// * `alive_neighbors` - How many of its neighbors count as alive
    ///
    /// # Returns
    ///
    /// The state for the next generation:
    ///
    /// * `Alive` survives with 2 or 3 live neighbors, drowns into `Water`
    ///   with 8 (when enabled), and dies to `Empty` otherwise
    /// * `Desert` and `Water` never change
    /// * `Empty` is born `Alive` with exactly 3 live neighbors
    pub fn next_state(&self, current: CellState, alive_neighbors: usize) -> CellState {
        match (current, alive_neighbors) {
            (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive,
            (CellState::Alive, 8) if self.drowning => CellState::Water,
            (CellState::Alive, _) => CellState::Empty,
            (CellState::Desert, _) => CellState::Desert,
            (CellState::Water, _) => CellState::Water,
            (CellState::Empty, 3) => CellState::Alive,
            (CellState::Empty, _) => CellState::Empty,
        }
    }
}

/// Cumulative statistics accumulated across generation steps.
///
/// Counters cover living cells only; terrain placed by hand or by drowning
/// is tracked through the grid's own per-state counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Cells born since the grid was last rebuilt.
    pub cells_created: u64,
    /// Living cells lost (death or drowning) since the grid was last rebuilt.
    pub cells_destroyed: u64,
}

/// The simulation: a grid plus the generation counter and auto-run flag.
///
/// All mutators are synchronous and total. The grid is replaced wholesale on
/// every step, so a reader always observes either the fully-old or the
/// fully-new generation, never a partial update.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    running: bool,
    rules: Rules,
    stats: Stats,
}

impl Simulation {
    /// Creates a paused simulation over an all-`Empty` grid with the default
    /// rules (drowning enabled).
    ///
    /// Dimensions must already be clamped into the supported range; see
    /// [`Grid::new`].
    pub fn new(width: usize, height: usize) -> Simulation {
        Simulation::with_rules(width, height, Rules::default())
    }

    /// Same as [`Simulation::new`] with an explicit rule configuration.
    pub fn with_rules(width: usize, height: usize, rules: Rules) -> Simulation {
        Simulation {
            grid: Grid::new(width, height),
            generation: 0,
            running: false,
            rules,
            stats: Stats::default(),
        }
    }

    /// The current grid snapshot.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of completed generation steps since the grid was last rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether automatic stepping is active.
    pub fn running(&self) -> bool {
        self.running
    }

    /// The active rule configuration.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Cumulative birth/death counters.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Advances the whole grid by one generation.
    ///
    /// Every next state is computed against the pre-step grid, and the new
    /// grid replaces the old one in a single assignment at the end, so the
    /// update is order-independent and never observable half-applied.
    /// Increments the generation counter by exactly 1.
    pub fn advance(&mut self) {
        let mut next = Grid::new(self.grid.width(), self.grid.height());
        let mut cells_created = 0;
        let mut cells_destroyed = 0;

        for cell in self.grid.cells() {
            let alive_neighbors = self
                .grid
                .neighbors(cell)
                .iter()
                .filter(|neighbor| neighbor.state.counts_as_alive())
                .count();
            let state = self.rules.next_state(cell.state, alive_neighbors);

            if cell.state != CellState::Alive && state == CellState::Alive {
                cells_created += 1;
            } else if cell.state == CellState::Alive && state != CellState::Alive {
                cells_destroyed += 1;
            }

            next.set_state(cell.x, cell.y, state);
        }

        self.grid = next;
        self.generation += 1;
        self.stats.cells_created += cells_created;
        self.stats.cells_destroyed += cells_destroyed;
        trace!(
            "generation {}: +{} -{}",
            self.generation,
            cells_created,
            cells_destroyed
        );
    }

    /// Rebuilds an all-`Empty` grid of the current dimensions.
    ///
    /// Zeroes the generation counter and the statistics and stops automatic
    /// stepping. Calling this twice in a row is the same as calling it once.
    pub fn reset(&mut self) {
        let (width, height) = (self.grid.width(), self.grid.height());
        self.rebuild(width, height);
    }

    /// Rebuilds the grid at new dimensions, with the same lifecycle effects
    /// as [`Simulation::reset`].
    ///
    /// The caller clamps `width` and `height` into the supported range
    /// first; the host only calls this when a clamped value actually differs
    /// from the active grid's dimensions.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.rebuild(width, height);
    }

    fn rebuild(&mut self, width: usize, height: usize) {
        debug!("rebuilding grid at {}x{}", width, height);
        self.grid = Grid::new(width, height);
        self.generation = 0;
        self.running = false;
        self.stats = Stats::default();
    }

    /// Toggles automatic stepping between `Idle` and `Running`.
    ///
    /// The host owns the actual timer; this flag only tells it whether to
    /// fire. Toggling while running is the stop half of the toggle, so a
    /// second concurrent timer can never start.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        debug!(
            "auto-run {}",
            if self.running { "started" } else { "stopped" }
        );
    }

    /// Cycles the cell at `(x, y)` one step through the editing order
    /// `Empty → Alive → Desert → Water → Empty`.
    ///
    /// Out-of-bounds coordinates are a no-op.
    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        if let Some(cell) = self.grid.get(x, y) {
            let next = cell.state.cycled();
            self.grid.set_state(x, y, next);
        }
    }

    /// Reseeds the whole grid at the configured densities: roughly 30%
    /// `Alive` with a sprinkling of `Desert` and `Water` terrain.
    ///
    /// Rebuilds first, so the generation counter and statistics start from
    /// zero and automatic stepping is stopped.
    pub fn randomize(&mut self) {
        let (width, height) = (self.grid.width(), self.grid.height());
        self.rebuild(width, height);

        let mut rng = rand::thread_rng();
        for y in 0..height {
            for x in 0..width {
                let state = if rng.gen_bool(DESERT_DENSITY) {
                    CellState::Desert
                } else if rng.gen_bool(WATER_DENSITY) {
                    CellState::Water
                } else if rng.gen_bool(ALIVE_DENSITY) {
                    CellState::Alive
                } else {
                    CellState::Empty
                };
                self.grid.set_state(x, y, state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation_with(
        width: usize,
        height: usize,
        cells: &[(usize, usize, CellState)],
    ) -> Simulation {
        let mut sim = Simulation::new(width, height);
        for &(x, y, state) in cells {
            sim.grid.set_state(x, y, state);
        }
        sim
    }

    fn state_at(sim: &Simulation, x: usize, y: usize) -> CellState {
        sim.grid().get(x, y).unwrap().state
    }

    #[test]
    fn alive_survives_with_two_or_three_neighbors() {
        let rules = Rules::default();
        assert_eq!(rules.next_state(CellState::Alive, 2), CellState::Alive);
        assert_eq!(rules.next_state(CellState::Alive, 3), CellState::Alive);
    }

    #[test]
    fn alive_dies_outside_the_survival_band() {
        let rules = Rules::default();
        for n in [0, 1, 4, 5, 6, 7] {
            assert_eq!(
                rules.next_state(CellState::Alive, n),
                CellState::Empty,
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn alive_drowns_when_fully_surrounded() {
        let rules = Rules::default();
        assert_eq!(rules.next_state(CellState::Alive, 8), CellState::Water);
    }

    #[test]
    fn drowning_disabled_falls_back_to_overpopulation_death() {
        let rules = Rules { drowning: false };
        assert_eq!(rules.next_state(CellState::Alive, 8), CellState::Empty);
        // the rest of the table is unaffected
        assert_eq!(rules.next_state(CellState::Alive, 3), CellState::Alive);
        assert_eq!(rules.next_state(CellState::Empty, 3), CellState::Alive);
    }

    #[test]
    fn empty_is_born_with_exactly_three_neighbors() {
        let rules = Rules::default();
        assert_eq!(rules.next_state(CellState::Empty, 3), CellState::Alive);
        for n in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert_eq!(
                rules.next_state(CellState::Empty, n),
                CellState::Empty,
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn terrain_is_inert_under_every_neighbor_count() {
        let rules = Rules::default();
        for n in 0..=8 {
            assert_eq!(rules.next_state(CellState::Desert, n), CellState::Desert);
            assert_eq!(rules.next_state(CellState::Water, n), CellState::Water);
        }
    }

    #[test]
    fn surrounded_center_cell_drowns() {
        // 3x3, every cell alive: the center sees 8 live neighbors and
        // drowns, corners see 3 and survive, edges see 5 and die.
        let mut sim = Simulation::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                sim.grid.set_state(x, y, CellState::Alive);
            }
        }
        sim.advance();

        assert_eq!(state_at(&sim, 1, 1), CellState::Water);
        for &(x, y) in &[(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(state_at(&sim, x, y), CellState::Alive);
        }
        for &(x, y) in &[(1, 0), (0, 1), (2, 1), (1, 2)] {
            assert_eq!(state_at(&sim, x, y), CellState::Empty);
        }
    }

    #[test]
    fn lone_cell_dies_and_spawns_nothing() {
        let mut sim = simulation_with(5, 5, &[(2, 2, CellState::Alive)]);
        sim.advance();

        assert_eq!(sim.grid().count_state(CellState::Empty), 25);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn water_counts_toward_neighbor_births() {
        // three water cells along the top row give (1, 1) exactly three
        // alive-class neighbors, enough for a birth
        let mut sim = simulation_with(
            3,
            3,
            &[
                (0, 0, CellState::Water),
                (1, 0, CellState::Water),
                (2, 0, CellState::Water),
            ],
        );
        sim.advance();

        assert_eq!(state_at(&sim, 1, 1), CellState::Alive);
        for x in 0..3 {
            assert_eq!(state_at(&sim, x, 0), CellState::Water);
        }
    }

    #[test]
    fn desert_blocks_nothing_but_never_changes() {
        // desert surrounded by live cells stays desert and does not feed
        // their neighbor counts
        let mut sim = simulation_with(
            3,
            3,
            &[
                (1, 1, CellState::Desert),
                (0, 0, CellState::Alive),
                (1, 0, CellState::Alive),
                (2, 0, CellState::Alive),
            ],
        );
        sim.advance();

        assert_eq!(state_at(&sim, 1, 1), CellState::Desert);
        // (1, 0) sees only 2 live neighbors (the desert does not count)
        assert_eq!(state_at(&sim, 1, 0), CellState::Alive);
    }

    #[test]
    fn glider_translates_one_cell_diagonally_in_four_steps() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut sim = Simulation::new(10, 10);
        for &(x, y) in &glider {
            sim.grid.set_state(x, y, CellState::Alive);
        }

        for _ in 0..4 {
            sim.advance();
        }

        let expected: Vec<(usize, usize)> =
            glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        for cell in sim.grid().cells() {
            let should_live = expected.contains(&(cell.x, cell.y));
            let want = if should_live {
                CellState::Alive
            } else {
                CellState::Empty
            };
            assert_eq!(cell.state, want, "at ({}, {})", cell.x, cell.y);
        }
        assert_eq!(sim.generation(), 4);
    }

    #[test]
    fn advance_increments_generation_and_keeps_dimensions() {
        let mut sim = Simulation::new(7, 4);
        for step in 1..=5 {
            sim.advance();
            assert_eq!(sim.generation(), step);
            assert_eq!(sim.grid().width(), 7);
            assert_eq!(sim.grid().height(), 4);
        }
    }

    #[test]
    fn advance_tracks_births_and_deaths() {
        // a blinker flips two cells off and two on each step
        let mut sim = simulation_with(
            3,
            3,
            &[
                (0, 1, CellState::Alive),
                (1, 1, CellState::Alive),
                (2, 1, CellState::Alive),
            ],
        );
        sim.advance();

        assert_eq!(state_at(&sim, 1, 0), CellState::Alive);
        assert_eq!(state_at(&sim, 1, 2), CellState::Alive);
        assert_eq!(
            sim.stats(),
            Stats {
                cells_created: 2,
                cells_destroyed: 2,
            }
        );
    }

    #[test]
    fn reset_restores_the_initial_state_and_is_idempotent() {
        let mut sim = simulation_with(6, 6, &[(2, 2, CellState::Alive), (3, 3, CellState::Water)]);
        sim.toggle_running();
        sim.advance();
        sim.advance();

        sim.reset();
        assert_eq!(sim.generation(), 0);
        assert!(!sim.running());
        assert_eq!(sim.stats(), Stats::default());
        assert_eq!(sim.grid().count_state(CellState::Empty), 36);

        let snapshot = sim.clone();
        sim.reset();
        assert_eq!(sim.grid(), snapshot.grid());
        assert_eq!(sim.generation(), snapshot.generation());
        assert_eq!(sim.running(), snapshot.running());
    }

    #[test]
    fn resize_rebuilds_empty_at_the_new_dimensions() {
        let mut sim = simulation_with(5, 5, &[(1, 1, CellState::Alive)]);
        sim.toggle_running();
        sim.advance();

        sim.resize(8, 3);
        assert_eq!(sim.grid().width(), 8);
        assert_eq!(sim.grid().height(), 3);
        assert_eq!(sim.grid().count_state(CellState::Empty), 24);
        assert_eq!(sim.generation(), 0);
        assert!(!sim.running());
    }

    #[test]
    fn toggle_running_flips_the_flag() {
        let mut sim = Simulation::new(4, 4);
        assert!(!sim.running());
        sim.toggle_running();
        assert!(sim.running());
        sim.toggle_running();
        assert!(!sim.running());
    }

    #[test]
    fn toggle_cell_cycles_through_all_states() {
        let mut sim = Simulation::new(3, 3);
        let order = [
            CellState::Alive,
            CellState::Desert,
            CellState::Water,
            CellState::Empty,
        ];
        for want in order {
            sim.toggle_cell(1, 1);
            assert_eq!(state_at(&sim, 1, 1), want);
        }

        // out of bounds is a no-op
        sim.toggle_cell(3, 3);
        assert_eq!(sim.grid().count_state(CellState::Empty), 9);
    }

    #[test]
    fn randomize_restarts_the_lifecycle() {
        let mut sim = Simulation::new(10, 10);
        sim.toggle_running();
        sim.advance();
        sim.advance();

        sim.randomize();
        assert_eq!(sim.generation(), 0);
        assert!(!sim.running());
        assert_eq!(sim.stats(), Stats::default());
        assert_eq!(sim.grid().width(), 10);
        assert_eq!(sim.grid().height(), 10);
    }
}
