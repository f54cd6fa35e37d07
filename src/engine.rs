use tracing::debug;
use tracing::info;

use crate::CellCoord;
use crate::cell::CellState;
use crate::rule_set::RuleSet;
use crate::universe::Universe;

/// Whether the engine ticks every frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Counters recomputed from the transitions of the latest tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    pub alive: u32,
    pub births: u32,
    pub deaths: u32,
}

/// The double-buffered update engine.
///
/// Each tick scans the whole universe twice: first every cell's next
/// state is computed against the frozen pre-tick grid, then all buffered
/// states are committed at once. No cell's freshly computed state is ever
/// visible to another cell's neighbor count within the same tick.
pub struct Engine {
    rules: RuleSet,
    run: RunState,
    step_requested: bool,
    generation: u64,
    stats: TickStats,
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            run: RunState::Stopped,
            step_requested: false,
            generation: 0,
            stats: TickStats::default(),
        }
    }

    pub const fn run_state(&self) -> RunState {
        self.run
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.run, RunState::Running)
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn stats(&self) -> TickStats {
        self.stats
    }

    pub fn start(&mut self) {
        if !self.is_running() {
            info!(generation = self.generation, "engine started");
        }

        self.run = RunState::Running;
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            info!(generation = self.generation, "engine stopped");
        }

        self.run = RunState::Stopped;
    }

    /// Ask for exactly one tick while stopped. Consumed by the next
    /// [`Engine::update`] call.
    pub fn request_step(&mut self) {
        self.step_requested = true;
    }

    /// Consume the pending one-shot step request, if any.
    fn take_step_request(&mut self) -> bool {
        std::mem::take(&mut self.step_requested)
    }

    /// Zero the generation counter and stats (clear/new universe).
    pub fn reset(&mut self) {
        self.generation = 0;
        self.stats = TickStats::default();
        self.step_requested = false;
    }

    /// Advance one frame: tick if running, or once if a step was
    /// requested. Takes effect only here, never mid-scan.
    pub fn update(&mut self, universe: &mut Universe) {
        let step = self.take_step_request();

        if !self.is_running() && !step {
            return;
        }

        let stats = self.tick(universe);

        // Population extinction auto-stops the simulation.
        if stats.alive == 0 {
            self.stop();
        }
    }

    /// Apply the transition rule to every cell, once.
    fn tick(&mut self, universe: &mut Universe) -> TickStats {
        self.generation += 1;

        let mut stats = TickStats::default();

        let (cols, rows) = (universe.cols() as CellCoord, universe.rows() as CellCoord);

        // Phase 1: compute every next state against the pre-tick grid.
        for y in 0..rows {
            for x in 0..cols {
                let neighbors = universe.neighbor_count(x, y);
                let state = universe.state_at(x, y);
                let next = self.rules.next_state(state, neighbors);

                match (state, next) {
                    (CellState::Alive, CellState::Alive) => stats.alive += 1,
                    (CellState::Alive, CellState::Dead) => stats.deaths += 1,
                    (CellState::Dead, CellState::Alive) => {
                        stats.births += 1;
                        stats.alive += 1;
                    }
                    (CellState::Dead, CellState::Dead) => {}
                }

                universe.set_next(x, y, next);
            }
        }

        // Phase 2: commit all buffered states at once.
        universe.commit();

        self.stats = stats;

        debug!(
            generation = self.generation,
            alive = stats.alive,
            births = stats.births,
            deaths = stats.deaths,
            "tick"
        );

        stats
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}
