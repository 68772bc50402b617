//! Game state module - the lifecycle state machine and per-tick update.
//!
//! Ties the core pieces together: grid, snake, food, RNG, and score. All
//! simulation mutation happens inside [`GameState::tick`]; everything else is
//! steering input or lifecycle transitions.

use crate::core::grid::Grid;
use crate::core::rng::SimpleRng;
use crate::core::snake::Snake;
use crate::error::{ConfigError, EngineError, EngineFault};
use crate::types::{Cell, Direction, GameAction, Phase, EAT_FLASH_TICKS, FOOD_REWARD};

/// What a single completed tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Head landed on the food cell (snake grew by one).
    pub ate: bool,
    /// This tick hit a wall or the body and entered GameOver.
    pub ended: bool,
    /// Score after the tick.
    pub score: u32,
}

/// Complete simulation state for one run.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Cell,
    score: u32,
    phase: Phase,
    rng: SimpleRng,
    /// Remaining ticks of the head's post-food emphasis.
    eat_flash: u8,
}

impl GameState {
    /// Build a fresh game in the Ready phase.
    ///
    /// Fails if the grid cannot hold the initial snake plus one food cell.
    pub fn new(grid: Grid, seed: u32) -> Result<Self, EngineError> {
        let snake = Snake::spawn(&grid);
        if !snake.segments().iter().all(|s| grid.contains(s.cell)) || grid.cell_count() <= snake.len()
        {
            return Err(ConfigError::GridTooSmall {
                cols: grid.cols(),
                rows: grid.rows(),
            }
            .into());
        }
        let mut rng = SimpleRng::new(seed);
        let food = place_food(&grid, &snake, &mut rng)?;
        Ok(Self {
            grid,
            snake,
            food,
            score: 0,
            phase: Phase::Ready,
            rng,
            eat_flash: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn eat_flash(&self) -> u8 {
        self.eat_flash
    }

    /// Transition Ready -> Playing. No-op in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.phase = Phase::Playing;
        true
    }

    /// Full reset back to Ready: new snake, resampled food, score zero.
    ///
    /// The RNG keeps running rather than being reseeded, so successive runs
    /// see different food placements.
    pub fn reset(&mut self) -> Result<(), EngineFault> {
        self.snake = Snake::spawn(&self.grid);
        self.food = place_food(&self.grid, &self.snake, &mut self.rng)?;
        self.score = 0;
        self.eat_flash = 0;
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Route an action through the state machine.
    ///
    /// Returns true if the action had any effect. Actions arriving in an
    /// incompatible phase are silently ignored, as are reversal turns.
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, EngineFault> {
        match (action, self.phase) {
            (GameAction::Turn(dir), Phase::Playing) => Ok(self.snake.steer(dir)),
            (GameAction::Activate, Phase::Ready) => Ok(self.start()),
            (GameAction::Activate, Phase::GameOver) => {
                // Retry: full reset, then the same semantics as start.
                self.reset()?;
                Ok(self.start())
            }
            _ => Ok(false),
        }
    }

    /// Buffer a heading change for the next tick (Playing only).
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.snake.steer(dir)
    }

    /// Advance the simulation by exactly one step.
    ///
    /// Order is fixed: commit the pending heading, compute the tentative head,
    /// boundary check, self-collision check, and only then commit the new
    /// segment sequence. A fatal collision leaves the snake exactly as it was
    /// at the end of the previous tick.
    pub fn tick(&mut self) -> Result<TickOutcome, EngineFault> {
        if self.phase != Phase::Playing {
            return Ok(TickOutcome {
                ate: false,
                ended: false,
                score: self.score,
            });
        }

        let dir = self.snake.commit_heading();
        let new_head = self.snake.head().step(dir);

        if !self.grid.contains(new_head) {
            self.phase = Phase::GameOver;
            return Ok(TickOutcome {
                ate: false,
                ended: true,
                score: self.score,
            });
        }

        if self.snake.occupies(new_head) {
            self.phase = Phase::GameOver;
            return Ok(TickOutcome {
                ate: false,
                ended: true,
                score: self.score,
            });
        }

        let ate = new_head == self.food;
        let next = self.snake.advanced(new_head, ate);
        self.snake.replace_segments(next);

        if !self.grid.contains(self.snake.head()) {
            // Unreachable unless the boundary check above was bypassed.
            return Err(EngineFault::HeadOutOfGrid {
                x: self.snake.head().x,
                y: self.snake.head().y,
            });
        }

        if ate {
            self.score += FOOD_REWARD;
            self.eat_flash = EAT_FLASH_TICKS;
            self.food = place_food(&self.grid, &self.snake, &mut self.rng)?;
        }
        self.eat_flash = self.eat_flash.saturating_sub(1);

        Ok(TickOutcome {
            ate,
            ended: false,
            score: self.score,
        })
    }

    #[cfg(test)]
    pub fn set_food(&mut self, cell: Cell) {
        self.food = cell;
    }

    #[cfg(test)]
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}

/// Sample a uniformly random unoccupied cell.
///
/// Samples by index over the free cells instead of rejection-looping, so a
/// nearly full grid stays O(cells) and a completely full grid is a fault, not
/// a hang.
fn place_food(grid: &Grid, snake: &Snake, rng: &mut SimpleRng) -> Result<Cell, EngineFault> {
    let free = grid.cell_count() - snake.len();
    if free == 0 {
        return Err(EngineFault::GridFull {
            cols: grid.cols(),
            rows: grid.rows(),
        });
    }

    let mut remaining = rng.gen_range(free as u32) as usize;
    for index in 0..grid.cell_count() {
        let cell = grid.cell_at(index);
        if snake.occupies(cell) {
            continue;
        }
        if remaining == 0 {
            return Ok(cell);
        }
        remaining -= 1;
    }

    // The scan covers exactly `free` unoccupied cells, so the loop returns.
    unreachable!("free cell scan exhausted below the sampled index")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::GameConfig;

    fn playing_state(seed: u32) -> GameState {
        let grid = GameConfig::default().grid().unwrap();
        let mut state = GameState::new(grid, seed).unwrap();
        state.start();
        state
    }

    #[test]
    fn new_game_is_ready_with_valid_food() {
        let grid = GameConfig::default().grid().unwrap();
        let state = GameState::new(grid, 1).unwrap();
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.score(), 0);
        assert!(grid.contains(state.food()));
        assert!(!state.snake().occupies(state.food()));
    }

    #[test]
    fn plain_tick_translates_without_growth() {
        let mut state = playing_state(1);
        state.set_food(Cell::new(20, 5));

        let outcome = state.tick().unwrap();
        assert!(!outcome.ate);
        assert!(!outcome.ended);
        assert_eq!(state.snake().head(), Cell::new(6, 10));
        assert_eq!(state.snake().len(), 3);
        assert!(!state.snake().occupies(Cell::new(3, 10)));
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut state = playing_state(1);
        state.set_food(Cell::new(6, 10));

        let outcome = state.tick().unwrap();
        assert!(outcome.ate);
        assert_eq!(state.score(), FOOD_REWARD);
        assert_eq!(state.snake().len(), 4);
        // Resampled food avoids every occupied cell, including the new head.
        assert!(!state.snake().occupies(state.food()));
        assert!(state.grid().contains(state.food()));
    }

    #[test]
    fn wall_hit_enters_game_over_without_mutation() {
        let mut state = playing_state(1);
        state.set_snake(Snake::from_cells(
            &[Cell::new(0, 10), Cell::new(1, 10), Cell::new(2, 10)],
            Direction::Left,
        ));

        let outcome = state.tick().unwrap();
        assert!(outcome.ended);
        assert_eq!(state.phase(), Phase::GameOver);
        // Snake is untouched by the fatal tick.
        assert_eq!(state.snake().head(), Cell::new(0, 10));
        assert_eq!(state.snake().len(), 3);
    }

    #[test]
    fn self_collision_enters_game_over() {
        // Head at (5,5), body hooked underneath at (5,6); turning down is a
        // legal steer (not a reversal) and lands on the body.
        let mut state = playing_state(1);
        state.set_snake(Snake::from_cells(
            &[
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(4, 6),
                Cell::new(5, 6),
                Cell::new(6, 6),
            ],
            Direction::Right,
        ));
        assert!(state.steer(Direction::Down));

        let outcome = state.tick().unwrap();
        assert!(outcome.ended);
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.snake().len(), 5);
    }

    #[test]
    fn tick_in_ready_is_a_no_op() {
        let grid = GameConfig::default().grid().unwrap();
        let mut state = GameState::new(grid, 1).unwrap();
        let before = state.snake().clone();
        let outcome = state.tick().unwrap();
        assert!(!outcome.ate && !outcome.ended);
        assert_eq!(state.snake(), &before);
    }

    #[test]
    fn retry_resets_everything() {
        let mut state = playing_state(1);
        state.set_food(Cell::new(6, 10));
        state.tick().unwrap();
        assert_eq!(state.score(), FOOD_REWARD);

        // Run into the right wall.
        while state.phase() == Phase::Playing {
            state.tick().unwrap();
        }
        assert_eq!(state.phase(), Phase::GameOver);

        assert!(state.apply_action(GameAction::Activate).unwrap());
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().head(), Cell::new(5, 10));
    }

    #[test]
    fn actions_in_wrong_phase_are_ignored() {
        let grid = GameConfig::default().grid().unwrap();
        let mut state = GameState::new(grid, 1).unwrap();
        assert!(!state
            .apply_action(GameAction::Turn(Direction::Up))
            .unwrap());
        state.start();
        assert!(!state.apply_action(GameAction::Activate).unwrap());
    }

    #[test]
    fn length_delta_per_tick_is_bounded() {
        let mut state = playing_state(42);
        for _ in 0..200 {
            if state.phase() != Phase::Playing {
                break;
            }
            let before = state.snake().len() as i64;
            let outcome = state.tick().unwrap();
            let after = state.snake().len() as i64;
            let delta = after - before;
            assert!((-1..=1).contains(&delta));
            assert_eq!(delta == 1, outcome.ate);
        }
    }

    #[test]
    fn no_duplicate_cells_at_tick_boundaries() {
        let mut state = playing_state(7);
        for step in 0..300 {
            if state.phase() != Phase::Playing {
                break;
            }
            // Wander: turn every few ticks to exercise more states.
            if step % 3 == 0 {
                state.steer(Direction::Up);
            } else if step % 7 == 0 {
                state.steer(Direction::Right);
            }
            state.tick().unwrap();

            let cells: Vec<Cell> = state.snake().segments().iter().map(|s| s.cell).collect();
            let mut deduped = cells.clone();
            deduped.sort_by_key(|c| (c.x, c.y));
            deduped.dedup();
            assert_eq!(cells.len(), deduped.len());
        }
    }

    #[test]
    fn full_grid_food_placement_is_a_fault() {
        // 1x3 grid: the initial snake occupies every cell.
        let grid = Grid::from_dimensions(3, 1);
        let snake = Snake::from_cells(
            &[Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)],
            Direction::Right,
        );
        let mut rng = SimpleRng::new(1);
        assert_eq!(
            place_food(&grid, &snake, &mut rng),
            Err(EngineFault::GridFull { cols: 3, rows: 1 })
        );
    }

    #[test]
    fn food_sampling_is_uniform_over_free_cells() {
        let grid = Grid::from_dimensions(2, 2);
        let snake = Snake::from_cells(&[Cell::new(0, 0), Cell::new(1, 0)], Direction::Right);
        let mut rng = SimpleRng::new(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let food = place_food(&grid, &snake, &mut rng).unwrap();
            assert!(!snake.occupies(food));
            seen.insert((food.x, food.y));
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn eat_flash_decays_to_zero() {
        let mut state = playing_state(1);
        state.set_food(Cell::new(6, 10));
        state.tick().unwrap();
        assert!(state.eat_flash() > 0);

        state.set_food(Cell::new(25, 3));
        for _ in 0..EAT_FLASH_TICKS {
            if state.phase() != Phase::Playing {
                break;
            }
            state.tick().unwrap();
        }
        assert_eq!(state.eat_flash(), 0);
    }
}
