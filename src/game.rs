use log::{debug, info, trace, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::agent::Agent;
use crate::border::Border;
use crate::config::{GameConfig, check_size};
use crate::error::Result;
use crate::food::Food;
use crate::grid::{GridPainter, Observation, StateGrid};
use crate::render::Renderer;
use crate::snake::{ACTION_COUNT, Direction, Snake};
use crate::utils::Cell;

pub const FOOD_REWARD: f32 = 10.0;
pub const DEATH_REWARD: f32 = -10.0;
pub const ALIVE_REWARD: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Running,
    Terminated,
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    Wall,
    SelfCollision,
    /// Every playable cell is snake; nowhere to put food.
    BoardFull,
}

/// What one tick hands back to the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    pub terminal: bool,
    pub info: String,
    pub termination: Option<Termination>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub seed: Option<u64>,
    pub score: u32,
    pub steps: usize,
    pub total_reward: f32,
    /// `None` when the step cap ran out first.
    pub termination: Option<Termination>,
}

/// One episode's worth of snake, food and board. Owns the tick rules.
pub struct Game<R: Rng = ChaCha8Rng> {
    border: Border,
    painter: GridPainter,
    snake: Snake,
    food: Food,
    score: u32,
    steps: u64,
    status: Status,
    termination: Option<Termination>,
    rng: R,
    seed: Option<u64>,
    renderer: Option<Box<dyn Renderer>>,
}

impl Game<ChaCha8Rng> {
    /// Board of playable size `size`, food RNG seeded from entropy.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_rng(size, ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(size: usize, seed: u64) -> Result<Self> {
        let mut game = Self::with_rng(size, ChaCha8Rng::seed_from_u64(seed))?;
        game.seed = Some(seed);
        Ok(game)
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        match config.seed {
            Some(seed) => Self::with_seed(config.size, seed),
            None => Self::new(config.size),
        }
    }
}

impl<R: Rng> Game<R> {
    /// Builds a running game drawing food positions from `rng`.
    ///
    /// Fails only for boards too small to hold the starting snake.
    pub fn with_rng(size: usize, rng: R) -> Result<Self> {
        check_size(size)?;
        let border = Border::new(size);
        let mut game = Game {
            border,
            painter: GridPainter::new(border),
            snake: Snake::new(),
            food: Food::new(Cell::new(0, 0)),
            score: 0,
            steps: 0,
            status: Status::Running,
            termination: None,
            rng,
            seed: None,
            renderer: None,
        };
        game.reset();
        Ok(game)
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    /// Detaches the renderer, if any.
    pub fn close(&mut self) {
        self.renderer = None;
    }

    /// Starts a fresh episode and returns its first observation.
    pub fn reset(&mut self) -> Observation {
        self.snake.reset();
        self.score = 0;
        self.steps = 0;
        self.status = Status::Running;
        self.termination = None;
        let allowed = self.allowed_cells();
        if let Err(err) = self.food.replenish(&allowed, &mut self.rng) {
            // unreachable for valid sizes, the start snake leaves cells free
            warn!("reset could not place food: {err}");
            self.terminate(Termination::BoardFull);
        }
        debug!(
            "reset: size {} food at {}",
            self.border.size, self.food.position
        );
        self.observation()
    }

    /// One tick: turn, move, collision check, then eat and replenish.
    ///
    /// Stepping a terminated game changes nothing and returns reward 0.
    pub fn step(&mut self, action: Option<usize>) -> StepResult {
        if self.status == Status::Terminated {
            return self.result(ALIVE_REWARD);
        }

        self.snake.turn(action);
        self.snake.move_forward();
        self.steps += 1;

        let collision = self.collision();
        // decided once per tick; growth, score and reward all read it
        let ate = collision.is_none() && self.snake.eat(self.food.position);

        if let Some(kind) = collision {
            debug!("tick {}: {:?} at {}", self.steps, kind, self.snake.head());
            self.terminate(kind);
        }

        if ate {
            self.score += 1;
            let allowed = self.allowed_cells();
            if self.food.replenish(&allowed, &mut self.rng).is_err() {
                info!("board full with score {}", self.score);
                self.terminate(Termination::BoardFull);
            }
        }

        let reward = if ate {
            FOOD_REWARD
        } else if collision.is_some() {
            DEATH_REWARD
        } else {
            ALIVE_REWARD
        };
        trace!("tick {}: action {:?} reward {}", self.steps, action, reward);
        self.result(reward)
    }

    /// Runs ticks until the episode ends or `max_steps` ticks pass.
    /// Without an agent the snake keeps its heading.
    pub fn play(&mut self, mut agent: Option<&mut dyn Agent>, max_steps: usize) -> EpisodeSummary {
        self.render();
        let mut observation = self.observation();
        let mut total_reward = 0.0;
        let mut steps = 0;

        while steps < max_steps {
            let action = agent
                .as_deref_mut()
                .and_then(|a| a.select_action(&observation));
            let result = self.step(action);
            steps += 1;
            total_reward += result.reward;
            debug!("{}", result.info);
            self.render();
            observation = result.observation;
            if result.terminal {
                break;
            }
        }

        let summary = EpisodeSummary {
            seed: self.seed,
            score: self.score,
            steps,
            total_reward,
            termination: self.termination,
        };
        info!(
            "episode over: score {} after {} steps ({:?})",
            summary.score, summary.steps, summary.termination
        );
        summary
    }

    /// Forwards the current grid to the renderer; no-op without one.
    pub fn render(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw(&self.painter.paint(&self.snake, &self.food));
        }
    }

    /// Playable cells not covered by the snake, row-major.
    pub fn allowed_cells(&self) -> Vec<Cell> {
        self.border
            .playable_cells()
            .filter(|cell| !self.snake.contains(*cell))
            .collect()
    }

    pub fn state(&self) -> StateGrid {
        self.painter.paint(&self.snake, &self.food)
    }

    /// Height x width x 1 snapshot; owned, so mutating it leaves the game alone.
    pub fn observation(&self) -> Observation {
        self.state().into_observation()
    }

    /// (board side including walls, number of actions)
    pub fn size(&self) -> (usize, usize) {
        (self.border.full_size(), ACTION_COUNT)
    }

    /// Advisory legal actions: everything except reversing into the neck.
    pub fn actions(&self) -> Vec<usize> {
        self.snake.available_directions()
    }

    pub fn info(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// true if the head is outside the playable region or on another segment
    pub fn is_dead(&self) -> bool {
        self.collision().is_some()
    }

    /// Moves the food to `cell` for scripted scenarios.
    /// Refuses cells outside the playable region or under the snake.
    pub fn place_food(&mut self, cell: Cell) -> bool {
        if !self.border.is_inside(cell) || self.snake.contains(cell) {
            return false;
        }
        self.food.position = cell;
        true
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food.position
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn border(&self) -> Border {
        self.border
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn collision(&self) -> Option<Termination> {
        if !self.border.is_inside(self.snake.head()) {
            Some(Termination::Wall)
        } else if self.snake.head_hits_body() {
            Some(Termination::SelfCollision)
        } else {
            None
        }
    }

    fn terminate(&mut self, kind: Termination) {
        self.status = Status::Terminated;
        self.termination = Some(kind);
    }

    fn result(&self, reward: f32) -> StepResult {
        StepResult {
            observation: self.observation(),
            reward,
            terminal: self.status == Status::Terminated,
            info: self.info(),
            termination: self.termination,
        }
    }
}
