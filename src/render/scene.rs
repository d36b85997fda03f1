//! Snapshot of what the board looks like, independent of any drawing surface.

use std::time::Instant;

use super::flash::Flash;
use crate::game::{CollisionType, Direction, GameState, Phase, Position};

/// What occupies a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCell {
    Empty,
    Food,
    Head {
        facing: Direction,
        /// Food sits right in front of the head
        mouth_open: bool,
    },
    /// `even` follows the segment index, for alternating shades
    Body { even: bool },
    /// `toward` points from the previous segment to the tail tip
    Tail { toward: Direction, even: bool },
}

/// Text drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    GameOver { score: u32, cause: CollisionType },
    Won { score: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub grid_size: usize,
    pub score: u32,
    pub overlay: Option<Overlay>,
    pub flash: Option<String>,
    /// Background hue in degrees; turns 2° per step and restarts at 0
    pub bg_hue: u16,
    /// Score was just bumped by a meal
    pub score_pop: bool,
    cells: Vec<SceneCell>,
}

impl Scene {
    /// Capture `state` as a scene; the state is only read
    pub fn capture(state: &GameState, flash: Option<&Flash>, now: Instant) -> Self {
        let size = state.grid_size;
        let mut cells = vec![SceneCell::Empty; size * size];
        let index = |pos: Position| pos.y as usize * size + pos.x as usize;

        if let Some(food) = state.food {
            cells[index(food)] = SceneCell::Food;
        }

        let segments = state.snake.cells();
        let head = state.snake.head();
        for (i, &seg) in segments.iter().enumerate() {
            let even = i % 2 == 0;
            let cell = if i == 0 {
                SceneCell::Head {
                    facing: state.direction,
                    mouth_open: state.food == Some(head.moved_in_direction(state.direction)),
                }
            } else if i == segments.len() - 1 {
                let prev = segments[i - 1];
                match Direction::from_delta(seg.x - prev.x, seg.y - prev.y) {
                    Some(toward) => SceneCell::Tail { toward, even },
                    None => SceneCell::Body { even },
                }
            } else {
                SceneCell::Body { even }
            };
            cells[index(seg)] = cell;
        }

        let overlay = match state.phase {
            Phase::Running => None,
            Phase::Paused => Some(Overlay::Paused),
            Phase::Dead(cause) => Some(Overlay::GameOver {
                score: state.score,
                cause,
            }),
            Phase::Won => Some(Overlay::Won { score: state.score }),
        };

        Self {
            grid_size: size,
            score: state.score,
            overlay,
            flash: flash
                .filter(|f| f.is_active(now))
                .map(|f| f.text.clone()),
            bg_hue: background_hue(state.steps),
            score_pop: false,
            cells,
        }
    }

    /// Mark the score as freshly increased
    pub fn with_score_pop(mut self, active: bool) -> Self {
        self.score_pop = active;
        self
    }

    pub fn cell(&self, x: usize, y: usize) -> SceneCell {
        self.cells[y * self.grid_size + x]
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[SceneCell]> {
        self.cells.chunks(self.grid_size)
    }
}

fn background_hue(steps: u32) -> u16 {
    ((u64::from(steps) * 2) % 360) as u16
}
