use super::state::{Position, Snake};
use rand::Rng;

/// Pick a uniformly random cell the snake does not occupy.
///
/// Rejection sampling over the whole grid; returns `None` without sampling
/// when the snake already covers every cell.
pub fn spawn_food<R: Rng>(rng: &mut R, grid_size: usize, snake: &Snake) -> Option<Position> {
    if snake.len() >= grid_size * grid_size {
        return None;
    }

    loop {
        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
}
