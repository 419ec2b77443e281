use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::state::Position;

/// Chooses where the next piece of food goes
pub trait FoodPlacer {
    /// Pick a cell inside a `grid_width` x `grid_height` grid
    fn place(&mut self, grid_width: i32, grid_height: i32) -> Position;
}

/// Uniformly random placement. Cells under the snake are not avoided.
pub struct RandomFood<R: Rng = StdRng> {
    rng: R,
}

impl RandomFood<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> FoodPlacer for RandomFood<R> {
    fn place(&mut self, grid_width: i32, grid_height: i32) -> Position {
        let x = self.rng.gen_range(0..grid_width);
        let y = self.rng.gen_range(0..grid_height);
        Position::new(x, y)
    }
}

impl<F: FoodPlacer + ?Sized> FoodPlacer for Box<F> {
    fn place(&mut self, grid_width: i32, grid_height: i32) -> Position {
        (**self).place(grid_width, grid_height)
    }
}
