// Stage driver: seeds the root corners, then walks the stages from `base` down to 1.
// Each stage is a square step followed by a diamond step; every half step reads
// the grid immutably, collects its results and only then writes them back, so the
// square midpoints of a stage are complete before any diamond reads them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::grid::{Grid, Height};
use crate::point::Point;
use crate::sampler::{amplitude, sample};
use crate::tile::{Tile, diamond_tile, enumerate_tiles, square_tile};

// How the per-tile work inside one half step is executed.
// Both produce the same buffer for the same random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Schedule {
    #[default]
    Sequential,
    Parallel,
}

// Draw the four outermost corners. Returns them as top-left, top-right,
// bottom-left, bottom-right.
pub fn seed_roots<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> [Height; 4] {
    let root = square_tile(Point::new(0, 0), grid.base());
    let mut values = [0; 4];
    for (value, &corner) in values.iter_mut().zip(root.corners.iter()) {
        *value = rng.gen_range(Height::MIN..=Height::MAX);
        if let Err(e) = grid.set(corner, *value) {
            panic!("root corner outside the grid: {e}");
        }
    }
    values
}

// Tiles whose midpoints the square step of `stage` fills
pub fn square_step_tiles(grid: &Grid, stage: u32) -> Vec<Tile> {
    enumerate_tiles(grid, stage).collect()
}

// Diamonds whose centers the diamond step of `stage` fills.
// A diamond center on the edge between two squares is shared, so each square
// keeps its north and west ones, and the east/south ones only on the grid border.
pub fn diamond_step_tiles(grid: &Grid, stage: u32) -> Vec<Tile> {
    let border = grid.size() as i32 - 1;
    let mut diamonds = Vec::new();
    for square in enumerate_tiles(grid, stage) {
        let [_, top_right, bottom_left, _] = square.corners;
        let [north, east, south, west] = diamond_tile(square.midpoint, stage).corners;
        diamonds.push(diamond_tile(north, stage));
        diamonds.push(diamond_tile(west, stage));
        if top_right.x == border {
            diamonds.push(diamond_tile(east, stage));
        }
        if bottom_left.y == border {
            diamonds.push(diamond_tile(south, stage));
        }
    }
    diamonds
}

// Independent jitter stream per tile, keyed by the half step and the tile position
// in the enumeration. Makes the result independent of how tiles are scheduled.
fn tile_rng(key: u64, tile: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(key);
    rng.set_stream(tile as u64);
    rng
}

fn evaluate(grid: &Grid, key: u64, epsilon: i32, index: usize, tile: &Tile) -> (usize, Height) {
    let target = match grid.to_index(tile.midpoint) {
        Ok(i) => i,
        Err(e) => panic!("tile midpoint outside the grid: {e}"),
    };
    let mut rng = tile_rng(key, index);
    (target, sample(grid, &tile.corners, epsilon, &mut rng))
}

// One half step. All samples are computed before the first write.
fn half_step(grid: &mut Grid, tiles: &[Tile], epsilon: i32, key: u64, schedule: Schedule) {
    let results: Vec<(usize, Height)> = {
        let view: &Grid = grid;
        match schedule {
            Schedule::Sequential => tiles
                .iter()
                .enumerate()
                .map(|(i, t)| evaluate(view, key, epsilon, i, t))
                .collect(),
            Schedule::Parallel => tiles
                .par_iter()
                .enumerate()
                .map(|(i, t)| evaluate(view, key, epsilon, i, t))
                .collect(),
        }
    };
    for (index, value) in results {
        grid.write(index, value);
    }
}

// Fill every non-root cell, stage by stage. The root corners must already be set.
pub fn run_stages<R: Rng + ?Sized>(
    grid: &mut Grid,
    amplitude_scale: u32,
    schedule: Schedule,
    rng: &mut R,
) {
    for stage in (1..=grid.base()).rev() {
        let epsilon = amplitude(amplitude_scale, stage);

        let squares = square_step_tiles(grid, stage);
        log::debug!(
            "stage {}: {} squares, amplitude {}",
            stage,
            squares.len(),
            epsilon
        );
        let key = rng.next_u64();
        half_step(grid, &squares, epsilon, key, schedule);

        let diamonds = diamond_step_tiles(grid, stage);
        log::trace!("stage {}: {} diamonds", stage, diamonds.len());
        let key = rng.next_u64();
        half_step(grid, &diamonds, epsilon, key, schedule);
    }
}

impl Grid {
    // Seed the roots and run every stage sequentially.
    // Returns the root corner values.
    pub fn run<R: Rng + ?Sized>(&mut self, amplitude_scale: u32, rng: &mut R) -> [Height; 4] {
        self.run_with(amplitude_scale, Schedule::Sequential, rng)
    }

    pub fn run_with<R: Rng + ?Sized>(
        &mut self,
        amplitude_scale: u32,
        schedule: Schedule,
        rng: &mut R,
    ) -> [Height; 4] {
        let roots = seed_roots(self, rng);
        log::debug!("seeded roots {:?} on a {}x{} grid", roots, self.size(), self.size());
        run_stages(self, amplitude_scale, schedule, rng);
        roots
    }
}

// Create a grid of side 2^base + 1 and fill it
pub fn run<R: Rng + ?Sized>(
    base: u32,
    amplitude_scale: u32,
    rng: &mut R,
) -> Result<Grid, GridError> {
    let mut grid = Grid::new(base)?;
    grid.run(amplitude_scale, rng);
    Ok(grid)
}
