use crate::grid::Grid;
use crate::point::Point;

// Four corners plus the midpoint they feed. Recomputed every stage, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub corners: [Point; 4],
    pub midpoint: Point,
}

// Side length of a tile at `depth`: 2^depth + 1
#[inline]
pub fn tile_side(depth: u32) -> i32 {
    (1i32 << depth) + 1
}

// Axis-aligned square whose top-left corner is `top_left`.
// Corner order: top-left, top-right, bottom-left, bottom-right.
pub fn square_tile(top_left: Point, depth: u32) -> Tile {
    let side = tile_side(depth);
    Tile {
        corners: [
            top_left,
            top_left.translate(side - 1, 0),
            top_left.translate(0, side - 1),
            top_left.translate(side - 1, side - 1),
        ],
        midpoint: top_left.translate(side / 2, side / 2),
    }
}

// Diamond of radius 2^(depth-1) around `center`.
// Corner order: north, east, south, west.
pub fn diamond_tile(center: Point, depth: u32) -> Tile {
    debug_assert!(depth >= 1, "diamond tiles need depth >= 1");
    let r = 1i32 << (depth - 1);
    Tile {
        corners: [
            center.translate(0, -r),
            center.translate(r, 0),
            center.translate(0, r),
            center.translate(-r, 0),
        ],
        midpoint: center,
    }
}

// Non-overlapping square tiles covering the grid at `depth`, row-major.
#[derive(Debug, Clone)]
pub struct Tiles {
    depth: u32,
    stride: usize,
    last: usize, // size - 2, last valid top-left coordinate
    x: usize,
    y: usize,
}

impl Iterator for Tiles {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.y > self.last {
            return None;
        }
        let tile = square_tile(Point::new(self.x as i32, self.y as i32), self.depth);
        self.x += self.stride;
        if self.x > self.last {
            self.x = 0;
            self.y += self.stride;
        }
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.y > self.last {
            return (0, Some(0));
        }
        let per_row = self.last / self.stride + 1;
        let rows_left = (self.last - self.y) / self.stride + 1;
        let n = rows_left * per_row - self.x / self.stride;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Tiles {}

// Yields k² tiles with k = (size - 1) / 2^depth. `depth` must not exceed the grid base.
pub fn enumerate_tiles(grid: &Grid, depth: u32) -> Tiles {
    debug_assert!(depth <= grid.base(), "tile depth exceeds grid base");
    let stride = 1usize << depth;
    // size >= 2 always, a base 0 grid is one 2x2 tile
    Tiles {
        depth,
        stride,
        last: grid.size() - 2,
        x: 0,
        y: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{Tile, diamond_tile, enumerate_tiles, square_tile};
    use crate::grid::Grid;
    use crate::point::Point;
    use std::collections::HashSet;

    #[test]
    fn square_tile_geometry() {
        let t = square_tile(Point::new(4, 8), 2);
        assert_eq!(
            t.corners,
            [
                Point::new(4, 8),
                Point::new(8, 8),
                Point::new(4, 12),
                Point::new(8, 12)
            ]
        );
        assert_eq!(t.midpoint, Point::new(6, 10));
    }

    #[test]
    fn smallest_square_tile() {
        let t = square_tile(Point::new(0, 0), 1);
        assert_eq!(t.corners[3], Point::new(2, 2));
        assert_eq!(t.midpoint, Point::new(1, 1));
    }

    #[test]
    fn diamond_tile_geometry() {
        let t = diamond_tile(Point::new(4, 4), 3);
        assert_eq!(
            t.corners,
            [
                Point::new(4, 0),
                Point::new(8, 4),
                Point::new(4, 8),
                Point::new(0, 4)
            ]
        );
        assert_eq!(t.midpoint, Point::new(4, 4));
    }

    #[test]
    fn enumerate_counts() {
        let g = Grid::new(5).unwrap();
        for depth in 1..=5 {
            let k = (g.size() - 1) >> depth;
            let tiles = enumerate_tiles(&g, depth);
            assert_eq!(tiles.len(), k * k);
            assert_eq!(tiles.count(), k * k);
        }
    }

    #[test]
    fn enumerate_is_row_major_and_restartable() {
        let g = Grid::new(2).unwrap();
        let tiles = enumerate_tiles(&g, 1);
        let tops: Vec<Point> = tiles.clone().map(|t| t.corners[0]).collect();
        assert_eq!(
            tops,
            vec![
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(0, 2),
                Point::new(2, 2)
            ]
        );
        let again: Vec<Tile> = tiles.collect();
        assert_eq!(again, enumerate_tiles(&g, 1).collect::<Vec<_>>());
    }

    #[test]
    fn tiles_cover_grid_without_overlap() {
        let g = Grid::new(4).unwrap();
        for depth in 1..=4 {
            let side = (1usize << depth) + 1;
            let mut interior = HashSet::new();
            let mut covered = HashSet::new();
            for t in enumerate_tiles(&g, depth) {
                let x0 = t.corners[0].x as usize;
                let y0 = t.corners[0].y as usize;
                for y in y0..y0 + side {
                    for x in x0..x0 + side {
                        covered.insert((x, y));
                        // cells strictly inside a tile belong to exactly one tile
                        if x > x0 && x < x0 + side - 1 && y > y0 && y < y0 + side - 1 {
                            assert!(interior.insert((x, y)), "overlap at {:?}", (x, y));
                        }
                    }
                }
            }
            assert_eq!(covered.len(), g.size() * g.size());
        }
    }

    #[test]
    fn base_zero_grid_is_one_tile() {
        let g = Grid::new(0).unwrap();
        assert_eq!(g.size(), 2);
        let tiles: Vec<Tile> = enumerate_tiles(&g, 0).collect();
        assert_eq!(tiles.len(), 1);
        assert_eq!(
            tiles[0].corners,
            [
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
    }
}
