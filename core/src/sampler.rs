use rand::Rng;

use crate::grid::{Grid, Height};
use crate::point::Point;

// Jitter amplitude at a stage, shrinking linearly toward the finest stage
#[inline]
pub fn amplitude(scale: u32, stage: u32) -> i32 {
    let scale = i32::try_from(scale).unwrap_or(i32::MAX);
    let stage = i32::try_from(stage).unwrap_or(i32::MAX);
    scale.saturating_mul(stage)
}

// Uniform signed jitter in [-epsilon, epsilon). No draw happens for epsilon == 0.
pub fn jitter<R: Rng + ?Sized>(epsilon: i32, rng: &mut R) -> i32 {
    if epsilon <= 0 {
        return 0;
    }
    rng.gen_range(-epsilon..epsilon)
}

// Mean of the corners that exist on the grid.
// Off-grid corners are skipped; having none left means the tile geometry is broken.
pub fn corner_mean(grid: &Grid, corners: &[Point; 4]) -> i32 {
    let (sum, count) = corners
        .iter()
        .filter_map(|&p| grid.to_index(p).ok())
        .fold((0i32, 0i32), |(sum, count), i| {
            (sum + i32::from(grid.sample_at(i)), count + 1)
        });
    assert!(
        count > 0,
        "no corner of {:?} lies inside the {}x{} grid",
        corners,
        grid.size(),
        grid.size()
    );
    sum / count
}

// Averaged value plus jitter, saturated to the height range
pub fn sample<R: Rng + ?Sized>(
    grid: &Grid,
    corners: &[Point; 4],
    epsilon: i32,
    rng: &mut R,
) -> Height {
    let value = corner_mean(grid, corners).saturating_add(jitter(epsilon, rng));
    saturate(value)
}

#[inline]
pub fn saturate(value: i32) -> Height {
    value.clamp(i32::from(Height::MIN), i32::from(Height::MAX)) as Height
}

#[cfg(test)]
mod tests {
    use super::{amplitude, corner_mean, jitter, sample, saturate};
    use crate::grid::Grid;
    use crate::point::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn corners_grid() -> Grid {
        let mut g = Grid::new(1).unwrap();
        g.set(Point::new(0, 0), 10).unwrap();
        g.set(Point::new(2, 0), 20).unwrap();
        g.set(Point::new(0, 2), 30).unwrap();
        g.set(Point::new(2, 2), 40).unwrap();
        g
    }

    #[test]
    fn amplitude_is_linear_in_stage() {
        assert_eq!(amplitude(3, 4), 12);
        assert_eq!(amplitude(3, 0), 0);
        assert_eq!(amplitude(u32::MAX, 2), i32::MAX);
    }

    #[test]
    fn mean_of_all_corners() {
        let g = corners_grid();
        let c = [
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(2, 2),
        ];
        assert_eq!(corner_mean(&g, &c), 25);
    }

    #[test]
    fn off_grid_corners_are_excluded() {
        let g = corners_grid();
        let c = [
            Point::new(0, -2),
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(-2, 0),
        ];
        // only 20 and 30 count
        assert_eq!(corner_mean(&g, &c), 25);
        let c = [
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(5, 5),
            Point::new(-1, 0),
        ];
        assert_eq!(corner_mean(&g, &c), 15);
    }

    #[test]
    fn mean_truncates() {
        let mut g = Grid::new(1).unwrap();
        g.set(Point::new(0, 0), 1).unwrap();
        g.set(Point::new(2, 0), 2).unwrap();
        let c = [
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(9, 9),
            Point::new(9, 9),
        ];
        assert_eq!(corner_mean(&g, &c), 1);
    }

    #[test]
    #[should_panic(expected = "no corner")]
    fn no_valid_corner_panics() {
        let g = Grid::new(1).unwrap();
        let c = [Point::new(-1, -1); 4];
        corner_mean(&g, &c);
    }

    #[test]
    fn jitter_stays_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let eps = 6;
        let mut seen_low = false;
        for _ in 0..10_000 {
            let j = jitter(eps, &mut rng);
            assert!((-eps..eps).contains(&j), "jitter {} out of range", j);
            seen_low |= j == -eps;
        }
        assert!(seen_low);
    }

    #[test]
    fn zero_amplitude_means_no_jitter() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(jitter(0, &mut rng), 0);
        let g = corners_grid();
        let c = [
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(2, 2),
        ];
        assert_eq!(sample(&g, &c, 0, &mut rng), 25);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        assert_eq!(saturate(250 + 20), 255);
        assert_eq!(saturate(3 - 20), 0);
        assert_eq!(saturate(128), 128);

        let mut g = Grid::new(1).unwrap();
        for p in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            g.set(p.into(), 255).unwrap();
        }
        let c = [
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(2, 2),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        // positive jitter on a full-scale mean must pin at 255, never wrap to a low value
        let pinned = (0..200)
            .map(|_| sample(&g, &c, 1000, &mut rng))
            .filter(|&v| v == 255)
            .count();
        assert!(pinned > 50);
        assert_eq!(saturate(i32::MAX), 255);
    }
}
