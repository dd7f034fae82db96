use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GeneratorConfig;
use crate::error::GridError;
use crate::grid::Grid;

// Diamond–square heightfield generator driven by a GeneratorConfig
#[derive(Debug, Clone)]
pub struct DiamondSquare {
    config: GeneratorConfig,
}

impl DiamondSquare {
    pub fn new(config: GeneratorConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // Side length of the grid generate() returns
    pub fn size(&self) -> usize {
        (1usize << self.config.base) + 1
    }

    // Uses the configured seed, or OS entropy when there is none
    pub fn generate(&self) -> Result<Grid, GridError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid, GridError> {
        let mut grid = Grid::new(self.config.base)?;
        grid.run_with(self.config.amplitude, self.config.schedule, rng);
        log::debug!(
            "generated {}x{} heightfield ({:?})",
            grid.size(),
            grid.size(),
            self.config.schedule
        );
        Ok(grid)
    }
}
