use std::fmt;

use crate::error::GridError;
use crate::point::Point;

// One height sample. 8 bit gray is what ends up in the image.
pub type Height = u8;

// size = 2^MAX_BASE + 1 still fits i32 coordinates and a usize index on 32 bit targets
pub const MAX_BASE: u32 = 15;

// Square height field of side 2^base + 1, stored row-major.
// The grid owns the buffer; every write goes through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    base: u32,
    size: usize,
    samples: Vec<Height>,
}

impl Grid {
    // Allocate a zeroed grid of side 2^base + 1
    pub fn new(base: u32) -> Result<Self, GridError> {
        if base > MAX_BASE {
            return Err(GridError::BaseTooLarge {
                base,
                max: MAX_BASE,
            });
        }
        let size = (1usize << base) + 1;
        Ok(Self {
            base,
            size,
            samples: vec![0; size * size],
        })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    // Side length in cells
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size as u32
    }

    pub fn height(&self) -> u32 {
        self.size as u32
    }

    // Row-major view of the buffer, length size²
    pub fn samples(&self) -> &[Height] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Height> {
        self.samples
    }

    // index = size * y + x. Both coordinates are checked on their own so a
    // point just left of the grid does not alias the end of the previous row.
    pub fn to_index(&self, p: Point) -> Result<usize, GridError> {
        let size = self.size as i64;
        let (x, y) = (i64::from(p.x), i64::from(p.y));
        if x < 0 || y < 0 || x >= size || y >= size {
            return Err(GridError::OutOfRange {
                point: p,
                size: self.size,
            });
        }
        let index = (size * y + x) as usize;
        debug_assert!(index < self.samples.len());
        Ok(index)
    }

    // Inverse of to_index, for diagnostics
    pub fn from_index(&self, index: usize) -> Point {
        Point::new((index % self.size) as i32, (index / self.size) as i32)
    }

    pub fn get(&self, p: Point) -> Option<Height> {
        self.to_index(p).ok().map(|i| self.samples[i])
    }

    pub fn set(&mut self, p: Point, value: Height) -> Result<(), GridError> {
        let i = self.to_index(p)?;
        self.samples[i] = value;
        Ok(())
    }

    pub(crate) fn sample_at(&self, index: usize) -> Height {
        self.samples[index]
    }

    pub(crate) fn write(&mut self, index: usize, value: Height) {
        self.samples[index] = value;
    }
}

// Debug dump: one row per line, each sample right-aligned in 4 columns
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.samples.chunks(self.size) {
            for v in row {
                write!(f, "{:4} ", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
