use thiserror::Error;

use crate::point::Point;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    // size = 2^base + 1 has to stay addressable with i32 coordinates
    #[error("base {base} is too large (maximum is {max})")]
    BaseTooLarge { base: u32, max: u32 },

    #[error("point {point} is outside a {size}x{size} grid")]
    OutOfRange { point: Point, size: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}
