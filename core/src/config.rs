// Generator settings. Readable from RON so a run can be reproduced from a file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::driver::Schedule;
use crate::error::GridError;
use crate::grid::MAX_BASE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    // Recursion depth; the grid side is 2^base + 1.
    #[serde(default = "default_base")]
    pub base: u32,
    // Jitter scale; stage `s` jitters by up to `amplitude * s`.
    #[serde(default = "default_amplitude")]
    pub amplitude: u32,
    // Fixed seed for reproducible output. None draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub schedule: Schedule,
}

fn default_base() -> u32 {
    9 // 513×513
}
fn default_amplitude() -> u32 {
    4
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            amplitude: default_amplitude(),
            seed: None,
            schedule: Schedule::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.base > MAX_BASE {
            return Err(GridError::BaseTooLarge {
                base: self.base,
                max: MAX_BASE,
            });
        }
        // the largest stage amplitude has to fit the i32 jitter range
        if i32::try_from(u64::from(self.amplitude) * u64::from(self.base.max(1))).is_err() {
            return Err(GridError::Config(format!(
                "amplitude {} overflows at base {}",
                self.amplitude, self.base
            )));
        }
        Ok(())
    }

    pub fn from_ron_str(text: &str) -> Result<Self, GridError> {
        let config: Self = ron::from_str(text).map_err(|e| GridError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GridError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_ron_str(&text)?;
        log::debug!("loaded {:?} from {:?}", config, path);
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, GridError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| GridError::Config(e.to_string()))
    }
}
