//! Generation settings, read from the environment the build glue sets up.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::comb::precision::Precision;
use crate::error::{Error, Result};
use crate::serialize::OutputFormat;

pub const PRECISION_VAR: &str = "SECP256K1_ECMULT_GEN_PRECISION";
pub const WINDOW_SIZE_VAR: &str = "SECP256K1_ECMULT_WINDOW_SIZE";
pub const FORMAT_VAR: &str = "SECP256K1_GEN_CONTEXT_FORMAT";

/// Artifacts land here, relative to the invocation's working directory.
pub const OUTPUT_DIR: &str = "src";

/// Window width of the consuming library's variable-base table.
///
/// Carried for the build glue's benefit only; table generation ignores it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WindowSize(u32);

impl WindowSize {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = 15;

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u32> for WindowSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidWindowSize(value))
        }
    }
}

impl From<WindowSize> for u32 {
    fn from(value: WindowSize) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub precision: Precision,
    pub window_size: WindowSize,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            window_size: WindowSize::default(),
            format: OutputFormat::default(),
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from `lookup`, which maps a variable name to its value.
    ///
    /// An unusable window size is only warned about, since nothing here
    /// consumes it. Precision and format errors are fatal.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(PRECISION_VAR) {
            config.precision = value.parse()?;
        }
        if let Some(value) = lookup(FORMAT_VAR) {
            config.format = value.parse()?;
        }
        if let Some(value) = lookup(WINDOW_SIZE_VAR) {
            match parse_window_size(&value) {
                Ok(window_size) => config.window_size = window_size,
                Err(err) => warn!("ignoring {WINDOW_SIZE_VAR}: {err}"),
            }
        }
        Ok(config)
    }

    /// Directory the artifact is written to, under `root`.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

fn parse_window_size(value: &str) -> Result<WindowSize> {
    let raw: u32 = value.trim().parse().map_err(|_| Error::MalformedEnv {
        name: WINDOW_SIZE_VAR,
        value: value.to_owned(),
    })?;
    WindowSize::try_from(raw)
}
