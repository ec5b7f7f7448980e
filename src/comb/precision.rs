use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::comb::layout::CombLayout;
use crate::error::{Error, Result};

/// Bits of the scalar consumed per comb block.
///
/// Higher precision means fewer, larger blocks: fewer additions for the
/// consumer at the cost of a bigger table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Precision {
    Two,
    #[default]
    Four,
    Eight,
}

impl Precision {
    pub const ALL: [Precision; 3] = [Precision::Two, Precision::Four, Precision::Eight];

    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Precision::Two => 2,
            Precision::Four => 4,
            Precision::Eight => 8,
        }
    }

    #[inline]
    pub fn layout(self) -> CombLayout {
        CombLayout::from(self)
    }
}

impl TryFrom<u32> for Precision {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            2 => Ok(Precision::Two),
            4 => Ok(Precision::Four),
            8 => Ok(Precision::Eight),
            other => Err(Error::InvalidPrecision(other)),
        }
    }
}

impl From<Precision> for u32 {
    fn from(precision: Precision) -> Self {
        precision.bits()
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bits: u32 = s.trim().parse().map_err(|_| Error::MalformedEnv {
            name: crate::config::PRECISION_VAR,
            value: s.to_owned(),
        })?;
        Precision::try_from(bits)
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.bits(), f)
    }
}
