//! Precomputes libsecp256k1's fixed-base comb table for the generator and
//! renders it as a source artifact.

#![allow(clippy::needless_range_loop)]

use std::path::{Path, PathBuf};

use log::info;

pub mod comb;
pub mod config;
pub mod curve;
pub mod error;
pub mod field;
pub mod serialize;

pub use comb::{CombLayout, CombTable, Precision};
pub use config::GeneratorConfig;
pub use curve::curve_types::{AffinePoint, ProjectivePoint};
pub use curve::secp256k1::Secp256k1;
pub use error::{Error, Result};
pub use field::secp256k1_base::Secp256k1Base;

/// Builds, verifies and writes the table described by `config` under `root`.
///
/// Nothing is written unless the whole table verifies. Returns the path of
/// the artifact.
pub fn generate(config: &GeneratorConfig, root: &Path) -> Result<PathBuf> {
    info!(
        "generating comb table: precision {}, format {:?} (window size {} not used)",
        config.precision,
        config.format,
        config.window_size.get()
    );

    let generator = Secp256k1::GENERATOR_AFFINE;
    let table = CombTable::for_precision(&generator, config.precision)?;
    table.verify(&generator)?;

    let renderer = config.format.renderer();
    serialize::write_artifact(&config.output_path(root), renderer.as_ref(), &table)
}
