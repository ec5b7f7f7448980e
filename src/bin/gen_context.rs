//! Writes `src/ecmult_static_context.h` (or the Rust equivalent) into the
//! current directory.
//!
//! Usage: gen_context
//!
//! Settings come from `SECP256K1_ECMULT_GEN_PRECISION` (2, 4 or 8),
//! `SECP256K1_GEN_CONTEXT_FORMAT` (`c` or `rust`) and, for the build glue
//! only, `SECP256K1_ECMULT_WINDOW_SIZE`.

use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use secp256k1_gen_context::{generate, GeneratorConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GeneratorConfig::from_env().context("invalid generator configuration")?;
    let root = std::env::current_dir().context("failed to resolve the working directory")?;

    let start = Instant::now();
    let path = generate(&config, &root).context("failed to generate the static context")?;

    info!(
        "generated {} in {:.2}s",
        path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
