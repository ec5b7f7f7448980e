//! Rendering of a [`CombTable`] into a source artifact and writing it to disk.

pub mod c_header;
pub mod encoding;
pub mod rust_module;

use core::str::FromStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::comb::table::CombTable;
use crate::error::{Error, Result};

pub use c_header::{parse_c_header, CHeaderRenderer};
pub use encoding::{decode_point, encode_point, EncodedPoint};
pub use rust_module::RustModuleRenderer;

/// Turns a table into the full text of one artifact.
///
/// Output must depend only on the table: identical tables render to
/// identical bytes.
pub trait TableRenderer {
    /// File name inside the output directory.
    fn file_name(&self) -> &'static str;

    fn render(&self, table: &CombTable) -> Result<String>;
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "c")]
    CHeader,
    #[serde(rename = "rust")]
    RustModule,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn TableRenderer> {
        match self {
            OutputFormat::CHeader => Box::new(CHeaderRenderer),
            OutputFormat::RustModule => Box::new(RustModuleRenderer),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(OutputFormat::CHeader),
            "rust" => Ok(OutputFormat::RustModule),
            _ => Err(Error::InvalidFormat(s.to_owned())),
        }
    }
}

/// Renders `table` and writes it to `dir/<file name>`, replacing any existing
/// file. The content goes to a temporary file first and is renamed into
/// place, so a failure never leaves a truncated artifact behind.
pub fn write_artifact(
    dir: &Path,
    renderer: &dyn TableRenderer,
    table: &CombTable,
) -> Result<PathBuf> {
    let contents = renderer.render(table)?;

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| Error::Io { path, source }
    };

    fs::create_dir_all(dir).map_err(io_err(dir))?;
    let path = dir.join(renderer.file_name());

    let mut staged = tempfile::Builder::new()
        .prefix(".gen_context")
        .tempfile_in(dir)
        .map_err(io_err(dir))?;
    staged
        .write_all(contents.as_bytes())
        .map_err(io_err(staged.path()))?;
    staged.as_file().sync_all().map_err(io_err(staged.path()))?;
    staged.persist(&path).map_err(|err| Error::Io {
        path: path.clone(),
        source: err.error,
    })?;

    info!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(path)
}
