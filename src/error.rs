use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid precision {0}: expected one of 2, 4 or 8")]
    InvalidPrecision(u32),

    #[error("invalid comb block width {0}: expected 1..=16 bits")]
    InvalidBlockWidth(u32),

    #[error("invalid window size {0}: expected 2..=15")]
    InvalidWindowSize(u32),

    #[error("invalid output format {0:?}: expected \"c\" or \"rust\"")]
    InvalidFormat(String),

    #[error("environment variable {name} has malformed value {value:?}")]
    MalformedEnv { name: &'static str, value: String },

    #[error("attempted to invert zero")]
    InverseOfZero,

    #[error("coordinate is not a canonical field element")]
    NonCanonicalCoordinate,

    #[error("point does not satisfy y^2 = x^3 + 7")]
    NotOnCurve,

    #[error("comb table entry ({block}, {value}) failed verification")]
    TableVerification { block: usize, value: usize },

    #[error("table with a partial final block cannot be rendered as a rectangular array")]
    RaggedTable,

    #[error("malformed artifact: {0}")]
    MalformedArtifact(String),

    #[error("i/o error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
