pub mod source;
pub mod parse;
pub mod normalize;
pub mod chapter;
pub mod aggregate;
pub mod emit;
pub mod runner;

pub use source::*;
pub use parse::*;
pub use normalize::*;
pub use chapter::*;
pub use aggregate::*;
pub use emit::*;
pub use runner::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required source not found: {0}")]
    MissingRequiredSource(PathBuf),

    #[error("Could not read source {path}: {reason}")]
    UnreadableSource { path: PathBuf, reason: String },

    #[error("Source {path} is not valid {encoding}")]
    Decode { path: PathBuf, encoding: String },

    #[error("Unknown source encoding: {0}")]
    UnknownEncoding(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed table module: {0}")]
    MalformedTable(String),
}
