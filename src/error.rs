use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::types::FilterMode;

/// Main error type for strata operations
#[derive(Error, Diagnostic, Debug)]
pub enum StrataError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(strata::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(strata::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Region error: {message}")]
    #[diagnostic(code(strata::region))]
    Region {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot decode {path}: {message}")]
    #[diagnostic(
        code(strata::decode),
        help("The source must be a raster image the codec understands (PNG, JPEG, ...)")
    )]
    Decode { path: PathBuf, message: String },

    #[error("{mode} layer job failed for {path}: {message}")]
    #[diagnostic(code(strata::job))]
    Job {
        mode: FilterMode,
        path: PathBuf,
        message: String,
    },

    #[error("Composite error: {message}")]
    #[diagnostic(code(strata::composite))]
    Composite {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(strata::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, StrataError>;
