use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tilestitch operations
#[derive(Error, Diagnostic, Debug)]
pub enum StitchError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tilestitch::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error in {path}: {message}")]
    #[diagnostic(code(tilestitch::parse))]
    Parse {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(tilestitch::image))]
    Image { path: PathBuf, message: String },

    #[error("Settings error: {message}")]
    #[diagnostic(code(tilestitch::settings))]
    Settings {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl StitchError {
    pub(crate) fn io(path: impl Into<PathBuf>, context: &str, err: std::io::Error) -> Self {
        StitchError::Io {
            path: path.into(),
            message: format!("{}: {}", context, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, StitchError>;
