use miette::Diagnostic;
use thiserror::Error;

/// Main error type for costume operations
#[derive(Error, Diagnostic, Debug)]
pub enum CostumeError {
    #[error("IO error: {0}")]
    #[diagnostic(code(costume::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(costume::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid colour token: {token:?}")]
    #[diagnostic(code(costume::colour))]
    InvalidColour {
        token: String,
        #[help]
        help: Option<String>,
    },

    #[error("{table}: colors has {colours} entries but replacements has {replacements}")]
    #[diagnostic(
        code(costume::table),
        help("The two lists are index-aligned and must be the same length")
    )]
    TableMismatch {
        table: String,
        colours: usize,
        replacements: usize,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(costume::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(costume::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, CostumeError>;
