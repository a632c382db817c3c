//! Domain-specific error types for the setup engine.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`DisplayError`]) while the command orchestration at the CLI boundary
//! converts them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SetupError
//! ├── Config(ConfigError)   — config file reading and parsing
//! ├── Display(DisplayError) — display-server session failures
//! └── Prompt(PromptError)   — menu-selector process failures
//! ```
//!
//! Value-grammar failures ([`ValueError`]) never cross a module boundary:
//! a key whose value fails its expected grammar degrades to the field
//! default with a warning (see `config::layouts`).

use thiserror::Error;

/// Top-level error type for the setup engine.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration file error (reading, parsing).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Display-server session error.
    #[error("display error: {0}")]
    Display(#[from] DisplayError),

    /// Menu-selector process error.
    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),
}

/// Errors that arise while reading and parsing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A line is neither a `[[section]]` header, a comment, nor a `key=value`
    /// pair. Aborts the parse; the caller falls back to the auto layout.
    #[error("malformed line {line}: {text:?}")]
    MalformedLine {
        /// 1-based line number in the config file.
        line: usize,
        /// The offending line, whole-line trimmed.
        text: String,
    },

    /// A line exceeds the maximum supported length.
    #[error("line {line} exceeds {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    /// The configuration directory cannot be determined (no `$HOME`).
    #[error("cannot determine config path: {0}")]
    NoPath(String),

    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors from typed-value extraction.
///
/// Each variant corresponds to one of the strict value grammars; the
/// offending raw text is carried for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Not one of `true`, `True`, `false`, `False`.
    #[error("not a boolean: {0:?}")]
    Bool(String),

    /// Not a non-empty run of ASCII digits.
    #[error("not an unsigned integer: {0:?}")]
    Uint(String),

    /// A digit run that does not fit in 32 bits.
    #[error("unsigned integer out of range: {0:?}")]
    UintRange(String),

    /// Not a strict decimal number (optional leading `-`, at most one
    /// digit-surrounded `.`).
    #[error("not a decimal number: {0:?}")]
    Double(String),

    /// Not a double-quoted string of length two or more.
    #[error("not a quoted string: {0:?}")]
    Str(String),
}

/// Errors from the display-server session.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// The display server (or the `xrandr` binary) is unavailable.
    #[error("display server unavailable: {0}")]
    Unavailable(String),

    /// A display-server command failed.
    #[error("{command} failed: {message}")]
    Command {
        /// The command that was run.
        command: String,
        /// Failure detail from the underlying execution.
        message: String,
    },

    /// The display-server query output could not be parsed.
    #[error("could not parse display query output: {0}")]
    Parse(String),

    /// A monitor was applied without a resolved mode.
    #[error("no resolved mode for output {0:?}")]
    UnresolvedMode(String),
}

/// Errors from the menu-selector process.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The selector binary could not be located on `PATH`.
    #[error("menu selector {program:?} not found: {source}")]
    NotFound {
        /// Name of the selector binary.
        program: String,
        /// Underlying lookup error.
        source: which::Error,
    },

    /// The selector process could not be spawned or piped to.
    #[error("failed to run menu selector {program:?}: {source}")]
    Process {
        /// Name of the selector binary.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
