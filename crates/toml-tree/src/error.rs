use std::fmt;
use std::io;

use thiserror::Error;

/// Category of a failure, independent of where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    MalformedKey,
    MalformedNumber,
    MalformedDate,
    InvalidValue,
    InvalidBoolean,
    HeterogeneousArray,
    UnterminatedConstruct,
    TableRedefinition,
    DuplicateKey,
    TrailingCharacters,
    UnexpectedCharacter,
    KeyNotFound,
    Deserialize,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Io => "I/O error",
            ErrorKind::MalformedKey => "malformed key",
            ErrorKind::MalformedNumber => "malformed number",
            ErrorKind::MalformedDate => "malformed date",
            ErrorKind::InvalidValue => "invalid value",
            ErrorKind::InvalidBoolean => "invalid boolean",
            ErrorKind::HeterogeneousArray => "heterogeneous array",
            ErrorKind::UnterminatedConstruct => "unterminated construct",
            ErrorKind::TableRedefinition => "table redefinition",
            ErrorKind::DuplicateKey => "duplicate key",
            ErrorKind::TrailingCharacters => "trailing characters",
            ErrorKind::UnexpectedCharacter => "unexpected character",
            ErrorKind::KeyNotFound => "key not found",
            ErrorKind::Deserialize => "deserialize error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{kind} at line {line}: {message}")]
    Syntax {
        kind: ErrorKind,
        line: usize,
        message: String,
    },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn syntax(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            kind,
            line,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Syntax { kind, .. } => *kind,
            Error::KeyNotFound(_) => ErrorKind::KeyNotFound,
            Error::Message(_) => ErrorKind::Deserialize,
        }
    }

    /// 1-based source line for parse errors, `None` for everything else.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
