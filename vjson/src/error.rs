//! Error types shared by the value façade, the parser and the writer.

use alloc::string::String;
use core::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A location in parser input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in bytes
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Error returned by fallible value operations, parsing and I/O.
#[derive(Debug)]
pub struct Error {
    /// The specific kind of error
    pub kind: ErrorKind,
    /// Input position, for parse errors
    pub position: Option<Position>,
}

impl Error {
    /// Create an error without position information.
    pub const fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            position: None,
        }
    }

    /// Create a parse error at the given position.
    pub const fn parse(kind: ParseErrorKind, position: Position) -> Self {
        Error {
            kind: ErrorKind::Parse(kind),
            position: Some(position),
        }
    }

    /// Create an error carrying a free-form message, for handler implementations.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom(msg.into()))
    }

    pub(crate) fn not_an_object_get(key: &str) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: Operation::Get(key.into()),
        })
    }

    pub(crate) fn not_an_object_set(key: &str) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: Operation::Set(key.into()),
        })
    }

    pub(crate) fn not_an_array_insert() -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: Operation::Insert,
        })
    }

    pub(crate) fn not_an_array_index() -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: Operation::Index,
        })
    }

    pub(crate) const fn not_a(expected: &'static str) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: Operation::Convert(expected),
        })
    }

    /// Returns true if this is a type mismatch.
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }

    /// Returns true if a key lookup failed.
    pub const fn is_key_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::KeyNotFound { .. })
    }

    /// Returns true if an index was out of range.
    pub const fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind, ErrorKind::IndexOutOfRange { .. })
    }

    /// Returns true if this came from the parser.
    pub const fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse(_))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(position) = &self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

/// The operation that was attempted on a value of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Member lookup by key
    Get(String),
    /// Member assignment by key
    Set(String),
    /// Array push or insert
    Insert,
    /// Array subscript
    Index,
    /// Whole-container operation that needs an object
    Object,
    /// Whole-container operation that needs an array
    Array,
    /// Conversion to the named type
    Convert(&'static str),
}

/// Specific error kinds.
#[derive(Debug)]
pub enum ErrorKind {
    /// The operation is not valid for the value's current type
    TypeMismatch {
        /// What was attempted
        operation: Operation,
    },
    /// An object has no member with this key
    KeyNotFound {
        /// The missing key
        key: String,
    },
    /// An array subscript is past the end
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The array length at the time
        len: usize,
    },
    /// The extension holds a different concrete type
    BadExtensionCast {
        /// The requested type
        expected: &'static str,
        /// The stored type
        found: &'static str,
    },
    /// The value is not an extension
    NotAnExtension,
    /// Malformed input
    Parse(ParseErrorKind),
    /// Opening, reading or writing failed
    Io {
        /// The file, when reading from a path
        path: Option<PathBuf>,
        /// Whether the failure happened while opening (as opposed to reading)
        opening: bool,
        /// The underlying error
        source: io::Error,
    },
    /// Free-form error raised by a handler
    Custom(String),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeMismatch { operation } => match operation {
                Operation::Get(key) => write!(
                    f,
                    "Attempting to get {key} from a value that is not an object"
                ),
                Operation::Set(key) => write!(
                    f,
                    "Attempting to set {key} on a value that is not an object"
                ),
                Operation::Insert => {
                    write!(f, "Attempting to insert into a value that is not an array")
                }
                Operation::Index => write!(f, "Index on non-array value not supported"),
                Operation::Object => write!(f, "Not an object"),
                Operation::Array => write!(f, "Not an array"),
                Operation::Convert(expected) => write!(f, "Not a {expected}"),
            },
            ErrorKind::KeyNotFound { key } => write!(f, "{key} not found"),
            ErrorKind::IndexOutOfRange { index, len } => {
                write!(f, "Invalid array subscript {index} (length {len})")
            }
            ErrorKind::BadExtensionCast { expected, found } => {
                write!(f, "Bad any cast: expected {expected}, found {found}")
            }
            ErrorKind::NotAnExtension => write!(f, "Not an any value"),
            ErrorKind::Parse(kind) => write!(f, "Failed to parse json: {kind}"),
            ErrorKind::Io {
                path,
                opening,
                source,
            } => match (path, opening) {
                (Some(path), true) => write!(f, "Cannot open file {}: {source}", path.display()),
                (Some(path), false) => {
                    write!(f, "Error reading file {}: {source}", path.display())
                }
                (None, _) => write!(f, "I/O error on stream: {source}"),
            },
            ErrorKind::Custom(msg) => f.write_str(msg),
        }
    }
}

/// What the parser found wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A byte that cannot start or continue a token here
    UnexpectedChar(char),
    /// A well-formed token in the wrong place
    UnexpectedToken {
        /// What was found
        got: &'static str,
        /// What the grammar allows here
        expected: &'static str,
    },
    /// Input ended early
    UnexpectedEof(&'static str),
    /// A comma directly before `]` or `}`
    ExtraComma,
    /// Content after the root value
    TrailingCharacters,
    /// Invalid UTF-8 in the input or an unpaired surrogate escape
    InvalidUtf8,
    /// An escape sequence that JSON does not define
    InvalidEscape(char),
    /// A number literal that does not follow the JSON grammar
    InvalidNumber,
    /// Nesting deeper than `ParseOptions::max_depth`
    DepthLimitExceeded(usize),
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            ParseErrorKind::UnexpectedToken { got, expected } => {
                write!(f, "unexpected {got}, expected {expected}")
            }
            ParseErrorKind::UnexpectedEof(context) => {
                write!(f, "unexpected end of input {context}")
            }
            ParseErrorKind::ExtraComma => write!(f, "extra comma"),
            ParseErrorKind::TrailingCharacters => write!(f, "unexpected trailing characters"),
            ParseErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8"),
            ParseErrorKind::InvalidEscape(c) => write!(f, "invalid escape \\{c}"),
            ParseErrorKind::InvalidNumber => write!(f, "invalid number"),
            ParseErrorKind::DepthLimitExceeded(max) => {
                write!(f, "nesting depth exceeds the limit of {max}")
            }
        }
    }
}
