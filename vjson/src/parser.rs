//! JSON text to traversal events, and the `Value::parse*` entry points built on it.

use alloc::vec::Vec;
use core::str::FromStr;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::builder::ValueBuilder;
use crate::error::{Error, ErrorKind, ParseErrorKind, Position, Result};
use crate::handler::{ContentHandler, Scalar};
use crate::scanner::{self, ParsedNumber, ScanError, Scanner, Spanned, Token};
use crate::value::Value;

/// Options for parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Deepest allowed nesting of arrays and objects (default: 1024)
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 1024 }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit.
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decides what happens on a recoverable syntax error.
///
/// Returning `Ok(())` makes the parser carry on as if the input had been well formed;
/// returning an error aborts the parse with it. The only recoverable condition is
/// [`ParseErrorKind::ExtraComma`]: a comma directly before `]` or `}`.
pub trait ParseErrorHandler {
    /// Called once per recoverable error.
    fn error(&mut self, kind: &ParseErrorKind, position: Position) -> Result<()>;
}

/// Treats every recoverable error as fatal. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictErrorHandler;

impl ParseErrorHandler for StrictErrorHandler {
    fn error(&mut self, kind: &ParseErrorKind, position: Position) -> Result<()> {
        Err(Error::parse(kind.clone(), position))
    }
}

/// Accepts every recoverable error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientErrorHandler;

impl ParseErrorHandler for LenientErrorHandler {
    fn error(&mut self, _kind: &ParseErrorKind, _position: Position) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    /// Just after `{`
    KeyOrEnd,
    /// Just after `,`
    Key,
    Value,
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    /// Just after `[`
    ValueOrEnd,
    /// Just after `,`
    Value,
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy)]
enum Context {
    Object(ObjectState),
    Array(ArrayState),
}

struct Parser<'a, 'h> {
    input: &'a str,
    scanner: Scanner<'a>,
    handler: &'h mut dyn ContentHandler,
    errors: &'h mut dyn ParseErrorHandler,
    max_depth: usize,
    stack: Vec<Context>,
    high_water: usize,
    root_complete: bool,
}

impl Parser<'_, '_> {
    fn position(&self, offset: usize) -> Position {
        position_at(self.input, offset)
    }

    fn fail(&self, kind: ParseErrorKind, offset: usize) -> Error {
        Error::parse(kind, self.position(offset))
    }

    fn scan_error(&self, err: ScanError) -> Error {
        self.fail(err.kind, err.offset)
    }

    fn next(&mut self) -> Result<Spanned> {
        self.scanner.next_token().map_err(|e| self.scan_error(e))
    }

    fn unexpected(&self, spanned: Spanned, expected: &'static str) -> Error {
        let kind = match spanned.token {
            Token::Eof => ParseErrorKind::UnexpectedEof("while parsing value"),
            got => ParseErrorKind::UnexpectedToken {
                got: got.describe(),
                expected,
            },
        };
        self.fail(kind, spanned.offset)
    }

    fn recover(&mut self, kind: ParseErrorKind, offset: usize) -> Result<()> {
        let position = self.position(offset);
        crate::debug!(%kind, %position, "recoverable parse error");
        self.errors.error(&kind, position)
    }

    fn run(&mut self) -> Result<()> {
        while !(self.stack.is_empty() && self.root_complete) {
            let Some(&context) = self.stack.last() else {
                let spanned = self.next()?;
                self.value(spanned)?;
                continue;
            };
            let spanned = self.next()?;
            match context {
                Context::Object(state @ (ObjectState::KeyOrEnd | ObjectState::Key)) => {
                    match spanned.token {
                        Token::ObjectEnd => {
                            if state == ObjectState::Key {
                                self.recover(ParseErrorKind::ExtraComma, spanned.offset)?;
                            }
                            self.close_object()?;
                        }
                        Token::String {
                            start,
                            end,
                            has_escapes,
                        } => {
                            let name = scanner::decode_string(self.input, start, end, has_escapes)
                                .map_err(|e| self.scan_error(e))?;
                            let colon = self.next()?;
                            if colon.token != Token::Colon {
                                return Err(self.unexpected(colon, "':'"));
                            }
                            self.set_state(Context::Object(ObjectState::Value));
                            self.handler.name(&name)?;
                        }
                        _ => return Err(self.unexpected(spanned, "string or '}'")),
                    }
                }
                Context::Object(ObjectState::Value) => self.value(spanned)?,
                Context::Object(ObjectState::CommaOrEnd) => match spanned.token {
                    Token::Comma => self.set_state(Context::Object(ObjectState::Key)),
                    Token::ObjectEnd => self.close_object()?,
                    _ => return Err(self.unexpected(spanned, "',' or '}'")),
                },
                Context::Array(state @ (ArrayState::ValueOrEnd | ArrayState::Value)) => {
                    match spanned.token {
                        Token::ArrayEnd => {
                            if state == ArrayState::Value {
                                self.recover(ParseErrorKind::ExtraComma, spanned.offset)?;
                            }
                            self.close_array()?;
                        }
                        _ => self.value(spanned)?,
                    }
                }
                Context::Array(ArrayState::CommaOrEnd) => match spanned.token {
                    Token::Comma => self.set_state(Context::Array(ArrayState::Value)),
                    Token::ArrayEnd => self.close_array()?,
                    _ => return Err(self.unexpected(spanned, "',' or ']'")),
                },
            }
        }

        if let Some(offset) = self.scanner.trailing() {
            return Err(self.fail(ParseErrorKind::TrailingCharacters, offset));
        }
        Ok(())
    }

    fn set_state(&mut self, context: Context) {
        if let Some(top) = self.stack.last_mut() {
            *top = context;
        }
    }

    fn push(&mut self, context: Context, offset: usize) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(self.fail(ParseErrorKind::DepthLimitExceeded(self.max_depth), offset));
        }
        self.stack.push(context);
        self.high_water = self.high_water.max(self.stack.len());
        Ok(())
    }

    fn close_object(&mut self) -> Result<()> {
        self.stack.pop();
        self.handler.end_object()?;
        self.finish_value();
        Ok(())
    }

    fn close_array(&mut self) -> Result<()> {
        self.stack.pop();
        self.handler.end_array()?;
        self.finish_value();
        Ok(())
    }

    fn finish_value(&mut self) {
        match self.stack.last_mut() {
            Some(Context::Object(state)) => *state = ObjectState::CommaOrEnd,
            Some(Context::Array(state)) => *state = ArrayState::CommaOrEnd,
            None => self.root_complete = true,
        }
    }

    fn value(&mut self, spanned: Spanned) -> Result<()> {
        match spanned.token {
            Token::ObjectStart => {
                self.push(Context::Object(ObjectState::KeyOrEnd), spanned.offset)?;
                return self.handler.begin_object();
            }
            Token::ArrayStart => {
                self.push(Context::Array(ArrayState::ValueOrEnd), spanned.offset)?;
                return self.handler.begin_array();
            }
            Token::String {
                start,
                end,
                has_escapes,
            } => {
                let s = scanner::decode_string(self.input, start, end, has_escapes)
                    .map_err(|e| self.scan_error(e))?;
                self.handler.value(Scalar::Str(&s))?;
            }
            Token::Number { start, end, hint } => {
                let scalar = match scanner::parse_number(self.input, start, end, hint)
                    .map_err(|e| self.scan_error(e))?
                {
                    ParsedNumber::I64(n) => Scalar::I64(n),
                    ParsedNumber::U64(n) => Scalar::U64(n),
                    ParsedNumber::F64(n) => Scalar::F64(n),
                };
                self.handler.value(scalar)?;
            }
            Token::True => self.handler.value(Scalar::Bool(true))?,
            Token::False => self.handler.value(Scalar::Bool(false))?,
            Token::Null => self.handler.value(Scalar::Null)?,
            _ => return Err(self.unexpected(spanned, "value")),
        }
        self.finish_value();
        Ok(())
    }
}

/// Line and column (both 1-based) of a byte offset.
fn position_at(input: &str, offset: usize) -> Position {
    let offset = offset.min(input.len());
    let before = &input.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    Position {
        offset,
        line,
        column: offset - line_start + 1,
    }
}

/// Parses `input` and sends its events to `handler`.
///
/// Exactly one root value is accepted; anything but whitespace after it is an error.
pub fn parse_into(
    input: &str,
    handler: &mut dyn ContentHandler,
    options: &ParseOptions,
    errors: &mut dyn ParseErrorHandler,
) -> Result<()> {
    crate::debug!(len = input.len(), "parsing json");
    let mut parser = Parser {
        input,
        scanner: Scanner::new(input),
        handler,
        errors,
        max_depth: options.max_depth,
        stack: Vec::new(),
        high_water: 0,
        root_complete: false,
    };
    parser.run()?;
    crate::debug!(depth = parser.high_water, "parsed json");
    Ok(())
}

fn io_error(path: Option<&Path>, opening: bool, source: io::Error) -> Error {
    Error::new(ErrorKind::Io {
        path: path.map(Path::to_path_buf),
        opening,
        source,
    })
}

impl Value {
    /// Parses JSON text.
    ///
    /// Non-negative integers become `u64`, negative ones `i64`; fractions, exponents and
    /// integers outside 64 bits become `f64`.
    pub fn parse(input: &str) -> Result<Value> {
        Self::parse_with(input, &ParseOptions::default(), &mut StrictErrorHandler)
    }

    /// Same as [`parse`](Value::parse).
    pub fn parse_string(input: &str) -> Result<Value> {
        Self::parse(input)
    }

    /// Parses JSON text with explicit options and recoverable-error policy.
    pub fn parse_with(
        input: &str,
        options: &ParseOptions,
        errors: &mut dyn ParseErrorHandler,
    ) -> Result<Value> {
        let mut builder = ValueBuilder::new();
        parse_into(input, &mut builder, options, errors)?;
        builder.finish()
    }

    /// Parses UTF-8 encoded JSON bytes.
    pub fn parse_slice(input: &[u8]) -> Result<Value> {
        Self::parse_slice_with(input, &ParseOptions::default(), &mut StrictErrorHandler)
    }

    /// Parses UTF-8 encoded JSON bytes with explicit options and recoverable-error policy.
    pub fn parse_slice_with(
        input: &[u8],
        options: &ParseOptions,
        errors: &mut dyn ParseErrorHandler,
    ) -> Result<Value> {
        let text = core::str::from_utf8(input).map_err(|e| {
            let valid = &input[..e.valid_up_to()];
            // The prefix is valid by construction
            let prefix = core::str::from_utf8(valid).unwrap_or_default();
            Error::parse(
                ParseErrorKind::InvalidUtf8,
                position_at(prefix, prefix.len()),
            )
        })?;
        Self::parse_with(text, options, errors)
    }

    /// Reads `reader` to the end and parses the result.
    pub fn parse_reader<R: Read>(reader: R) -> Result<Value> {
        Self::parse_reader_with(reader, &ParseOptions::default(), &mut StrictErrorHandler)
    }

    /// Reads `reader` to the end and parses the result with explicit options.
    pub fn parse_reader_with<R: Read>(
        mut reader: R,
        options: &ParseOptions,
        errors: &mut dyn ParseErrorHandler,
    ) -> Result<Value> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| io_error(None, false, e))?;
        Self::parse_slice_with(&buf, options, errors)
    }

    /// Reads a whole file into memory and parses it.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
        Self::parse_file_with(path, &ParseOptions::default(), &mut StrictErrorHandler)
    }

    /// Reads a whole file into memory and parses it with explicit options.
    pub fn parse_file_with(
        path: impl AsRef<Path>,
        options: &ParseOptions,
        errors: &mut dyn ParseErrorHandler,
    ) -> Result<Value> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| io_error(Some(path), true, e))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .map_err(|e| io_error(Some(path), false, e))?;
        crate::debug!(path = %path.display(), bytes = buf.len(), "read json file");
        Self::parse_slice_with(&buf, options, errors)
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Value::parse(s)
    }
}
