//! JSON text output: an event handler that renders compact or indented JSON.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use std::io;

use crate::error::{Error, ErrorKind, Result};
use crate::handler::{ContentHandler, Scalar};
use crate::value::Value;

/// Options for JSON output.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to pretty-print with newlines and indentation (default: false)
    pub pretty: bool,

    /// Indentation string for pretty-printing (default: two spaces)
    pub indent: &'static str,

    /// Whether to write every non-ASCII character as a `\uXXXX` escape (default: false)
    pub escape_unicode: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ",
            escape_unicode: false,
        }
    }
}

impl WriteOptions {
    /// Create new default options (compact output).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty-printing with default indentation.
    pub const fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set a custom indentation string (implies pretty-printing).
    pub const fn indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self.pretty = true;
        self
    }

    /// Escape non-ASCII characters, producing pure ASCII output.
    pub const fn escape_unicode(mut self, escape: bool) -> Self {
        self.escape_unicode = escape;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Ctx {
    /// `named` is set between a member name and its value
    Object { first: bool, named: bool },
    Array { first: bool },
}

/// Renders traversal events as JSON text.
///
/// ```
/// use vjson::{JsonWriter, Value, WriteOptions};
///
/// let v = Value::parse(r#"{"a":[1,2]}"#).unwrap();
/// let mut writer = JsonWriter::with_options(WriteOptions::new().indent("\t"));
/// v.emit(&mut writer).unwrap();
/// assert_eq!(writer.finish(), "{\n\t\"a\": [\n\t\t1,\n\t\t2\n\t]\n}");
/// ```
pub struct JsonWriter {
    out: String,
    stack: Vec<Ctx>,
    options: WriteOptions,
}

impl JsonWriter {
    /// Create a writer producing compact output.
    pub fn new() -> Self {
        Self::with_options(WriteOptions::default())
    }

    /// Create a writer with the given options.
    pub const fn with_options(options: WriteOptions) -> Self {
        Self {
            out: String::new(),
            stack: Vec::new(),
            options,
        }
    }

    /// Consume the writer and return the text written so far.
    pub fn finish(self) -> String {
        self.out
    }

    fn write_indent(&mut self) {
        if self.options.pretty {
            self.out.push('\n');
            for _ in 0..self.stack.len() {
                self.out.push_str(self.options.indent);
            }
        }
    }

    fn before_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            Some(Ctx::Array { first }) => {
                let was_first = core::mem::replace(first, false);
                if !was_first {
                    self.out.push(',');
                }
                self.write_indent();
            }
            Some(Ctx::Object { named, .. }) => {
                if !core::mem::replace(named, false) {
                    return Err(Error::custom("object member written without a name"));
                }
            }
            None => {}
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        let mut rest = s;
        // Copy runs that need no escaping in one go.
        while let Some(at) = rest.bytes().position(|b| self.needs_escape(b)) {
            self.out.push_str(&rest[..at]);
            let mut chars = rest[at..].chars();
            if let Some(c) = chars.next() {
                self.write_escaped_char(c);
            }
            rest = chars.as_str();
        }
        self.out.push_str(rest);
        self.out.push('"');
    }

    const fn needs_escape(&self, b: u8) -> bool {
        b < 0x20 || b == b'"' || b == b'\\' || (b >= 0x80 && self.options.escape_unicode)
    }

    fn write_escaped_char(&mut self, c: char) {
        match c {
            '"' => self.out.push_str("\\\""),
            '\\' => self.out.push_str("\\\\"),
            '\n' => self.out.push_str("\\n"),
            '\r' => self.out.push_str("\\r"),
            '\t' => self.out.push_str("\\t"),
            '\u{08}' => self.out.push_str("\\b"),
            '\u{0C}' => self.out.push_str("\\f"),
            c if c.is_ascii_control() || (!c.is_ascii() && self.options.escape_unicode) => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    self.write_unicode_escape(*unit);
                }
            }
            c => self.out.push(c),
        }
    }

    fn write_unicode_escape(&mut self, unit: u16) {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        self.out.push_str("\\u");
        for shift in [12, 8, 4, 0] {
            self.out.push(HEX[usize::from((unit >> shift) & 0xF)] as char);
        }
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHandler for JsonWriter {
    fn begin_object(&mut self) -> Result<()> {
        self.before_value()?;
        self.out.push('{');
        self.stack.push(Ctx::Object {
            first: true,
            named: false,
        });
        Ok(())
    }

    fn name(&mut self, name: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(Ctx::Object { named: true, .. }) => {
                Err(Error::custom("member name written twice without a value"))
            }
            Some(Ctx::Object { first, named }) => {
                *named = true;
                let was_first = core::mem::replace(first, false);
                if !was_first {
                    self.out.push(',');
                }
                self.write_indent();
                self.write_string(name);
                self.out.push(':');
                if self.options.pretty {
                    self.out.push(' ');
                }
                Ok(())
            }
            _ => Err(Error::custom("name written outside of an object")),
        }
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Ctx::Object { named: true, .. }) => {
                Err(Error::custom("object closed after a name without a value"))
            }
            Some(Ctx::Object { first, .. }) => {
                // Empty objects close on the same line
                if !first {
                    self.write_indent();
                }
                self.out.push('}');
                Ok(())
            }
            _ => Err(Error::custom("end_object without matching begin_object")),
        }
    }

    fn begin_array(&mut self) -> Result<()> {
        self.before_value()?;
        self.out.push('[');
        self.stack.push(Ctx::Array { first: true });
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Ctx::Array { first }) => {
                if !first {
                    self.write_indent();
                }
                self.out.push(']');
                Ok(())
            }
            _ => Err(Error::custom("end_array without matching begin_array")),
        }
    }

    fn value(&mut self, value: Scalar<'_>) -> Result<()> {
        self.before_value()?;
        match value {
            Scalar::Null => self.out.push_str("null"),
            Scalar::Bool(true) => self.out.push_str("true"),
            Scalar::Bool(false) => self.out.push_str("false"),
            Scalar::I64(n) => self.out.push_str(itoa::Buffer::new().format(n)),
            Scalar::U64(n) => self.out.push_str(itoa::Buffer::new().format(n)),
            Scalar::F64(n) if !n.is_finite() => self.out.push_str("null"),
            Scalar::F64(n) => self.out.push_str(ryu::Buffer::new().format_finite(n)),
            Scalar::Str(s) => self.write_string(s),
        }
        Ok(())
    }
}

impl Value {
    pub(crate) fn try_to_string_with(&self, options: &WriteOptions) -> Result<String> {
        let mut writer = JsonWriter::with_options(options.clone());
        self.emit(&mut writer)?;
        Ok(writer.finish())
    }

    /// Renders this value as JSON text with the given options.
    ///
    /// # Panics
    ///
    /// Panics if an extension's [`emit`](crate::ExtensionPayload::emit) fails, as
    /// [`ToString::to_string`] does. Use [`to_writer_with`](Value::to_writer_with) to handle
    /// that case.
    #[must_use]
    pub fn to_string_with(&self, options: &WriteOptions) -> String {
        JsonPrintable::new(self, options.clone()).to_string()
    }

    /// Renders this value as indented JSON text.
    #[must_use]
    pub fn to_string_pretty(&self) -> String {
        self.to_string_with(&WriteOptions::new().pretty())
    }

    /// Writes compact JSON text to `w`.
    pub fn to_writer<W: io::Write>(&self, w: W) -> Result<()> {
        self.to_writer_with(w, &WriteOptions::default())
    }

    /// Writes JSON text with the given options to `w`.
    pub fn to_writer_with<W: io::Write>(&self, mut w: W, options: &WriteOptions) -> Result<()> {
        let text = self.try_to_string_with(options)?;
        w.write_all(text.as_bytes()).map_err(|source| {
            Error::new(ErrorKind::Io {
                path: None,
                opening: false,
                source,
            })
        })
    }
}

/// Display adapter that renders a [`Value`] as JSON with fixed options.
///
/// Returned by [`print`] and [`pretty_print`].
pub struct JsonPrintable<'a> {
    value: &'a Value,
    options: WriteOptions,
}

impl<'a> JsonPrintable<'a> {
    /// Wraps `value` for display with `options`.
    pub const fn new(value: &'a Value, options: WriteOptions) -> Self {
        JsonPrintable { value, options }
    }
}

impl fmt::Display for JsonPrintable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .value
            .try_to_string_with(&self.options)
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Displays `value` as compact JSON.
pub const fn print(value: &Value) -> JsonPrintable<'_> {
    JsonPrintable::new(
        value,
        WriteOptions {
            pretty: false,
            indent: "  ",
            escape_unicode: false,
        },
    )
}

/// Displays `value` as indented JSON.
pub const fn pretty_print(value: &Value) -> JsonPrintable<'_> {
    JsonPrintable::new(
        value,
        WriteOptions {
            pretty: true,
            indent: "  ",
            escape_unicode: false,
        },
    )
}
