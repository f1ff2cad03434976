//! Tokenizer for JSON text held fully in memory.
//!
//! Strings and numbers come back as byte ranges into the input plus a flag or hint; decoding
//! is left to the caller so strings without escapes can be borrowed as-is.

use alloc::borrow::Cow;
use alloc::string::String;

use crate::error::ParseErrorKind;

/// Token kinds. Strings and numbers are ranges into the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    Colon,
    Comma,
    Null,
    True,
    False,
    /// Content between the quotes
    String {
        start: usize,
        end: usize,
        has_escapes: bool,
    },
    Number {
        start: usize,
        end: usize,
        hint: NumberHint,
    },
    Eof,
}

impl Token {
    /// Short description for error messages.
    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Token::ObjectStart => "'{'",
            Token::ObjectEnd => "'}'",
            Token::ArrayStart => "'['",
            Token::ArrayEnd => "']'",
            Token::Colon => "':'",
            Token::Comma => "','",
            Token::Null | Token::True | Token::False => "literal",
            Token::String { .. } => "string",
            Token::Number { .. } => "number",
            Token::Eof => "end of input",
        }
    }
}

/// What the number literal looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberHint {
    /// Digits only
    Unsigned,
    /// Leading `-`, no fraction or exponent
    Signed,
    /// Has a fraction or exponent
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    /// Byte offset of the first byte of the token
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScanError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ScanError {
    const fn new(kind: ParseErrorKind, offset: usize) -> Self {
        ScanError { kind, offset }
    }
}

pub(crate) type ScanResult<T = Spanned> = Result<T, ScanError>;

pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Offset of the first non-whitespace byte left over, if any.
    pub(crate) fn trailing(&mut self) -> Option<usize> {
        self.skip_whitespace();
        (self.pos < self.input.len()).then_some(self.pos)
    }

    pub(crate) fn next_token(&mut self) -> ScanResult {
        self.skip_whitespace();
        let bytes = self.input.as_bytes();
        let offset = self.pos;
        let Some(&b) = bytes.get(offset) else {
            return Ok(Spanned {
                token: Token::Eof,
                offset,
            });
        };

        let punct = match b {
            b'{' => Some(Token::ObjectStart),
            b'}' => Some(Token::ObjectEnd),
            b'[' => Some(Token::ArrayStart),
            b']' => Some(Token::ArrayEnd),
            b':' => Some(Token::Colon),
            b',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(token) = punct {
            self.pos += 1;
            return Ok(Spanned { token, offset });
        }

        let token = match b {
            b'"' => self.scan_string()?,
            b'-' | b'0'..=b'9' => self.scan_number()?,
            b't' => self.scan_literal("true", Token::True)?,
            b'f' => self.scan_literal("false", Token::False)?,
            b'n' => self.scan_literal("null", Token::Null)?,
            _ => return Err(self.unexpected_char_at(offset)),
        };
        Ok(Spanned { token, offset })
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = bytes.get(self.pos) {
            self.pos += 1;
        }
    }

    fn unexpected_char_at(&self, offset: usize) -> ScanError {
        let c = self.input[offset..].chars().next().unwrap_or('\0');
        ScanError::new(ParseErrorKind::UnexpectedChar(c), offset)
    }

    fn scan_string(&mut self) -> ScanResult<Token> {
        let bytes = self.input.as_bytes();
        let start = self.pos + 1;
        let mut i = start;
        let mut has_escapes = false;
        loop {
            match bytes.get(i) {
                None => {
                    return Err(ScanError::new(
                        ParseErrorKind::UnexpectedEof("in string"),
                        i,
                    ));
                }
                Some(b'"') => break,
                Some(b'\\') => {
                    has_escapes = true;
                    // The escaped byte is validated when decoding
                    i += 2;
                }
                Some(&b) if b < 0x20 => return Err(self.unexpected_char_at(i)),
                Some(_) => i += 1,
            }
        }
        self.pos = i + 1;
        Ok(Token::String {
            start,
            end: i,
            has_escapes,
        })
    }

    fn scan_number(&mut self) -> ScanResult<Token> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut i = start;
        let mut hint = NumberHint::Unsigned;

        if bytes.get(i) == Some(&b'-') {
            hint = NumberHint::Signed;
            i += 1;
        }

        match bytes.get(i) {
            Some(b'0') => {
                i += 1;
                if bytes.get(i).is_some_and(u8::is_ascii_digit) {
                    return Err(ScanError::new(ParseErrorKind::InvalidNumber, start));
                }
            }
            Some(b'1'..=b'9') => i = skip_digits(bytes, i),
            _ => return Err(ScanError::new(ParseErrorKind::InvalidNumber, start)),
        }

        if bytes.get(i) == Some(&b'.') {
            hint = NumberHint::Float;
            let frac = i + 1;
            i = skip_digits(bytes, frac);
            if i == frac {
                return Err(ScanError::new(ParseErrorKind::InvalidNumber, start));
            }
        }

        if let Some(b'e' | b'E') = bytes.get(i) {
            hint = NumberHint::Float;
            i += 1;
            if let Some(b'+' | b'-') = bytes.get(i) {
                i += 1;
            }
            let exp = i;
            i = skip_digits(bytes, exp);
            if i == exp {
                return Err(ScanError::new(ParseErrorKind::InvalidNumber, start));
            }
        }

        self.pos = i;
        Ok(Token::Number {
            start,
            end: i,
            hint,
        })
    }

    fn scan_literal(&mut self, word: &'static str, token: Token) -> ScanResult<Token> {
        if self.input[self.pos..].starts_with(word) {
            self.pos += word.len();
            return Ok(token);
        }
        let matched = self.input.as_bytes()[self.pos..]
            .iter()
            .zip(word.as_bytes())
            .take_while(|(a, b)| a == b)
            .count();
        let at = self.pos + matched;
        if at >= self.input.len() {
            Err(ScanError::new(ParseErrorKind::UnexpectedEof("in literal"), at))
        } else {
            Err(self.unexpected_char_at(at))
        }
    }
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}

/// Decodes the string content at `start..end`, borrowing when there is nothing to unescape.
pub(crate) fn decode_string(
    input: &str,
    start: usize,
    end: usize,
    has_escapes: bool,
) -> ScanResult<Cow<'_, str>> {
    let raw = &input[start..end];
    if !has_escapes {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let at = start + i;
        let Some((_, escape)) = chars.next() else {
            return Err(ScanError::new(
                ParseErrorKind::UnexpectedEof("in escape sequence"),
                at,
            ));
        };
        match escape {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let high = read_hex4(raw, i + 2, at)?;
                chars.nth(3);
                let code_point = match high {
                    0xD800..=0xDBFF => {
                        let rest = &raw[i + 6..];
                        if !rest.starts_with("\\u") {
                            return Err(ScanError::new(ParseErrorKind::InvalidUtf8, at));
                        }
                        let low = read_hex4(raw, i + 8, at)?;
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(ScanError::new(ParseErrorKind::InvalidUtf8, at));
                        }
                        chars.nth(5);
                        0x10000 + ((u32::from(high) & 0x3FF) << 10) + (u32::from(low) & 0x3FF)
                    }
                    0xDC00..=0xDFFF => {
                        return Err(ScanError::new(ParseErrorKind::InvalidUtf8, at));
                    }
                    _ => u32::from(high),
                };
                let c = char::from_u32(code_point)
                    .ok_or(ScanError::new(ParseErrorKind::InvalidUtf8, at))?;
                out.push(c);
            }
            other => return Err(ScanError::new(ParseErrorKind::InvalidEscape(other), at)),
        }
    }
    Ok(Cow::Owned(out))
}

/// Reads four hex digits at `raw[i..i + 4]`.
fn read_hex4(raw: &str, i: usize, escape_at: usize) -> ScanResult<u16> {
    let hex = raw.get(i..i + 4).ok_or(ScanError::new(
        ParseErrorKind::UnexpectedEof("in unicode escape"),
        escape_at,
    ))?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ScanError::new(ParseErrorKind::InvalidEscape('u'), escape_at));
    }
    u16::from_str_radix(hex, 16)
        .map_err(|_| ScanError::new(ParseErrorKind::InvalidEscape('u'), escape_at))
}

/// A parsed number literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ParsedNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

/// Parses the number at `start..end`. Integers that overflow 64 bits fall back to `f64`.
pub(crate) fn parse_number(
    input: &str,
    start: usize,
    end: usize,
    hint: NumberHint,
) -> ScanResult<ParsedNumber> {
    let text = &input[start..end];
    let float = || {
        text.parse::<f64>()
            .map(ParsedNumber::F64)
            .map_err(|_| ScanError::new(ParseErrorKind::InvalidNumber, start))
    };
    match hint {
        NumberHint::Unsigned => text.parse::<u64>().map(ParsedNumber::U64).or_else(|_| float()),
        NumberHint::Signed => text.parse::<i64>().map(ParsedNumber::I64).or_else(|_| float()),
        NumberHint::Float => float(),
    }
}
