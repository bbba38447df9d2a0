//! Streaming JSON tokeniser that drives a [`Handler`].

use alloc::vec::Vec;

use crate::limits::STACK_LIMIT;
use crate::{CodecError, ErrorCode, Handler};

/// Parse one JSON document from UTF-8 `input`, driving `handler`.
///
/// Strings (values and object keys alike) are delivered through
/// [`Handler::string16`] after escape processing and transcoding to UTF-16;
/// `\uXXXX` escapes pass through as raw code units, so surrogate pairs
/// arrive as two units. Numbers route through `f64`; values that are
/// integral and within the signed 32-bit range surface as
/// [`Handler::int32`], everything else as [`Handler::double`].
///
/// # Errors
///
/// On the first syntax error the tokeniser delivers a terminal
/// [`Handler::error`] event, stops, and returns the same error with the byte
/// offset where it was detected.
pub fn parse_json<H: Handler>(input: &[u8], handler: &mut H) -> Result<(), CodecError> {
    let mut parser = JsonParser::new(input);
    match parser.parse_document(handler) {
        Ok(()) => Ok(()),
        Err(error) => {
            handler.error(error);
            Err(error)
        }
    }
}

struct JsonParser<'a> {
    data: &'a [u8],
    pos: usize,
    // Reused across string literals; strings never nest.
    scratch: Vec<u16>,
}

impl<'a> JsonParser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            scratch: Vec::new(),
        }
    }

    fn parse_document<H: Handler>(&mut self, handler: &mut H) -> Result<(), CodecError> {
        self.skip_whitespace();
        if self.pos == self.data.len() {
            return Err(CodecError::new(ErrorCode::JsonNoInput, self.pos));
        }
        self.parse_value(0, handler)?;
        self.skip_whitespace();
        if self.pos != self.data.len() {
            return Err(CodecError::new(ErrorCode::JsonTrailingInput, self.pos));
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.data.get(self.pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn parse_value<H: Handler>(&mut self, depth: usize, handler: &mut H) -> Result<(), CodecError> {
        self.skip_whitespace();
        if depth > STACK_LIMIT {
            return Err(CodecError::new(ErrorCode::JsonStackLimitExceeded, self.pos));
        }
        match self.data.get(self.pos) {
            None => Err(CodecError::new(ErrorCode::JsonValueExpected, self.pos)),
            Some(b'{') => {
                self.pos += 1;
                handler.object_begin();
                self.parse_object(depth + 1, handler)
            }
            Some(b'[') => {
                self.pos += 1;
                handler.array_begin();
                self.parse_array(depth + 1, handler)
            }
            Some(b'"') => {
                self.parse_string()?;
                handler.string16(&self.scratch);
                Ok(())
            }
            Some(b't') => {
                self.expect_keyword(b"true")?;
                handler.boolean(true);
                Ok(())
            }
            Some(b'f') => {
                self.expect_keyword(b"false")?;
                handler.boolean(false);
                Ok(())
            }
            Some(b'n') => {
                self.expect_keyword(b"null")?;
                handler.null();
                Ok(())
            }
            Some(b'-' | b'0'..=b'9') => self.parse_number(handler),
            Some(b'}') => Err(CodecError::new(ErrorCode::JsonUnexpectedMapEnd, self.pos)),
            Some(b']') => Err(CodecError::new(ErrorCode::JsonUnexpectedArrayEnd, self.pos)),
            Some(_) => Err(CodecError::new(ErrorCode::JsonInvalidToken, self.pos)),
        }
    }

    /// The opening `{` has been consumed and its begin event delivered.
    fn parse_object<H: Handler>(&mut self, depth: usize, handler: &mut H) -> Result<(), CodecError> {
        self.skip_whitespace();
        if self.data.get(self.pos) == Some(&b'}') {
            self.pos += 1;
            handler.object_end();
            return Ok(());
        }
        loop {
            self.skip_whitespace();
            if self.data.get(self.pos) == Some(&b'"') {
                self.parse_string()?;
                handler.string16(&self.scratch);
            } else {
                return Err(CodecError::new(
                    ErrorCode::JsonStringLiteralExpected,
                    self.pos,
                ));
            }
            self.skip_whitespace();
            if self.data.get(self.pos) == Some(&b':') {
                self.pos += 1;
            } else {
                return Err(CodecError::new(ErrorCode::JsonColonExpected, self.pos));
            }
            self.parse_value(depth, handler)?;
            self.skip_whitespace();
            match self.data.get(self.pos) {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    handler.object_end();
                    return Ok(());
                }
                _ => {
                    return Err(CodecError::new(
                        ErrorCode::JsonCommaOrMapEndExpected,
                        self.pos,
                    ))
                }
            }
        }
    }

    /// The opening `[` has been consumed and its begin event delivered.
    fn parse_array<H: Handler>(&mut self, depth: usize, handler: &mut H) -> Result<(), CodecError> {
        self.skip_whitespace();
        if self.data.get(self.pos) == Some(&b']') {
            self.pos += 1;
            handler.array_end();
            return Ok(());
        }
        loop {
            self.parse_value(depth, handler)?;
            self.skip_whitespace();
            match self.data.get(self.pos) {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    handler.array_end();
                    return Ok(());
                }
                _ => {
                    return Err(CodecError::new(
                        ErrorCode::JsonCommaOrArrayEndExpected,
                        self.pos,
                    ))
                }
            }
        }
    }

    fn expect_keyword(&mut self, keyword: &[u8]) -> Result<(), CodecError> {
        if self.data[self.pos..].starts_with(keyword) {
            self.pos += keyword.len();
            Ok(())
        } else {
            Err(CodecError::new(ErrorCode::JsonInvalidToken, self.pos))
        }
    }

    /// Scans a string literal into `self.scratch` as UTF-16 code units.
    /// The cursor sits on the opening quote.
    fn parse_string(&mut self) -> Result<(), CodecError> {
        self.pos += 1;
        self.scratch.clear();
        loop {
            let Some(&b) = self.data.get(self.pos) else {
                return Err(CodecError::new(ErrorCode::JsonInvalidString, self.pos));
            };
            match b {
                b'"' => {
                    self.pos += 1;
                    return Ok(());
                }
                b'\\' => {
                    self.pos += 1;
                    self.parse_escape()?;
                }
                0x20..=0x7f => {
                    self.scratch.push(u16::from(b));
                    self.pos += 1;
                }
                // Raw control characters must be escaped.
                0x00..=0x1f => {
                    return Err(CodecError::new(ErrorCode::JsonInvalidString, self.pos))
                }
                _ => self.push_utf8_sequence()?,
            }
        }
    }

    /// The cursor sits on the byte after the backslash.
    fn parse_escape(&mut self) -> Result<(), CodecError> {
        let off = self.pos;
        let Some(&b) = self.data.get(self.pos) else {
            return Err(CodecError::new(ErrorCode::JsonInvalidString, off));
        };
        self.pos += 1;
        let unit: u16 = match b {
            b'"' => 0x22,
            b'\\' => 0x5c,
            b'/' => 0x2f,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => 0x0a,
            b'r' => 0x0d,
            b't' => 0x09,
            b'u' => {
                let Some(digits) = self.data.get(self.pos..self.pos + 4) else {
                    return Err(CodecError::new(ErrorCode::JsonInvalidString, off));
                };
                let mut value: u16 = 0;
                for &d in digits {
                    let nibble = hex_value(d)
                        .ok_or_else(|| CodecError::new(ErrorCode::JsonInvalidString, off))?;
                    value = value << 4 | u16::from(nibble);
                }
                self.pos += 4;
                value
            }
            _ => return Err(CodecError::new(ErrorCode::JsonInvalidString, off)),
        };
        self.scratch.push(unit);
        Ok(())
    }

    /// Transcodes one multi-byte UTF-8 sequence to UTF-16 code units. The
    /// cursor sits on the leading byte (>= 0x80).
    fn push_utf8_sequence(&mut self) -> Result<(), CodecError> {
        let off = self.pos;
        let len = match self.data[off] {
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Err(CodecError::new(ErrorCode::JsonInvalidString, off)),
        };
        let Some(chunk) = self.data.get(off..off + len) else {
            return Err(CodecError::new(ErrorCode::JsonInvalidString, off));
        };
        let s = utf8_chunk(chunk).ok_or_else(|| CodecError::new(ErrorCode::JsonInvalidString, off))?;
        self.scratch.extend(s.encode_utf16());
        self.pos = off + len;
        Ok(())
    }

    fn parse_number<H: Handler>(&mut self, handler: &mut H) -> Result<(), CodecError> {
        let start = self.pos;
        if self.data.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        match self.data.get(self.pos) {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(CodecError::new(ErrorCode::JsonInvalidNumber, start)),
        }
        if self.data.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            if !matches!(self.data.get(self.pos), Some(b'0'..=b'9')) {
                return Err(CodecError::new(ErrorCode::JsonInvalidNumber, start));
            }
            self.skip_digits();
        }
        if matches!(self.data.get(self.pos), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.data.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !matches!(self.data.get(self.pos), Some(b'0'..=b'9')) {
                return Err(CodecError::new(ErrorCode::JsonInvalidNumber, start));
            }
            self.skip_digits();
        }

        let text = core::str::from_utf8(&self.data[start..self.pos])
            .map_err(|_| CodecError::new(ErrorCode::JsonInvalidNumber, start))?;
        let value: f64 = text
            .parse()
            .map_err(|_| CodecError::new(ErrorCode::JsonInvalidNumber, start))?;
        deliver_number(value, handler);
        Ok(())
    }

    fn skip_digits(&mut self) {
        while matches!(self.data.get(self.pos), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }
}

/// Integral values within i32 surface as integers, the rest as doubles;
/// `1e999` saturates f64 parsing to infinity and stays a double.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn deliver_number<H: Handler>(value: f64, handler: &mut H) {
    let truncated = value as i64;
    if (truncated as f64) == value
        && truncated >= i64::from(i32::MIN)
        && truncated <= i64::from(i32::MAX)
    {
        handler.int32(i32::try_from(truncated).unwrap());
    } else {
        handler.double(value);
    }
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn utf8_chunk(bytes: &[u8]) -> Option<&str> {
    #[cfg(feature = "simdutf8")]
    {
        simdutf8::basic::from_utf8(bytes).ok()
    }
    #[cfg(not(feature = "simdutf8"))]
    {
        core::str::from_utf8(bytes).ok()
    }
}
