use core::fmt;

/// A structured code identifying why a message was rejected.
///
/// The codes are string-free to stay `no_std`-friendly; callers map them to
/// user-facing messages. Codes without a `Json` prefix are produced by the
/// binary layer, `Json*` codes by the JSON tokeniser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The binary parser was invoked on zero-length input.
    NoInput,
    /// The leading byte is not the indefinite-length map opener `0xBF`.
    InvalidStartByte,
    /// Input ended while expecting a map key or the map stop byte.
    UnexpectedEofInMap,
    /// Input ended while expecting an array value or the array stop byte.
    UnexpectedEofInArray,
    /// A key was consumed but input ended before its value.
    UnexpectedEofExpectedValue,
    /// The token in key position is not a 7-bit string.
    InvalidMapKey,
    /// The depth of open containers would exceed [`STACK_LIMIT`].
    ///
    /// [`STACK_LIMIT`]: crate::STACK_LIMIT
    StackLimitExceeded,
    /// The initial byte encodes a CBOR item this codec does not accept.
    UnsupportedValue,
    /// A UTF-16 string item is truncated or has an odd payload length.
    InvalidString16,
    /// A 7-bit string item is truncated.
    InvalidString8,
    /// A 7-bit string payload contains a byte with the high bit set.
    String8MustBe7Bit,
    /// A double item is truncated.
    InvalidDouble,
    /// An integer does not fit the signed 32-bit range.
    InvalidSigned,

    /// The JSON input is empty or all whitespace.
    JsonNoInput,
    /// An unrecognised token where a value was expected.
    JsonInvalidToken,
    /// A number literal violates the JSON grammar.
    JsonInvalidNumber,
    /// A string literal is unterminated, has a bad escape, or bad UTF-8.
    JsonInvalidString,
    /// `}` where a value was expected.
    JsonUnexpectedMapEnd,
    /// `]` where a value was expected.
    JsonUnexpectedArrayEnd,
    /// Missing `:` after an object key.
    JsonColonExpected,
    /// Missing `,` or `}` after an object entry.
    JsonCommaOrMapEndExpected,
    /// Missing `,` or `]` after an array element.
    JsonCommaOrArrayEndExpected,
    /// An object key is not a string literal.
    JsonStringLiteralExpected,
    /// Input ended where a value was expected.
    JsonValueExpected,
    /// Non-whitespace input remains after the document.
    JsonTrailingInput,
    /// The depth of open containers would exceed [`STACK_LIMIT`].
    ///
    /// [`STACK_LIMIT`]: crate::STACK_LIMIT
    JsonStackLimitExceeded,
}

/// A codec error with a stable code and the byte offset where it was
/// detected.
///
/// For errors discovered while consuming a value, `pos` is the offset of
/// that value's first byte; for end-of-input errors it is the total input
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset into the input where the error was detected.
    pub pos: usize,
}

impl CodecError {
    /// Construct an error at `pos`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, pos: usize) -> Self {
        Self { code, pos }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.code {
            ErrorCode::NoInput => "no input",
            ErrorCode::InvalidStartByte => "message must start with 0xbf",
            ErrorCode::UnexpectedEofInMap => "unexpected end of input in map",
            ErrorCode::UnexpectedEofInArray => "unexpected end of input in array",
            ErrorCode::UnexpectedEofExpectedValue => "unexpected end of input, expected value",
            ErrorCode::InvalidMapKey => "map keys must be 7-bit strings",
            ErrorCode::StackLimitExceeded => "nesting depth limit exceeded",
            ErrorCode::UnsupportedValue => "unsupported value",
            ErrorCode::InvalidString16 => "invalid UTF-16 string item",
            ErrorCode::InvalidString8 => "invalid 7-bit string item",
            ErrorCode::String8MustBe7Bit => "7-bit string payload has a high bit set",
            ErrorCode::InvalidDouble => "invalid double item",
            ErrorCode::InvalidSigned => "integer outside the signed 32-bit range",

            ErrorCode::JsonNoInput => "empty JSON input",
            ErrorCode::JsonInvalidToken => "invalid JSON token",
            ErrorCode::JsonInvalidNumber => "invalid JSON number",
            ErrorCode::JsonInvalidString => "invalid JSON string",
            ErrorCode::JsonUnexpectedMapEnd => "unexpected end of JSON object",
            ErrorCode::JsonUnexpectedArrayEnd => "unexpected end of JSON array",
            ErrorCode::JsonColonExpected => "colon expected",
            ErrorCode::JsonCommaOrMapEndExpected => "comma or object end expected",
            ErrorCode::JsonCommaOrArrayEndExpected => "comma or array end expected",
            ErrorCode::JsonStringLiteralExpected => "string literal expected as object key",
            ErrorCode::JsonValueExpected => "JSON value expected",
            ErrorCode::JsonTrailingInput => "unprocessed input remains",
            ErrorCode::JsonStackLimitExceeded => "JSON nesting depth limit exceeded",
        };

        write!(f, "codec error at {}: {msg}", self.pos)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}
