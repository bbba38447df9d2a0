use alloc::string::String;
use alloc::vec::Vec;

use crate::encode::BinaryEncoder;
use crate::write::JsonWriter;
use crate::{json, parse, CodecError};

/// Translate one JSON document into the binary wire form, appending to
/// `out`.
///
/// The document should be a JSON object for the result to parse back as a
/// message; other top-level values encode fine but fail the framing check
/// of [`parse_binary`](crate::parse_binary).
///
/// # Errors
///
/// Returns the first tokeniser error; `out` is cleared in that case.
pub fn json_to_binary(json: &[u8], out: &mut Vec<u8>) -> Result<(), CodecError> {
    let mut encoder = BinaryEncoder::new(out);
    json::parse_json(json, &mut encoder)?;
    encoder.status()
}

/// Translate one binary message into JSON text, appending to `out`.
///
/// # Errors
///
/// Returns the first parse error; `out` is cleared in that case.
pub fn binary_to_json(bytes: &[u8], out: &mut String) -> Result<(), CodecError> {
    let mut writer = JsonWriter::new(out);
    parse::parse_binary(bytes, &mut writer)?;
    writer.status()
}
