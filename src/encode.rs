use alloc::vec::Vec;

use crate::wire;
use crate::{CodecError, Handler};

/// Streaming emitter that appends the binary wire form of each handler
/// event to a caller-owned buffer.
///
/// The encoder keeps no container stack; the driving producer is
/// responsible for matched begin/end pairing. Its status is sticky: after
/// the first [`error`] event the partial output is discarded and every
/// further event is ignored.
///
/// [`error`]: Handler::error
pub struct BinaryEncoder<'a> {
    out: &'a mut Vec<u8>,
    status: Result<(), CodecError>,
}

impl<'a> BinaryEncoder<'a> {
    /// Create an encoder appending to `out`.
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            status: Ok(()),
        }
    }

    /// The first error delivered to this encoder, if any.
    #[must_use]
    pub const fn status(&self) -> Result<(), CodecError> {
        self.status
    }
}

impl Handler for BinaryEncoder<'_> {
    fn object_begin(&mut self) {
        if self.status.is_err() {
            return;
        }
        self.out.push(wire::INITIAL_BYTE_INDEF_MAP);
    }

    fn object_end(&mut self) {
        if self.status.is_err() {
            return;
        }
        self.out.push(wire::INITIAL_BYTE_STOP);
    }

    fn array_begin(&mut self) {
        if self.status.is_err() {
            return;
        }
        self.out.push(wire::INITIAL_BYTE_INDEF_ARRAY);
    }

    fn array_end(&mut self) {
        if self.status.is_err() {
            return;
        }
        self.out.push(wire::INITIAL_BYTE_STOP);
    }

    fn string16(&mut self, units: &[u16]) {
        if self.status.is_err() {
            return;
        }
        // A string that is entirely 7-bit keeps its characters as bytes on
        // the wire.
        if units.iter().all(|&u| u < 0x80) {
            wire::encode_string8_header(units.len(), self.out);
            for &unit in units {
                self.out.push(u8::try_from(unit).unwrap());
            }
        } else {
            wire::encode_utf16_string(units, self.out);
        }
    }

    fn string8(&mut self, bytes: &[u8]) {
        if self.status.is_err() {
            return;
        }
        wire::encode_string8(bytes, self.out);
    }

    fn double(&mut self, value: f64) {
        if self.status.is_err() {
            return;
        }
        wire::encode_double(value, self.out);
    }

    fn int32(&mut self, value: i32) {
        if self.status.is_err() {
            return;
        }
        if value >= 0 {
            wire::encode_unsigned(u64::from(value.unsigned_abs()), self.out);
        } else {
            wire::encode_negative(i64::from(value), self.out);
        }
    }

    fn boolean(&mut self, value: bool) {
        if self.status.is_err() {
            return;
        }
        self.out.push(if value {
            wire::INITIAL_BYTE_TRUE
        } else {
            wire::INITIAL_BYTE_FALSE
        });
    }

    fn null(&mut self) {
        if self.status.is_err() {
            return;
        }
        self.out.push(wire::INITIAL_BYTE_NULL);
    }

    fn error(&mut self, error: CodecError) {
        if self.status.is_ok() {
            self.status = Err(error);
            self.out.clear();
        }
    }
}
