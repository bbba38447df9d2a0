use alloc::vec::Vec;

use crate::limits::STACK_LIMIT;
use crate::wire::{self, ByteReader, ItemError};
use crate::{CodecError, ErrorCode, Handler};

/// Parse one binary message, driving `handler` with one event per value.
///
/// The message must be a single indefinite-length map: `0xBF`, key/value
/// items, `0xFF`. Map keys must be 7-bit strings and are delivered through
/// [`Handler::string8`]. Bytes after the outer stop byte are ignored.
///
/// # Errors
///
/// On the first malformed item the parser delivers a terminal
/// [`Handler::error`] event, stops, and returns the same error. `pos` is the
/// offset of the offending value's first byte, or the input length for
/// end-of-input errors.
pub fn parse_binary<H: Handler>(bytes: &[u8], handler: &mut H) -> Result<(), CodecError> {
    let mut parser = BinaryParser::new(bytes);
    match parser.parse_message(handler) {
        Ok(()) => Ok(()),
        Err(error) => {
            handler.error(error);
            Err(error)
        }
    }
}

struct BinaryParser<'a> {
    reader: ByteReader<'a>,
    // Reused across string16 values; strings never nest.
    scratch: Vec<u16>,
}

impl<'a> BinaryParser<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: ByteReader::new(bytes),
            scratch: Vec::new(),
        }
    }

    fn parse_message<H: Handler>(&mut self, handler: &mut H) -> Result<(), CodecError> {
        if self.reader.is_empty() {
            return Err(CodecError::new(ErrorCode::NoInput, 0));
        }
        if self.reader.peek() != Some(wire::INITIAL_BYTE_INDEF_MAP) {
            return Err(CodecError::new(ErrorCode::InvalidStartByte, 0));
        }
        self.reader.skip_initial_byte();
        handler.object_begin();
        self.parse_map(1, handler)
    }

    /// Consumes key/value items up to and including the stop byte. The
    /// opener has already been consumed and its begin event delivered.
    fn parse_map<H: Handler>(&mut self, depth: usize, handler: &mut H) -> Result<(), CodecError> {
        loop {
            let off = self.reader.position();
            match self.reader.peek() {
                None => return Err(CodecError::new(ErrorCode::UnexpectedEofInMap, off)),
                Some(wire::INITIAL_BYTE_STOP) => {
                    self.reader.skip_initial_byte();
                    handler.object_end();
                    return Ok(());
                }
                Some(ib) if ib >> 5 == wire::MAJOR_STRING8 => {
                    match wire::decode_string8(&mut self.reader) {
                        Ok(key) => handler.string8(key),
                        Err(cause) => return Err(string8_error(cause, off)),
                    }
                }
                Some(_) => return Err(CodecError::new(ErrorCode::InvalidMapKey, off)),
            }
            self.parse_value(depth, handler)?;
        }
    }

    fn parse_array<H: Handler>(&mut self, depth: usize, handler: &mut H) -> Result<(), CodecError> {
        loop {
            match self.reader.peek() {
                None => {
                    return Err(CodecError::new(
                        ErrorCode::UnexpectedEofInArray,
                        self.reader.position(),
                    ))
                }
                Some(wire::INITIAL_BYTE_STOP) => {
                    self.reader.skip_initial_byte();
                    handler.array_end();
                    return Ok(());
                }
                Some(_) => self.parse_value(depth, handler)?,
            }
        }
    }

    fn parse_value<H: Handler>(&mut self, depth: usize, handler: &mut H) -> Result<(), CodecError> {
        let off = self.reader.position();
        if depth > STACK_LIMIT {
            return Err(CodecError::new(ErrorCode::StackLimitExceeded, off));
        }
        let Some(ib) = self.reader.peek() else {
            return Err(CodecError::new(ErrorCode::UnexpectedEofExpectedValue, off));
        };
        match ib {
            wire::INITIAL_BYTE_INDEF_MAP => {
                self.reader.skip_initial_byte();
                handler.object_begin();
                self.parse_map(depth + 1, handler)
            }
            wire::INITIAL_BYTE_INDEF_ARRAY => {
                self.reader.skip_initial_byte();
                handler.array_begin();
                self.parse_array(depth + 1, handler)
            }
            wire::INITIAL_BYTE_TRUE => {
                self.reader.skip_initial_byte();
                handler.boolean(true);
                Ok(())
            }
            wire::INITIAL_BYTE_FALSE => {
                self.reader.skip_initial_byte();
                handler.boolean(false);
                Ok(())
            }
            wire::INITIAL_BYTE_NULL => {
                self.reader.skip_initial_byte();
                handler.null();
                Ok(())
            }
            wire::INITIAL_BYTE_DOUBLE => match wire::decode_double(&mut self.reader) {
                Ok(value) => {
                    handler.double(value);
                    Ok(())
                }
                Err(_) => Err(CodecError::new(ErrorCode::InvalidDouble, off)),
            },
            // Streamed string chunks are never accepted.
            0x5f | 0x7f => Err(CodecError::new(ErrorCode::UnsupportedValue, off)),
            _ => match ib >> 5 {
                wire::MAJOR_UNSIGNED => {
                    let value = wire::decode_unsigned(&mut self.reader)
                        .map_err(|_| CodecError::new(ErrorCode::InvalidSigned, off))?;
                    let value = i32::try_from(value)
                        .map_err(|_| CodecError::new(ErrorCode::InvalidSigned, off))?;
                    handler.int32(value);
                    Ok(())
                }
                wire::MAJOR_NEGATIVE => {
                    let value = wire::decode_negative(&mut self.reader)
                        .map_err(|_| CodecError::new(ErrorCode::InvalidSigned, off))?;
                    let value = i32::try_from(value)
                        .map_err(|_| CodecError::new(ErrorCode::InvalidSigned, off))?;
                    handler.int32(value);
                    Ok(())
                }
                wire::MAJOR_STRING16 => {
                    match wire::decode_utf16_string(&mut self.reader, &mut self.scratch) {
                        Ok(()) => {
                            handler.string16(&self.scratch);
                            Ok(())
                        }
                        Err(_) => Err(CodecError::new(ErrorCode::InvalidString16, off)),
                    }
                }
                wire::MAJOR_STRING8 => match wire::decode_string8(&mut self.reader) {
                    Ok(bytes) => {
                        handler.string8(bytes);
                        Ok(())
                    }
                    Err(cause) => Err(string8_error(cause, off)),
                },
                _ => Err(CodecError::new(ErrorCode::UnsupportedValue, off)),
            },
        }
    }
}

const fn string8_error(cause: ItemError, off: usize) -> CodecError {
    match cause {
        ItemError::NotSevenBit => CodecError::new(ErrorCode::String8MustBe7Bit, off),
        _ => CodecError::new(ErrorCode::InvalidString8, off),
    }
}
