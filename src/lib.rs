//! # probe-cbor
//!
//! Bidirectional codec between textual JSON and the compact binary wire form
//! of the **Probe inspector protocol**, a strict subset of CBOR (RFC 7049).
//!
//! A single event interface, [`Handler`], abstracts both directions: either
//! producer (the JSON tokeniser or the binary parser) can drive either sink
//! (the binary emitter or the JSON writer). The two pipelines are exposed as
//! [`json_to_binary`] and [`binary_to_json`].
//!
//! ## Wire format
//!
//! A message is exactly one indefinite-length map (`0xBF` .. `0xFF`). Inside
//! it the codec accepts unsigned and negative integers within the signed
//! 32-bit range, UTF-16 strings carried as byte strings (major type 2,
//! little-endian code units), 7-bit text strings (major type 3), IEEE-754
//! doubles (`0xFB`), booleans, null, and nested indefinite-length maps and
//! arrays. Everything else (tags, definite-length containers, streamed
//! string chunks, other simple values) is rejected with a structured
//! [`CodecError`] carrying a byte position.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`CodecError`].
//! - `simdutf8`: SIMD validation of multi-byte UTF-8 runs in JSON input.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and requires `alloc` for the
//! caller-owned output buffers.
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod bridge;
mod encode;
mod error;
mod handler;
mod json;
mod limits;
mod parse;
pub mod wire;
mod write;

pub use crate::bridge::{binary_to_json, json_to_binary};
pub use crate::encode::BinaryEncoder;
pub use crate::error::{CodecError, ErrorCode};
pub use crate::handler::Handler;
pub use crate::json::parse_json;
pub use crate::limits::STACK_LIMIT;
pub use crate::parse::parse_binary;
pub use crate::write::JsonWriter;
