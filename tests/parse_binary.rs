use probe_cbor::wire::{encode_string8, encode_unsigned};
use probe_cbor::{binary_to_json, parse_binary, CodecError, ErrorCode, Handler};

fn seven_bit(s: &str, out: &mut Vec<u8>) {
    encode_string8(s.as_bytes(), out);
}

fn nested_maps(depth: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    for _ in 0..depth {
        bytes.push(0xbf);
        seven_bit("key", &mut bytes);
    }
    seven_bit("innermost_value", &mut bytes);
    for _ in 0..depth {
        bytes.push(0xff);
    }
    bytes
}

fn expect_error(bytes: &[u8], code: ErrorCode, pos: usize) {
    let mut out = String::new();
    let err = binary_to_json(bytes, &mut out).unwrap_err();
    assert_eq!(err.code, code);
    assert_eq!(err.pos, pos);
    assert_eq!(out, "");
}

#[test]
fn parses_empty_map() {
    let mut out = String::new();
    binary_to_json(&[0xbf, 0xff], &mut out).unwrap();
    assert_eq!(out, "{}");
}

#[test]
fn parses_utf16_value() {
    let mut bytes = vec![0xbf];
    seven_bit("msg", &mut bytes);
    bytes.push(2 << 5 | 20);
    bytes.extend_from_slice(&[
        b'H', 0, b'e', 0, b'l', 0, b'l', 0, b'o', 0, b',', 0, b' ', 0, 0x3c, 0xd8, 0x0e, 0xdf,
        b'.', 0,
    ]);
    bytes.push(0xff);

    let mut out = String::new();
    binary_to_json(&bytes, &mut out).unwrap();
    assert_eq!(out, "{\"msg\":\"Hello, \\ud83c\\udf0e.\"}");
}

#[test]
fn ignores_trailing_bytes_after_outer_map() {
    let mut out = String::new();
    binary_to_json(&[0xbf, 0xff, 0x00, 0x41], &mut out).unwrap();
    assert_eq!(out, "{}");
}

#[test]
fn rejects_empty_input() {
    expect_error(&[], ErrorCode::NoInput, 0);
}

#[test]
fn rejects_json_text_as_start_byte() {
    // Actual JSON text must not be mistaken for a binary message.
    let json = b"{\"msg\": \"Hello, world.\"}";
    expect_error(json, ErrorCode::InvalidStartByte, 0);
}

#[test]
fn rejects_eof_where_value_expected() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    expect_error(&bytes, ErrorCode::UnexpectedEofExpectedValue, pos);
}

#[test]
fn rejects_eof_in_array() {
    let mut bytes = vec![0xbf];
    seven_bit("array", &mut bytes);
    bytes.push(0x9f);
    let pos = bytes.len();
    expect_error(&bytes, ErrorCode::UnexpectedEofInArray, pos);
}

#[test]
fn rejects_eof_in_map() {
    expect_error(&[0xbf], ErrorCode::UnexpectedEofInMap, 1);
}

#[test]
fn rejects_null_as_map_key() {
    expect_error(&[0xbf, 7 << 5 | 22], ErrorCode::InvalidMapKey, 1);
}

#[test]
fn rejects_container_as_map_key() {
    expect_error(&[0xbf, 0x9f], ErrorCode::InvalidMapKey, 1);
    expect_error(&[0xbf, 0xbf], ErrorCode::InvalidMapKey, 1);
}

#[test]
fn nesting_up_to_the_limit_parses() {
    let mut out = String::new();
    binary_to_json(&nested_maps(3), &mut out).unwrap();
    assert_eq!(out, "{\"key\":{\"key\":{\"key\":\"innermost_value\"}}}");

    out.clear();
    binary_to_json(&nested_maps(1000), &mut out).unwrap();
}

#[test]
fn nesting_past_the_limit_reports_first_offender() {
    let mut opening_segment = vec![0xbf];
    seven_bit("key", &mut opening_segment);

    let pos = opening_segment.len() * 1001;
    expect_error(&nested_maps(1001), ErrorCode::StackLimitExceeded, pos);
    // Deeper input still reports the same position.
    expect_error(&nested_maps(1200), ErrorCode::StackLimitExceeded, pos);
}

#[test]
fn rejects_unsupported_values() {
    for &(value_byte, label) in &[
        (6 << 5 | 5, "tag"),
        (0xa0, "definite-length map"),
        (0x80, "definite-length array"),
        (0xf7, "simple value undefined"),
        (0x7f, "indefinite-length text"),
        (0x5f, "indefinite-length bytes"),
    ] {
        let mut bytes = vec![0xbf];
        seven_bit("key", &mut bytes);
        let pos = bytes.len();
        bytes.push(value_byte);
        let mut out = String::new();
        let err = binary_to_json(&bytes, &mut out).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedValue, "{label}");
        assert_eq!(err.pos, pos, "{label}");
    }
}

#[test]
fn rejects_half_precision_float() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    bytes.extend_from_slice(&[0xf9, 0x3c, 0x00]);
    expect_error(&bytes, ErrorCode::UnsupportedValue, pos);
}

#[test]
fn rejects_odd_length_utf16_value() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    bytes.push(2 << 5 | 5);
    bytes.extend_from_slice(&[b' '; 5]);
    expect_error(&bytes, ErrorCode::InvalidString16, pos);
}

#[test]
fn rejects_truncated_string8_value() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    bytes.push(3 << 5 | 5);
    expect_error(&bytes, ErrorCode::InvalidString8, pos);
}

#[test]
fn rejects_high_bit_string8_value() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    bytes.push(3 << 5 | 5);
    bytes.extend_from_slice(&[0xf0; 5]);
    expect_error(&bytes, ErrorCode::String8MustBe7Bit, pos);
}

#[test]
fn rejects_truncated_double_value() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    bytes.extend_from_slice(&[0xfb, 0x31, 0x23]);
    expect_error(&bytes, ErrorCode::InvalidDouble, pos);
}

#[test]
fn rejects_unsigned_beyond_int32() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    // A fine CBOR unsigned, but far outside the signed 32-bit range.
    encode_unsigned(u64::MAX, &mut bytes);
    expect_error(&bytes, ErrorCode::InvalidSigned, pos);
}

#[test]
fn rejects_negative_beyond_int32() {
    let mut bytes = vec![0xbf];
    seven_bit("key", &mut bytes);
    let pos = bytes.len();
    // -(2^31) - 1, one past the smallest int32.
    bytes.extend_from_slice(&[0x3a, 0x80, 0x00, 0x00, 0x00]);
    expect_error(&bytes, ErrorCode::InvalidSigned, pos);
}

#[test]
fn accepts_int32_boundaries() {
    let mut bytes = vec![0xbf];
    seven_bit("max", &mut bytes);
    bytes.extend_from_slice(&[0x1a, 0x7f, 0xff, 0xff, 0xff]);
    seven_bit("min", &mut bytes);
    bytes.extend_from_slice(&[0x3a, 0x7f, 0xff, 0xff, 0xff]);
    bytes.push(0xff);

    let mut out = String::new();
    binary_to_json(&bytes, &mut out).unwrap();
    assert_eq!(out, "{\"max\":2147483647,\"min\":-2147483648}");
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    String16(Vec<u16>),
    String8(Vec<u8>),
    Double(u64),
    Int32(i32),
    Boolean(bool),
    Null,
    Error(CodecError),
}

#[derive(Default)]
struct Record {
    events: Vec<Event>,
}

impl Handler for Record {
    fn object_begin(&mut self) {
        self.events.push(Event::ObjectBegin);
    }
    fn object_end(&mut self) {
        self.events.push(Event::ObjectEnd);
    }
    fn array_begin(&mut self) {
        self.events.push(Event::ArrayBegin);
    }
    fn array_end(&mut self) {
        self.events.push(Event::ArrayEnd);
    }
    fn string16(&mut self, units: &[u16]) {
        self.events.push(Event::String16(units.to_vec()));
    }
    fn string8(&mut self, bytes: &[u8]) {
        self.events.push(Event::String8(bytes.to_vec()));
    }
    fn double(&mut self, value: f64) {
        self.events.push(Event::Double(value.to_bits()));
    }
    fn int32(&mut self, value: i32) {
        self.events.push(Event::Int32(value));
    }
    fn boolean(&mut self, value: bool) {
        self.events.push(Event::Boolean(value));
    }
    fn null(&mut self) {
        self.events.push(Event::Null);
    }
    fn error(&mut self, error: CodecError) {
        self.events.push(Event::Error(error));
    }
}

#[test]
fn delivers_one_event_per_value() {
    let mut bytes = vec![0xbf];
    seven_bit("a", &mut bytes);
    bytes.push(0x01);
    seven_bit("b", &mut bytes);
    bytes.push(0x9f);
    bytes.push(0xf5);
    bytes.push(0xf6);
    bytes.push(0xff);
    bytes.push(0xff);

    let mut record = Record::default();
    parse_binary(&bytes, &mut record).unwrap();
    assert_eq!(
        record.events,
        vec![
            Event::ObjectBegin,
            Event::String8(b"a".to_vec()),
            Event::Int32(1),
            Event::String8(b"b".to_vec()),
            Event::ArrayBegin,
            Event::Boolean(true),
            Event::Null,
            Event::ArrayEnd,
            Event::ObjectEnd,
        ]
    );
}

#[test]
fn error_event_is_terminal() {
    // A valid entry, then a tag value: the error must be the last event
    // even though more parseable bytes follow.
    let mut bytes = vec![0xbf];
    seven_bit("a", &mut bytes);
    bytes.push(0x01);
    seven_bit("b", &mut bytes);
    let pos = bytes.len();
    bytes.push(6 << 5 | 5);
    bytes.push(0x02);
    bytes.push(0xff);

    let mut record = Record::default();
    let err = parse_binary(&bytes, &mut record).unwrap_err();
    assert_eq!(err, CodecError::new(ErrorCode::UnsupportedValue, pos));
    assert_eq!(
        record.events,
        vec![
            Event::ObjectBegin,
            Event::String8(b"a".to_vec()),
            Event::Int32(1),
            Event::String8(b"b".to_vec()),
            Event::Error(err),
        ]
    );
}
