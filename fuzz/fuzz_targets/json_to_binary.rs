#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut out = Vec::new();
    if probe_cbor::json_to_binary(data, &mut out).is_ok() {
        let mut text = String::new();
        let _ = probe_cbor::binary_to_json(&out, &mut text);
    }
});
