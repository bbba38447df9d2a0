#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut out = String::new();
    let _ = probe_cbor::binary_to_json(data, &mut out);
});
