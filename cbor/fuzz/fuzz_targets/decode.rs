#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = seriallink_cbor::decode::parse(data) {
        _ = format!("{value:?}");
    }
});
