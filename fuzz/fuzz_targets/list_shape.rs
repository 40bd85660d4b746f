#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(Some(id)) = apiprobe::fuzzing::resolve_product_listing(data) {
        debug_assert!(!id.trim().is_empty());
    }
});
