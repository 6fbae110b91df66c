#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = lastschrift::verify_iban(s);
        let _ = lastschrift::verify_bic(s);
    }
});
