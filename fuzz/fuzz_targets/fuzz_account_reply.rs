#![no_main]

use libfuzzer_sys::fuzz_target;
use lastschrift::SepaError;
use lastschrift::core::SepaConfigBuilder;
use lastschrift::ukbank::{AccountVerifier, HttpFetch};

/// Serves the fuzz input as the service reply.
struct Reply<'a>(&'a str);

impl HttpFetch for Reply<'_> {
    fn get(&self, _url: &str) -> Result<String, SepaError> {
        Ok(self.0.to_string())
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let config = SepaConfigBuilder::new(std::env::temp_dir())
            .api_key("FUZZ")
            .build();
        // Errors are fine, panics are bugs.
        let _ = AccountVerifier::new(&config, Reply(s)).verify_account_sort_code("41234567", "400515");
    }
});
