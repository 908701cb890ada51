#![no_main]

use libfuzzer_sys::fuzz_target;
use self_citation_scholar::models::CitingWork;

fuzz_target!(|data: &[u8]| {
    // Validation must reject, never panic
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = CitingWork::try_from_value(value);
    }
});
