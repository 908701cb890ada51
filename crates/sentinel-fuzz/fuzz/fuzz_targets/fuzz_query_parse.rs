#![no_main]

use libfuzzer_sys::fuzz_target;
use self_citation_scholar::models::AuthorQuery;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = AuthorQuery::parse(raw.split_whitespace());
    }
});
