#![no_main]

use libfuzzer_sys::fuzz_target;
use self_citation_scholar::models::{AuthorPapersPage, AuthorRecord, CitationPage};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = serde_json::from_value::<AuthorRecord>(json.clone());
        let _ = serde_json::from_value::<AuthorPapersPage>(json.clone());
        if let Ok(page) = serde_json::from_value::<CitationPage>(json) {
            let _ = page.into_citing_works().count();
        }
    }
});
