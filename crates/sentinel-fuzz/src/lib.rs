//! Fuzzing library for self-citation-scholar.
//!
//! Targets the parsing of untrusted API payloads: publication pages, citation
//! pages and citing-work validation.
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_citing_work -- -max_total_time=60
//! ```

pub use self_citation_scholar::models;
