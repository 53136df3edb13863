//! Fuzz target for RegistryModel::parse with arbitrary document text.
//!
//! Run with: cargo +nightly fuzz run registry_parse
//!
//! Properties being tested:
//! - The parser never panics, whatever the nesting of strings and comments
//! - Every accepted document serializes back to the exact input

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(model) = leetbox::RegistryModel::parse(text) {
            assert_eq!(model.serialize(), text, "round trip changed the document");

            let joined: String = model.regions().iter().map(|(_, s)| *s).collect();
            assert_eq!(joined, text, "regions do not cover the document");
        }
    }
});
