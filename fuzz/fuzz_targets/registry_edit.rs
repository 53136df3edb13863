//! Fuzz target for adding and removing entries on arbitrary documents.
//!
//! Run with: cargo +nightly fuzz run registry_edit
//!
//! The input is split at the first NUL byte: the head is the variant name,
//! the tail is the registry document.

#![no_main]

use libfuzzer_sys::fuzz_target;
use leetbox::{RegistryModel, RegistrySyntax, VariantName};

fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|&b| b == 0) else {
        return;
    };
    let (Ok(raw_name), Ok(text)) = (
        std::str::from_utf8(&data[..split]),
        std::str::from_utf8(&data[split + 1..]),
    ) else {
        return;
    };
    let (Ok(name), Ok(model)) = (VariantName::new(raw_name), RegistryModel::parse(text)) else {
        return;
    };

    let before = model.len();
    let module_path = name.module_path(&RegistrySyntax::default());
    if let Ok(added) = model.add_entry(name.as_str(), &name.symbol(), &module_path) {
        assert_eq!(added.len(), before + 1);
        assert_eq!(added.latest().map(|e| e.name.as_str()), Some(name.as_str()));

        let removal = added
            .remove_entry(name.as_str())
            .expect("entry that was just added must be removable");
        assert_eq!(removal.model.len(), before);
    }

    if let Some(first) = model.entries().first() {
        if let Ok(removal) = model.remove_entry(&first.name.clone()) {
            assert!(removal.model.len() < before);
        }
    }
});
