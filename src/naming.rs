//! Name normalization for problems and variants.

use std::fmt;

use crate::registry::RegistrySyntax;
use crate::{Error, Result};

/// Converts free-form user input into a camelCase identifier.
///
/// Every run of characters other than ASCII letters and digits is a word
/// break. The first word is lower-cased; each following word gets an
/// upper-case first letter and a lower-case remainder. Returns `None` if the
/// input contains no letters or digits.
///
/// # Example
///
/// ```rust
/// use leetbox::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("Brute force").as_deref(), Some("bruteForce"));
/// assert_eq!(to_camel_case("two-pointer SCAN").as_deref(), Some("twoPointerScan"));
/// assert_eq!(to_camel_case("!!!"), None);
/// ```
pub fn to_camel_case(input: &str) -> Option<String> {
    let mut words = input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty());

    let mut out = words.next()?.to_ascii_lowercase();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(&chars.as_str().to_ascii_lowercase());
        }
    }
    Some(out)
}

/// A normalized variant name and the identifiers derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantName(String);

impl VariantName {
    /// Suffix appended to the name to form the exported function symbol.
    pub const SYMBOL_SUFFIX: &'static str = "Variant";

    /// Normalizes raw user input into a variant name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if normalization yields an empty name.
    pub fn new(raw: &str) -> Result<Self> {
        to_camel_case(raw)
            .map(Self)
            .ok_or_else(|| Error::InvalidName(format!("could not derive a camelCase name from {:?}", raw)))
    }

    /// Returns the normalized name, which is also the entry name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the exported function symbol, e.g. `bruteForceVariant`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.0, Self::SYMBOL_SUFFIX)
    }

    /// Returns the import path relative to the registry, e.g.
    /// `./variants/bruteForce` for the default syntax.
    ///
    /// The syntax's variants prefix is used as is, so it must end with the
    /// path separator.
    pub fn module_path(&self, syntax: &RegistrySyntax) -> String {
        format!("{}{}", syntax.variants_prefix, self.0)
    }

    /// Returns the backing file name, e.g. `bruteForce.ts`.
    pub fn file_name(&self) -> String {
        format!("{}.ts", self.0)
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VariantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
