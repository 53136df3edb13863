//! Templates for new problems and variants.
//!
//! Every template is a pure function of its configuration record. Writing
//! the rendered files is left to [`crate::workspace`].

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use crate::naming::to_camel_case;
use crate::{Error, Result};

/// Concrete return type of a generated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    /// A single number, such as an index.
    #[default]
    Scalar,
    /// An array of numbers, such as a pair of indices.
    Array,
}

impl ReturnKind {
    /// Returns the TypeScript return type annotation.
    pub fn ts_type(self) -> &'static str {
        match self {
            ReturnKind::Scalar => "number",
            ReturnKind::Array => "number[]",
        }
    }

    /// Returns the placeholder value the generated body returns.
    pub fn placeholder(self) -> &'static str {
        match self {
            ReturnKind::Scalar => "-1",
            ReturnKind::Array => "[-1, -1]",
        }
    }
}

/// Return type detected from a problem's test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnHint {
    /// Expected values are arrays.
    Array,
    /// Expected values are numbers.
    Scalar,
    /// Nothing conclusive was found.
    Unknown,
}

impl ReturnHint {
    /// Resolves the hint, using `fallback` when it is [`ReturnHint::Unknown`].
    pub fn resolve(self, fallback: ReturnKind) -> ReturnKind {
        match self {
            ReturnHint::Array => ReturnKind::Array,
            ReturnHint::Scalar => ReturnKind::Scalar,
            ReturnHint::Unknown => fallback,
        }
    }
}

fn expected_value_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"expected\s*:\s*(\[[^\n]*\]|-?\d+)").expect("expected value pattern is valid"))
}

fn test_case_generic_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"TestCase\s*<\s*\{[^}]*\}\s*,\s*([^>]+?)\s*>").expect("test case generic pattern is valid")
    })
}

/// Detects the return type of a problem from the text of its `testCases.ts`.
///
/// The first literal `expected:` value wins. Without one, the expected type
/// argument of `TestCase<{ .. }, T>` is consulted.
pub fn detect_return_hint(test_cases: &str) -> ReturnHint {
    if let Some(caps) = expected_value_pattern().captures(test_cases) {
        return if caps[1].starts_with('[') {
            ReturnHint::Array
        } else {
            ReturnHint::Scalar
        };
    }

    if let Some(caps) = test_case_generic_pattern().captures(test_cases) {
        let expected: String = caps[1].chars().filter(|c| !c.is_whitespace()).collect();
        match expected.as_str() {
            "number[]" => return ReturnHint::Array,
            "number" => return ReturnHint::Scalar,
            other => log::debug!("unrecognized expected type `{}`", other),
        }
    }

    ReturnHint::Unknown
}

/// Configuration for a new variant's backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantScaffold {
    /// Exported function name, e.g. `mapVariant`.
    pub variant_symbol: String,
    /// Return type of the generated function.
    pub return_kind: ReturnKind,
}

impl VariantScaffold {
    /// Renders the placeholder variant source.
    pub fn render(&self) -> String {
        let symbol = &self.variant_symbol;
        format!(
            "/**\n * {symbol}: new variant\n * Time: O(1) placeholder, Space: O(1) placeholder\n */\n\
             export function {symbol}(arr: number[], target: number): {rt} {{\n  \
             // TODO: implement\n  \
             // Keep signature aligned with other variants (arr: number[], target: number)\n  \
             return {ret};\n}}\n",
            rt = self.return_kind.ts_type(),
            ret = self.return_kind.placeholder(),
        )
    }
}

/// Configuration for a new problem folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemScaffold {
    /// Human-readable problem name used in test output.
    pub display_name: String,
    /// Folder name under `problems/`.
    pub short_name: String,
}

impl ProblemScaffold {
    /// Creates a scaffold, deriving the folder name from the display name
    /// when no short name is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if either name ends up empty, or if the
    /// short name is not a single path component.
    pub fn new(display_name: &str, short_name: Option<&str>) -> Result<Self> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(Error::InvalidName("problem name cannot be empty".into()));
        }

        let short_name = match short_name.map(str::trim).filter(|s| !s.is_empty()) {
            Some(short) => short.to_string(),
            None => to_camel_case(display_name)
                .ok_or_else(|| Error::InvalidName(format!("could not derive a folder name from {:?}", display_name)))?,
        };
        if short_name.contains(['/', '\\']) || short_name == "." || short_name == ".." {
            return Err(Error::InvalidName(format!("{:?} is not a valid folder name", short_name)));
        }

        Ok(Self {
            display_name: display_name.to_string(),
            short_name,
        })
    }

    /// Returns every file of the scaffold as a path relative to the problem
    /// folder and its contents.
    pub fn files(&self) -> Vec<(PathBuf, String)> {
        vec![
            (PathBuf::from("index.ts"), self.index_ts()),
            (PathBuf::from("compare.ts"), self.compare_ts()),
            (["impl", "index.ts"].iter().collect(), self.registry_ts()),
            (["impl", "testCases.ts"].iter().collect(), self.test_cases_ts()),
            (["impl", "variants", "naive.ts"].iter().collect(), self.naive_variant_ts()),
        ]
    }

    /// Entry point running the test cases against the latest implementation.
    pub fn index_ts(&self) -> String {
        format!(
            "import {{ runTests }} from \"../../utils/testRunner\";\n\
             import {{ latest, testCases }} from \"./impl\";\n\n\
             // {name}\n\
             runTests(\n  \"{name}\",\n  ({{ arr, target }}) => latest.fn(arr, target),\n  testCases\n);\n",
            name = self.display_name,
        )
    }

    /// Entry point benchmarking every registered implementation.
    pub fn compare_ts(&self) -> String {
        format!(
            "import {{ runComparison }} from \"../../utils/bench\";\n\
             import {{ implementations, testCases }} from \"./impl\";\n\n\
             runComparison(\n  \"{short} implementations\",\n  implementations,\n  testCases,\n  \
             (input) => [input.arr, input.target],\n  {{ iterations: 30, warmup: 2, quiet: true }}\n);\n",
            short = self.short_name,
        )
    }

    /// Registry document with the naive variant as its only entry.
    pub fn registry_ts(&self) -> String {
        "import { naiveVariant } from \"./variants/naive\";\n\
         export { testCases } from \"./testCases\";\n\n\
         // Registry of implementations (newest last)\n\
         export const implementations = [\n  \
         { name: \"naive\", fn: (arr: number[], target: number) => naiveVariant(arr, target) },\n];\n\n\
         export const latest = implementations[implementations.length - 1];\n"
            .to_string()
    }

    /// Two example test cases to be replaced by the user.
    pub fn test_cases_ts(&self) -> String {
        format!(
            "import {{ TestCase }} from \"../../../utils/testRunner\";\n\n\
             // Test cases for {name} (scaffold)\n\
             export const testCases: TestCase<{{ arr: number[]; target: number }}, number>[] = [\n  \
             {{ input: {{ arr: [1, 2, 3, 4], target: 3 }}, expected: 2, description: \"Find index of 3\" }},\n  \
             {{ input: {{ arr: [10, 20, 30], target: 15 }}, expected: -1, description: \"Target not present\" }},\n];\n",
            name = self.display_name,
        )
    }

    /// The initial naive variant.
    pub fn naive_variant_ts(&self) -> String {
        "/**\n * naiveVariant: initial scaffold\n * Time: O(1) placeholder, Space: O(1) placeholder\n */\n\
         export function naiveVariant(arr: number[], target: number): number {\n  \
         // TODO: implement\n  \
         return -1;\n}\n"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryModel;

    #[test]
    fn test_detect_from_expected_value() {
        let array = "export const testCases = [\n  { input: { arr: [2, 7], target: 9 }, expected: [0, 1] },\n];\n";
        assert_eq!(detect_return_hint(array), ReturnHint::Array);

        let scalar = "export const testCases = [{ input: { arr: [1], target: 5 }, expected: -1 }];";
        assert_eq!(detect_return_hint(scalar), ReturnHint::Scalar);
    }

    #[test]
    fn test_detect_from_generic() {
        let array = "export const testCases: TestCase<{ arr: number[]; target: number }, number[]>[] = cases;";
        assert_eq!(detect_return_hint(array), ReturnHint::Array);

        let scalar = "export const testCases: TestCase<{ arr: number[] }, number>[] = cases;";
        assert_eq!(detect_return_hint(scalar), ReturnHint::Scalar);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_return_hint(""), ReturnHint::Unknown);
        assert_eq!(
            detect_return_hint("const testCases: TestCase<{ s: string }, string>[] = [];"),
            ReturnHint::Unknown
        );
    }

    #[test]
    fn test_resolve_uses_fallback_only_for_unknown() {
        assert_eq!(ReturnHint::Unknown.resolve(ReturnKind::Array), ReturnKind::Array);
        assert_eq!(ReturnHint::Scalar.resolve(ReturnKind::Array), ReturnKind::Scalar);
        assert_eq!(ReturnHint::Array.resolve(ReturnKind::Scalar), ReturnKind::Array);
    }

    #[test]
    fn test_variant_template() {
        let text = VariantScaffold {
            variant_symbol: "mapVariant".into(),
            return_kind: ReturnKind::Array,
        }
        .render();
        assert!(text.contains("export function mapVariant(arr: number[], target: number): number[] {"));
        assert!(text.contains("  return [-1, -1];\n}\n"));
    }

    #[test]
    fn test_problem_scaffold_names() {
        let scaffold = ProblemScaffold::new("Two Sum", None).unwrap();
        assert_eq!(scaffold.short_name, "twoSum");

        let scaffold = ProblemScaffold::new("Binary Search", Some("bs")).unwrap();
        assert_eq!(scaffold.short_name, "bs");

        assert!(ProblemScaffold::new("  ", None).is_err());
        assert!(ProblemScaffold::new("x", Some("../escape")).is_err());
    }

    #[test]
    fn test_problem_scaffold_files() {
        let scaffold = ProblemScaffold::new("Two Sum", None).unwrap();
        let files = scaffold.files();
        assert_eq!(files.len(), 5);
        assert!(files[0].1.contains("runTests(\n  \"Two Sum\","));
        assert!(files[1].1.contains("\"twoSum implementations\""));
    }

    #[test]
    fn test_scaffold_registry_is_parseable() {
        let scaffold = ProblemScaffold::new("Two Sum", None).unwrap();
        let model = RegistryModel::parse(&scaffold.registry_ts()).unwrap();
        assert_eq!(model.len(), 1);
        assert!(model.has_marker());
        assert_eq!(model.module_path_of(&model.entries()[0]), Some("./variants/naive"));
        assert_eq!(detect_return_hint(&scaffold.test_cases_ts()), ReturnHint::Scalar);
    }
}
