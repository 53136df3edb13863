//! Shared fixtures for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use leetbox::{Problem, ProblemScaffold, Workspace};
use tempfile::TempDir;

/// A registry with a single naive entry, laid out the way new problems are.
pub const TWO_SUM: &str = r#"import { naiveVariant } from "./variants/naive";
export { testCases } from "./testCases";

// Registry of implementations (newest last)
export const implementations = [
  { name: "naive", fn: (arr: number[], target: number) => naiveVariant(arr, target) },
];

export const latest = implementations[implementations.length - 1];
"#;

/// A hand-edited registry with single quotes, no semicolons and comments.
pub const HAND_EDITED: &str = "import { linearVariant } from './variants/linear'\n\
import { binaryVariant } from './variants/binary'\n\
export { testCases } from './testCases'\n\
\n\
export const implementations = [\n\
    // kept for reference\n\
    { name: \"linear\", fn: (nums: number[], k: number) => linearVariant(nums, k) },\n\
    { fn: (nums: number[], k: number) => binaryVariant(nums, k), name: \"binary\" }, // fastest\n\
]\n\
\n\
export const latest = implementations[implementations.length - 1]\n";

/// Converts a fixture to CRLF line endings.
pub fn crlf(text: &str) -> String {
    text.replace('\n', "\r\n")
}

/// Creates an empty workspace in a temporary directory.
pub fn temp_workspace() -> (TempDir, Workspace) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let workspace = Workspace::new(dir.path());
    (dir, workspace)
}

/// Creates a workspace holding one scaffolded problem.
pub fn workspace_with_problem(display_name: &str) -> (TempDir, Workspace, Problem) {
    let (dir, workspace) = temp_workspace();
    let scaffold = ProblemScaffold::new(display_name, None).expect("Invalid problem name");
    let problem = workspace
        .add_problem(&scaffold)
        .expect("Failed to scaffold problem");
    (dir, workspace, problem)
}

/// Reads a file that must exist.
pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.as_ref().display(), e))
}

/// Lists the file names in the problem's variants folder, sorted.
pub fn variant_files(problem: &Problem) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(problem.variants_dir())
        .expect("Failed to list variants")
        .map(|e| e.expect("Bad dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
