//! Output formatting for CLI operations.

use std::path::Path;

use serde_json::json;
use leetbox::{AddedVariant, Problem, RemovedVariant, ReturnKind, VariantInfo};

/// One row of the problem listing.
pub struct ProblemRow {
    pub name: String,
    /// Variant count, or `None` when the registry could not be read.
    pub variants: Option<usize>,
    pub latest: Option<String>,
}

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats the list of problems
    fn format_problems(&self, rows: &[ProblemRow]) -> String;

    /// Formats the variants of one problem
    fn format_variants(&self, problem: &str, variants: &[VariantInfo], root: &Path) -> String;

    /// Formats the result of adding a variant
    fn format_added_variant(&self, added: &AddedVariant, root: &Path) -> String;

    /// Formats the result of removing a variant
    fn format_removed_variant(&self, removed: &RemovedVariant, root: &Path) -> String;

    /// Formats the result of adding a problem
    fn format_added_problem(&self, problem: &Problem, root: &Path) -> String;

    /// Formats the result of removing a problem
    fn format_removed_problem(&self, path: &Path, root: &Path) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_problems(&self, rows: &[ProblemRow]) -> String {
        if rows.is_empty() {
            return "No problems found.\n".to_string();
        }

        let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(7);
        let mut output = format!("{:<width$}  {:>8}  {}\n", "Problem", "Variants", "Latest");
        output.push_str(&"-".repeat(width + 20));
        output.push('\n');

        for row in rows {
            let count = row
                .variants
                .map_or_else(|| "?".to_string(), |n| n.to_string());
            output.push_str(&format!(
                "{:<width$}  {:>8}  {}\n",
                row.name,
                count,
                row.latest.as_deref().unwrap_or("-")
            ));
        }
        output
    }

    fn format_variants(&self, problem: &str, variants: &[VariantInfo], root: &Path) -> String {
        let mut output = format!("Variants of {} (latest last):\n", problem);
        if variants.is_empty() {
            output.push_str("  (none)\n");
        }
        for (i, variant) in variants.iter().enumerate() {
            let file = variant
                .file
                .as_deref()
                .map_or_else(|| "(unknown file)".to_string(), |f| relative(root, f));
            output.push_str(&format!("  {:>2}. {:<20} {}\n", i + 1, variant.name, file));
        }
        output
    }

    fn format_added_variant(&self, added: &AddedVariant, root: &Path) -> String {
        let mut output = String::from("Variant scaffold created:\n");
        output.push_str(&format!(" - File: {}\n", relative(root, &added.file)));
        output.push_str(&format!(" - Function: {}\n", added.name.symbol()));
        output.push_str(&format!(
            " - Registered in: {} (appended as new latest)\n",
            relative(root, &added.registry)
        ));
        output.push_str("\nNext steps: implement your algorithm in the new file.\n");
        output
    }

    fn format_removed_variant(&self, removed: &RemovedVariant, root: &Path) -> String {
        let mut output = String::new();
        if let Some(file) = &removed.deleted_file {
            output.push_str(&format!("Deleted file: {}\n", relative(root, file)));
        }
        if removed.missing_file.is_some() {
            output.push_str("File already missing, continuing.\n");
        }
        output.push_str(&format!("Updated: {}\n", relative(root, &removed.registry)));
        output.push_str(&format!("Variant \"{}\" removed.\n", removed.entry.name));
        output
    }

    fn format_added_problem(&self, problem: &Problem, root: &Path) -> String {
        let mut output = String::from("Problem scaffold created:\n");
        output.push_str(&format!(" - Folder: {}\n", relative(root, problem.root())));
        output.push_str(
            " - Files: index.ts, compare.ts, impl/index.ts, impl/testCases.ts, impl/variants/naive.ts\n",
        );
        output.push_str("\nNext steps:\n");
        output.push_str(" - Update test cases to match your problem input/output.\n");
        output.push_str(" - Implement the naive variant and add more variants as needed.\n");
        output
    }

    fn format_removed_problem(&self, path: &Path, root: &Path) -> String {
        format!("Problem removed: {}\n", relative(root, path))
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_problems(&self, rows: &[ProblemRow]) -> String {
        let items: Vec<_> = rows
            .iter()
            .map(|r| {
                json!({
                    "name": r.name,
                    "variants": r.variants,
                    "latest": r.latest,
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_variants(&self, problem: &str, variants: &[VariantInfo], root: &Path) -> String {
        let obj = json!({
            "problem": problem,
            "variants": variants.iter().map(|v| json!({
                "name": v.name,
                "symbol": v.symbol,
                "module_path": v.module_path,
                "file": v.file.as_deref().map(|f| relative(root, f)),
            })).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_added_variant(&self, added: &AddedVariant, root: &Path) -> String {
        let obj = json!({
            "name": added.name.as_str(),
            "symbol": added.name.symbol(),
            "file": relative(root, &added.file),
            "registry": relative(root, &added.registry),
            "return_type": match added.return_kind {
                ReturnKind::Scalar => "number",
                ReturnKind::Array => "number[]",
            },
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_removed_variant(&self, removed: &RemovedVariant, root: &Path) -> String {
        let obj = json!({
            "name": removed.entry.name,
            "symbol": removed.entry.symbol,
            "registry": relative(root, &removed.registry),
            "deleted_file": removed.deleted_file.as_deref().map(|f| relative(root, f)),
            "missing_file": removed.missing_file.as_deref().map(|f| relative(root, f)),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_added_problem(&self, problem: &Problem, root: &Path) -> String {
        let obj = json!({
            "name": problem.name(),
            "folder": relative(root, problem.root()),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_removed_problem(&self, path: &Path, root: &Path) -> String {
        let obj = json!({ "removed": relative(root, path) });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Displays `path` relative to the workspace root when it lies inside it
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rows() -> Vec<ProblemRow> {
        vec![
            ProblemRow {
                name: "binarySearch".into(),
                variants: Some(2),
                latest: Some("rightOpen".into()),
            },
            ProblemRow {
                name: "broken".into(),
                variants: None,
                latest: None,
            },
        ]
    }

    #[test]
    fn test_human_problems() {
        let text = HumanFormatter.format_problems(&rows());
        assert!(text.starts_with("Problem"));
        assert!(text.contains("binarySearch         2  rightOpen"));
        assert!(text.contains("broken               ?  -"));
    }

    #[test]
    fn test_json_problems() {
        let text = JsonFormatter.format_problems(&rows());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["name"], "binarySearch");
        assert_eq!(value[0]["variants"], 2);
        assert!(value[1]["variants"].is_null());
    }

    #[test]
    fn test_relative() {
        let root = PathBuf::from("/ws");
        assert_eq!(relative(&root, Path::new("/ws/problems/a")), "problems/a");
        assert_eq!(relative(&root, Path::new("/elsewhere")), "/elsewhere");
    }
}
