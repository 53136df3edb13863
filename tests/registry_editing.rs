//! Registry document editing integration tests.
//!
//! These tests drive the public parsing and editing API against complete
//! registry documents.

use leetbox::registry::{EditableRegistry, OperationBuilder, RegionKind};
use leetbox::{Error, RegistryModel};

mod common;

use common::{HAND_EDITED, TWO_SUM, crlf};

fn names(model: &RegistryModel) -> Vec<&str> {
    model.entries().iter().map(|e| e.name.as_str()).collect()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_two_sum() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();
    assert_eq!(names(&model), vec!["naive"]);
    assert_eq!(model.entries()[0].symbol, "naiveVariant");
    assert_eq!(model.imports().len(), 1);
    assert_eq!(model.imports()[0].module_path, "./variants/naive");
    assert!(model.has_marker());
    assert_eq!(model.serialize(), TWO_SUM);
}

#[test]
fn test_parse_hand_edited() {
    let model = RegistryModel::parse(HAND_EDITED).unwrap();
    assert_eq!(names(&model), vec!["linear", "binary"]);
    assert_eq!(model.latest().unwrap().symbol, "binaryVariant");
    assert_eq!(model.serialize(), HAND_EDITED);
}

#[test]
fn test_regions_cover_document() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();
    let regions = model.regions();

    let joined: String = regions.iter().map(|(_, text)| *text).collect();
    assert_eq!(joined, TWO_SUM);

    let kinds: Vec<RegionKind> = regions.iter().map(|(kind, _)| *kind).collect();
    assert!(kinds.contains(&RegionKind::Import));
    assert!(kinds.contains(&RegionKind::Marker));
    assert!(kinds.contains(&RegionKind::Item));
    assert_eq!(kinds.last(), Some(&RegionKind::Trailer));
}

#[test]
fn test_parse_rejects_missing_list() {
    let err = RegistryModel::parse("export { testCases } from \"./testCases\";\n").unwrap_err();
    assert!(err.is_parse_failure());
}

#[test]
fn test_parse_rejects_unclosed_list() {
    let text = TWO_SUM.replacen("];", "", 1);
    let err = RegistryModel::parse(&text).unwrap_err();
    assert!(matches!(err, Error::UnbalancedDelimiters { .. }));
}

// =============================================================================
// Adding and Removing
// =============================================================================

#[test]
fn test_add_then_remove_scenario() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();

    let added = model.add_entry("map", "mapVariant", "./variants/map").unwrap();
    assert_eq!(names(&added), vec!["naive", "map"]);
    assert_eq!(added.latest().unwrap().name, "map");

    let text = added.source();
    let import = text.find("import { mapVariant } from \"./variants/map\";").unwrap();
    let marker = text.find("export { testCases }").unwrap();
    assert!(import < marker);

    let removal = added.remove_entry("naive").unwrap();
    assert_eq!(names(&removal.model), vec!["map"]);
    assert!(!removal.model.source().contains("naiveVariant"));
    assert_eq!(removal.orphaned_module.as_deref(), Some("./variants/naive"));
}

#[test]
fn test_add_preserves_unrelated_text() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();
    let added = model.add_entry("map", "mapVariant", "./variants/map").unwrap();

    let import = "import { mapVariant } from \"./variants/map\";\n";
    let entry = "  { name: \"map\", fn: (arr: number[], target: number) => mapVariant(arr, target) },\n";
    let text = added.source();
    assert_eq!(text.len(), TWO_SUM.len() + import.len() + entry.len());
    assert_eq!(text.replacen(import, "", 1).replacen(entry, "", 1), TWO_SUM);
}

#[test]
fn test_add_and_remove_hand_edited() {
    let model = RegistryModel::parse(HAND_EDITED).unwrap();

    let added = model.add_entry("map", "mapVariant", "./variants/map").unwrap();
    let text = added.source();
    assert!(text.contains("import { binaryVariant } from './variants/binary'\nimport { mapVariant } from './variants/map'\nexport { testCases }"));
    assert!(text.contains(
        "name: \"binary\" }, // fastest\n    { name: \"map\", fn: (nums: number[], k: number) => mapVariant(nums, k) },\n]"
    ));

    let removal = added.remove_entry("linear").unwrap();
    let text = removal.model.source();
    assert!(!text.contains("linear"));
    assert!(text.contains("    // kept for reference\n    { fn: (nums"));
    assert_eq!(names(&removal.model), vec!["binary", "map"]);
}

#[test]
fn test_remove_entry_with_trailing_comment() {
    let model = RegistryModel::parse(HAND_EDITED).unwrap();
    let removal = model.remove_entry("binary").unwrap();
    let text = removal.model.source();
    assert!(!text.contains("fastest"));
    assert!(!text.contains("binaryVariant"));
    assert!(text.contains("linearVariant(nums, k) },\n]"));
}

#[test]
fn test_crlf_document() {
    let source = crlf(TWO_SUM);
    let model = RegistryModel::parse(&source).unwrap();
    let added = model.add_entry("map", "mapVariant", "./variants/map").unwrap();

    let text = added.source();
    assert!(!text.replace("\r\n", "").contains('\n'));
    assert!(text.contains("import { mapVariant } from \"./variants/map\";\r\n"));

    let removal = added.remove_entry("map").unwrap();
    assert_eq!(removal.model.source(), source);
}

#[test]
fn test_add_then_remove_restores_document() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();
    let added = model.add_entry("map", "mapVariant", "./variants/map").unwrap();
    let removal = added.remove_entry("map").unwrap();
    assert_eq!(removal.model.source(), TWO_SUM);
}

#[test]
fn test_list_without_trailing_comma() {
    let source = HAND_EDITED.replace("}, // fastest", "} // fastest");
    let model = RegistryModel::parse(&source).unwrap();

    let removal = model.remove_entry("binary").unwrap();
    assert!(removal.model.source().contains("linearVariant(nums, k) }\n]"));

    let added = model.add_entry("map", "mapVariant", "./variants/map").unwrap();
    assert!(added.source().contains(
        "name: \"binary\" }, // fastest\n    { name: \"map\", fn: (nums: number[], k: number) => mapVariant(nums, k) }\n]"
    ));
    assert_eq!(added.remove_entry("map").unwrap().model.source(), source);
}

#[test]
fn test_quoted_name_survives_reparse() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();
    let added = model.add_entry("a\"b", "abVariant", "./variants/ab").unwrap();
    let reparsed = RegistryModel::parse(added.source()).unwrap();
    assert_eq!(names(&reparsed), vec!["naive", "a\"b"]);
}

#[test]
fn test_duplicate_and_missing_names() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();

    let err = model.add_entry("naive", "otherVariant", "./variants/other").unwrap_err();
    assert!(err.is_mutation_failure());
    assert!(matches!(err, Error::DuplicateName { .. }));

    let err = model.remove_entry("map").unwrap_err();
    assert!(err.is_mutation_failure());
    assert_eq!(model.source(), TWO_SUM);
}

#[test]
fn test_inline_list() {
    let text = "import { aVariant } from \"./variants/a\";\nimport { bVariant } from \"./variants/b\";\nexport const implementations = [{ name: \"a\", fn: (x: number) => aVariant(x) }, { name: \"b\", fn: (x: number) => bVariant(x) }];\n";
    let model = RegistryModel::parse(text).unwrap();

    let removal = model.remove_entry("a").unwrap();
    assert_eq!(
        removal.model.source(),
        "import { bVariant } from \"./variants/b\";\nexport const implementations = [{ name: \"b\", fn: (x: number) => bVariant(x) }];\n"
    );
}

// =============================================================================
// Batch Editing
// =============================================================================

#[test]
fn test_editor_batch() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();
    let mut editor = model.edit();
    editor.add("map", "mapVariant", "./variants/map").unwrap();
    editor.add("sorted", "sortedVariant", "./variants/sorted").unwrap();
    editor.remove("naive").unwrap();
    assert_eq!(editor.pending_operations(), 3);

    let result = editor.apply().unwrap();
    assert_eq!(result.entries_added, 2);
    assert_eq!(result.entries_removed, 1);
    assert_eq!(result.imports_added, 2);
    assert_eq!(result.imports_removed, 1);
    assert_eq!(names(&result.model), vec!["map", "sorted"]);
    assert!(result.is_changed());
}

#[test]
fn test_editor_rejects_on_queue() {
    let model = RegistryModel::parse(TWO_SUM).unwrap();
    let mut editor = model.edit();

    editor.remove("naive").unwrap();
    assert!(matches!(editor.remove("naive"), Err(Error::NotFound { .. })));

    editor.add("naive", "naiveVariant", "./variants/naive").unwrap();
    assert!(matches!(
        editor.add("naive", "naiveVariant", "./variants/naive"),
        Err(Error::DuplicateName { .. })
    ));
    assert_eq!(editor.pending_operations(), 2);
}

#[test]
fn test_editor_rejects_unwritable_entry() {
    let mut editor = RegistryModel::parse(TWO_SUM).unwrap().edit();
    assert!(matches!(
        editor.add("map", "map-variant", "./variants/map"),
        Err(Error::InvalidName(_))
    ));
    assert!(!editor.has_pending_operations());
}

#[test]
fn test_editor_with_built_operations() {
    let operations = OperationBuilder::new()
        .add("map", "mapVariant", "./variants/map")
        .remove("map")
        .build();

    let mut editor = RegistryModel::parse(TWO_SUM).unwrap().edit();
    editor.extend(operations).unwrap();
    let result = editor.apply().unwrap();
    assert_eq!(result.text(), TWO_SUM);
}
