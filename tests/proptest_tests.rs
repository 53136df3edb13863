//! Property-based tests using proptest.
//!
//! These tests generate registry documents with varying layout and check
//! that parsing is lossless and that edits only touch what they must.

use proptest::prelude::*;
use leetbox::RegistryModel;

/// Layout knobs of a generated registry document.
#[derive(Debug, Clone)]
struct Layout {
    names: Vec<String>,
    indent: &'static str,
    eol: &'static str,
    single_quotes: bool,
    semicolons: bool,
    trailing_comma: bool,
    marker: bool,
    comment: bool,
}

impl Layout {
    fn render(&self) -> String {
        let eol = self.eol;
        let q = if self.single_quotes { '\'' } else { '"' };
        let semi = if self.semicolons { ";" } else { "" };

        let mut out = String::new();
        for name in &self.names {
            out.push_str(&format!("import {{ {name}Variant }} from {q}./variants/{name}{q}{semi}{eol}"));
        }
        if self.marker {
            out.push_str(&format!("export {{ testCases }} from {q}./testCases{q}{semi}{eol}"));
        }
        out.push_str(eol);
        out.push_str(&format!("export const implementations = [{eol}"));
        if self.comment {
            out.push_str(&format!("{}// newest last{eol}", self.indent));
        }
        for (i, name) in self.names.iter().enumerate() {
            let last = i + 1 == self.names.len();
            let comma = if !last || self.trailing_comma { "," } else { "" };
            out.push_str(&format!(
                "{}{{ name: \"{name}\", fn: (arr: number[], target: number) => {name}Variant(arr, target) }}{comma}{eol}",
                self.indent
            ));
        }
        out.push_str(&format!("]{semi}{eol}{eol}"));
        out.push_str(&format!("export const latest = implementations[implementations.length - 1]{semi}{eol}"));
        out
    }
}

fn layout_strategy() -> impl Strategy<Value = Layout> {
    (
        proptest::collection::btree_set("[a-z][a-z0-9]{0,6}", 0..6),
        prop_oneof![Just("  "), Just("    "), Just("\t")],
        prop_oneof![Just("\n"), Just("\r\n")],
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(names, indent, eol, single_quotes, semicolons, trailing_comma, marker, comment)| Layout {
                names: names.into_iter().collect(),
                indent,
                eol,
                single_quotes,
                semicolons,
                trailing_comma,
                marker,
                comment,
            },
        )
}

fn entry_names(model: &RegistryModel) -> Vec<String> {
    model.entries().iter().map(|e| e.name.clone()).collect()
}

proptest! {
    /// Serializing a parsed document reproduces it byte for byte.
    #[test]
    fn parse_serialize_round_trip(layout in layout_strategy()) {
        let text = layout.render();
        let model = RegistryModel::parse(&text).unwrap();
        prop_assert_eq!(model.serialize(), text);
        prop_assert_eq!(entry_names(&model), layout.names.clone());
        prop_assert_eq!(model.imports().len(), layout.names.len());
    }

    /// Any text the parser accepts round-trips, whatever surrounds the list.
    #[test]
    fn accepted_text_round_trips(
        prefix in "[ -~\n]{0,40}",
        body in "[ -~\n]{0,60}",
        suffix in "[ -~\n]{0,40}",
    ) {
        let text = format!("{prefix}\nconst implementations = [{body}];\n{suffix}");
        if let Ok(model) = RegistryModel::parse(&text) {
            prop_assert_eq!(model.serialize(), text);
        }
    }

    /// A new entry is appended last and keeps every other entry in order.
    #[test]
    fn add_appends_latest(layout in layout_strategy()) {
        let text = layout.render();
        let model = RegistryModel::parse(&text).unwrap();
        let added = model.add_entry("new_entry", "newEntryVariant", "./variants/newEntry").unwrap();

        let mut expected = layout.names.clone();
        expected.push("new_entry".to_string());
        prop_assert_eq!(entry_names(&added), expected);
        prop_assert_eq!(added.imports().len(), layout.names.len() + 1);

        let reparsed = RegistryModel::parse(added.source()).unwrap();
        prop_assert_eq!(reparsed.serialize(), added.source());
        if layout.eol == "\r\n" {
            prop_assert!(!added.source().replace("\r\n", "").contains('\n'));
        }
    }

    /// Removing an entry keeps the others in their original order.
    #[test]
    fn remove_preserves_order(layout in layout_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!layout.names.is_empty());
        let text = layout.render();
        let model = RegistryModel::parse(&text).unwrap();

        let victim = pick.get(&layout.names).clone();
        let removal = model.remove_entry(&victim).unwrap();

        let expected: Vec<String> = layout.names.iter().filter(|n| **n != victim).cloned().collect();
        prop_assert_eq!(entry_names(&removal.model), expected);
        prop_assert_eq!(removal.orphaned_module, Some(format!("./variants/{victim}")));
        let import_needle = format!("{{ {victim}Variant }}");
        let arm_needle = format!("=> {victim}Variant(");
        prop_assert!(!removal.model.source().contains(&import_needle));
        prop_assert!(!removal.model.source().contains(&arm_needle));

        let closing = format!(",{}]", layout.eol);
        let keeps_trailing_comma = layout.trailing_comma && layout.names.len() > 1;
        prop_assert_eq!(removal.model.source().contains(&closing), keeps_trailing_comma);
    }

    /// Adding an entry and removing it again restores the document.
    #[test]
    fn add_then_remove_is_identity(layout in layout_strategy()) {
        let text = layout.render();
        let model = RegistryModel::parse(&text).unwrap();
        let added = model.add_entry("new_entry", "newEntryVariant", "./variants/newEntry").unwrap();
        let removal = added.remove_entry("new_entry").unwrap();
        prop_assert_eq!(removal.model.source(), text);
    }
}
