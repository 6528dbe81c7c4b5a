mod common;

use common::*;
use proptest::prelude::*;
use prost_types::field_descriptor_proto::Type;
use unreal_proto_compiler::naming::{pascal, to_pascal_case, Case};
use unreal_proto_compiler::type_map::full_type;
use unreal_proto_schema::SchemaIndex;

/// Identifiers whose words carry a letter past the first character, the
/// shape every realistic field and enum value name has. Words with no letter
/// after the first (`x`, `v1`) are left out: `x_y` becomes `XY` and then `Xy`,
/// which `letterless_tails_read_as_shouted_on_second_pass` in `naming` pins.
fn identifier() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z][0-9]{0,2}[a-zA-Z][a-zA-Z0-9]{0,5}", 1..5)
        .prop_map(|words| words.join("_"))
}

proptest! {
    #[test]
    fn strict_case_is_idempotent(name in identifier()) {
        let once = pascal(&name);
        prop_assert_eq!(pascal(&once), once);
    }

    #[test]
    fn legacy_case_is_idempotent(name in "[a-zA-Z0-9_]{0,24}") {
        let once = to_pascal_case(&name, Case::Legacy);
        prop_assert_eq!(to_pascal_case(&once, Case::Legacy), once);
    }

    #[test]
    fn strict_case_ignores_shouting(name in identifier()) {
        prop_assert_eq!(pascal(&name.to_ascii_uppercase()), pascal(&name.to_ascii_lowercase()));
    }

    #[test]
    fn pascal_output_has_no_underscores(name in "[a-zA-Z0-9_]{0,24}") {
        prop_assert!(!pascal(&name).contains('_'));
        prop_assert!(!to_pascal_case(&name, Case::Legacy).contains('_'));
    }

    #[test]
    fn field_type_ignores_sibling_messages(extra in 0usize..6) {
        let mut messages = vec![message(
            "Point",
            vec![scalar("x", 1, Type::Float), repeated("tags", 2, Type::String)],
        )];
        for i in 0..extra {
            messages.push(message(&format!("Filler{}", i), vec![scalar("v", 1, Type::Int64)]));
        }
        let files = vec![proto3_file("p.proto", messages, vec![])];
        let index = SchemaIndex::new(&files);
        let point = index.message(".game.Point").expect("Point indexed");

        let types: Vec<String> = point.fields().map(|f| full_type(&f)).collect();
        prop_assert_eq!(types, vec!["float".to_string(), "TArray<FString>".to_string()]);
    }
}
