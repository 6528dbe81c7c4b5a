//! `UENUM` and `USTRUCT` declarations.

use std::collections::HashSet;

use unreal_proto_schema::{Enum, Message};

use crate::config::GeneratorConfig;
use crate::naming::pascal;
use crate::printer::Printer;
use crate::type_map::{enum_name, full_type, member_name, oneof_enum_name, oneof_member_name, struct_name};

const UENUM_DECLARATION: &str = "UENUM(BlueprintType)\n";
const USTRUCT_DECLARATION: &str = "USTRUCT(BlueprintType)\n";
const UPROPERTY_VISIBLE: &str = "UPROPERTY(VisibleAnywhere, BlueprintReadOnly)\n";

/// `enum class EName : uint8` with the schema's values in declaration order.
pub fn emit_enum(enumeration: Enum<'_>, p: &mut Printer) {
    let name = enum_name(enumeration.name());
    p.print(
        &[("ue", UENUM_DECLARATION), ("n", name.as_str())],
        "$ue$enum class $n$ : uint8 {\n",
    );
    p.indented(|p| {
        for (value, number) in enumeration.values() {
            let value = pascal(value);
            let number = number.to_string();
            p.print(&[("v", value.as_str()), ("num", number.as_str())], "$v$ = $num$,\n");
        }
    });
    p.text("};\n\n");
}

/// Emits `enumeration` unless an enum with the same full name already was.
pub fn emit_enum_once(enumeration: Enum<'_>, p: &mut Printer, visited: &mut HashSet<String>) {
    if visited.insert(enumeration.full_name().to_string()) {
        emit_enum(enumeration, p);
    }
}

/// Depth-first: the message's own enums, then those of each nested message.
/// Map-entry messages hold no enums of their own and are skipped.
pub fn emit_nested_enums(message: Message<'_>, p: &mut Printer, visited: &mut HashSet<String>) {
    if message.is_map_entry() {
        return;
    }
    for enumeration in message.nested_enums() {
        emit_enum_once(enumeration, p, visited);
    }
    for nested in message.nested_messages() {
        emit_nested_enums(nested, p, visited);
    }
}

/// One discriminant enum per real oneof: `None = 0`, then a value per member.
/// Unreal does not allow `UENUM`s inside a struct body, so these go before it.
pub fn emit_oneof_enums(message: Message<'_>, p: &mut Printer) {
    for oneof in message.real_oneofs() {
        let name = oneof_enum_name(message.name(), oneof.name());
        p.print(
            &[("ue", UENUM_DECLARATION), ("n", name.as_str())],
            "$ue$enum class $n$ : uint8 {\n",
        );
        p.indented(|p| {
            p.text("None = 0,\n");
            for field in oneof.fields() {
                let value = member_name(&field);
                p.print(&[("v", value.as_str())], "$v$,\n");
            }
        });
        p.text("};\n\n");
    }
}

/// The `USTRUCT` for `message`, preceded by its oneof discriminant enums.
/// Map-entry messages produce nothing.
pub fn emit_struct(message: Message<'_>, p: &mut Printer, config: &GeneratorConfig) {
    if message.is_map_entry() {
        return;
    }

    emit_oneof_enums(message, p);

    let name = struct_name(message.name());
    let api = config.api_prefix();
    p.print(
        &[("us", USTRUCT_DECLARATION), ("api", api.as_str()), ("n", name.as_str())],
        "$us$struct $api$$n$ {\n",
    );
    p.indented(|p| {
        p.text("GENERATED_BODY()\n\n");

        for oneof in message.real_oneofs() {
            let enum_type = oneof_enum_name(message.name(), oneof.name());
            let member = oneof_member_name(oneof.name());
            p.print(
                &[("up", UPROPERTY_VISIBLE), ("en", enum_type.as_str()), ("sn", member.as_str())],
                "$up$$en$ $sn$ = $en$::None;\n\n",
            );
        }

        for field in message.fields() {
            let ty = full_type(&field);
            let member = member_name(&field);
            p.print(
                &[("up", UPROPERTY_VISIBLE), ("t", ty.as_str()), ("n", member.as_str())],
                "$up$$t$ $n$;\n\n",
            );
        }
    });
    p.text("};\n");
}
