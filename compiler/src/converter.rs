//! `Convert` overloads that build a USTRUCT from its protobuf message.
//!
//! Every field shape has a branch and anything unexpected falls through to a
//! plain copy, so conversion never fails. Member names and element types come
//! from [`crate::type_map`], the same functions the declarations use.

use unreal_proto_schema::{Field, FieldKind, Message};

use crate::config::GeneratorConfig;
use crate::naming::{wire_accessor, wire_case_accessor, wire_case_constant, wire_has};
use crate::printer::Printer;
use crate::type_map::{base_type, member_name, oneof_enum_name, oneof_member_name, struct_name, FieldShape};

/// Expression converting the wire value `expr` of kind `kind` to its
/// Unreal counterpart.
pub fn convert_value(kind: &FieldKind<'_>, expr: &str, converter_class: &str) -> String {
    match kind {
        FieldKind::Message(_) => format!("{}::Convert({})", converter_class, expr),
        FieldKind::Enum(_) => format!("static_cast<{}>({})", base_type(kind), expr),
        kind if kind.is_string() => format!("FString(UTF8_TO_TCHAR({}.c_str()))", expr),
        _ => expr.to_string(),
    }
}

/// `static FName Convert(const ::pkg::Name& In);` for the class body.
pub fn emit_declaration(message: Message<'_>, p: &mut Printer) {
    let target = struct_name(message.name());
    let wire = message.cpp_type();
    p.print(
        &[("st", target.as_str()), ("wire", wire.as_str())],
        "static $st$ Convert(const $wire$& In);\n",
    );
}

/// Full definition of the converter for `message`.
pub fn emit_definition(message: Message<'_>, p: &mut Printer, config: &GeneratorConfig) {
    let target = struct_name(message.name());
    let wire = message.cpp_type();
    let class = config.converter_class.as_str();

    p.print(
        &[("st", target.as_str()), ("cn", class), ("wire", wire.as_str())],
        "$st$ $cn$::Convert(const $wire$& In) {\n",
    );
    p.indented(|p| {
        p.print(&[("st", target.as_str())], "$st$ Out{};\n");
        emit_oneof_switches(message, p, class);
        for field in message.fields().filter(|f| f.real_oneof().is_none()) {
            emit_field(&field, p, class);
        }
        p.text("return Out;\n");
    });
    p.text("}\n\n");
}

fn emit_oneof_switches(message: Message<'_>, p: &mut Printer, class: &str) {
    let wire = message.cpp_type();
    for oneof in message.real_oneofs() {
        let case_accessor = wire_case_accessor(oneof.name());
        let discriminant = oneof_member_name(oneof.name());
        let enum_type = oneof_enum_name(message.name(), oneof.name());

        p.print(&[("ca", case_accessor.as_str())], "switch (In.$ca$()) {\n");
        p.indented(|p| {
            for field in oneof.fields() {
                let member = member_name(&field);
                let constant = wire_case_constant(field.name());
                let value = convert_value(&field.kind(), &format!("In.{}()", wire_accessor(field.name())), class);
                p.print(&[("wire", wire.as_str()), ("k", constant.as_str())], "case $wire$::$k$:\n");
                p.indented(|p| {
                    p.print(&[("m", member.as_str()), ("v", value.as_str())], "Out.$m$ = $v$;\n");
                    p.print(
                        &[("d", discriminant.as_str()), ("et", enum_type.as_str()), ("m", member.as_str())],
                        "Out.$d$ = $et$::$m$;\n",
                    );
                    p.text("break;\n");
                });
            }
            p.text("default:\n");
            p.indented(|p| p.text("break;\n"));
        });
        p.text("}\n");
    }
}

fn emit_field(field: &Field<'_>, p: &mut Printer, class: &str) {
    let member = member_name(field);
    let accessor = wire_accessor(field.name());

    match FieldShape::of(field) {
        FieldShape::Map { key, value } => {
            let key = convert_value(&key.kind(), "P.first", class);
            let value = convert_value(&value.kind(), "P.second", class);
            p.print(&[("acc", accessor.as_str())], "for (const auto& P : In.$acc$()) {\n");
            p.indented(|p| {
                p.print(&[("m", member.as_str()), ("k", key.as_str()), ("v", value.as_str())], "Out.$m$.Add($k$, $v$);\n");
            });
            p.text("}\n");
        }
        FieldShape::Repeated => {
            let element = convert_value(&field.kind(), "E", class);
            p.print(&[("acc", accessor.as_str())], "for (const auto& E : In.$acc$()) {\n");
            p.indented(|p| {
                p.print(&[("m", member.as_str()), ("v", element.as_str())], "Out.$m$.Add($v$);\n");
            });
            p.text("}\n");
        }
        FieldShape::Optional => {
            let has = wire_has(field.name());
            let value = convert_value(&field.kind(), &format!("In.{}()", accessor), class);
            p.print(
                &[("has", has.as_str()), ("m", member.as_str()), ("v", value.as_str())],
                "if (In.$has$()) Out.$m$ = $v$;\n",
            );
        }
        FieldShape::Plain => {
            let value = convert_value(&field.kind(), &format!("In.{}()", accessor), class);
            p.print(&[("m", member.as_str()), ("v", value.as_str())], "Out.$m$ = $v$;\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unreal_proto_schema::Type;

    #[test]
    fn value_conversions_by_kind() {
        let class = "Conv";
        assert_eq!(
            convert_value(&FieldKind::Scalar(Type::String), "In.name()", class),
            "FString(UTF8_TO_TCHAR(In.name().c_str()))"
        );
        assert_eq!(convert_value(&FieldKind::Scalar(Type::Float), "In.x()", class), "In.x()");
        assert_eq!(convert_value(&FieldKind::Scalar(Type::Bytes), "E", class), "E");
        assert_eq!(convert_value(&FieldKind::Unrecognized(99), "E", class), "E");
    }
}
